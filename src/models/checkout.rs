//! Checkout submission models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Checkout request for one patron and one or more items
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default, deserialize_with = "super::null_as_default")]
    #[validate(length(min = 1, message = "Patron and item barcodes are required"))]
    pub patron_barcode: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    #[validate(length(min = 1, message = "Patron and item barcodes are required"))]
    pub item_barcodes: Vec<String>,
}

/// Outcome for a single item of a checkout request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResult {
    pub barcode: String,
    #[serde(default)]
    pub title: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckoutResult {
    pub fn checked_out(barcode: &str, title: String, due_date: Option<String>) -> Self {
        Self {
            barcode: barcode.to_string(),
            title: Some(title),
            success: true,
            due_date,
            error: None,
        }
    }

    pub fn failed(barcode: &str, title: String, error: impl Into<String>) -> Self {
        Self {
            barcode: barcode.to_string(),
            title: Some(title),
            success: false,
            due_date: None,
            error: Some(error.into()),
        }
    }
}

/// Checkout response with one result per requested item
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CheckoutResponse {
    #[serde(default)]
    pub results: Vec<CheckoutResult>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Loan created by the upstream library API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamCheckout {
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Body posted to the upstream `checkouts` collection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamCheckoutRequest<'a> {
    pub item_barcode: &'a str,
    pub patron_barcode: &'a str,
}
