//! Patron lookup models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Patron lookup request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PatronLookupRequest {
    #[serde(default, deserialize_with = "super::null_as_default")]
    #[validate(length(min = 1, message = "Patron barcode is required"))]
    pub barcode: String,
}

/// Successful patron lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PatronLookup {
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Patron record as served by the upstream library API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamPatron {
    #[serde(default)]
    pub name: Option<String>,
}
