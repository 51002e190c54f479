//! Item lookup models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Item lookup request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ItemLookupRequest {
    #[serde(default, deserialize_with = "super::null_as_default")]
    #[validate(length(min = 1, message = "Item barcode is required"))]
    pub barcode: String,
}

/// Successful item lookup
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemLookup {
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub call_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Item record as served by the upstream library API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub call_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl UpstreamItem {
    /// Lowercased circulation status, `unknown` when the record has none
    pub fn normalized_status(&self) -> String {
        self.status
            .as_deref()
            .unwrap_or("unknown")
            .to_lowercase()
    }

    /// Only these statuses may be checked out at a kiosk
    pub fn is_checkoutable(&self) -> bool {
        matches!(self.normalized_status().as_str(), "available" | "ready")
    }
}

/// Uppercase the first character and lowercase the rest
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
