//! Error types for the self-checkout service

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Machine-readable error codes returned alongside the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Failure,
    BadValue,
    NoSuchPatron,
    NoSuchItem,
    ItemNotAvailable,
    TokenUnavailable,
    UpstreamFailure,
    RateLimited,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Patron not found. Please check the barcode and try again.")]
    PatronNotFound,

    #[error("Item not found. Please check the barcode and try again.")]
    ItemNotFound,

    #[error("Item is not available for checkout. Status: {0}")]
    ItemNotAvailable(String),

    #[error("Access token unavailable")]
    TokenUnavailable,

    #[error("Upstream API returned {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("Upstream request failed: {0}")]
    UpstreamRequest(#[from] reqwest::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether the upstream answered 404 for the requested resource
    pub fn is_upstream_not_found(&self) -> bool {
        matches!(self, AppError::UpstreamStatus(status) if *status == reqwest::StatusCode::NOT_FOUND)
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message, shown as-is by the kiosk
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: format!("{:?}", code),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone()),
            AppError::PatronNotFound => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchPatron, self.to_string())
            }
            AppError::ItemNotFound => (StatusCode::NOT_FOUND, ErrorCode::NoSuchItem, self.to_string()),
            AppError::ItemNotAvailable(_) => {
                (StatusCode::BAD_REQUEST, ErrorCode::ItemNotAvailable, self.to_string())
            }
            AppError::TokenUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::TokenUnavailable,
                self.to_string(),
            ),
            AppError::UpstreamStatus(upstream) => {
                tracing::warn!("Upstream API answered {}", upstream);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::UpstreamFailure,
                    "An unexpected error occurred.".to_string(),
                )
            }
            AppError::UpstreamRequest(e) => {
                tracing::error!("Upstream request error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::UpstreamFailure,
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());
        AppError::Validation(message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
