//! Checkout endpoint

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    api::ApiJson,
    error::AppResult,
    models::{CheckoutRequest, CheckoutResponse},
    AppState,
};

/// Check out items to a patron.
///
/// Per-item failures are reported inside `results`; the request itself only
/// fails on validation or when no access token can be obtained.
#[utoipa::path(
    post,
    path = "/checkout",
    tag = "circulation",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Checkout processed", body = CheckoutResponse),
        (status = 400, description = "Missing barcodes", body = crate::error::ErrorResponse),
        (status = 500, description = "Access token unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn checkout(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    request.validate()?;

    let response = state.services.circulation.checkout(&request).await?;
    Ok(Json(response))
}
