//! Patron lookup endpoint

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    api::ApiJson,
    error::AppResult,
    models::{PatronLookup, PatronLookupRequest},
    AppState,
};

/// Look up a patron by barcode
#[utoipa::path(
    post,
    path = "/lookup_patron",
    tag = "circulation",
    request_body = PatronLookupRequest,
    responses(
        (status = 200, description = "Patron found", body = PatronLookup),
        (status = 400, description = "Missing barcode", body = crate::error::ErrorResponse),
        (status = 404, description = "Patron not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Upstream or token failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn lookup_patron(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PatronLookupRequest>,
) -> AppResult<Json<PatronLookup>> {
    request.validate()?;

    let patron = state.services.circulation.lookup_patron(&request.barcode).await?;
    Ok(Json(patron))
}
