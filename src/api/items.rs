//! Item lookup endpoint

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    api::ApiJson,
    error::AppResult,
    models::{ItemLookup, ItemLookupRequest},
    AppState,
};

/// Look up an item by barcode and check it can be loaned
#[utoipa::path(
    post,
    path = "/lookup_item",
    tag = "circulation",
    request_body = ItemLookupRequest,
    responses(
        (status = 200, description = "Item found and available", body = ItemLookup),
        (status = 400, description = "Missing barcode or item not available", body = crate::error::ErrorResponse),
        (status = 404, description = "Item not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Upstream failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn lookup_item(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ItemLookupRequest>,
) -> AppResult<Json<ItemLookup>> {
    request.validate()?;

    let item = state.services.circulation.lookup_item(&request.barcode).await?;
    Ok(Json(item))
}
