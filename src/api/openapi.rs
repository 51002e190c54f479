//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{checkout, health, items, patrons};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Self-Checkout API",
        version = "1.0.0",
        description = "Patron and item validation and checkout for library kiosks",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        health::health_check,
        patrons::lookup_patron,
        items::lookup_item,
        checkout::checkout,
    ),
    components(
        schemas(
            crate::models::PatronLookupRequest,
            crate::models::PatronLookup,
            crate::models::ItemLookupRequest,
            crate::models::ItemLookup,
            crate::models::CheckoutRequest,
            crate::models::CheckoutResponse,
            crate::models::CheckoutResult,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "circulation", description = "Kiosk patron, item and checkout endpoints")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
