//! HTTP handlers and router for the self-checkout service

pub mod checkout;
pub mod health;
pub mod items;
pub mod openapi;
pub mod patrons;

use axum::{
    extract::FromRequest,
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        StatusCode,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::{AppError, AppResult, ErrorCode, ErrorResponse},
    AppState,
};

/// JSON body extractor whose rejections use the service's error shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Create the application router with all routes.
///
/// The rate limiter keys on the peer address, so the router must be served
/// with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn router(state: AppState) -> AppResult<Router> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // One request of quota comes back every `60s / requests_per_minute`
    let per_minute = state.config.rate_limit.requests_per_minute.max(1);
    let replenish_ms = (60_000 / u64::from(per_minute)).max(1);
    let governor_config = GovernorConfigBuilder::default()
        .per_millisecond(replenish_ms)
        .burst_size(per_minute)
        .finish()
        .ok_or_else(|| AppError::Internal("Invalid rate limit configuration".to_string()))?;

    let routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Kiosk endpoints
        .route("/lookup_patron", post(patrons::lookup_patron))
        .route("/lookup_item", post(items::lookup_item))
        .route("/checkout", post(checkout::checkout))
        .with_state(state);

    Ok(Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        // The layer borrows its config for the life of the process
        .layer(GovernorLayer {
            config: Box::leak(Box::new(governor_config)),
        })
        .layer(middleware::map_response(rate_limit_body))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// Replace the limiter's plain-text 429 body with the JSON error shape
async fn rate_limit_body(response: Response) -> Response {
    if response.status() != StatusCode::TOO_MANY_REQUESTS {
        return response;
    }

    let mut limited = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(ErrorResponse::new(
            ErrorCode::RateLimited,
            "Rate limit exceeded. Please try again later.",
        )),
    )
        .into_response();

    // Keep retry-after and quota headers
    for (name, value) in response.headers() {
        if name != CONTENT_TYPE && name != CONTENT_LENGTH {
            limited.headers_mut().insert(name.clone(), value.clone());
        }
    }

    limited
}
