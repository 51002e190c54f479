//! Self-checkout server
//!
//! Serves the kiosk endpoints and proxies the upstream library API.

use std::net::SocketAddr;

use tracing_subscriber::fmt::writer::BoxMakeWriter;

use self_checkout::{api, config::AppConfig, telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let _log_guard = telemetry::init_tracing(
        &config.logging,
        format!("self_checkout={},tower_http=debug", config.logging.level),
        BoxMakeWriter::new(std::io::stdout),
    );

    tracing::info!("Starting self-checkout server v{}", env!("CARGO_PKG_VERSION"));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let state = AppState::new(config)?;

    // Warm the token cache; lookups retry on demand if this fails
    match state.services.tokens.access_token().await {
        Ok(_) => tracing::info!("Upstream access token acquired"),
        Err(_) => tracing::error!("Failed to fetch access token. Please check your configuration."),
    }

    let app = api::router(state)?;

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
