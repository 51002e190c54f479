//! Library self-checkout
//!
//! A REST JSON service that validates patrons and items against an upstream
//! library-management API and loans items, plus the kiosk-side session
//! controller that drives a checkout from barcode scans.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod kiosk;
pub mod models;
pub mod services;
pub mod telemetry;

pub use config::{AppConfig, KioskConfig};
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let services = services::Services::new(&config.library)?;
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
