//! Business logic services

pub mod circulation;
pub mod library;
pub mod token;

use std::time::Duration;

use crate::{
    config::LibraryConfig,
    error::{AppError, AppResult},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub tokens: token::TokenService,
    pub library: library::LibraryService,
    pub circulation: circulation::CirculationService,
}

impl Services {
    /// Create all services sharing one upstream HTTP client
    pub fn new(config: &LibraryConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("self-checkout/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        let tokens = token::TokenService::new(http.clone(), config.clone());
        let library = library::LibraryService::new(http, config, tokens.clone())?;

        Ok(Self {
            circulation: circulation::CirculationService::new(library.clone(), tokens.clone()),
            tokens,
            library,
        })
    }
}
