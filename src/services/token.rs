//! OAuth2 client-credentials token cache for the upstream library API

use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::{
    config::LibraryConfig,
    error::{AppError, AppResult},
};

/// Tokens are dropped this long before the server-side expiry
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn from_response(response: TokenResponse, now: Instant) -> Self {
        let lifetime = Duration::from_secs(response.expires_in).saturating_sub(EXPIRY_MARGIN);
        Self {
            access_token: response.access_token,
            expires_at: now + lifetime,
        }
    }

    fn is_valid_at(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

#[derive(Clone)]
pub struct TokenService {
    http: reqwest::Client,
    config: LibraryConfig,
    cache: Arc<Mutex<Option<CachedToken>>>,
}

impl TokenService {
    pub fn new(http: reqwest::Client, config: LibraryConfig) -> Self {
        Self {
            http,
            config,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// Return the cached access token, fetching a new one when it has expired.
    ///
    /// The cache lock is held during the fetch so concurrent callers share a
    /// single request to the token endpoint.
    pub async fn access_token(&self) -> AppResult<String> {
        let mut cache = self.cache.lock().await;

        if let Some(token) = cache.as_ref().filter(|t| t.is_valid_at(Instant::now())) {
            return Ok(token.access_token.clone());
        }

        let token = self.fetch().await.map_err(|e| {
            tracing::error!("Error fetching access token: {}", e);
            AppError::TokenUnavailable
        })?;

        let access_token = token.access_token.clone();
        *cache = Some(token);
        Ok(access_token)
    }

    async fn fetch(&self) -> Result<CachedToken, reqwest::Error> {
        tracing::debug!("Requesting access token from {}", self.config.oauth_server_token);

        let response = self
            .http
            .post(&self.config.oauth_server_token)
            .basic_auth(&self.config.wskey, Some(&self.config.secret))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", self.config.scope.as_str()),
            ])
            .send()
            .await?;

        tracing::debug!("Token response status: {}", response.status());

        let body: TokenResponse = response.error_for_status()?.json().await?;
        tracing::info!("Fetched upstream access token (expires in {}s)", body.expires_in);

        Ok(CachedToken::from_response(body, Instant::now()))
    }
}
