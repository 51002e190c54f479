//! Transport between the kiosk and the self-checkout service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::models::{
    CheckoutRequest, CheckoutResponse, ItemLookup, ItemLookupRequest, PatronLookup,
    PatronLookupRequest,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The service answered with an `{error}` body
    #[error("{0}")]
    Rejected(String),

    /// The service could not be reached or answered something unreadable
    #[error("{0}")]
    Transport(String),
}

/// The three request/response calls a kiosk makes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckoutBackend: Send + Sync {
    async fn lookup_patron(&self, barcode: &str) -> Result<PatronLookup, BackendError>;

    async fn lookup_item(&self, barcode: &str) -> Result<ItemLookup, BackendError>;

    async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutResponse, BackendError>;
}

/// [`CheckoutBackend`] over HTTP against the self-checkout service
#[derive(Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        // A trailing slash makes `join` append instead of replacing the last segment
        let normalized = if server_url.ends_with('/') {
            server_url.to_string()
        } else {
            format!("{}/", server_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| BackendError::Transport(format!("Invalid server URL {}: {}", server_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let response = self.http.post(url).json(body).send().await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", path, e);
            BackendError::Transport(e.to_string())
        })?;

        let status = response.status();
        let value: serde_json::Value = response.json().await.map_err(|e| {
            BackendError::Transport(format!("Unreadable response from {} ({}): {}", path, status, e))
        })?;

        if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
            tracing::debug!("{} rejected with {}: {}", path, status, error);
            return Err(BackendError::Rejected(error.to_string()));
        }
        if !status.is_success() {
            return Err(BackendError::Rejected(format!("Service answered {}", status)));
        }

        serde_json::from_value(value)
            .map_err(|e| BackendError::Transport(format!("Unexpected response from {}: {}", path, e)))
    }
}

#[async_trait]
impl CheckoutBackend for HttpBackend {
    async fn lookup_patron(&self, barcode: &str) -> Result<PatronLookup, BackendError> {
        let body = PatronLookupRequest {
            barcode: barcode.to_string(),
        };
        self.post("lookup_patron", &body).await
    }

    async fn lookup_item(&self, barcode: &str) -> Result<ItemLookup, BackendError> {
        let body = ItemLookupRequest {
            barcode: barcode.to_string(),
        };
        self.post("lookup_item", &body).await
    }

    async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutResponse, BackendError> {
        self.post("checkout", request).await
    }
}
