//! Client for the upstream library-management REST API

use reqwest::{header::ACCEPT, Method, Url};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::LibraryConfig,
    error::{AppError, AppResult},
    models::{
        checkout::{UpstreamCheckout, UpstreamCheckoutRequest},
        UpstreamItem, UpstreamPatron,
    },
    services::token::TokenService,
};

#[derive(Clone)]
pub struct LibraryService {
    http: reqwest::Client,
    base_url: Url,
    tokens: TokenService,
}

impl LibraryService {
    pub fn new(http: reqwest::Client, config: &LibraryConfig, tokens: TokenService) -> AppResult<Self> {
        let base_url = Url::parse(&config.base_api_url)
            .map_err(|e| AppError::Internal(format!("Invalid base_api_url: {}", e)))?;

        if base_url.cannot_be_a_base() {
            return Err(AppError::Internal(format!(
                "base_api_url cannot hold paths: {}",
                base_url
            )));
        }

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    /// Fetch a patron record by barcode
    pub async fn get_patron(&self, barcode: &str) -> AppResult<UpstreamPatron> {
        let url = self.endpoint(&["patrons", barcode])?;
        self.request::<(), _>(Method::GET, url, None).await
    }

    /// Fetch an item record by barcode
    pub async fn get_item(&self, barcode: &str) -> AppResult<UpstreamItem> {
        let url = self.endpoint(&["items", barcode])?;
        self.request::<(), _>(Method::GET, url, None).await
    }

    /// Loan an item to a patron
    pub async fn create_checkout(
        &self,
        item_barcode: &str,
        patron_barcode: &str,
    ) -> AppResult<UpstreamCheckout> {
        let url = self.endpoint(&["checkouts"])?;
        let body = UpstreamCheckoutRequest {
            item_barcode,
            patron_barcode,
        };
        self.request(Method::POST, url, Some(&body)).await
    }

    /// Build `{base_api_url}/{segments...}`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| AppError::Internal("base_api_url cannot hold paths".to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn request<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.tokens.access_token().await?;

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .bearer_auth(token)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("Error during API call to {}: {}", url, e);
            AppError::UpstreamRequest(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("HTTP error during API call to {} {}: {}", method, url, status);
            return Err(AppError::UpstreamStatus(status));
        }

        tracing::debug!("{} {} -> {}", method, url, status);
        Ok(response.json().await?)
    }
}
