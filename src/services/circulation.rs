//! Patron/item validation and checkout processing for kiosks

use crate::{
    error::{AppError, AppResult},
    models::{
        item::capitalize, CheckoutRequest, CheckoutResponse, CheckoutResult, ItemLookup,
        PatronLookup,
    },
    services::{library::LibraryService, token::TokenService},
};

const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone)]
pub struct CirculationService {
    library: LibraryService,
    tokens: TokenService,
}

impl CirculationService {
    pub fn new(library: LibraryService, tokens: TokenService) -> Self {
        Self { library, tokens }
    }

    /// Look up a patron by barcode
    pub async fn lookup_patron(&self, barcode: &str) -> AppResult<PatronLookup> {
        self.tokens.access_token().await?;

        let patron = self.library.get_patron(barcode).await.map_err(|e| {
            if e.is_upstream_not_found() {
                AppError::PatronNotFound
            } else {
                e
            }
        })?;

        tracing::info!("Patron lookup succeeded for barcode {}", barcode);
        Ok(PatronLookup {
            barcode: Some(barcode.to_string()),
            name: patron.name,
        })
    }

    /// Look up an item and check that its status allows a kiosk checkout
    pub async fn lookup_item(&self, barcode: &str) -> AppResult<ItemLookup> {
        let item = self.library.get_item(barcode).await.map_err(|e| {
            if e.is_upstream_not_found() {
                AppError::ItemNotFound
            } else {
                e
            }
        })?;

        let status = item.normalized_status();
        if !item.is_checkoutable() {
            tracing::info!("Item {} refused at lookup, status {}", barcode, status);
            return Err(AppError::ItemNotAvailable(status));
        }

        Ok(ItemLookup {
            barcode: Some(barcode.to_string()),
            title: item.title,
            author: item.author,
            call_number: item.call_number,
            status: Some(capitalize(&status)),
        })
    }

    /// Check out every requested item to the patron.
    ///
    /// Items are processed in request order; a failure on one item is reported
    /// in its result and does not stop the others.
    pub async fn checkout(&self, request: &CheckoutRequest) -> AppResult<CheckoutResponse> {
        self.tokens.access_token().await?;

        let mut results = Vec::with_capacity(request.item_barcodes.len());
        for barcode in &request.item_barcodes {
            results.push(self.checkout_item(&request.patron_barcode, barcode).await);
        }

        let succeeded = results.iter().filter(|r| r.success).count();
        tracing::info!(
            "Checkout for patron {}: {}/{} items loaned",
            request.patron_barcode,
            succeeded,
            results.len()
        );

        Ok(CheckoutResponse {
            results,
            message: Some("Checkout completed successfully!".to_string()),
        })
    }

    async fn checkout_item(&self, patron_barcode: &str, barcode: &str) -> CheckoutResult {
        // Title is fetched first so the summary can show it
        let title = match self.library.get_item(barcode).await {
            Ok(item) => item.title.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            Err(e) => return Self::failed(barcode, NOT_AVAILABLE.to_string(), e),
        };

        match self.library.create_checkout(barcode, patron_barcode).await {
            Ok(loan) => CheckoutResult::checked_out(barcode, title, loan.due_date),
            Err(e) => Self::failed(barcode, title, e),
        }
    }

    fn failed(barcode: &str, title: String, error: AppError) -> CheckoutResult {
        let message = match &error {
            e if e.is_upstream_not_found() => "Item or patron not found.",
            AppError::UpstreamStatus(_) => "Unexpected error occurred.",
            other => {
                tracing::error!("Error during checkout for barcode {}: {}", barcode, other);
                "Unexpected error occurred."
            }
        };
        CheckoutResult::failed(barcode, title, message)
    }
}
