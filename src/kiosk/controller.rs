//! Checkout session controller: command handlers over a [`Session`]

use thiserror::Error;

use crate::models::{CheckoutRequest, CheckoutResponse};

use super::{
    backend::{BackendError, CheckoutBackend},
    session::{Patron, PendingItem, Session, SessionPhase, NOT_AVAILABLE},
    view::{Buttons, CheckoutSummary, ItemRow, KioskView, Screen, StatusLine},
};

/// User-facing outcome of a refused or failed command.
///
/// `Display` is the alert text shown to the patron. None of these end the
/// session; the patron may retry any command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KioskError {
    #[error("Please find a valid patron before adding items.")]
    PatronRequired,

    #[error("This item is already in the list.")]
    DuplicateItem(String),

    #[error("Error: {0}")]
    PatronNotFound(String),

    #[error("Error: {0}")]
    ItemNotFound(String),

    #[error(
        "This book is not available for checkout. Current status: {status}.\n\
         If you believe this is in error, please ask the librarian."
    )]
    ItemUnavailable { status: String },

    #[error("Please find a valid patron and add items before checking out.")]
    CheckoutNotReady,

    #[error("Error: {0}")]
    CheckoutRejected(String),

    #[error("A checkout is already in progress.")]
    CheckoutInProgress,

    #[error("No checkout is in progress.")]
    NoCheckoutInProgress,

    #[error("Close the checkout summary first.")]
    SummaryOpen,

    #[error("Error: the checkout service could not be reached ({0})")]
    Transport(String),
}

impl KioskError {
    fn from_backend(error: BackendError, rejected: fn(String) -> KioskError) -> Self {
        match error {
            BackendError::Rejected(message) => rejected(message),
            BackendError::Transport(message) => KioskError::Transport(message),
        }
    }
}

/// A button press, dispatched by the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FindPatron(String),
    AddItem(String),
    /// Zero-based position in the pending list
    RemoveItem(usize),
    Clear,
    Checkout,
    CloseSummary,
}

pub struct Controller<B> {
    backend: B,
    session: Session,
    screen: Screen,
    checking_out: bool,
    summary: Option<CheckoutSummary>,
}

impl<B: CheckoutBackend> Controller<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: Session::new(),
            screen: Screen::default(),
            checking_out: false,
            summary: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn summary(&self) -> Option<&CheckoutSummary> {
        self.summary.as_ref()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.summary.is_some() {
            SessionPhase::Completed
        } else if self.checking_out {
            SessionPhase::CheckingOut
        } else if !self.session.patron_found() {
            SessionPhase::NoPatron
        } else if self.session.items().is_empty() {
            SessionPhase::PatronFound
        } else {
            SessionPhase::ItemsPending
        }
    }

    pub fn buttons(&self) -> Buttons {
        let idle = !self.checking_out && self.summary.is_none();
        Buttons {
            find_patron: idle,
            add_item: idle && self.session.can_add_items(),
            clear: true,
            checkout: idle && self.session.can_checkout(),
        }
    }

    pub fn view(&self) -> KioskView {
        KioskView {
            screen: self.screen.clone(),
            rows: self.session.items().iter().map(ItemRow::from).collect(),
            buttons: self.buttons(),
            summary: self.summary.clone(),
        }
    }

    /// Run one command against the session
    pub async fn dispatch(&mut self, command: Command) -> Result<(), KioskError> {
        tracing::debug!("Dispatching {:?} in phase {:?}", command, self.phase());
        match command {
            Command::FindPatron(barcode) => self.find_patron(&barcode).await,
            Command::AddItem(barcode) => self.add_item(&barcode).await,
            Command::RemoveItem(index) => self.remove_item(index).map(|_| ()),
            Command::Clear => {
                self.clear();
                Ok(())
            }
            Command::Checkout => self.checkout().await.map(|_| ()),
            Command::CloseSummary => {
                self.close_summary();
                Ok(())
            }
        }
    }

    /// Validate the patron; success enables adding items
    pub async fn find_patron(&mut self, barcode: &str) -> Result<(), KioskError> {
        self.ensure_idle()?;

        let barcode = barcode.trim();
        self.screen.patron_input = barcode.to_string();
        self.screen.patron_status = Some(StatusLine::info("Looking up patron..."));

        match self.backend.lookup_patron(barcode).await {
            Ok(lookup) => {
                let name = lookup.name.unwrap_or_else(|| NOT_AVAILABLE.to_string());
                self.screen.patron_status = Some(StatusLine::success(format!("Patron Found: {}", name)));
                self.session.set_patron(Some(Patron {
                    barcode: barcode.to_string(),
                    name,
                }));
                Ok(())
            }
            Err(e) => {
                self.screen.patron_status = Some(StatusLine::danger(format!("Error: {}", e)));
                self.session.set_patron(None);
                Err(KioskError::from_backend(e, KioskError::PatronNotFound))
            }
        }
    }

    /// Validate an item and append it to the pending list.
    ///
    /// A barcode already in the list is refused before any lookup.
    pub async fn add_item(&mut self, barcode: &str) -> Result<(), KioskError> {
        self.ensure_idle()?;
        if !self.session.can_add_items() {
            return Err(KioskError::PatronRequired);
        }

        let barcode = barcode.trim();
        self.screen.item_input = barcode.to_string();

        if self.session.contains(barcode) {
            self.screen.item_status = None;
            return Err(KioskError::DuplicateItem(barcode.to_string()));
        }

        self.screen.item_status = Some(StatusLine::info("Adding item..."));

        let lookup = match self.backend.lookup_item(barcode).await {
            Ok(lookup) => lookup,
            Err(e) => {
                self.screen.item_status = None;
                return Err(KioskError::from_backend(e, KioskError::ItemNotFound));
            }
        };

        let status = lookup.status.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
        if !status.eq_ignore_ascii_case("available") {
            self.screen.item_status = None;
            return Err(KioskError::ItemUnavailable { status });
        }

        self.session.push(PendingItem::from_lookup(barcode, lookup));
        self.screen.item_input.clear();
        self.screen.item_status = Some(StatusLine::success("Item found."));
        Ok(())
    }

    /// Drop the item at `index`; out-of-range positions are ignored
    pub fn remove_item(&mut self, index: usize) -> Result<Option<PendingItem>, KioskError> {
        self.ensure_idle()?;
        Ok(self.session.remove(index))
    }

    /// Return to the initial empty state, closing any open summary
    pub fn clear(&mut self) {
        self.session.reset();
        self.screen = Screen::default();
        self.checking_out = false;
        self.summary = None;
    }

    /// Submit every pending item for the found patron and open the summary
    pub async fn checkout(&mut self) -> Result<&CheckoutSummary, KioskError> {
        let request = self.begin_checkout()?;
        let result = self.backend.checkout(&request).await;
        self.finish_checkout(result)
    }

    /// Enter `CheckingOut` and build the request to submit.
    ///
    /// Split from [`Controller::checkout`] so a UI can render the in-flight
    /// state before awaiting the backend.
    pub fn begin_checkout(&mut self) -> Result<CheckoutRequest, KioskError> {
        self.ensure_idle()?;

        let patron = match self.session.patron() {
            Some(patron) if self.session.can_checkout() => patron,
            _ => return Err(KioskError::CheckoutNotReady),
        };

        let request = CheckoutRequest {
            patron_barcode: patron.barcode.clone(),
            item_barcodes: self.session.item_barcodes(),
        };

        self.checking_out = true;
        self.screen.checkout_status = Some(StatusLine::info("Checking out..."));
        Ok(request)
    }

    /// Apply the service's answer to a request from [`Controller::begin_checkout`]
    pub fn finish_checkout(
        &mut self,
        result: Result<CheckoutResponse, BackendError>,
    ) -> Result<&CheckoutSummary, KioskError> {
        if !self.checking_out {
            tracing::warn!("Checkout response arrived after the session was cleared");
            return Err(KioskError::NoCheckoutInProgress);
        }
        self.checking_out = false;
        self.screen.checkout_status = None;

        let response = result.map_err(|e| KioskError::from_backend(e, KioskError::CheckoutRejected))?;

        for outcome in response.results.iter().filter(|r| r.success) {
            self.session.mark_checked_out(&outcome.barcode);
        }

        let summary = CheckoutSummary::build(&response.results, self.session.items(), response.message);
        tracing::info!(
            "Checkout finished: {}/{} items loaned",
            response.results.iter().filter(|r| r.success).count(),
            response.results.len()
        );

        Ok(self.summary.insert(summary))
    }

    /// Dismiss the summary; this resets the whole session
    pub fn close_summary(&mut self) {
        self.clear();
    }

    fn ensure_idle(&self) -> Result<(), KioskError> {
        if self.summary.is_some() {
            return Err(KioskError::SummaryOpen);
        }
        if self.checking_out {
            return Err(KioskError::CheckoutInProgress);
        }
        Ok(())
    }
}
