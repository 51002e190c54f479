//! In-memory state of one checkout interaction

use crate::models::ItemLookup;

/// Rendered for any field missing from a lookup response
pub const NOT_AVAILABLE: &str = "N/A";
/// Item status once the service confirmed the loan
pub const CHECKED_OUT: &str = "Checked Out";
/// Item status shown when none was recorded
pub const READY_TO_CHECK_OUT: &str = "Ready to Check Out";

/// Patron validated by the directory lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patron {
    pub barcode: String,
    pub name: String,
}

/// Item accepted into the pending list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingItem {
    pub barcode: String,
    pub title: String,
    pub author: String,
    pub call_number: String,
    pub status: Option<String>,
}

impl PendingItem {
    pub fn from_lookup(barcode: &str, lookup: ItemLookup) -> Self {
        let or_na = |value: Option<String>| value.unwrap_or_else(|| NOT_AVAILABLE.to_string());
        Self {
            barcode: barcode.to_string(),
            title: or_na(lookup.title),
            author: or_na(lookup.author),
            call_number: or_na(lookup.call_number),
            status: Some(or_na(lookup.status)),
        }
    }

    pub fn display_status(&self) -> &str {
        self.status.as_deref().unwrap_or(READY_TO_CHECK_OUT)
    }
}

/// Where the session stands, derived from its contents and the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NoPatron,
    PatronFound,
    ItemsPending,
    CheckingOut,
    Completed,
}

/// Patron and pending items of the current checkout.
///
/// Item barcodes are unique within `items`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    patron: Option<Patron>,
    items: Vec<PendingItem>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn patron(&self) -> Option<&Patron> {
        self.patron.as_ref()
    }

    pub fn patron_found(&self) -> bool {
        self.patron.is_some()
    }

    pub fn set_patron(&mut self, patron: Option<Patron>) {
        self.patron = patron;
    }

    pub fn items(&self) -> &[PendingItem] {
        &self.items
    }

    pub fn contains(&self, barcode: &str) -> bool {
        self.items.iter().any(|item| item.barcode == barcode)
    }

    /// Append an item; returns `false` and leaves the list untouched when the
    /// barcode is already pending
    pub fn push(&mut self, item: PendingItem) -> bool {
        if self.contains(&item.barcode) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<PendingItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn item_barcodes(&self) -> Vec<String> {
        self.items.iter().map(|item| item.barcode.clone()).collect()
    }

    pub fn mark_checked_out(&mut self, barcode: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.barcode == barcode) {
            item.status = Some(CHECKED_OUT.to_string());
        }
    }

    pub fn can_add_items(&self) -> bool {
        self.patron_found()
    }

    pub fn can_checkout(&self) -> bool {
        self.patron_found() && !self.items.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
