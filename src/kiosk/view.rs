//! What the kiosk screen shows: status lines, the pending table, button
//! gating and the checkout summary popup

use std::fmt;

use chrono::{DateTime, Local, NaiveDate};

use crate::models::CheckoutResult;

use super::session::{PendingItem, CHECKED_OUT, NOT_AVAILABLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: Tone,
}

impl StatusLine {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Success,
        }
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Danger,
        }
    }
}

/// Inputs and status text; everything here is blanked by a clear
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub patron_input: String,
    pub item_input: String,
    pub patron_status: Option<StatusLine>,
    pub item_status: Option<StatusLine>,
    pub checkout_status: Option<StatusLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Buttons {
    pub find_patron: bool,
    pub add_item: bool,
    pub clear: bool,
    pub checkout: bool,
}

/// One line of the pending items table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub barcode: String,
    pub title: String,
    pub author: String,
    pub call_number: String,
    pub status: String,
}

impl From<&PendingItem> for ItemRow {
    fn from(item: &PendingItem) -> Self {
        Self {
            barcode: item.barcode.clone(),
            title: item.title.clone(),
            author: item.author.clone(),
            call_number: item.call_number.clone(),
            status: item.display_status().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub barcode: String,
    pub title: String,
    pub status: String,
    pub due_date_or_error: String,
}

/// Modal shown once a checkout request has been answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
    pub rows: Vec<SummaryRow>,
    pub message: Option<String>,
}

impl CheckoutSummary {
    /// Build the summary, taking titles from the pending list by barcode
    pub fn build(results: &[CheckoutResult], pending: &[PendingItem], message: Option<String>) -> Self {
        let rows = results
            .iter()
            .map(|result| {
                let title = pending
                    .iter()
                    .find(|item| item.barcode == result.barcode)
                    .map(|item| item.title.clone())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string());

                let (status, detail) = if result.success {
                    (CHECKED_OUT, result.due_date.as_deref().map(format_due_date))
                } else {
                    ("Error", result.error.clone())
                };

                SummaryRow {
                    barcode: result.barcode.clone(),
                    title,
                    status: status.to_string(),
                    due_date_or_error: detail
                        .or_else(|| result.error.clone())
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                }
            })
            .collect();

        Self { rows, message }
    }
}

/// Show RFC 3339 timestamps and ISO dates as a local calendar date; anything
/// else is passed through untouched
pub fn format_due_date(raw: &str) -> String {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp.with_timezone(&Local).format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Snapshot of everything the kiosk renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskView {
    pub screen: Screen,
    pub rows: Vec<ItemRow>,
    pub buttons: Buttons,
    pub summary: Option<CheckoutSummary>,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.tone {
            Tone::Info => "..",
            Tone::Success => "ok",
            Tone::Danger => "!!",
        };
        write!(f, "[{}] {}", marker, self.text)
    }
}

impl fmt::Display for KioskView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(summary) = &self.summary {
            return write!(f, "{}", summary);
        }

        for status in [
            &self.screen.patron_status,
            &self.screen.item_status,
            &self.screen.checkout_status,
        ]
        .into_iter()
        .flatten()
        {
            writeln!(f, "{}", status)?;
        }

        if self.rows.is_empty() {
            writeln!(f, "No items scanned.")?;
        } else {
            writeln!(
                f,
                "{:>3}  {:<14} {:<30} {:<20} {:<18} {}",
                "#", "Barcode", "Title", "Author", "Call Number", "Status"
            )?;
            for (index, row) in self.rows.iter().enumerate() {
                writeln!(
                    f,
                    "{:>3}  {:<14} {:<30} {:<20} {:<18} {}",
                    index + 1,
                    row.barcode,
                    truncate(&row.title, 30),
                    truncate(&row.author, 20),
                    truncate(&row.call_number, 18),
                    row.status
                )?;
            }
        }

        let gate = |enabled: bool| if enabled { "on" } else { "off" };
        write!(
            f,
            "add item: {}  checkout: {}",
            gate(self.buttons.add_item),
            gate(self.buttons.checkout)
        )
    }
}

impl fmt::Display for CheckoutSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Checkout Summary")?;
        writeln!(f, "{:<14} {:<30} {:<12} {}", "Barcode", "Title", "Status", "Due Date/Error")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<14} {:<30} {:<12} {}",
                row.barcode,
                truncate(&row.title, 30),
                row.status,
                row.due_date_or_error
            )?;
        }
        if let Some(message) = &self.message {
            writeln!(f, "{}", message)?;
        }
        write!(f, "Type 'close' to finish.")
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let kept: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
