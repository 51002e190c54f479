//! Kiosk side of a self-checkout: the session controller and its transport

pub mod backend;
pub mod command;
pub mod controller;
pub mod session;
pub mod view;

pub use backend::{BackendError, CheckoutBackend, HttpBackend};
pub use controller::{Command, Controller, KioskError};
pub use session::{Patron, PendingItem, Session, SessionPhase};
pub use view::{CheckoutSummary, KioskView};
