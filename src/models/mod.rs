//! Wire and upstream data models

pub mod checkout;
pub mod item;
pub mod patron;

// Re-export commonly used types
pub use checkout::{CheckoutRequest, CheckoutResponse, CheckoutResult};
pub use item::{ItemLookup, ItemLookupRequest, UpstreamItem};
pub use patron::{PatronLookup, PatronLookupRequest, UpstreamPatron};

use serde::{Deserialize, Deserializer};

/// Read an explicit JSON `null` as the field's default value
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
