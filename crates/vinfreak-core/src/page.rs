use serde::{Deserialize, Serialize};

use crate::vehicle::Vehicle;

/// One fetched page in canonical form, whatever shape the server answered with.
///
/// `total` is the server's count of all matches across pages. It is expected
/// to be at least `items.len()` but that is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPage {
    pub items: Vec<Vehicle>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl NormalizedPage {
    /// Re-wraps the page as a `{items, total, page, page_size}` envelope.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if a vehicle cannot be serialized.
    pub fn to_envelope(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
