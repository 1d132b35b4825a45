//! Customer-entered delivery and contact details.

use serde::{Deserialize, Serialize};

/// Draft shipping form state.
///
/// All fields are plain strings exactly as typed. Trimming and
/// required-field rules are applied by the checkout validator; blank
/// optional fields are mapped to absent values at the wire boundary via
/// [`ShippingDetails::address2_opt`] and
/// [`ShippingDetails::delivery_notes_opt`].
///
/// Serializes with camelCase keys - the same shape the browser persists
/// between visits - and tolerates missing keys on read so an older or
/// partial draft still hydrates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub delivery_notes: String,
}

impl ShippingDetails {
    /// Country preselected on a fresh form.
    pub const DEFAULT_COUNTRY: &'static str = "India";

    /// Address line 2 with blank values mapped to `None`.
    #[must_use]
    pub fn address2_opt(&self) -> Option<&str> {
        let trimmed = self.address2.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    /// Delivery notes with blank values mapped to `None`.
    #[must_use]
    pub fn delivery_notes_opt(&self) -> Option<&str> {
        let trimmed = self.delivery_notes.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

impl Default for ShippingDetails {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            phone: String::new(),
            country: Self::DEFAULT_COUNTRY.to_owned(),
            address1: String::new(),
            address2: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            delivery_notes: String::new(),
        }
    }
}
