//! Money helpers for the storefront's single INR currency.
//!
//! All amounts are `rust_decimal::Decimal` - never floats. The storefront
//! sells in one currency only, so there is no `Price { amount, currency }`
//! pair here; the currency is a constant carried on order rows.

use rust_decimal::Decimal;

/// ISO 4217 code stamped on every order row.
pub const CURRENCY: &str = "INR";

/// Currency symbol used in customer-facing text.
pub const RUPEE_SIGN: &str = "₹";

/// Format an amount for customer-facing text: `₹400`, `₹99.50`.
///
/// Integral amounts drop the fractional part entirely; fractional amounts
/// keep two decimal places.
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    let normalized = amount.normalize();
    if normalized.scale() == 0 {
        format!("{RUPEE_SIGN}{normalized}")
    } else {
        format!("{RUPEE_SIGN}{amount:.2}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_integral() {
        assert_eq!(format_inr(Decimal::from(400)), "₹400");
        assert_eq!(format_inr(Decimal::ZERO), "₹0");
    }

    #[test]
    fn test_format_integral_with_trailing_zeros() {
        // 400.00 renders the same as 400
        assert_eq!(format_inr(Decimal::new(40_000, 2)), "₹400");
    }

    #[test]
    fn test_format_fractional() {
        assert_eq!(format_inr(Decimal::new(9_950, 2)), "₹99.50");
        assert_eq!(format_inr(Decimal::new(995, 1)), "₹99.50");
    }
}
