//! Shipping form validation.
//!
//! Pure functions only - no side effects, every rule evaluated on every
//! call, so the error map always reflects the whole form.

use std::collections::BTreeMap;

use konaseema_core::ShippingDetails;

/// Minimum digits for a dialable phone number.
const MIN_PHONE_LEN: usize = 7;

/// Field name -> error message, keyed by the form's field names.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Validate the shipping form.
///
/// Returns an empty map when the form is submittable. `address2` and
/// `deliveryNotes` are optional and never produce an error.
#[must_use]
pub fn validate(shipping: &ShippingDetails) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let email = shipping.email.trim();
    let phone = shipping.phone.trim();

    if shipping.full_name.trim().is_empty() {
        errors.insert("fullName", "Full name is required");
    }

    if email.is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.insert("email", "Enter a valid email");
    }

    if phone.is_empty() {
        errors.insert("phone", "Phone number is required");
    } else if phone.len() < MIN_PHONE_LEN {
        errors.insert("phone", "Enter a valid phone number");
    }

    if shipping.country.trim().is_empty() {
        errors.insert("country", "Country is required");
    }
    if shipping.address1.trim().is_empty() {
        errors.insert("address1", "Address line 1 is required");
    }
    if shipping.city.trim().is_empty() {
        errors.insert("city", "City is required");
    }
    if shipping.state.trim().is_empty() {
        errors.insert("state", "State is required");
    }
    if shipping.zip.trim().is_empty() {
        errors.insert("zip", "ZIP / Postal code is required");
    }

    errors
}

/// Basic email validation: `local@domain.tld`, no whitespace in either
/// part, at least one dot in the domain.
pub(crate) fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_shipping() -> ShippingDetails {
        ShippingDetails {
            full_name: "Priya Sharma".to_owned(),
            email: "priya@example.com".to_owned(),
            phone: "9876543210".to_owned(),
            country: "India".to_owned(),
            address1: "12 Beach Road".to_owned(),
            address2: String::new(),
            city: "Kakinada".to_owned(),
            state: "Andhra Pradesh".to_owned(),
            zip: "533001".to_owned(),
            delivery_notes: String::new(),
        }
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        assert!(validate(&valid_shipping()).is_empty());
    }

    #[test]
    fn test_blank_required_fields_flag_exactly_those_fields() {
        let mut shipping = valid_shipping();
        shipping.full_name = "  ".to_owned();
        shipping.zip = String::new();

        let errors = validate(&shipping);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("fullName"), Some(&"Full name is required"));
        assert_eq!(errors.get("zip"), Some(&"ZIP / Postal code is required"));
    }

    #[test]
    fn test_empty_form_flags_every_required_field() {
        let shipping = ShippingDetails {
            country: String::new(),
            ..ShippingDetails::default()
        };
        let errors = validate(&shipping);

        let flagged: Vec<&str> = errors.keys().copied().collect();
        assert_eq!(
            flagged,
            vec!["address1", "city", "country", "email", "fullName", "phone", "state", "zip"]
        );
    }

    #[test]
    fn test_missing_email_is_required_not_invalid() {
        let mut shipping = valid_shipping();
        shipping.email = String::new();
        assert_eq!(
            validate(&shipping).get("email"),
            Some(&"Email is required")
        );
    }

    #[test]
    fn test_bad_emails_are_flagged() {
        for email in [
            "plainaddress",
            "missing-domain-dot@example",
            "with space@example.com",
            "with@spa ce.com",
            "two@@example.com",
            "@example.com",
            "user@.com",
            "user@example.",
        ] {
            let mut shipping = valid_shipping();
            shipping.email = email.to_owned();
            assert_eq!(
                validate(&shipping).get("email"),
                Some(&"Enter a valid email"),
                "expected {email:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_good_emails_pass() {
        for email in [
            "priya@example.com",
            "user.name+tag@shop.co.in",
            "a@b.c",
        ] {
            let mut shipping = valid_shipping();
            shipping.email = email.to_owned();
            assert!(
                validate(&shipping).is_empty(),
                "expected {email:?} to be accepted"
            );
        }
    }

    #[test]
    fn test_short_phone_is_flagged() {
        let mut shipping = valid_shipping();
        shipping.phone = " 123456 ".to_owned();
        assert_eq!(
            validate(&shipping).get("phone"),
            Some(&"Enter a valid phone number")
        );

        shipping.phone = "1234567".to_owned();
        assert!(validate(&shipping).is_empty());
    }

    #[test]
    fn test_optional_fields_never_error() {
        let mut shipping = valid_shipping();
        shipping.address2 = String::new();
        shipping.delivery_notes = String::new();
        assert!(validate(&shipping).is_empty());
    }

    #[test]
    fn test_validate_is_idempotent() {
        let mut shipping = valid_shipping();
        shipping.email = "broken".to_owned();
        shipping.city = String::new();

        assert_eq!(validate(&shipping), validate(&shipping));
    }
}
