//! Order summary message and WhatsApp hand-off link.
//!
//! Pure functions: the same order, cart, and shipping details always
//! produce byte-identical text.

use konaseema_core::{CartLine, CartSnapshot, OrderId, ShippingDetails, format_inr};

/// Opening line of every order message.
const GREETING: &str = "Hi Konaseema Foods, I want to place an order.";

/// Build the line-oriented order summary.
///
/// Lines with no content (absent notes, absent weight) are omitted
/// entirely; only the intentional separator blanks remain.
#[must_use]
pub fn compose_order_message(
    order_id: &OrderId,
    cart: &CartSnapshot,
    shipping: &ShippingDetails,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(GREETING.to_owned());
    lines.push(String::new());
    lines.push(format!("Order ID: {order_id}"));
    lines.push(String::new());
    lines.push(format!("Customer: {}", shipping.full_name.trim()));
    lines.push(format!("Phone: {}", shipping.phone.trim()));
    lines.push(format!("Email: {}", shipping.email.trim()));
    lines.push(String::new());

    let address1 = shipping.address1.trim();
    lines.push(match shipping.address2_opt() {
        Some(address2) => format!("Address: {address1}, {address2}"),
        None => format!("Address: {address1}"),
    });
    lines.push(format!(
        "{}, {} - {}",
        shipping.city.trim(),
        shipping.state.trim(),
        shipping.zip.trim()
    ));
    lines.push(shipping.country.trim().to_owned());
    if let Some(notes) = shipping.delivery_notes_opt() {
        lines.push(format!("Notes: {notes}"));
    }

    lines.push(String::new());
    lines.push("Items:".to_owned());
    for item in &cart.items {
        lines.push(item_line(item));
    }

    lines.push(String::new());
    lines.push(format!("Total: {}", format_inr(cart.total)));

    lines.join("\n")
}

/// One summary line per cart line: `• Kaja (250g) x2 = ₹400`.
fn item_line(item: &CartLine) -> String {
    let amount = format_inr(item.line_total());
    let weight = item
        .weight
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty());

    match weight {
        Some(weight) => format!("• {} ({weight}) x{} = {amount}", item.name, item.qty),
        None => format!("• {} x{} = {amount}", item.name, item.qty),
    }
}

/// Deep link that opens WhatsApp with the message pre-filled.
///
/// `destination` is country code + number with no leading `+`. The
/// message is percent-encoded into the `text` query parameter.
#[must_use]
pub fn whatsapp_link(destination: &str, message: &str) -> String {
    format!(
        "https://wa.me/{destination}?text={}",
        urlencoding::encode(message)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use konaseema_core::ProductId;

    use super::*;

    fn kaja_cart() -> CartSnapshot {
        CartSnapshot::new(vec![CartLine {
            id: ProductId::new("9"),
            name: "Kaja".to_owned(),
            price: Decimal::from(200),
            qty: 2,
            weight: Some("250g".to_owned()),
            image: None,
            category: None,
        }])
    }

    fn shipping() -> ShippingDetails {
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
    fn test_message_content() {
        let message = compose_order_message(&OrderId::new("order-7"), &kaja_cart(), &shipping());

        assert!(message.starts_with("Hi Konaseema Foods, I want to place an order.\n"));
        assert!(message.contains("Order ID: order-7"));
        assert!(message.contains("Customer: Priya Sharma"));
        assert!(message.contains("Address: 12 Beach Road\nKakinada, Andhra Pradesh - 533001\nIndia"));
        assert!(message.contains("• Kaja (250g) x2 = ₹400"));
        assert!(message.ends_with("Total: ₹400"));
    }

    #[test]
    fn test_message_is_deterministic() {
        let order_id = OrderId::new("order-7");
        let first = compose_order_message(&order_id, &kaja_cart(), &shipping());
        let second = compose_order_message(&order_id, &kaja_cart(), &shipping());
        assert_eq!(first, second);
    }

    #[test]
    fn test_absent_notes_line_is_omitted() {
        let message = compose_order_message(&OrderId::new("o"), &kaja_cart(), &shipping());
        assert!(!message.contains("Notes:"));
        // Separator blanks stay, but no line is left empty where notes were.
        assert!(message.contains("India\n\nItems:"));
    }

    #[test]
    fn test_notes_and_address2_render_when_present() {
        let mut details = shipping();
        details.address2 = "Flat 2B".to_owned();
        details.delivery_notes = "Ring twice".to_owned();

        let message = compose_order_message(&OrderId::new("o"), &kaja_cart(), &details);
        assert!(message.contains("Address: 12 Beach Road, Flat 2B"));
        assert!(message.contains("India\nNotes: Ring twice\n\nItems:"));
    }

    #[test]
    fn test_weightless_item_has_no_parenthetical() {
        let cart = CartSnapshot::new(vec![CartLine {
            id: ProductId::new("3"),
            name: "Putharekulu".to_owned(),
            price: Decimal::from(150),
            qty: 1,
            weight: None,
            image: None,
            category: None,
        }]);

        let message = compose_order_message(&OrderId::new("o"), &cart, &shipping());
        assert!(message.contains("• Putharekulu x1 = ₹150"));
    }

    #[test]
    fn test_whatsapp_link_percent_encodes_the_message() {
        let link = whatsapp_link("919876543210", "Total: ₹400\nThanks");

        assert!(link.starts_with("https://wa.me/919876543210?text="));
        assert!(link.contains("Total%3A%20%E2%82%B9400%0AThanks"));
        assert!(!link.contains(' '));
    }
}
