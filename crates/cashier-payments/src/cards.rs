//! Fixed projection of saved cards
//!
//! Card listings always return the same record shape, independent of the
//! configured field maps. Missing attributes never fail a listing.

use cashier_core::RawResponse;
use serde::Serialize;
use serde_json::Value;

/// Saved card as returned by [`PaymentOperations::get_cards`](crate::PaymentOperations::get_cards)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardRecord {
    /// Processor card id
    pub card_id: String,
    /// Last four digits of the card number
    pub last4: String,
    /// Card brand, e.g. `Visa`
    #[serde(rename = "type")]
    pub card_type: String,
    /// Cardholder name
    pub name: Option<String>,
    /// Expiration as `MM/YYYY`, empty when unknown
    pub expiration: String,
    /// Billing address line 1
    pub addr_line1: Option<String>,
    /// Billing address line 2
    pub addr_line2: Option<String>,
    /// Billing city
    pub addr_city: Option<String>,
    /// Billing state or region
    pub addr_state: Option<String>,
    /// Card country
    pub addr_country: Option<String>,
    /// Billing postal code
    pub addr_zip: Option<String>,
}

impl CardRecord {
    /// Extract a record from a processor card object
    pub fn from_raw(card: &RawResponse) -> Self {
        Self {
            card_id: text(card, "id").unwrap_or_default(),
            last4: text(card, "last4").unwrap_or_default(),
            card_type: text(card, "type").or_else(|| text(card, "brand")).unwrap_or_default(),
            name: text(card, "name"),
            expiration: expiration(card),
            addr_line1: text(card, "address_line1"),
            addr_line2: text(card, "address_line2"),
            addr_city: text(card, "address_city"),
            addr_state: text(card, "address_state"),
            addr_country: text(card, "country"),
            addr_zip: text(card, "address_zip"),
        }
    }
}

/// Project a processor card list, preserving its order
pub fn project_cards(cards: &[RawResponse]) -> Vec<CardRecord> {
    cards.iter().map(CardRecord::from_raw).collect()
}

/// Attribute rendered as text; `None` when absent, `null` or not a scalar
fn text(object: &RawResponse, attribute: &str) -> Option<String> {
    match object.get(attribute)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn expiration(card: &RawResponse) -> String {
    match (text(card, "exp_month"), text(card, "exp_year")) {
        (Some(month), Some(year)) => format!("{month:0>2}/{year}"),
        _ => String::new(),
    }
}
