//! # Catalog Types
//!
//! Tool (product) documents for the marketplace catalog.
//! Tools live in the `tools` collection; descriptive fields beyond price and
//! stock quantity are opaque to the service and pass through unchanged.

use bson::oid::ObjectId;
use bson::Document;
use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    USD,
    EUR,
    GBP,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
        }
    }

    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u8 {
        2
    }

    /// Convert a decimal amount to the smallest currency unit (cents)
    pub fn to_smallest_unit(&self, amount: f64) -> i64 {
        let multiplier = 10_f64.powi(self.decimal_places() as i32);
        (amount * multiplier).round() as i64
    }

    /// Convert from smallest unit back to decimal
    pub fn from_smallest_unit(&self, amount: i64) -> f64 {
        let divisor = 10_f64.powi(self.decimal_places() as i32);
        amount as f64 / divisor
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// A tool in the catalog
///
/// Only the fields the service reads are typed; everything else a seller
/// submits (name, description, image, supplier, ...) flattens into `details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    /// Store-native document id
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Unit price in major units (e.g. dollars)
    pub price: f64,

    /// Available stock quantity
    pub quantity: i64,

    /// Opaque descriptive fields
    #[serde(flatten)]
    pub details: Document,
}

impl Tool {
    /// Create a new tool without a store id
    pub fn new(price: f64, quantity: i64) -> Self {
        Self {
            id: None,
            price,
            quantity,
            details: Document::new(),
        }
    }

    /// Builder: add a descriptive field
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<bson::Bson>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_currency_conversion() {
        let usd = Currency::USD;
        assert_eq!(usd.to_smallest_unit(10.99), 1099);
        assert_eq!(usd.from_smallest_unit(1099), 10.99);
    }

    #[test]
    fn test_tool_roundtrip_keeps_opaque_fields() {
        let tool = Tool::new(24.5, 40)
            .with_detail("name", "Claw Hammer")
            .with_detail("supplier", "Acme");

        let doc = bson::to_document(&tool).unwrap();
        assert_eq!(doc.get_str("name").unwrap(), "Claw Hammer");
        assert!(!doc.contains_key("_id"));

        let back: Tool = bson::from_document(doc).unwrap();
        assert_eq!(back.price, 24.5);
        assert_eq!(back.quantity, 40);
        assert_eq!(back.details.get_str("supplier").unwrap(), "Acme");
    }

    #[test]
    fn test_tool_deserializes_store_id() {
        let oid = ObjectId::new();
        let doc = doc! { "_id": oid, "price": 9.0, "quantity": 3, "name": "File" };
        let tool: Tool = bson::from_document(doc).unwrap();
        assert_eq!(tool.id, Some(oid));
    }
}
