//! # Order Types
//!
//! Orders are created at checkout with `paid` unset, and marked paid exactly
//! once when the caller confirms payment with a provider transaction id.

use bson::oid::ObjectId;
use bson::Document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An order placed at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Email of the ordering customer (caller-supplied, not verified
    /// against the users collection)
    pub customer_email: String,

    /// Unit price at order time, in major units
    pub price: f64,

    /// Ordered quantity
    pub quantity: i64,

    /// False until payment is confirmed; never reset by any route
    #[serde(default)]
    pub paid: bool,

    /// Provider transaction id, set when the order is marked paid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,

    /// Opaque extra fields from the checkout form (address, phone, ...)
    #[serde(flatten)]
    pub extra: Document,
}

impl Order {
    /// Create a new unpaid order
    pub fn new(customer_email: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            id: None,
            customer_email: customer_email.into(),
            price,
            quantity,
            paid: false,
            transaction_id: None,
            created_at: Utc::now(),
            extra: Document::new(),
        }
    }

    /// Builder: attach extra checkout fields
    pub fn with_extra(mut self, extra: Document) -> Self {
        self.extra = extra;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_new_order_is_unpaid() {
        let order = Order::new("pat@example.com", 12.5, 2);
        assert!(!order.paid);
        assert!(order.transaction_id.is_none());
        assert!(order.id.is_none());
    }

    #[test]
    fn test_paid_defaults_false_on_deserialize() {
        // Documents written before the paid flag existed deserialize as unpaid.
        let doc = doc! {
            "customer_email": "pat@example.com",
            "price": 12.5,
            "quantity": 2,
            "created_at": Utc::now().to_rfc3339(),
        };
        let order: Order = bson::from_document(doc).unwrap();
        assert!(!order.paid);
    }

    #[test]
    fn test_extra_fields_roundtrip() {
        let order = Order::new("pat@example.com", 3.0, 1)
            .with_extra(doc! { "phone": "555-0100", "address": "12 Forge St" });
        let doc = bson::to_document(&order).unwrap();
        let back: Order = bson::from_document(doc).unwrap();
        assert_eq!(back.extra.get_str("phone").unwrap(), "555-0100");
    }
}
