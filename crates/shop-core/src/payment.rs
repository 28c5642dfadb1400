//! # Payment Provider Seam
//!
//! Trait boundary for payment providers. The service only ever asks a
//! provider for one thing: a payment intent for an amount, whose client
//! secret the storefront uses to complete the charge.

use crate::catalog::Currency;
use crate::error::ShopResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A provider-side payment intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider's intent id
    pub id: String,

    /// Client-side secret used to complete the payment
    pub client_secret: String,

    /// Amount in smallest currency unit
    pub amount: i64,

    /// Currency
    pub currency: Currency,

    /// Provider-reported status (e.g. "requires_payment_method")
    pub status: String,
}

/// Core trait for payment provider implementations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent for `amount` in the smallest unit of
    /// `currency`, returning the provider's intent with its client secret.
    async fn create_intent(&self, amount: i64, currency: Currency) -> ShopResult<PaymentIntent>;

    /// Get the provider name (for logging and error reporting).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment provider (dynamic dispatch)
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;

/// Intent amount for an order line: unit price converted to the smallest
/// currency unit, times quantity. Zero price or quantity yields zero; the
/// provider decides whether to accept it.
pub fn intent_amount(price: f64, quantity: i64, currency: Currency) -> i64 {
    currency.to_smallest_unit(price) * quantity
}
