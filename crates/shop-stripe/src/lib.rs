//! # shop-stripe
//!
//! Stripe payment provider for the tool-house backend.
//!
//! The storefront posts a price and quantity; the server asks Stripe for a
//! PaymentIntent covering the amount and hands the intent's client secret
//! back verbatim. Payment completion happens client-side, and the caller
//! later marks the order paid with the resulting transaction id.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shop_stripe::StripeIntentsProvider;
//! use shop_core::{Currency, PaymentProvider};
//!
//! // Create provider from environment
//! let provider = StripeIntentsProvider::from_env()?;
//!
//! // Create a payment intent for $32.97
//! let intent = provider.create_intent(3297, Currency::USD).await?;
//!
//! // Hand intent.client_secret to the storefront
//! ```

pub mod config;
pub mod intents;

// Re-exports
pub use config::StripeConfig;
pub use intents::StripeIntentsProvider;
