//! # shop-core
//!
//! Core types and traits for the tool-house marketplace backend.
//!
//! This crate provides:
//! - `Tool`, `User`, and `Order` document types
//! - `PaymentProvider` trait for payment intent creation
//! - `Currency` and minor-unit amount conversion
//! - `ShopError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_core::{intent_amount, Currency, Order};
//!
//! // Place an order
//! let order = Order::new("pat@example.com", 24.50, 2);
//!
//! // Ask the provider for an intent covering it
//! let amount = intent_amount(order.price, order.quantity, Currency::USD);
//! let intent = provider.create_intent(amount, Currency::USD).await?;
//!
//! // Hand intent.client_secret back to the storefront
//! ```

pub mod catalog;
pub mod error;
pub mod order;
pub mod payment;
pub mod user;

// Re-exports for convenience
pub use catalog::{Currency, Tool};
pub use error::{ShopError, ShopResult};
pub use order::Order;
pub use payment::{intent_amount, BoxedPaymentProvider, PaymentIntent, PaymentProvider};
pub use user::User;
