//! # shop-api
//!
//! HTTP API layer for the tool-house marketplace backend.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for the catalog, users, orders, payments, and reviews
//! - Token issue/verify with a `Claims` extractor guard
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Liveness |
//! | GET | `/tools` | List tools |
//! | GET | `/tools/:id` | Get tool (token) |
//! | DELETE | `/tool/:id` | Delete tool |
//! | PUT | `/user/:email` | Upsert user, returns token |
//! | GET | `/users` | List users (token) |
//! | POST | `/confirm-order` | Place order |
//! | GET | `/myOrder?email=` | Own orders (token) |
//! | PATCH | `/order/:id` | Mark order paid |
//! | POST | `/create-payment-intent` | Create payment intent |
//! | POST | `/addReview` | Append review |

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
