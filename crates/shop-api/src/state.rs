//! # Application State
//!
//! Shared state for the Axum application. The store handle, payment
//! provider, and token issuer are constructed at startup and injected here;
//! handlers never reach for globals.

use crate::auth::TokenIssuer;
use shop_core::BoxedPaymentProvider;
use shop_store::BoxedStore;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Document store connection string
    pub mongodb_uri: String,
    /// Document store database name
    pub mongodb_db: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            mongodb_uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_string()),
            mongodb_db: std::env::var("MONGODB_DB").unwrap_or_else(|_| "tool-house".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Document store handle
    pub store: BoxedStore,
    /// Payment provider
    pub payments: BoxedPaymentProvider,
    /// Token issuer/verifier
    pub tokens: Arc<TokenIssuer>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Assemble the state from its injected parts
    pub fn new(
        store: BoxedStore,
        payments: BoxedPaymentProvider,
        tokens: Arc<TokenIssuer>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            payments,
            tokens,
            config,
        }
    }
}
