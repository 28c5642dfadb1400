//! # Tool House
//!
//! Marketplace backend for the tool-house storefront.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export MONGODB_URI=mongodb://127.0.0.1:27017
//! export ACCESS_TOKEN_SECRET=...
//! export STRIPE_SECRET_KEY=sk_test_...
//!
//! # Run the server
//! tool-house
//! ```

use shop_api::auth::TokenIssuer;
use shop_api::routes;
use shop_api::state::{AppConfig, AppState};
use shop_store::{BoxedStore, MongoStore, Store};
use shop_stripe::StripeIntentsProvider;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    let config = AppConfig::from_env();

    // Open the store handle once; it is injected into every handler and
    // closed explicitly on shutdown.
    let store: BoxedStore = Arc::new(
        MongoStore::connect(&config.mongodb_uri, &config.mongodb_db).await?,
    );

    let payments = StripeIntentsProvider::from_env()?;
    let tokens = TokenIssuer::from_env()?;

    let addr = config.socket_addr();
    let is_prod = config.is_production();

    info!("Environment: {}", config.environment);
    info!("Document store: {}", config.mongodb_db);

    let state = AppState::new(
        store.clone(),
        Arc::new(payments),
        Arc::new(tokens),
        config,
    );

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🔨 Tool House starting on http://{}", addr);

    if !is_prod {
        info!("📝 Catalog: GET http://{}/tools", addr);
        info!("🛒 Checkout: POST http://{}/confirm-order", addr);
        info!("💳 Payment: POST http://{}/create-payment-intent", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    info!("Shutdown signal received");
}

fn print_banner() {
    println!(
        r#"
  🔨 Tool House 🔨
  ━━━━━━━━━━━━━━━━━
  Marketplace backend
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
