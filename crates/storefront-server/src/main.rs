//! storefront HTTP Server
//!
//! Axum-based server exposing the checkout action and the product catalog,
//! and serving the WASM frontend.

mod auth;
mod config;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_core::MemoryStore;
use storefront_db::{PgConfig, PgStore};
use storefront_payments::{CheckoutConfig, CheckoutService, StripeGateway};

use crate::config::ServerConfig;
use crate::routes::router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();
    let server_config = ServerConfig::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&server_config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Payments
    let checkout_config = CheckoutConfig::from_env();
    if checkout_config.is_payments_configured() {
        tracing::info!("✓ Stripe configured");
    } else {
        tracing::warn!("⚠ Stripe not configured - checkout requests will fail");
        tracing::warn!("  Set STRIPE_SECRET_KEY in .env");
    }
    tracing::info!(base_url = %checkout_config.app_base_url, "Resolving checkout URLs against base");

    let gateway = Arc::new(StripeGateway::new());

    // Store
    let state = if let Some(pg_config) = PgConfig::from_env() {
        let store = Arc::new(PgStore::connect(&pg_config).await?);
        if !store.health_check().await {
            tracing::warn!("⚠ Postgres did not answer the health check");
        }

        AppState {
            checkout: Arc::new(CheckoutService::new(checkout_config, store.clone(), gateway)),
            catalog: store.clone(),
            sessions: store,
            database: "postgres",
        }
    } else {
        tracing::warn!("⚠ DATABASE_URL not set - using an empty in-memory store");

        let store = Arc::new(MemoryStore::new());
        AppState {
            checkout: Arc::new(CheckoutService::new(checkout_config, store.clone(), gateway)),
            catalog: store.clone(),
            sessions: store,
            database: "memory",
        }
    };

    let app = router(state, &server_config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(&server_config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🛒 storefront server running on http://{}", server_config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health          - Health check");
    tracing::info!("  GET  /api/products    - Product catalog");
    tracing::info!("  POST /api/checkout    - Create Stripe checkout for an order");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
