//! Router

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::handlers::{create_checkout, health_check, list_products};
use crate::state::AppState;

/// Build the application router
///
/// Unknown paths fall through to the frontend build so client-side routes
/// (`/orders/{id}`, `/checkout/success`, ...) load `index.html`.
pub fn router(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let frontend = ServeDir::new(static_dir)
        .fallback(ServeFile::new(Path::new(static_dir).join("index.html")));

    Router::new()
        // Health & info
        .route("/health", get(health_check))

        // Catalog
        .route("/api/products", get(list_products))

        // Payments
        .route("/api/checkout", post(create_checkout))

        // Static files (WASM frontend)
        .fallback_service(frontend)

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
