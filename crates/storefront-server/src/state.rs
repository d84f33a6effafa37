//! Application State

use std::sync::Arc;

use storefront_core::{CatalogStore, SessionStore};
use storefront_payments::CheckoutService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout session builder
    pub checkout: Arc<CheckoutService>,

    /// Product catalog for the storefront lists
    pub catalog: Arc<dyn CatalogStore>,

    /// Session lookup for authenticated requests
    pub sessions: Arc<dyn SessionStore>,

    /// Backing store name ("postgres" or "memory")
    pub database: &'static str,
}
