//! # storefront-db
//!
//! Relational backends for the storefront store capabilities.
//!
//! ## Backends
//!
//! - **Postgres** (default): read-only queries over the application's tables
//!   (`"order"`, `order_item`, `product_variant`, `product`, `session`, `"user"`)
//!
//! The schema itself is owned by the application's ORM; nothing here creates,
//! migrates or writes tables.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_db::{PgConfig, PgStore};
//!
//! let store = PgStore::connect(&PgConfig::from_env()?).await?;
//! let lines = store.find_order_lines(order_id).await?;
//! ```

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
mod rows;

#[cfg(feature = "postgres")]
pub use postgres::{PgConfig, PgStore};

// Re-export core types for convenience
pub use storefront_core::{
    CatalogStore, CoreError, MemoryStore, OrderStore, Result, SessionStore,
};
