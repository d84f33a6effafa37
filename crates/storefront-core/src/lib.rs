//! # storefront-core
//!
//! Domain model and read-side capabilities shared by the storefront crates.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      storefront-core                          │
//! │  ┌─────────────┐  ┌──────────────────────┐  ┌──────────────┐  │
//! │  │    Model    │  │  OrderStore          │  │ UrlResolver  │  │
//! │  │ Order/Items │──│  CatalogStore        │  │ sanitize +   │  │
//! │  │ Products    │  │  SessionStore        │  │ absolutize   │  │
//! │  └─────────────┘  └──────────────────────┘  └──────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store traits are implemented by `MemoryStore` here and by the Postgres
//! backend in `storefront-db`.

pub mod error;
pub mod model;
pub mod session;
pub mod store;
pub mod url;

pub use error::{CoreError, Result};
pub use model::{Order, OrderItem, OrderLine, Product, ProductVariant, ProductWithVariants};
pub use session::{AuthSession, SessionToken, SessionUser};
pub use store::{CatalogStore, MemoryStore, OrderStore, SessionStore};
pub use crate::url::{DEFAULT_IMAGE_PATH, UrlResolver, sanitize_url};
