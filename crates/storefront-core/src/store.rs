//! Store Capabilities
//!
//! Narrow read-only interfaces over the relational store. The checkout flow
//! and the HTTP layer depend on these traits, never on a concrete backend.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Order, OrderLine, Product, ProductVariant, ProductWithVariants};
use crate::session::{AuthSession, SessionToken};

/// Order lookups
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Find an order by ID
    async fn find_order(&self, id: Uuid) -> Result<Option<Order>>;

    /// All items of an order joined with variant and product, in creation order
    async fn find_order_lines(&self, order_id: Uuid) -> Result<Vec<OrderLine>>;
}

/// Catalog lookups
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every product with its variants, in creation order
    async fn list_products_with_variants(&self) -> Result<Vec<ProductWithVariants>>;
}

/// Session lookups
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Find a live session by token; expired sessions are `None`
    async fn find_session(&self, token: &SessionToken) -> Result<Option<AuthSession>>;
}

/// In-memory store (for development and tests)
#[derive(Default)]
pub struct MemoryStore {
    orders: RwLock<HashMap<Uuid, Order>>,
    lines: RwLock<HashMap<Uuid, Vec<OrderLine>>>,
    products: RwLock<Vec<ProductWithVariants>>,
    sessions: RwLock<HashMap<SessionToken, AuthSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_order(&self, order: Order) {
        self.orders.write().await.insert(order.id, order);
    }

    /// Append a line to its order (keyed by `line.item.order_id`)
    pub async fn insert_line(&self, line: OrderLine) {
        self.lines
            .write()
            .await
            .entry(line.item.order_id)
            .or_default()
            .push(line);
    }

    pub async fn insert_product(&self, product: Product, variants: Vec<ProductVariant>) {
        self.products
            .write()
            .await
            .push(ProductWithVariants { product, variants });
    }

    pub async fn insert_session(&self, session: AuthSession) {
        self.sessions
            .write()
            .await
            .insert(session.token.clone(), session);
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn find_order(&self, id: Uuid) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn find_order_lines(&self, order_id: Uuid) -> Result<Vec<OrderLine>> {
        Ok(self
            .lines
            .read()
            .await
            .get(&order_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list_products_with_variants(&self) -> Result<Vec<ProductWithVariants>> {
        Ok(self.products.read().await.clone())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn find_session(&self, token: &SessionToken) -> Result<Option<AuthSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(token).filter(|s| !s.is_expired()).cloned())
    }
}
