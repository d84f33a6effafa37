//! Postgres Store
//!
//! Implementation of the store capabilities over a `sqlx` connection pool.
//! Queries are checked at runtime so the crate builds without a live database.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use storefront_core::{
    AuthSession, CatalogStore, CoreError, Order, OrderLine, OrderStore, ProductWithVariants,
    Result, SessionStore, SessionToken,
};

use crate::rows::{OrderLineRow, OrderRow, ProductRow, SessionRow, VariantRow, group_catalog};

const FIND_ORDER: &str = r#"
    SELECT id, user_id
    FROM "order"
    WHERE id = $1
"#;

const FIND_ORDER_LINES: &str = r#"
    SELECT
        oi.id               AS item_id,
        oi.order_id         AS order_id,
        oi.quantity         AS quantity,
        oi.price_in_cents   AS price_in_cents,
        pv.id               AS variant_id,
        pv.name             AS variant_name,
        pv.slug             AS variant_slug,
        pv.color            AS variant_color,
        pv.price_in_cents   AS variant_price_in_cents,
        pv.image_url        AS variant_image_url,
        p.id                AS product_id,
        p.name              AS product_name,
        p.slug              AS product_slug,
        p.description       AS product_description
    FROM order_item oi
    JOIN product_variant pv ON pv.id = oi.product_variant_id
    JOIN product p ON p.id = pv.product_id
    WHERE oi.order_id = $1
    ORDER BY oi.created_at, oi.id
"#;

const LIST_PRODUCTS: &str = r#"
    SELECT id, name, slug, description
    FROM product
    ORDER BY created_at, id
"#;

const LIST_VARIANTS: &str = r#"
    SELECT id, product_id, name, slug, color, price_in_cents, image_url
    FROM product_variant
    ORDER BY created_at, id
"#;

const FIND_SESSION: &str = r#"
    SELECT
        s.token                    AS token,
        s.expires_at::timestamptz  AS expires_at,
        u.id                       AS user_id,
        u.name                     AS user_name,
        u.email                    AS user_email
    FROM session s
    JOIN "user" u ON u.id = s.user_id
    WHERE s.token = $1
      AND s.expires_at::timestamptz > now()
"#;

fn db_error(err: sqlx::Error) -> CoreError {
    CoreError::Database(err.to_string())
}

/// Postgres connection configuration
#[derive(Clone)]
pub struct PgConfig {
    /// Connection string
    pub database_url: String,

    /// Pool size
    pub max_connections: u32,
}

impl PgConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 5,
        }
    }

    /// Read `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`
    ///
    /// Returns `None` when no database is configured.
    pub fn from_env() -> Option<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())?;
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|n| n.parse().ok())
            .unwrap_or(5);

        Some(Self {
            database_url,
            max_connections,
        })
    }
}

impl std::fmt::Debug for PgConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgConfig")
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Read-only store over the application database
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open a connection pool
    pub async fn connect(config: &PgConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .map_err(db_error)?;

        tracing::info!(max_connections = config.max_connections, "Connected to Postgres");

        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check the database answers
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn find_order(&self, id: Uuid) -> Result<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as(FIND_ORDER)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.map(Order::from))
    }

    async fn find_order_lines(&self, order_id: Uuid) -> Result<Vec<OrderLine>> {
        let rows: Vec<OrderLineRow> = sqlx::query_as(FIND_ORDER_LINES)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        tracing::debug!(order_id = %order_id, rows = rows.len(), "Loaded order lines");

        rows.into_iter().map(OrderLine::try_from).collect()
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    async fn list_products_with_variants(&self) -> Result<Vec<ProductWithVariants>> {
        let products: Vec<ProductRow> = sqlx::query_as(LIST_PRODUCTS)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        let variants: Vec<VariantRow> = sqlx::query_as(LIST_VARIANTS)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(group_catalog(products, variants))
    }
}

#[async_trait]
impl SessionStore for PgStore {
    async fn find_session(&self, token: &SessionToken) -> Result<Option<AuthSession>> {
        let row: Option<SessionRow> = sqlx::query_as(FIND_SESSION)
            .bind(token.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(row.map(AuthSession::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_debug_redacts_url() {
        let config = PgConfig::new("postgres://shop:hunter2@db/shop");
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_order_queries_are_read_only() {
        for sql in [FIND_ORDER, FIND_ORDER_LINES, LIST_PRODUCTS, LIST_VARIANTS, FIND_SESSION] {
            let upper = sql.trim_start().to_uppercase();
            assert!(upper.starts_with("SELECT"));
            for verb in ["INSERT", "UPDATE", "DELETE"] {
                assert!(!upper.contains(verb));
            }
        }
    }
}
