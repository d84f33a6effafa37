//! Row shapes returned by the Postgres queries and their domain conversions

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

use storefront_core::{
    AuthSession, CoreError, Order, OrderItem, OrderLine, Product, ProductVariant,
    ProductWithVariants, Result, SessionToken, SessionUser,
};

#[derive(Debug, FromRow)]
pub(crate) struct OrderRow {
    pub id: Uuid,
    pub user_id: String,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
        }
    }
}

/// `order_item` joined with `product_variant` and `product`
#[derive(Debug, Clone, FromRow)]
pub(crate) struct OrderLineRow {
    pub item_id: Uuid,
    pub order_id: Uuid,
    pub quantity: i32,
    pub price_in_cents: i32,
    pub variant_id: Uuid,
    pub variant_name: String,
    pub variant_slug: String,
    pub variant_color: String,
    pub variant_price_in_cents: i32,
    pub variant_image_url: Option<String>,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_slug: String,
    pub product_description: String,
}

impl TryFrom<OrderLineRow> for OrderLine {
    type Error = CoreError;

    fn try_from(row: OrderLineRow) -> Result<Self> {
        let quantity = u32::try_from(row.quantity).map_err(|_| {
            CoreError::Database(format!(
                "order item {} has negative quantity {}",
                row.item_id, row.quantity
            ))
        })?;

        Ok(Self {
            item: OrderItem {
                id: row.item_id,
                order_id: row.order_id,
                product_variant_id: row.variant_id,
                quantity,
                price_in_cents: i64::from(row.price_in_cents),
            },
            variant: ProductVariant {
                id: row.variant_id,
                product_id: row.product_id,
                name: row.variant_name,
                slug: row.variant_slug,
                color: row.variant_color,
                price_in_cents: i64::from(row.variant_price_in_cents),
                image_url: row.variant_image_url,
            },
            product: Product {
                id: row.product_id,
                name: row.product_name,
                slug: row.product_slug,
                description: row.product_description,
            },
        })
    }
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct VariantRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub slug: String,
    pub color: String,
    pub price_in_cents: i32,
    pub image_url: Option<String>,
}

impl From<VariantRow> for ProductVariant {
    fn from(row: VariantRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            name: row.name,
            slug: row.slug,
            color: row.color,
            price_in_cents: i64::from(row.price_in_cents),
            image_url: row.image_url,
        }
    }
}

/// Attach variants to their products, keeping both input orders
pub(crate) fn group_catalog(
    products: Vec<ProductRow>,
    variants: Vec<VariantRow>,
) -> Vec<ProductWithVariants> {
    let mut catalog: Vec<ProductWithVariants> = products
        .into_iter()
        .map(|row| ProductWithVariants {
            product: Product {
                id: row.id,
                name: row.name,
                slug: row.slug,
                description: row.description,
            },
            variants: Vec::new(),
        })
        .collect();

    let index: HashMap<Uuid, usize> = catalog
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.product.id, i))
        .collect();

    for variant in variants {
        if let Some(&i) = index.get(&variant.product_id) {
            catalog[i].variants.push(variant.into());
        }
    }

    catalog
}

/// `session` joined with `"user"`
#[derive(Debug, Clone, FromRow)]
pub(crate) struct SessionRow {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
}

impl From<SessionRow> for AuthSession {
    fn from(row: SessionRow) -> Self {
        AuthSession::new(
            SessionToken::from_string(row.token),
            SessionUser {
                id: row.user_id,
                name: row.user_name,
                email: row.user_email,
            },
            row.expires_at,
        )
    }
}
