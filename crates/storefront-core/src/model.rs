//! Storefront Domain Model
//!
//! Read-side view of the catalog and order tables. Nothing in this workspace
//! writes these records; they are owned by the application's ORM.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// A purchasable variant of a product (size, color, ...)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: Uuid,
    pub product_id: Uuid,
    pub name: String,
    pub slug: String,
    pub color: String,

    /// Live price in minor currency units
    pub price_in_cents: i64,

    /// Raw image reference as stored; may be relative or carry stray quoting
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Product joined with all of its variants
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithVariants {
    #[serde(flatten)]
    pub product: Product,

    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

impl ProductWithVariants {
    /// The variant shown on cards and list entries
    pub fn primary_variant(&self) -> Option<&ProductVariant> {
        self.variants.first()
    }
}

/// An order header
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,

    /// Owning user; only this user may act on the order
    pub user_id: String,
}

impl Order {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// One line of an order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_variant_id: Uuid,
    pub quantity: u32,

    /// Unit price captured when the order was placed, in minor units
    pub price_in_cents: i64,
}

/// Order item joined with its variant and that variant's product
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub item: OrderItem,
    pub variant: ProductVariant,
    pub product: Product,
}

impl OrderLine {
    /// Name shown to the buyer: "{product} - {variant}"
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.product.name, self.variant.name)
    }
}
