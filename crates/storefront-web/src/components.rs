//! UI Components

use leptos::prelude::*;
use storefront_core::{DEFAULT_IMAGE_PATH, sanitize_url};

use crate::api::ProductWithVariants;
use crate::money::format_cents_brl;

/// What a product card displays
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductCard {
    pub href: String,
    pub image_url: String,
    pub name: String,
    pub description: String,
    pub price: Option<String>,
}

impl ProductCard {
    /// Build the card from a product's first variant
    pub fn from_product(product: &ProductWithVariants) -> Self {
        let variant = product.variants.first();

        let image_url = variant
            .and_then(|v| v.image_url.as_deref())
            .map(sanitize_url)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_PATH.to_string());

        Self {
            href: variant.map_or_else(|| "#".to_string(), |v| format!("/product-variant/{}", v.slug)),
            image_url,
            name: product.name.clone(),
            description: product.description.clone(),
            price: variant.map(|v| format_cents_brl(v.price_in_cents)),
        }
    }
}

/// Single product card
#[component]
pub fn ProductItem(product: ProductWithVariants) -> impl IntoView {
    let card = ProductCard::from_product(&product);

    view! {
        <a href=card.href class="product-item flex flex-col gap-4">
            <img src=card.image_url alt=card.name.clone() class="h-auto w-full rounded-3xl" />
            <div class="flex max-w-[200px] flex-col gap-1">
                <p class="truncate text-sm font-medium">{card.name}</p>
                <p class="text-muted-foreground truncate text-xs font-medium">{card.description}</p>
                <p class="truncate text-sm font-semibold">{card.price}</p>
            </div>
        </a>
    }
}

/// Titled, horizontally scrollable strip of product cards
///
/// Products are shown exactly in the order given.
#[component]
pub fn ProductList(
    #[prop(into)] title: String,
    products: Vec<ProductWithVariants>,
) -> impl IntoView {
    view! {
        <div class="space-y-4">
            <h3 class="px-5 text-lg font-semibold">{title}</h3>
            <div class="relative px-5">
                <div class="scrollbar-hide flex w-full gap-4 overflow-x-auto pb-4 whitespace-nowrap">
                    {products
                        .into_iter()
                        .map(|product| {
                            view! {
                                <div class="inline-flex w-48 flex-shrink-0">
                                    <ProductItem product=product />
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}
