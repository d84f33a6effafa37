//! storefront Web Frontend
//!
//! Leptos-based WASM frontend: product lists, order checkout and the
//! post-checkout landing pages.

mod api;
mod app;
mod components;
mod money;
mod pages;

pub use api::{ProductVariant, ProductWithVariants};
pub use app::App;
pub use components::{ProductCard, ProductItem, ProductList};
pub use money::format_cents_brl;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
