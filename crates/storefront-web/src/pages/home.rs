//! Home Page

use leptos::prelude::*;

use crate::api::{self, ProductWithVariants};
use crate::components::ProductList;

#[component]
pub fn HomePage() -> impl IntoView {
    let (products, set_products) = signal(Vec::<ProductWithVariants>::new());

    leptos::task::spawn_local(async move {
        if let Ok(list) = api::fetch_products().await {
            set_products.set(list);
        }
    });

    view! {
        <div class="home space-y-6">
            <header class="hero px-5">
                <h1>"Storefront"</h1>
                <p class="tagline">"Fresh picks, delivered."</p>
            </header>

            {move || view! { <ProductList title="Featured" products=products.get() /> }}
        </div>
    }
}
