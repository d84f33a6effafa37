//! Checkout Result Pages

use leptos::prelude::*;

#[component]
pub fn CheckoutSuccessPage() -> impl IntoView {
    view! {
        <div class="checkout-result px-5 space-y-4">
            <h2>"Order placed!"</h2>
            <p>"Your payment was confirmed. You can follow the order in your account."</p>
            <a href="/" class="btn btn-primary">"Back to the store"</a>
        </div>
    }
}

#[component]
pub fn CheckoutCancelPage() -> impl IntoView {
    view! {
        <div class="checkout-result px-5 space-y-4">
            <h2>"Checkout cancelled"</h2>
            <p>"No payment was taken. Your order is still waiting for you."</p>
            <a href="/" class="btn">"Keep shopping"</a>
        </div>
    }
}
