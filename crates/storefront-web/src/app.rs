//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::pages::{CheckoutCancelPage, CheckoutSuccessPage, HomePage, OrderPage};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/orders/:id") view=OrderPage />
                    <Route path=path!("/checkout/success") view=CheckoutSuccessPage />
                    <Route path=path!("/checkout/cancel") view=CheckoutCancelPage />
                </Routes>
            </main>
        </Router>
    }
}
