//! Order Page

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::api;

#[component]
pub fn OrderPage() -> impl IntoView {
    let params = use_params_map();
    let order_id = move || params.read().get("id").unwrap_or_default();

    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let finish = move |_| {
        if loading.get() {
            return;
        }
        set_loading.set(true);
        set_error.set(None);

        let id = order_id();
        leptos::task::spawn_local(async move {
            match api::create_checkout(&id).await {
                Ok(url) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href(&url);
                    }
                }
                Err(e) => {
                    set_error.set(Some(e));
                    set_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="order px-5 space-y-4">
            <h2>"Your order"</h2>
            <p class="text-muted-foreground text-xs">{order_id}</p>

            <button class="btn btn-primary" on:click=finish disabled=move || loading.get()>
                {move || if loading.get() { "Redirecting..." } else { "Finish purchase" }}
            </button>

            <Show when=move || error.get().is_some()>
                <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}
