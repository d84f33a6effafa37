//! API Client

use serde::{Deserialize, Serialize};

/// A purchasable variant as served by `/api/products`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    pub product_id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub color: String,
    pub price_in_cents: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Product with its variants, as served by `/api/products`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithVariants {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

fn endpoint(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into());
    format!("{origin}{path}")
}

/// Load the product catalog
pub async fn fetch_products() -> Result<Vec<ProductWithVariants>, String> {
    let response = reqwest::Client::new()
        .get(endpoint("/api/products"))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        Err("Failed to load products".into())
    }
}

/// Create a checkout session for an order; returns the hosted checkout URL
pub async fn create_checkout(order_id: &str) -> Result<String, String> {
    let body = serde_json::json!({
        "orderId": order_id,
    });

    let response = reqwest::Client::new()
        .post(endpoint("/api/checkout"))
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        let data: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        data["url"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| "Checkout session has no URL".to_string())
    } else {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        Err(data["error"].as_str().unwrap_or("Failed to create checkout").to_string())
    }
}
