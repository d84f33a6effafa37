//! Checkout Session Builder
//!
//! Turns a stored order into a hosted checkout session:
//!
//! ```text
//! credential ─▶ session ─▶ input ─▶ order ─▶ owner ─▶ lines ─▶ URLs ─▶ gateway
//! ```
//!
//! Every step either passes or aborts the whole flow. Nothing is written, and
//! the gateway is only reached once all checks and URL resolution succeed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use storefront_core::{
    AuthSession, DEFAULT_IMAGE_PATH, OrderLine, OrderStore, UrlResolver, sanitize_url,
};

use crate::checkout::{
    CHECKOUT_CURRENCY, CheckoutMode, CheckoutSession, CheckoutSessionParams, LineItem,
    PaymentGateway, PaymentMethodType, PriceData, ProductData,
};
use crate::config::CheckoutConfig;
use crate::error::{PaymentError, Result};

/// Redirect target after a completed payment
pub const SUCCESS_PATH: &str = "/checkout/success";

/// Redirect target when the buyer abandons checkout
pub const CANCEL_PATH: &str = "/checkout/cancel";

/// Metadata key carrying the order ID back from the provider
pub const ORDER_ID_METADATA_KEY: &str = "orderId";

/// Input of the create-checkout-session action
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionInput {
    pub order_id: String,
}

impl CreateCheckoutSessionInput {
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
        }
    }

    /// Check the order ID is a hyphenated UUID and parse it
    pub fn validate(&self) -> Result<Uuid> {
        let raw = self.order_id.as_str();
        let invalid = || PaymentError::Validation(format!("orderId is not a valid UUID: {raw:?}"));

        if raw.len() != 36 {
            return Err(invalid());
        }
        Uuid::try_parse(raw).map_err(|_| invalid())
    }
}

/// Builds and submits checkout sessions for orders
pub struct CheckoutService {
    config: CheckoutConfig,
    orders: Arc<dyn OrderStore>,
    gateway: Arc<dyn PaymentGateway>,
}

impl CheckoutService {
    pub fn new(
        config: CheckoutConfig,
        orders: Arc<dyn OrderStore>,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            config,
            orders,
            gateway,
        }
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// The provider credential, or `Config` when payments are disabled
    pub fn secret_key(&self) -> Result<&str> {
        self.config
            .secret_key()
            .ok_or_else(|| PaymentError::Config("STRIPE_SECRET_KEY not set".into()))
    }

    /// Create a hosted checkout session for one of the caller's orders
    pub async fn create_checkout_session(
        &self,
        session: Option<&AuthSession>,
        input: CreateCheckoutSessionInput,
    ) -> Result<CheckoutSession> {
        let secret_key = self.secret_key()?;

        let session = session.ok_or(PaymentError::Unauthenticated)?;

        let order_id = input.validate()?;

        let order = self
            .orders
            .find_order(order_id)
            .await?
            .ok_or_else(|| PaymentError::NotFound(order_id.to_string()))?;

        if !order.is_owned_by(session.user_id()) {
            tracing::warn!(
                order_id = %order_id,
                user_id = %session.user_id(),
                "Checkout attempted on another user's order"
            );
            return Err(PaymentError::Unauthorized(order_id.to_string()));
        }

        let lines = self.orders.find_order_lines(order_id).await?;
        if lines.is_empty() {
            tracing::warn!(order_id = %order_id, "Submitting checkout for an order with no items");
        }

        let resolver = UrlResolver::new(&self.config.app_base_url)?;
        let params = build_checkout_params(&resolver, order_id, &lines)?;

        let checkout = self
            .gateway
            .create_checkout_session(secret_key, &params)
            .await?;

        tracing::info!(
            order_id = %order_id,
            user_id = %session.user_id(),
            session_id = %checkout.id,
            line_items = params.line_items.len(),
            gateway = self.gateway.name(),
            "Created checkout session"
        );

        Ok(checkout)
    }
}

/// Assemble the provider payload for an order
pub fn build_checkout_params(
    resolver: &UrlResolver,
    order_id: Uuid,
    lines: &[OrderLine],
) -> Result<CheckoutSessionParams> {
    let success_url = resolver.resolve(SUCCESS_PATH)?;
    let cancel_url = resolver.resolve(CANCEL_PATH)?;

    let line_items = lines
        .iter()
        .map(|line| build_line_item(resolver, line))
        .collect::<Result<Vec<_>>>()?;

    Ok(CheckoutSessionParams {
        payment_method_types: vec![PaymentMethodType::Card],
        mode: CheckoutMode::Payment,
        success_url,
        cancel_url,
        metadata: HashMap::from([(ORDER_ID_METADATA_KEY.to_string(), order_id.to_string())]),
        line_items,
    })
}

fn build_line_item(resolver: &UrlResolver, line: &OrderLine) -> Result<LineItem> {
    let image = resolve_image(resolver, line.variant.image_url.as_deref())?;
    let description = Some(line.product.description.clone()).filter(|d| !d.is_empty());

    Ok(LineItem {
        price_data: PriceData {
            currency: CHECKOUT_CURRENCY.to_string(),
            product_data: ProductData {
                name: line.display_name(),
                description,
                images: vec![image],
            },
            unit_amount: line.item.price_in_cents,
        },
        quantity: u64::from(line.item.quantity),
    })
}

/// Absolute image URL for a variant; falls back to the default image when the
/// stored reference is absent or nothing survives sanitizing
fn resolve_image(resolver: &UrlResolver, raw: Option<&str>) -> Result<String> {
    let cleaned = raw.map(sanitize_url).unwrap_or_default();
    if cleaned.trim().is_empty() {
        Ok(resolver.resolve(DEFAULT_IMAGE_PATH)?)
    } else {
        Ok(resolver.resolve(&cleaned)?)
    }
}
