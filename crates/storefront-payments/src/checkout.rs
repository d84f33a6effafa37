//! Stripe Checkout Integration
//!
//! Provider-neutral checkout payload plus the Stripe Checkout (Hosted)
//! implementation of [`PaymentGateway`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use stripe::{
    CheckoutSession as StripeCheckoutSession, CheckoutSessionMode, Client,
    CreateCheckoutSession, CreateCheckoutSessionLineItems,
    CreateCheckoutSessionLineItemsPriceData,
    CreateCheckoutSessionLineItemsPriceDataProductData,
    CreateCheckoutSessionPaymentMethodTypes, Currency,
};

use crate::error::{PaymentError, Result};

/// Currency every line item is charged in
pub const CHECKOUT_CURRENCY: &str = "brl";

/// Payment method offered on the hosted page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
    Card,
}

/// Checkout session mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    /// One-time payment
    Payment,
}

/// Product shown on the hosted page for one line item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductData {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,
}

/// Inline price for one line item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceData {
    pub currency: String,
    pub product_data: ProductData,

    /// Unit price in minor currency units
    pub unit_amount: i64,
}

/// One line of the checkout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub price_data: PriceData,
    pub quantity: u64,
}

/// Everything sent to the provider to open a hosted checkout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSessionParams {
    pub payment_method_types: Vec<PaymentMethodType>,
    pub mode: CheckoutMode,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: HashMap<String, String>,
    pub line_items: Vec<LineItem>,
}

/// Session returned by the provider
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider session ID
    pub id: String,

    /// Hosted checkout URL to redirect the buyer to
    #[serde(default)]
    pub url: Option<String>,

    /// The provider's session object, untouched
    pub raw: serde_json::Value,
}

/// Hosted-checkout capability (Strategy pattern)
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a checkout session using the given secret credential
    async fn create_checkout_session(
        &self,
        secret_key: &str,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession>;

    /// Gateway name
    fn name(&self) -> &str;
}

/// Stripe Checkout gateway
#[derive(Clone, Debug, Default)]
pub struct StripeGateway;

impl StripeGateway {
    pub fn new() -> Self {
        Self
    }
}

fn stripe_currency(code: &str) -> Result<Currency> {
    match code.to_lowercase().as_str() {
        "brl" => Ok(Currency::BRL),
        "usd" => Ok(Currency::USD),
        "eur" => Ok(Currency::EUR),
        other => Err(PaymentError::Config(format!("Unsupported currency: {other}"))),
    }
}

fn stripe_line_item(item: &LineItem) -> Result<CreateCheckoutSessionLineItems> {
    let product = &item.price_data.product_data;

    Ok(CreateCheckoutSessionLineItems {
        quantity: Some(item.quantity),
        price_data: Some(CreateCheckoutSessionLineItemsPriceData {
            currency: stripe_currency(&item.price_data.currency)?,
            unit_amount: Some(item.price_data.unit_amount),
            product_data: Some(CreateCheckoutSessionLineItemsPriceDataProductData {
                name: product.name.clone(),
                description: product.description.clone(),
                images: Some(product.images.clone()),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    })
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(
        &self,
        secret_key: &str,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession> {
        let client = Client::new(secret_key);

        let line_items = params
            .line_items
            .iter()
            .map(stripe_line_item)
            .collect::<Result<Vec<_>>>()?;

        let mut create = CreateCheckoutSession::new();
        create.payment_method_types = Some(
            params
                .payment_method_types
                .iter()
                .map(|method| match method {
                    PaymentMethodType::Card => CreateCheckoutSessionPaymentMethodTypes::Card,
                })
                .collect(),
        );
        create.mode = Some(match params.mode {
            CheckoutMode::Payment => CheckoutSessionMode::Payment,
        });
        create.success_url = Some(&params.success_url);
        create.cancel_url = Some(&params.cancel_url);
        create.metadata = Some(params.metadata.clone());
        create.line_items = Some(line_items);

        let session = StripeCheckoutSession::create(&client, create)
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        let raw = serde_json::to_value(&session)
            .map_err(|e| PaymentError::Stripe(format!("Unreadable session: {e}")))?;

        Ok(CheckoutSession {
            id: session.id.to_string(),
            url: session.url.clone(),
            raw,
        })
    }

    fn name(&self) -> &str {
        "Stripe"
    }
}
