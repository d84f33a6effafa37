//! # storefront-payments
//!
//! Hosted checkout for storefront orders.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌─────────────────────┐
//! │  Storefront │────▶│  Stripe Hosted  │────▶│  /checkout/success  │
//! │ (order page)│     │  Checkout Page  │     │  /checkout/cancel   │
//! └─────────────┘     └─────────────────┘     └─────────────────────┘
//! ```
//!
//! [`CheckoutService`] authenticates and authorizes the caller, loads the
//! order lines, absolutizes image and redirect URLs and hands a provider-neutral
//! [`CheckoutSessionParams`] to a [`PaymentGateway`]. [`StripeGateway`] maps that
//! payload onto Stripe Checkout.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_payments::{CheckoutConfig, CheckoutService, CreateCheckoutSessionInput, StripeGateway};
//!
//! let service = CheckoutService::new(
//!     CheckoutConfig::from_env(),
//!     store.clone(),
//!     Arc::new(StripeGateway::new()),
//! );
//!
//! let session = service
//!     .create_checkout_session(Some(&auth_session), CreateCheckoutSessionInput::new(order_id))
//!     .await?;
//!
//! // Redirect buyer to: session.url
//! ```

mod checkout;
mod config;
mod error;
mod service;

pub use checkout::{
    CHECKOUT_CURRENCY, CheckoutMode, CheckoutSession, CheckoutSessionParams, LineItem,
    PaymentGateway, PaymentMethodType, PriceData, ProductData, StripeGateway,
};
pub use config::{CheckoutConfig, DEFAULT_APP_BASE_URL};
pub use error::{PaymentError, Result};
pub use service::{
    CANCEL_PATH, CheckoutService, CreateCheckoutSessionInput, SUCCESS_PATH, build_checkout_params,
};
pub use storefront_core::DEFAULT_IMAGE_PATH;
