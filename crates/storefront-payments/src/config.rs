//! Checkout Configuration

/// Base URL used when none is configured
pub const DEFAULT_APP_BASE_URL: &str = "http://localhost:3000";

/// Settings the checkout flow needs, passed in explicitly
#[derive(Clone)]
pub struct CheckoutConfig {
    /// Stripe secret key; checkout fails with a configuration error without it
    pub stripe_secret_key: Option<String>,

    /// Public base URL that image and redirect paths are resolved against
    pub app_base_url: String,
}

impl CheckoutConfig {
    pub fn new(stripe_secret_key: Option<String>, app_base_url: impl Into<String>) -> Self {
        Self {
            stripe_secret_key,
            app_base_url: app_base_url.into(),
        }
    }

    /// Create from environment variables
    ///
    /// `STRIPE_SECRET_KEY` is optional here so the server can boot without
    /// payments. The base URL comes from `APP_BASE_URL`, then
    /// `NEXT_PUBLIC_APP_URL`, then the local development default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let non_blank = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let app_base_url = non_blank("APP_BASE_URL")
            .or_else(|| non_blank("NEXT_PUBLIC_APP_URL"))
            .unwrap_or_else(|| DEFAULT_APP_BASE_URL.to_string());

        Self {
            stripe_secret_key: non_blank("STRIPE_SECRET_KEY"),
            app_base_url,
        }
    }

    /// The secret key, if set to something other than whitespace
    pub fn secret_key(&self) -> Option<&str> {
        self.stripe_secret_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn is_payments_configured(&self) -> bool {
        self.secret_key().is_some()
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self::new(None, DEFAULT_APP_BASE_URL)
    }
}

impl std::fmt::Debug for CheckoutConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutConfig")
            .field(
                "stripe_secret_key",
                &self.stripe_secret_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("app_base_url", &self.app_base_url)
            .finish()
    }
}
