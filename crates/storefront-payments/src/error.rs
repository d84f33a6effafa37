//! Checkout Error Types

use thiserror::Error;

use storefront_core::CoreError;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors raised while building or submitting a checkout session
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Payment provider credential missing or unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// No authenticated session on the request
    #[error("Not authenticated")]
    Unauthenticated,

    /// Malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Order does not exist
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Order belongs to someone else
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Image or redirect URL could not be made absolute
    #[error("Invalid URL: base={base}, path={path}")]
    Resolution { base: String, path: String },

    /// Stripe API error
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl PaymentError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::Stripe(_) | PaymentError::Storage(_))
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            PaymentError::Config(_) => "Payments are not available right now.",
            PaymentError::Unauthenticated => "Please sign in to continue.",
            PaymentError::Validation(_) => "The request was not valid.",
            PaymentError::NotFound(_) => "Order not found.",
            PaymentError::Unauthorized(_) => "You do not have access to this order.",
            PaymentError::Stripe(_) => "Payment processing failed. Please try again.",
            _ => "An error occurred processing your request.",
        }
    }
}

impl From<CoreError> for PaymentError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Resolution { base, path } => PaymentError::Resolution { base, path },
            CoreError::Validation(msg) => PaymentError::Validation(msg),
            CoreError::Database(msg) => PaymentError::Storage(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: PaymentError = CoreError::Resolution {
            base: "http://localhost:3000".into(),
            path: "http://[::1".into(),
        }
        .into();
        assert!(matches!(err, PaymentError::Resolution { .. }));

        let err: PaymentError = CoreError::Database("connection reset".into()).into();
        assert!(matches!(err, PaymentError::Storage(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_flow_errors_not_retryable() {
        assert!(!PaymentError::Unauthenticated.is_retryable());
        assert!(!PaymentError::Unauthorized("o".into()).is_retryable());
        assert_eq!(
            PaymentError::NotFound("o".into()).user_message(),
            "Order not found."
        );
    }
}
