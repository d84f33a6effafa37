//! Error Types

use thiserror::Error;

/// Result type alias for storefront core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types shared by stores and URL handling
#[derive(Error, Debug)]
pub enum CoreError {
    /// A relative path could not be combined with the base into a valid URL
    #[error("Invalid URL: base={base}, path={path}")]
    Resolution { base: String, path: String },

    /// Input did not have the expected shape
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backing store failed or returned unusable data
    #[error("Database error: {0}")]
    Database(String),
}

impl CoreError {
    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Database(_))
    }
}
