//! URL Normalization
//!
//! Image references and redirect targets are stored as loose strings. Before
//! they leave the system they are stripped of characters that break redirect
//! targets and made absolute against the application's public base URL.

use ::url::Url;

use crate::error::{CoreError, Result};

/// Image used wherever a variant has none
pub const DEFAULT_IMAGE_PATH: &str = "/default-image.png";

/// Characters removed from any URL before it is resolved
const UNSAFE_URL_CHARS: [char; 3] = ['{', '}', '"'];

/// Remove every `{`, `}` and `"` from a URL-ish string
pub fn sanitize_url(raw: &str) -> String {
    raw.chars().filter(|c| !UNSAFE_URL_CHARS.contains(c)).collect()
}

/// Resolves paths against a fixed base URL
#[derive(Clone, Debug)]
pub struct UrlResolver {
    base: Url,
}

impl UrlResolver {
    /// Parse the base URL
    ///
    /// The base must be absolute and able to act as a base (`http://host/...`,
    /// not `mailto:`).
    pub fn new(base: &str) -> Result<Self> {
        let invalid = || CoreError::Resolution {
            base: base.to_string(),
            path: String::new(),
        };

        let parsed = Url::parse(base).map_err(|_| invalid())?;
        if parsed.cannot_be_a_base() {
            return Err(invalid());
        }

        Ok(Self { base: parsed })
    }

    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    /// Sanitize `path` and resolve it against the base
    ///
    /// Absolute inputs come back normalized; anything that does not form a
    /// valid URL is an error rather than being dropped.
    pub fn resolve(&self, path: &str) -> Result<String> {
        let cleaned = sanitize_url(path);

        self.base
            .join(&cleaned)
            .map(String::from)
            .map_err(|e| {
                tracing::debug!(base = %self.base, path, error = %e, "URL resolution failed");
                CoreError::Resolution {
                    base: self.base.to_string(),
                    path: path.to_string(),
                }
            })
    }
}
