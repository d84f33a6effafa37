//! Authenticated Sessions
//!
//! Sessions are issued by the application's auth service; this module only
//! models the record that a request presents and that stores hand back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque session token
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Parse a session cookie value of the form `token.signature`
    ///
    /// Returns `None` for blank values.
    pub fn from_cookie_value(value: &str) -> Option<Self> {
        let token = value.split('.').next().unwrap_or_default().trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(token.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user a session belongs to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A live authenticated session
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: SessionToken,
    pub user: SessionUser,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn new(token: SessionToken, user: SessionUser, expires_at: DateTime<Utc>) -> Self {
        Self { token, user, expires_at }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    pub fn user_id(&self) -> &str {
        &self.user.id
    }
}
