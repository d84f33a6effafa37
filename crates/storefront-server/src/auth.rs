//! Request Authentication
//!
//! Sessions are issued by the auth service in front of the storefront. Here we
//! only pull the session token off the request and look it up.

use axum::http::{HeaderMap, header};

use storefront_core::{AuthSession, SessionStore, SessionToken};
use storefront_payments::PaymentError;

/// Session cookie names, plain and `__Secure-` prefixed
const SESSION_COOKIES: [&str; 2] = [
    "better-auth.session_token",
    "__Secure-better-auth.session_token",
];

/// Extract the session token from `Authorization: Bearer` or the session cookie
pub fn session_token(headers: &HeaderMap) -> Option<SessionToken> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(SessionToken::from_string(token));
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| SESSION_COOKIES.contains(name))
        .and_then(|(_, value)| SessionToken::from_cookie_value(value))
}

/// Resolve the request's session, if any
///
/// A missing or unknown token is `Ok(None)`; only store failures are errors.
pub async fn current_session(
    sessions: &dyn SessionStore,
    headers: &HeaderMap,
) -> Result<Option<AuthSession>, PaymentError> {
    let Some(token) = session_token(headers) else {
        return Ok(None);
    };

    let session = sessions.find_session(&token).await?;
    if session.is_none() {
        tracing::debug!("Session token did not match a live session");
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc123"));
        assert_eq!(session_token(&headers).unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_signed_cookie_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; better-auth.session_token=abc123.c2ln; other=1"),
        );
        assert_eq!(session_token(&headers).unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_secure_cookie_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("__Secure-better-auth.session_token=xyz.sig"),
        );
        assert_eq!(session_token(&headers).unwrap().as_str(), "xyz");
    }

    #[test]
    fn test_no_token() {
        let mut headers = HeaderMap::new();
        assert!(session_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dTpw"));
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert!(session_token(&headers).is_none());
    }
}
