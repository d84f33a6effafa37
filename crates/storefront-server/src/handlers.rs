//! HTTP Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
};
use serde::Serialize;

use storefront_core::ProductWithVariants;
use storefront_payments::{CheckoutSession, CreateCheckoutSessionInput, PaymentError};

use crate::auth::current_session;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub stripe_configured: bool,
    pub database: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a checkout failure onto status, code and user-facing message
fn payment_error(err: &PaymentError) -> ApiError {
    let (status, code) = match err {
        PaymentError::Config(_) => (StatusCode::SERVICE_UNAVAILABLE, "PAYMENTS_DISABLED"),
        PaymentError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
        PaymentError::Validation(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
        PaymentError::NotFound(_) => (StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
        PaymentError::Unauthorized(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        PaymentError::Resolution { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_URL"),
        PaymentError::Stripe(_) => (StatusCode::BAD_GATEWAY, "CHECKOUT_ERROR"),
        PaymentError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
    };

    if status.is_server_error() {
        tracing::error!(code, "Checkout error: {}", err);
    } else {
        tracing::warn!(code, "Checkout rejected: {}", err);
    }

    (
        status,
        Json(ErrorResponse {
            error: err.user_message().into(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        stripe_configured: state.checkout.config().is_payments_configured(),
        database: state.database,
    })
}

/// Product catalog for the storefront lists
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductWithVariants>>, ApiError> {
    let products = state.catalog.list_products_with_variants().await.map_err(|e| {
        tracing::error!("Catalog error: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Could not load products.".into(),
                code: "STORAGE_ERROR".into(),
            }),
        )
    })?;

    Ok(Json(products))
}

/// Create a hosted checkout session for one of the caller's orders
///
/// The credential is checked before the session store is consulted. A body
/// that does not parse is passed on as an empty order ID, so the credential
/// and session checks still run before input validation.
pub async fn create_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateCheckoutSessionInput>, JsonRejection>,
) -> Result<Json<CheckoutSession>, ApiError> {
    let input = body.map(|Json(input)| input).unwrap_or_else(|rejection| {
        tracing::debug!("Unreadable checkout body: {}", rejection);
        CreateCheckoutSessionInput::new("")
    });

    state.checkout.secret_key().map_err(|e| payment_error(&e))?;

    let session = current_session(state.sessions.as_ref(), &headers)
        .await
        .map_err(|e| payment_error(&e))?;

    let checkout = state
        .checkout
        .create_checkout_session(session.as_ref(), input)
        .await
        .map_err(|e| payment_error(&e))?;

    Ok(Json(checkout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, header},
    };
    use chrono::{Duration, Utc};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;
    use uuid::Uuid;

    use storefront_core::{
        AuthSession, CatalogStore, CoreError, MemoryStore, Order, OrderLine, OrderStore, Product,
        ProductVariant, SessionStore, SessionToken, SessionUser,
    };
    use storefront_payments::{CheckoutConfig, CheckoutService, CheckoutSessionParams, PaymentGateway};

    use crate::routes::router;

    const BASE_URL: &str = "http://localhost:3000";

    #[derive(Default)]
    struct FakeGateway {
        calls: Mutex<usize>,
        declined: bool,
    }

    impl FakeGateway {
        fn declining() -> Self {
            Self {
                declined: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for FakeGateway {
        async fn create_checkout_session(
            &self,
            _secret_key: &str,
            params: &CheckoutSessionParams,
        ) -> storefront_payments::Result<CheckoutSession> {
            *self.calls.lock().unwrap() += 1;
            if self.declined {
                return Err(PaymentError::Stripe("api_key_expired".into()));
            }
            Ok(CheckoutSession {
                id: "cs_test_42".into(),
                url: Some("https://checkout.stripe.com/c/pay/cs_test_42".into()),
                raw: serde_json::json!({ "id": "cs_test_42", "metadata": params.metadata }),
            })
        }

        fn name(&self) -> &str {
            "Fake"
        }
    }

    /// Store whose every lookup fails
    struct BrokenStore;

    fn broken<T>() -> storefront_core::Result<T> {
        Err(CoreError::Database("connection refused".into()))
    }

    #[async_trait]
    impl OrderStore for BrokenStore {
        async fn find_order(&self, _id: Uuid) -> storefront_core::Result<Option<Order>> {
            broken()
        }

        async fn find_order_lines(&self, _order_id: Uuid) -> storefront_core::Result<Vec<OrderLine>> {
            broken()
        }
    }

    #[async_trait]
    impl CatalogStore for BrokenStore {
        async fn list_products_with_variants(
            &self,
        ) -> storefront_core::Result<Vec<storefront_core::ProductWithVariants>> {
            broken()
        }
    }

    #[async_trait]
    impl SessionStore for BrokenStore {
        async fn find_session(
            &self,
            _token: &SessionToken,
        ) -> storefront_core::Result<Option<AuthSession>> {
            broken()
        }
    }

    struct TestApp {
        app: Router,
        gateway: Arc<FakeGateway>,
        order: Order,
    }

    async fn seeded_store() -> (Arc<MemoryStore>, Order) {
        let store = Arc::new(MemoryStore::new());

        let order = Order {
            id: Uuid::new_v4(),
            user_id: "u1".into(),
        };
        store.insert_order(order.clone()).await;

        for (token, user_id) in [("tok-u1", "u1"), ("tok-u2", "u2")] {
            store
                .insert_session(AuthSession::new(
                    SessionToken::from_string(token),
                    SessionUser {
                        id: user_id.into(),
                        name: user_id.into(),
                        email: format!("{user_id}@example.com"),
                    },
                    Utc::now() + Duration::hours(1),
                ))
                .await;
        }

        for name in ["Sneaker", "Hoodie"] {
            let product = Product {
                id: Uuid::new_v4(),
                name: name.into(),
                slug: name.to_lowercase(),
                description: String::new(),
            };
            let variant = ProductVariant {
                id: Uuid::new_v4(),
                product_id: product.id,
                name: "Black".into(),
                slug: format!("{}-black", product.slug),
                color: "Black".into(),
                price_in_cents: 19990,
                image_url: None,
            };
            store.insert_product(product, vec![variant]).await;
        }

        (store, order)
    }

    fn app_over(
        checkout: CheckoutService,
        catalog: Arc<dyn CatalogStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Router {
        let state = AppState {
            checkout: Arc::new(checkout),
            catalog,
            sessions,
            database: "memory",
        };
        router(state, "static")
    }

    async fn test_app_with(secret: Option<&str>, base_url: &str, gateway: FakeGateway) -> TestApp {
        let (store, order) = seeded_store().await;
        let gateway = Arc::new(gateway);

        let checkout = CheckoutService::new(
            CheckoutConfig::new(secret.map(String::from), base_url),
            store.clone(),
            gateway.clone(),
        );

        TestApp {
            app: app_over(checkout, store.clone(), store),
            gateway,
            order,
        }
    }

    async fn test_app(secret: Option<&str>) -> TestApp {
        test_app_with(secret, BASE_URL, FakeGateway::default()).await
    }

    fn checkout_request(body: String, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::post("/api/checkout").header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = auth {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body)).unwrap()
    }

    fn order_body(id: impl std::fmt::Display) -> String {
        serde_json::json!({ "orderId": id.to_string() }).to_string()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn assert_error(response: axum::response::Response, status: StatusCode, code: &str) {
        assert_eq!(response.status(), status, "{code}");
        assert_eq!(json_body(response).await["code"], code);
    }

    #[tokio::test]
    async fn test_checkout_for_owner() {
        let t = test_app(Some("sk_test_1")).await;
        let response = t
            .app
            .oneshot(checkout_request(order_body(t.order.id), Some("tok-u1")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["id"], "cs_test_42");
        assert_eq!(body["raw"]["metadata"]["orderId"], t.order.id.to_string());
        assert_eq!(*t.gateway.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_checkout_with_session_cookie() {
        let t = test_app(Some("sk_test_1")).await;
        let request = Request::post("/api/checkout")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::COOKIE, "better-auth.session_token=tok-u1.signature")
            .body(Body::from(order_body(t.order.id)))
            .unwrap();

        let response = t.app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_checkout_status_mapping() {
        let cases = [
            (Some("sk_test_1"), None, None, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            (Some("sk_test_1"), Some("tok-unknown"), None, StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            (Some("sk_test_1"), Some("tok-u2"), None, StatusCode::FORBIDDEN, "FORBIDDEN"),
            (None, Some("tok-u1"), None, StatusCode::SERVICE_UNAVAILABLE, "PAYMENTS_DISABLED"),
            (Some("sk_test_1"), Some("tok-u1"), Some(order_body("ord_1")), StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            (Some("sk_test_1"), Some("tok-u1"), Some("{not json".to_string()), StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            (Some("sk_test_1"), Some("tok-u1"), Some(order_body(Uuid::new_v4())), StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
        ];

        for (secret, token, body, status, code) in cases {
            let t = test_app(secret).await;
            let body = body.unwrap_or_else(|| order_body(t.order.id));

            let response = t.app.oneshot(checkout_request(body, token)).await.unwrap();
            assert_error(response, status, code).await;
            assert_eq!(*t.gateway.calls.lock().unwrap(), 0, "{code}");
        }
    }

    #[tokio::test]
    async fn test_unresolvable_base_url_is_invalid_url() {
        let t = test_app_with(Some("sk_test_1"), "http://[::1", FakeGateway::default()).await;
        let response = t
            .app
            .oneshot(checkout_request(order_body(t.order.id), Some("tok-u1")))
            .await
            .unwrap();

        assert_error(response, StatusCode::INTERNAL_SERVER_ERROR, "INVALID_URL").await;
        assert_eq!(*t.gateway.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_is_checkout_error() {
        let t = test_app_with(Some("sk_test_1"), BASE_URL, FakeGateway::declining()).await;
        let response = t
            .app
            .oneshot(checkout_request(order_body(t.order.id), Some("tok-u1")))
            .await
            .unwrap();

        assert_error(response, StatusCode::BAD_GATEWAY, "CHECKOUT_ERROR").await;
        assert_eq!(*t.gateway.calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_order_store_failure_is_storage_error() {
        let (sessions, _) = seeded_store().await;
        let gateway = Arc::new(FakeGateway::default());
        let checkout = CheckoutService::new(
            CheckoutConfig::new(Some("sk_test_1".into()), BASE_URL),
            Arc::new(BrokenStore),
            gateway.clone(),
        );
        let app = app_over(checkout, sessions.clone(), sessions);

        let response = app
            .oneshot(checkout_request(order_body(Uuid::new_v4()), Some("tok-u1")))
            .await
            .unwrap();

        assert_error(response, StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR").await;
        assert_eq!(*gateway.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_session_store_failure_is_storage_error() {
        let (store, order) = seeded_store().await;
        let checkout = CheckoutService::new(
            CheckoutConfig::new(Some("sk_test_1".into()), BASE_URL),
            store.clone(),
            Arc::new(FakeGateway::default()),
        );
        let app = app_over(checkout, store, Arc::new(BrokenStore));

        let response = app
            .oneshot(checkout_request(order_body(order.id), Some("tok-u1")))
            .await
            .unwrap();

        assert_error(response, StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR").await;
    }

    #[tokio::test]
    async fn test_disabled_payments_skip_session_lookup() {
        let (store, order) = seeded_store().await;
        let checkout = CheckoutService::new(
            CheckoutConfig::new(None, BASE_URL),
            store.clone(),
            Arc::new(FakeGateway::default()),
        );
        let app = app_over(checkout, store, Arc::new(BrokenStore));

        let response = app
            .oneshot(checkout_request(order_body(order.id), Some("tok-u1")))
            .await
            .unwrap();

        assert_error(response, StatusCode::SERVICE_UNAVAILABLE, "PAYMENTS_DISABLED").await;
    }

    #[tokio::test]
    async fn test_list_products_in_catalog_order() {
        let t = test_app(None).await;
        let response = t
            .app
            .oneshot(Request::get("/api/products").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body[0]["name"], "Sneaker");
        assert_eq!(body[1]["name"], "Hoodie");
        assert_eq!(body[0]["variants"][0]["priceInCents"], 19990);
    }

    #[tokio::test]
    async fn test_list_products_storage_error() {
        let (store, _) = seeded_store().await;
        let checkout = CheckoutService::new(
            CheckoutConfig::new(None, BASE_URL),
            store.clone(),
            Arc::new(FakeGateway::default()),
        );
        let app = app_over(checkout, Arc::new(BrokenStore), store);

        let response = app
            .oneshot(Request::get("/api/products").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_error(response, StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR").await;
    }

    #[tokio::test]
    async fn test_health_reports_configuration() {
        let t = test_app(None).await;
        let response = t
            .app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["stripe_configured"], false);
        assert_eq!(body["database"], "memory");
    }
}
