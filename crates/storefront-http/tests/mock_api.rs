//! Mock backend tests for the storefront session client.
//!
//! These tests use wiremock to simulate the storefront API and check the
//! session renewal flow end to end, including cookie handling.

use std::sync::Arc;

use serde_json::json;
use storefront_core::models::OrderStatus;
use storefront_core::{ApiUrl, Area, Credentials, Error, RequestDescriptor, Transport};
use storefront_http::{ClientConfig, HttpTransport, SessionStore, StorefrontClient};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create an API URL from a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn client(server: &MockServer) -> StorefrontClient {
    StorefrontClient::new(ClientConfig::new(mock_api_url(server))).unwrap()
}

/// A client whose store already holds an expired session cookie.
fn client_with_stale_session(server: &MockServer) -> StorefrontClient {
    let api = mock_api_url(server);
    let store = Arc::new(SessionStore::new(&api));
    store.insert("jwt", "stale");
    StorefrontClient::with_store(ClientConfig::new(api), store).unwrap()
}

fn unauthorized() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({ "message": "Not authorized, token failed" }))
}

/// Renewal that issues a fresh session cookie.
async fn mount_refresh_ok(server: &MockServer, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/api/public/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "jwt=fresh; Path=/; HttpOnly; SameSite=Strict"),
        )
        .expect(expected)
        .mount(server)
        .await;
}

fn orders_body() -> serde_json::Value {
    json!([
        {
            "_id": "o1",
            "items": [{ "productId": "p1", "name": "Custom Tee", "quantity": 2, "price": 19.5 }],
            "totalPrice": 39.0,
            "status": "processing"
        }
    ])
}

// ============================================================================
// Renewal Flow
// ============================================================================

#[tokio::test]
async fn test_expired_session_is_renewed_and_request_replayed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/orders"))
        .and(header("cookie", "jwt=fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(orders_body()))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/user/orders"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&server)
        .await;

    mount_refresh_ok(&server, 1).await;

    let client = client_with_stale_session(&server);
    let orders = client.orders().await.unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, "o1");
    assert_eq!(orders[0].status, OrderStatus::Processing);
    assert_eq!(client.store().snapshot()[0].value, "fresh");
}

#[tokio::test]
async fn test_forbidden_also_triggers_renewal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/product/categories"))
        .and(header("cookie", "jwt=fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "c1", "name": "Mugs" }
        ])))
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/product/categories"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    mount_refresh_ok(&server, 1).await;

    let client = client_with_stale_session(&server);
    let categories = client.categories().await.unwrap();
    assert_eq!(categories[0].name, "Mugs");
}

#[tokio::test]
async fn test_renewal_denied_surfaces_renewal_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/cart"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/public/refresh"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Refresh token expired" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_stale_session(&server);
    let err = client.cart().await.unwrap_err();

    assert!(err.is_renewal_denied());
    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("Refresh token expired"));
}

#[tokio::test]
async fn test_second_rejection_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Admin only" })))
        .expect(2)
        .mount(&server)
        .await;

    mount_refresh_ok(&server, 1).await;

    let client = client_with_stale_session(&server);
    let err = client.users().await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert!(err.is_session_error());
}

#[tokio::test]
async fn test_other_errors_skip_renewal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/product/products/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Product not found" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/product/products"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    mount_refresh_ok(&server, 0).await;

    let client = client_with_stale_session(&server);

    let err = client.product("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("Product not found"));

    let request = RequestDescriptor::post("/products").with_body(json!({ "name": "Mug" }));
    let err = client.instance(Area::Product).send(&request).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_network_failure_skips_renewal() {
    // Reserve a free port, then release it so connections are refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let api = ApiUrl::new(format!("http://127.0.0.1:{}", port)).unwrap();

    let client = StorefrontClient::new(ClientConfig::new(api)).unwrap();
    let err = client.orders().await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn test_concurrent_rejections_renew_independently() {
    let server = MockServer::start().await;

    for route in ["/api/user/orders", "/api/product/products"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(unauthorized())
            .up_to_n_times(1)
            .with_priority(1)
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path("/api/user/orders"))
        .and(header("cookie", "jwt=fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(orders_body()))
        .with_priority(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/product/products"))
        .and(header("cookie", "jwt=fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "p1", "name": "Custom Tee", "price": 19.5 }
        ])))
        .with_priority(2)
        .mount(&server)
        .await;

    mount_refresh_ok(&server, 2).await;

    let client = client_with_stale_session(&server);
    let (orders, products) = tokio::join!(client.orders(), client.products(None));

    assert_eq!(orders.unwrap().len(), 1);
    assert_eq!(products.unwrap()[0].name, "Custom Tee");
}

#[tokio::test]
async fn test_refresh_endpoint_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/public/refresh"))
        .respond_with(unauthorized())
        .expect(2)
        .mount(&server)
        .await;

    let client = client_with_stale_session(&server);
    let err = client.refresh().await.unwrap_err();
    assert!(err.is_renewal_denied());

    let err = client
        .instance(Area::Public)
        .send(&RequestDescriptor::post("/refresh"))
        .await;
    assert_eq!(err.unwrap_err().status(), Some(401));
}

// ============================================================================
// Session Lifecycle
// ============================================================================

#[tokio::test]
async fn test_login_stores_session_cookie() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({
            "email": "alice@example.com",
            "password": "secret123"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "jwt=issued; Path=/; HttpOnly")
                .set_body_json(json!({
                    "_id": "u1",
                    "name": "Alice",
                    "email": "alice@example.com",
                    "isAdmin": false
                })),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .and(header("cookie", "jwt=issued"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "u1",
            "name": "Alice",
            "email": "alice@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(!client.store().has_session());

    let profile = client
        .login(&Credentials::new("alice@example.com", "secret123"))
        .await
        .unwrap();
    assert_eq!(profile.name, "Alice");
    assert!(client.store().has_session());

    let me = client.profile().await.unwrap();
    assert_eq!(me.id, "u1");
}

#[tokio::test]
async fn test_login_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(unauthorized())
        .mount(&server)
        .await;

    // A rejected login still goes through renewal, which fails without a session.
    Mock::given(method("POST"))
        .and(path("/api/public/refresh"))
        .respond_with(unauthorized())
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client
        .login(&Credentials::new("bad@example.com", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(!client.store().has_session());
}

#[tokio::test]
async fn test_logout_clears_store() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "jwt=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_stale_session(&server);
    client.logout().await.unwrap();
    assert!(!client.store().has_session());
}

#[tokio::test]
async fn test_logout_failure_still_clears_store() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_with_stale_session(&server);
    let err = client.logout().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(!client.store().has_session());
}

#[tokio::test]
async fn test_credentials_not_forwarded_when_disabled() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/product/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let api = mock_api_url(&server);
    let store = Arc::new(SessionStore::new(&api));
    store.insert("jwt", "abc");
    let mut config = ClientConfig::new(api);
    config.forward_credentials = false;
    let client = StorefrontClient::with_store(config, store).unwrap();

    client.categories().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("cookie").is_none());
}

#[tokio::test]
async fn test_transport_forwarding_flag_controls_cookie_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/public/ping"))
        .respond_with(ResponseTemplate::new(200).insert_header("set-cookie", "jwt=rotated; Path=/"))
        .expect(2)
        .mount(&server)
        .await;

    let api = mock_api_url(&server);
    let base = api.endpoint(Area::Public.default_base_path(), "");
    let store = Arc::new(SessionStore::new(&api));
    store.insert("jwt", "abc");

    let silent = HttpTransport::new(base.clone(), &store, false, None, "storefront-test").unwrap();
    assert!(!silent.forwards_credentials());
    silent.execute(&RequestDescriptor::get("/ping")).await.unwrap();

    // Without forwarding the response cookie is not captured either.
    assert_eq!(store.snapshot()[0].value, "abc");

    let forwarding = HttpTransport::new(base, &store, true, None, "storefront-test").unwrap();
    assert!(forwarding.forwards_credentials());
    forwarding.execute(&RequestDescriptor::get("/ping")).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get("cookie").is_none());
    assert_eq!(requests[1].headers.get("cookie").unwrap(), "jwt=abc");
    assert_eq!(store.snapshot()[0].value, "rotated");
}

// ============================================================================
// Resource Operations
// ============================================================================

#[tokio::test]
async fn test_admin_updates_order_status() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/admin/orders/o1/status"))
        .and(body_json(json!({ "status": "shipped" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "o1",
            "status": "shipped"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_with_stale_session(&server);
    let order = client
        .update_order_status("o1", OrderStatus::Shipped)
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Shipped);
}

#[tokio::test]
async fn test_products_filtered_by_category() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/product/products"))
        .and(wiremock::matchers::query_param("category", "mugs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "p9", "name": "Photo Mug", "price": 14.0, "customizable": true }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let products = client.products(Some("mugs")).await.unwrap();
    assert!(products[0].customizable);
}
