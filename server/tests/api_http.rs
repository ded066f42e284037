//! HTTP surface tests: envelope shape, status codes, auth gating
//!
//! Drives the full router (middleware included) with in-process requests.

mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use tokio_util::sync::CancellationToken;

use bakehouse_server::api::build_app;
use bakehouse_server::auth::{AdminCredential, JwtConfig, JwtService};
use bakehouse_server::core::config::NotifyConfig;
use bakehouse_server::core::{Config, ServerState};
use bakehouse_server::notifications::{NotificationService, NotificationWorker};
use common::{seed_product, test_db};

const ADMIN_PASSWORD: &str = "test-admin-password";

fn test_config() -> Config {
    Config {
        work_dir: "./unused".to_string(),
        http_port: 0,
        environment: "test".to_string(),
        log_dir: None,
        jwt: JwtConfig {
            secret: "integration-test-secret-integration-test".to_string(),
            expiration_minutes: 60,
            issuer: "bakehouse-server".to_string(),
            audience: "bakehouse-admin".to_string(),
        },
        admin: AdminCredential::from_plain("admin", ADMIN_PASSWORD).expect("credential"),
        notify: NotifyConfig::default(),
    }
}

async fn test_state() -> ServerState {
    let db = test_db().await;
    let config = test_config();
    let shutdown = CancellationToken::new();
    let notifications = NotificationService::start_with_worker(
        8,
        NotificationWorker::new(NotifyConfig::default(), None, None),
        shutdown.clone(),
    );
    let jwt = Arc::new(JwtService::with_config(config.jwt.clone()));
    ServerState::new(config, db, jwt, notifications, shutdown)
}

fn app_for(state: &ServerState) -> Router {
    build_app(state).with_state(state.clone())
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn order_creation_returns_201_with_envelope() {
    let state = test_state().await;
    let app = app_for(&state);
    let cake = seed_product(&state.db, "Chocolate Cake", 100.0, Some(5)).await;

    let body = json!({
        "customerInfo": {
            "name": "Jane Doe",
            "email": "Jane@Example.com",
            "phone": "9876543210"
        },
        "items": [{"productId": cake.id, "quantity": 2}],
        "deliveryOption": "pickup",
        "notes": "Less sugar please"
    });

    let (status, body) = send_json(&app, "POST", "/api/orders", Some(body), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Order placed successfully");
    assert_eq!(body["data"]["total"], 200.0);
    assert_eq!(body["data"]["customerInfo"]["email"], "jane@example.com");
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["paymentMethod"], "cod");
}

#[tokio::test]
async fn order_validation_failures_return_400_envelope() {
    let state = test_state().await;
    let app = app_for(&state);
    let cake = seed_product(&state.db, "Cake", 100.0, Some(1)).await;

    // Insufficient stock
    let body = json!({
        "customerInfo": {"name": "Jane", "email": "jane@example.com", "phone": "9876543210"},
        "items": [{"productId": cake.id, "quantity": 3}],
        "deliveryOption": "pickup"
    });
    let (status, body) = send_json(&app, "POST", "/api/orders", Some(body), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("Insufficient stock for \"Cake\". Available: 1")
    );

    // Malformed body (unknown delivery option) is a 400, not axum's default
    let body = json!({
        "customerInfo": {"name": "Jane", "email": "jane@example.com", "phone": "9876543210"},
        "items": [{"productId": cake.id, "quantity": 1}],
        "deliveryOption": "teleport"
    });
    let (status, body) = send_json(&app, "POST", "/api/orders", Some(body), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn missing_resources_return_404_envelope() {
    let state = test_state().await;
    let app = app_for(&state);

    let (status, body) =
        send_json(&app, "GET", "/api/orders/order:doesnotexist", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Order not found");

    let (status, _) =
        send_json(&app, "GET", "/api/products/product:missing", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_listing_filters_and_paginates() {
    let state = test_state().await;
    let app = app_for(&state);
    seed_product(&state.db, "Chocolate Cake", 100.0, None).await;
    seed_product(&state.db, "Walnut Bread", 5.0, None).await;

    let (status, body) = send_json(&app, "GET", "/api/products?search=cake", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["pagination"]["page"], 1);

    // Unknown category value is a validation error
    let (status, _) = send_json(&app, "GET", "/api/products?category=sushi", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // "all" disables the category filter
    let (status, body) = send_json(&app, "GET", "/api/products?category=all", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 2);
}

#[tokio::test]
async fn admin_routes_require_capability_token() {
    let state = test_state().await;
    let app = app_for(&state);

    // No token
    let (status, body) = send_json(&app, "GET", "/api/admin/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    // Garbage token
    let (status, _) = send_json(&app, "GET", "/api/admin/orders", None, Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Expired token
    let expired = JwtService::with_config(JwtConfig {
        expiration_minutes: -10,
        ..state.config.jwt.clone()
    })
    .generate_admin_token("admin")
    .unwrap();
    let (status, _) = send_json(&app, "GET", "/api/admin/orders", None, Some(&expired)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Valid token
    let token = state.jwt.generate_admin_token("admin").unwrap();
    let (status, body) = send_json(&app, "GET", "/api/admin/orders", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn login_issues_token_that_unlocks_admin_routes() {
    let state = test_state().await;
    let app = app_for(&state);

    // Wrong password: unified message, 400
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"username": "admin", "password": "wrong"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid username or password");

    // Correct credentials
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({"username": "admin", "password": ADMIN_PASSWORD})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_string();
    assert!(body["data"]["expiresIn"].as_i64().unwrap() > 0);

    let (status, _) = send_json(&app, "GET", "/api/admin/stats", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn admin_status_update_and_enquiry_flow() {
    let state = test_state().await;
    let app = app_for(&state);
    let token = state.jwt.generate_admin_token("admin").unwrap();
    let cake = seed_product(&state.db, "Cake", 50.0, None).await;

    // Place an order through the API
    let (_, body) = send_json(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customerInfo": {"name": "Jane", "email": "jane@example.com", "phone": "9876543210"},
            "items": [{"productId": cake.id, "quantity": 1}],
            "deliveryOption": "pickup"
        })),
        None,
    )
    .await;
    let order_id = body["data"]["id"].as_str().unwrap().to_string();

    // Cancel it
    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/admin/orders/{order_id}/status"),
        Some(json!({"status": "cancelled"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "cancelled");

    // Unknown status value is rejected with 400
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/admin/orders/{order_id}/status"),
        Some(json!({"status": "vanished"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown order id is 404
    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/admin/orders/order:nope/status",
        Some(json!({"status": "ready"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Enquiry submission (no email) and admin status update
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/enquiries",
        Some(json!({
            "name": "Sam",
            "phone": "5550001",
            "enquiryType": "custom_cake",
            "message": "Birthday cake for ten people"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");
    let enquiry_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/api/admin/enquiries/{enquiry_id}/status"),
        Some(json!({"status": "in_progress"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "in_progress");
}

#[tokio::test]
async fn soft_deleted_product_disappears_from_storefront_but_not_admin() {
    let state = test_state().await;
    let app = app_for(&state);
    let token = state.jwt.generate_admin_token("admin").unwrap();
    let cake = seed_product(&state.db, "Cake", 50.0, None).await;

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/admin/products/{}", cake.id),
        None,
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Gone from the public catalog
    let (status, _) =
        send_json(&app, "GET", &format!("/api/products/{}", cake.id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Still visible to admin (inactive)
    let (status, body) = send_json(&app, "GET", "/api/admin/products", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let products = body["data"].as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["isActive"], false);
}
