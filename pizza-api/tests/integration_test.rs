use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use pizza_api::{app, middleware::ResiliencyState, AppState, AuthConfig};
use pizza_catalog::PricingCalculator;
use pizza_core::repository::AdminRepository;
use pizza_core::{Admin, AdminRole};
use pizza_order::{MockPaymentGateway, OrderAdmin, OrderCoordinator};
use pizza_store::{InMemoryAdminRepository, InMemoryOrderRepository, LogNotifier};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@pizzahub.test";
const ADMIN_PASSWORD: &str = "correct horse";
const FAILED_REFERENCE: &str = "PIZZA_1_declin";

async fn test_app() -> Router {
    let orders = Arc::new(InMemoryOrderRepository::new());
    let admins = Arc::new(InMemoryAdminRepository::new());

    let hash = bcrypt::hash(ADMIN_PASSWORD, 4).unwrap();
    admins
        .create_admin(&Admin::new(ADMIN_EMAIL.to_string(), hash, AdminRole::Admin))
        .await
        .unwrap();

    let gateway = MockPaymentGateway::new().with_failed_reference(FAILED_REFERENCE);
    let coordinator = OrderCoordinator::new(
        PricingCalculator::default(),
        Arc::new(gateway),
        orders.clone(),
        Arc::new(LogNotifier),
    );

    app(AppState {
        coordinator: Arc::new(coordinator),
        admin: Arc::new(OrderAdmin::new(orders)),
        admins,
        auth: AuthConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        },
        resiliency: Arc::new(ResiliencyState::default()),
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, json)
}

fn checkout(pizza_type: &str, size: &str, quantity: i64) -> Value {
    json!({
        "fullName": "Ada Obi",
        "phone": "08030000000",
        "email": "ada@example.com",
        "pizzaType": pizza_type,
        "pizzaSize": size,
        "quantity": quantity,
        "deliveryAddress": "12 Allen Avenue, Ikeja"
    })
}

fn paid_checkout(reference: &str) -> Value {
    let mut body = checkout("Margherita", "Medium", 2);
    body["paymentReference"] = json!(reference);
    body["amountPaid"] = json!(7000);
    body
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/admin/login",
        Some(json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["accessToken"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_preview_returns_server_side_pricing() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/orders/preview", Some(checkout("Margherita", "Medium", 2)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["data"]["unitPrice"], 3500);
    assert_eq!(body["data"]["totalPrice"], 7000);

    let (_, body) = send(&app, Method::POST, "/orders/preview", Some(checkout("BBQ Chicken", "Large", 1)), None).await;
    assert_eq!(body["data"]["unitPrice"], 5800);
    assert_eq!(body["data"]["totalPrice"], 5800);
}

#[tokio::test]
async fn test_bad_checkout_rejected() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/orders/preview", Some(checkout("Margherita", "Medium", 0)), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, Method::POST, "/orders/preview", Some(checkout("Margherita", "Medium", -1)), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::POST, "/orders/preview", Some(checkout("Suya Supreme", "Medium", 1)), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut extra = checkout("Margherita", "Medium", 1);
    extra["unitPrice"] = json!(1);
    let (status, _) = send(&app, Method::POST, "/orders/preview", Some(extra), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_payment_flow_creates_order_once() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/payment/init", Some(checkout("Margherita", "Medium", 2)), None).await;
    assert_eq!(status, StatusCode::OK);
    let reference = body["data"]["orderData"]["paymentReference"].as_str().unwrap().to_string();
    assert!(body["data"]["authorizationUrl"].is_string());

    let (status, body) = send(&app, Method::GET, &format!("/payment/verify/{}", reference), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "success");

    let (status, body) = send(&app, Method::POST, "/payment/create-order", Some(paid_checkout(&reference)), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["paymentStatus"], "success");
    assert_eq!(body["data"]["deliveryStatus"], "undelivered");
    assert_eq!(body["data"]["totalPrice"], 7000);

    let (status, _) = send(&app, Method::POST, "/payment/create-order", Some(paid_checkout(&reference)), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, Method::GET, &format!("/orders/{}", reference), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["paymentReference"], reference.as_str());
}

#[tokio::test]
async fn test_failed_payment_persists_nothing() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, &format!("/payment/verify/{}", FAILED_REFERENCE), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "failed");

    let (status, body) = send(&app, Method::POST, "/payment/confirm", Some(paid_checkout(FAILED_REFERENCE)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "failed");

    let (status, _) = send(&app, Method::GET, &format!("/orders/{}", FAILED_REFERENCE), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_webhook_always_acknowledges() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/payment/webhook",
        Some(json!({"event": "charge.success", "data": {"reference": "PIZZA_9_nohere", "amount": 700000}})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], true);
}

#[tokio::test]
async fn test_forged_webhook_cannot_fail_a_paid_order() {
    let app = test_app().await;

    let (status, _) = send(&app, Method::POST, "/payment/confirm", Some(paid_checkout("PIZZA_3_forged")), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/payment/webhook",
        Some(json!({"event": "charge.failed", "data": {"reference": "PIZZA_3_forged"}})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], true);

    let (_, body) = send(&app, Method::GET, "/orders/PIZZA_3_forged", None, None).await;
    assert_eq!(body["data"]["paymentStatus"], "success");
}

#[tokio::test]
async fn test_webhook_applies_gateway_status() {
    let app = test_app().await;

    let (status, _) = send(&app, Method::POST, "/payment/create-order", Some(paid_checkout(FAILED_REFERENCE)), None).await;
    assert_eq!(status, StatusCode::CREATED);

    // The event claims success but the gateway reports the charge as failed.
    send(
        &app,
        Method::POST,
        "/payment/webhook",
        Some(json!({"event": "charge.success", "data": {"reference": FAILED_REFERENCE}})),
        None,
    )
    .await;

    let (_, body) = send(&app, Method::GET, &format!("/orders/{}", FAILED_REFERENCE), None, None).await;
    assert_eq!(body["data"]["paymentStatus"], "failed");
}

#[tokio::test]
async fn test_malformed_path_params_rejected_with_envelope() {
    let app = test_app().await;
    let token = login(&app).await;

    let (status, body) = send(&app, Method::GET, "/admin/orders/not-a-uuid", None, Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::GET, "/payment/verify/..%2F..%2Fcustomer", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);

    let (status, body) = send(&app, Method::GET, "/orders/PIZZA_1%20abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
}

#[tokio::test]
async fn test_oversized_quantity_rejected() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/orders/preview", Some(checkout("Margherita", "Medium", 3_000_000_000)), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/admin/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["statusCode"], 401);

    let (status, _) = send(&app, Method::GET, "/admin/stats", None, Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let app = test_app().await;

    let (status, wrong_password) = send(
        &app,
        Method::POST,
        "/admin/login",
        Some(json!({"email": ADMIN_EMAIL, "password": "nope"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown_email) = send(
        &app,
        Method::POST,
        "/admin/login",
        Some(json!({"email": "ghost@pizzahub.test", "password": "nope"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password["error"], unknown_email["error"]);
}

#[tokio::test]
async fn test_admin_delivery_and_stats() {
    let app = test_app().await;
    let token = login(&app).await;

    let (_, body) = send(&app, Method::POST, "/payment/create-order", Some(paid_checkout("PIZZA_2_admin0")), None).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::GET, "/admin/stats", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalOrders"], 1);
    assert_eq!(body["data"]["totalRevenue"], 0);

    for _ in 0..2 {
        let (status, body) = send(&app, Method::PATCH, &format!("/admin/orders/{}/deliver", id), None, Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["deliveryStatus"], "delivered");
    }

    let (_, body) = send(&app, Method::GET, "/admin/stats", None, Some(&token)).await;
    assert_eq!(body["data"]["deliveredOrders"], 1);
    assert_eq!(body["data"]["pendingOrders"], 0);
    assert_eq!(body["data"]["totalRevenue"], 7000);
    assert_eq!(body["data"]["deliveryRate"], 100.0);

    let (status, _) = send(&app, Method::DELETE, &format!("/admin/orders/{}", id), None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &format!("/admin/orders/{}", id), None, Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/admin/orders", None, Some(&token)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_non_admin_role_forbidden() {
    let app = test_app().await;

    let claims = pizza_api::middleware::AdminClaims {
        sub: uuid::Uuid::new_v4().to_string(),
        email: "ada@example.com".to_string(),
        role: "customer".to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::minutes(5)).timestamp() as usize,
    };
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap();

    let (status, body) = send(&app, Method::GET, "/admin/orders", None, Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["statusCode"], 403);
}
