// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Router tests against an in-process fake backend.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use axum::Router;
use coffee_api::{CoffeeBackend, build_router};
use coffee_sdk::{HealthStatus, MenuItem, OrderStatus, OrderSummary, Result, SdkError};
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tower::ServiceExt;

#[derive(Default)]
struct FakeBackend {
    orders: Mutex<Vec<OrderSummary>>,
    down: bool,
    unhealthy: bool,
}

impl FakeBackend {
    fn down() -> Self {
        Self {
            down: true,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<()> {
        if self.down {
            return Err(SdkError::Connection("connection refused".to_string()));
        }
        Ok(())
    }
}

fn not_found(order_id: &str) -> SdkError {
    SdkError::NotFound(format!("Order '{}' not found", order_id))
}

#[async_trait]
impl CoffeeBackend for FakeBackend {
    async fn get_menu(&self) -> Result<Vec<MenuItem>> {
        self.check()?;
        Ok(vec![MenuItem {
            name: "Espresso".to_string(),
            description: "Strong".to_string(),
            price: 2.5,
        }])
    }

    async fn order_drink(&self, menu_item_name: &str) -> Result<String> {
        self.check()?;
        let mut orders = self.orders.lock().await;
        let order_id = format!("order-{}", orders.len() + 1);
        orders.push(OrderSummary {
            order_id: order_id.clone(),
            menu_item_name: menu_item_name.to_string(),
            status: OrderStatus::Queued,
        });
        Ok(order_id)
    }

    async fn list_orders(&self) -> Result<Vec<OrderSummary>> {
        self.check()?;
        Ok(self.orders.lock().await.clone())
    }

    async fn get_order(&self, order_id: &str) -> Result<OrderSummary> {
        self.check()?;
        if !order_id.starts_with("order-") {
            return Err(SdkError::InvalidInput(format!("invalid order id '{}'", order_id)));
        }
        self.orders
            .lock()
            .await
            .iter()
            .find(|o| o.order_id == order_id)
            .cloned()
            .ok_or_else(|| not_found(order_id))
    }

    async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<OrderSummary> {
        self.check()?;
        let mut orders = self.orders.lock().await;
        let order = orders
            .iter_mut()
            .find(|o| o.order_id == order_id)
            .ok_or_else(|| not_found(order_id))?;
        order.status = status;
        Ok(order.clone())
    }

    async fn delete_order(&self, order_id: &str) -> Result<bool> {
        self.check()?;
        self.orders.lock().await.retain(|o| o.order_id != order_id);
        Ok(true)
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        self.check()?;
        Ok(HealthStatus {
            healthy: !self.unhealthy,
            version: "0.3.0".to_string(),
            uptime_ms: 1234,
        })
    }
}

fn app() -> Router {
    build_router(Arc::new(FakeBackend::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

fn json(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn test_get_menu() {
    let (status, body) = send(&app(), Method::GET, "/api/menu", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json(&body),
        json!([{"name": "Espresso", "description": "Strong", "price": 2.5}])
    );
}

#[tokio::test]
async fn test_create_and_list_orders() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(r#"{"menuItemName":"Latte"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!({"orderId": "order-1"}));

    let (status, body) = send(&app, Method::GET, "/api/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json(&body),
        json!([{"orderId": "order-1", "menuItemName": "Latte", "status": "QUEUED"}])
    );
}

#[tokio::test]
async fn test_create_order_rejects_bad_bodies() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/orders", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "invalid request body");

    let (status, body) = send(&app, Method::POST, "/api/orders", Some("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "menuItemName is required");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(r#"{"menuItemName":""}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/api/orders", None).await;
    assert_eq!(json(&body), json!([]));
}

#[tokio::test]
async fn test_get_update_delete_order() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/api/orders",
        Some(r#"{"menuItemName":"Cortado"}"#),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/api/orders/order-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["menuItemName"], "Cortado");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/orders/order-1/status",
        Some(r#"{"status":"brewing"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["status"], "BREWING");

    let (status, body) = send(&app, Method::DELETE, "/api/orders/order-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!({"success": true}));

    let (status, body) = send(&app, Method::GET, "/api/orders/order-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Order 'order-1' not found"));
}

#[tokio::test]
async fn test_update_status_rejects_unknown_status() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/orders/order-1/status",
        Some(r#"{"status":"SPILLED"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_order_id_is_bad_request() {
    let (status, _) = send(&app(), Method::GET, "/api/orders/latte", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_downstream_failure_is_internal_error() {
    let app = build_router(Arc::new(FakeBackend::down()));

    let (status, body) = send(&app, Method::GET, "/api/menu", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("failed to get menu"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(r#"{"menuItemName":"Latte"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json(&body),
        json!({"healthy": true, "version": "0.3.0", "uptimeMs": 1234})
    );

    let unhealthy = build_router(Arc::new(FakeBackend {
        unhealthy: true,
        ..Default::default()
    }));
    let (status, _) = send(&unhealthy, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_cors_preflight() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/orders")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
    let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap();
    assert!(methods.contains("PUT"));
    assert!(methods.contains("DELETE"));
}
