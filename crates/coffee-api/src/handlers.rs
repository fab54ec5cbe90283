// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Route handlers. Each one makes a single downstream call.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use coffee_sdk::{HealthStatus, MenuItem, OrderStatus, OrderSummary};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ApiError, ApiResult};
use crate::router::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    #[serde(default)]
    pub menu_item_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteOrderResponse {
    pub success: bool,
}

/// `GET /api/menu`
#[instrument(skip(state))]
pub async fn get_menu(State(state): State<AppState>) -> ApiResult<Json<Vec<MenuItem>>> {
    let items = state
        .backend
        .get_menu()
        .await
        .map_err(ApiError::upstream("failed to get menu"))?;
    Ok(Json(items))
}

/// `GET /api/orders`
#[instrument(skip(state))]
pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Json<Vec<OrderSummary>>> {
    let orders = state
        .backend
        .list_orders()
        .await
        .map_err(ApiError::upstream("failed to list orders"))?;
    Ok(Json(orders))
}

/// `POST /api/orders`
#[instrument(skip(state, body))]
pub async fn create_order(
    State(state): State<AppState>,
    body: Result<Json<CreateOrderBody>, JsonRejection>,
) -> ApiResult<Json<CreateOrderResponse>> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest("invalid request body".to_string()))?;

    if body.menu_item_name.trim().is_empty() {
        return Err(ApiError::BadRequest("menuItemName is required".to_string()));
    }

    let order_id = state
        .backend
        .order_drink(&body.menu_item_name)
        .await
        .map_err(ApiError::upstream("failed to order drink"))?;
    Ok(Json(CreateOrderResponse { order_id }))
}

/// `GET /api/orders/{orderId}`
#[instrument(skip(state))]
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> ApiResult<Json<OrderSummary>> {
    let order = state
        .backend
        .get_order(&order_id)
        .await
        .map_err(ApiError::upstream("failed to get order"))?;
    Ok(Json(order))
}

/// `PUT /api/orders/{orderId}/status`
#[instrument(skip(state, body))]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    body: Result<Json<UpdateStatusBody>, JsonRejection>,
) -> ApiResult<Json<OrderSummary>> {
    let Json(body) = body.map_err(|_| ApiError::BadRequest("invalid request body".to_string()))?;
    let status: OrderStatus = body
        .status
        .parse()
        .map_err(|e: coffee_sdk::SdkError| ApiError::BadRequest(e.to_string()))?;

    let order = state
        .backend
        .update_order_status(&order_id, status)
        .await
        .map_err(ApiError::upstream("failed to update order status"))?;
    Ok(Json(order))
}

/// `DELETE /api/orders/{orderId}`
#[instrument(skip(state))]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> ApiResult<Json<DeleteOrderResponse>> {
    let success = state
        .backend
        .delete_order(&order_id)
        .await
        .map_err(ApiError::upstream("failed to delete order"))?;
    Ok(Json(DeleteOrderResponse { success }))
}

/// `GET /health`. 503 when the brew service reports its storage unreachable.
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> ApiResult<(StatusCode, Json<HealthStatus>)> {
    let health = state
        .backend
        .health_check()
        .await
        .map_err(ApiError::upstream("failed to check health"))?;
    let status = if health.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    Ok((status, Json(health)))
}
