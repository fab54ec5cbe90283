// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Brew protocol handlers.
//!
//! Each handler decodes its request into domain values, calls the order
//! service and encodes the result. Order identifiers cross the wire as
//! `order-<id>` strings and are parsed before the service is reached.

use std::sync::Arc;

use tracing::{debug, instrument};

use coffee_protocol::brew_proto::{
    self, DeleteOrderRequest, DeleteOrderResponse, GetOrderRequest, GetOrderResponse,
    HealthCheckRequest, HealthCheckResponse, ListOrdersRequest, ListOrdersResponse, OrderRequest,
    OrderResponse, UpdateOrderStatusRequest, UpdateOrderStatusResponse,
};

use crate::domain::{Order, OrderStatus};
use crate::error::{CoreError, Result};
use crate::order_ref::OrderRef;
use crate::services::OrderService;

/// Shared state for brew handlers.
pub struct BrewHandlerState {
    pub orders: Arc<dyn OrderService>,
    /// When the server started (for uptime calculation).
    pub start_time: std::time::Instant,
    pub version: String,
}

impl BrewHandlerState {
    pub fn new(orders: Arc<dyn OrderService>) -> Self {
        Self {
            orders,
            start_time: std::time::Instant::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn uptime_ms(&self) -> i64 {
        self.start_time.elapsed().as_millis() as i64
    }
}

/// Domain order to its wire form.
pub fn order_to_proto(order: &Order) -> brew_proto::Order {
    brew_proto::Order {
        order_id: OrderRef::new(order.id).to_string(),
        menu_item_name: order.menu_item_name.clone(),
        status: order.status.as_str().to_string(),
    }
}

/// Wire status to domain status. `UNSPECIFIED` and unknown values are rejected.
pub fn status_from_proto(raw: i32) -> Result<OrderStatus> {
    match brew_proto::OrderStatus::try_from(raw) {
        Ok(brew_proto::OrderStatus::Queued) => Ok(OrderStatus::Queued),
        Ok(brew_proto::OrderStatus::Grinding) => Ok(OrderStatus::Grinding),
        Ok(brew_proto::OrderStatus::Brewing) => Ok(OrderStatus::Brewing),
        Ok(brew_proto::OrderStatus::Frothing) => Ok(OrderStatus::Frothing),
        Ok(brew_proto::OrderStatus::Ready) => Ok(OrderStatus::Ready),
        Ok(brew_proto::OrderStatus::Unspecified) => Err(CoreError::invalid_argument(
            "status",
            "order status must be specified",
        )),
        Err(_) => Err(CoreError::invalid_argument(
            "status",
            format!("unknown order status value {}", raw),
        )),
    }
}

/// Domain status to wire status.
pub fn status_to_proto(status: OrderStatus) -> brew_proto::OrderStatus {
    match status {
        OrderStatus::Queued => brew_proto::OrderStatus::Queued,
        OrderStatus::Grinding => brew_proto::OrderStatus::Grinding,
        OrderStatus::Brewing => brew_proto::OrderStatus::Brewing,
        OrderStatus::Frothing => brew_proto::OrderStatus::Frothing,
        OrderStatus::Ready => brew_proto::OrderStatus::Ready,
    }
}

// ============================================================================
// Orders
// ============================================================================

#[instrument(skip(state, request), fields(menu_item_name = %request.menu_item_name))]
pub async fn handle_order_drink(
    state: &BrewHandlerState,
    request: OrderRequest,
) -> Result<OrderResponse> {
    let order = state.orders.create_order(&request.menu_item_name).await?;
    let order_id = OrderRef::new(order.id).to_string();
    debug!(%order_id, "Drink ordered");
    Ok(OrderResponse { order_id })
}

#[instrument(skip(state, _request))]
pub async fn handle_list_orders(
    state: &BrewHandlerState,
    _request: ListOrdersRequest,
) -> Result<ListOrdersResponse> {
    let orders = state.orders.list_orders().await?;
    Ok(ListOrdersResponse {
        orders: orders.iter().map(order_to_proto).collect(),
    })
}

#[instrument(skip(state, request), fields(order_id = %request.order_id))]
pub async fn handle_get_order(
    state: &BrewHandlerState,
    request: GetOrderRequest,
) -> Result<GetOrderResponse> {
    let order_ref: OrderRef = request.order_id.parse()?;
    let order = state.orders.get_order(order_ref.id()).await?;
    Ok(GetOrderResponse {
        order: Some(order_to_proto(&order)),
    })
}

#[instrument(skip(state, request), fields(order_id = %request.order_id, status = request.status))]
pub async fn handle_update_order_status(
    state: &BrewHandlerState,
    request: UpdateOrderStatusRequest,
) -> Result<UpdateOrderStatusResponse> {
    let order_ref: OrderRef = request.order_id.parse()?;
    let status = status_from_proto(request.status)?;
    let order = state
        .orders
        .update_order_status(order_ref.id(), status)
        .await?;
    Ok(UpdateOrderStatusResponse {
        order: Some(order_to_proto(&order)),
    })
}

#[instrument(skip(state, request), fields(order_id = %request.order_id))]
pub async fn handle_delete_order(
    state: &BrewHandlerState,
    request: DeleteOrderRequest,
) -> Result<DeleteOrderResponse> {
    let order_ref: OrderRef = request.order_id.parse()?;
    state.orders.delete_order(order_ref.id()).await?;
    Ok(DeleteOrderResponse { success: true })
}

// ============================================================================
// Health Check
// ============================================================================

#[instrument(skip(state, _request))]
pub async fn handle_health_check(
    state: &BrewHandlerState,
    _request: HealthCheckRequest,
) -> Result<HealthCheckResponse> {
    Ok(HealthCheckResponse {
        healthy: state.orders.storage_healthy().await,
        version: state.version.clone(),
        uptime_ms: state.uptime_ms(),
    })
}
