// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! CoffeeSdk client for the brew and menu services.

use std::future::Future;

use tracing::{debug, info, instrument};

use coffee_protocol::brew_proto::{
    self, DeleteOrderRequest, GetOrderRequest, HealthCheckRequest, ListOrdersRequest,
    OrderRequest, UpdateOrderStatusRequest,
};
use coffee_protocol::client::{ClientError, CoffeeClient, CoffeeClientConfig};
use coffee_protocol::menu_proto::{self, GetMenuRequest};

use crate::config::SdkConfig;
use crate::error::{Result, SdkError};
use crate::types::{HealthStatus, MenuItem, OrderStatus, OrderSummary};

/// High-level SDK for the coffee services.
///
/// Holds one lazily connected QUIC client per service. Every call is bounded
/// by [`SdkConfig::request_timeout`].
pub struct CoffeeSdk {
    brew: CoffeeClient,
    menu: CoffeeClient,
    config: SdkConfig,
}

impl CoffeeSdk {
    pub fn new(config: SdkConfig) -> Result<Self> {
        let brew = CoffeeClient::new(client_config(&config, config.brew_addr))?;
        let menu = CoffeeClient::new(client_config(&config, config.menu_addr))?;
        Ok(Self { brew, menu, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(SdkConfig::from_env()?)
    }

    pub fn localhost() -> Result<Self> {
        Self::new(SdkConfig::localhost())
    }

    /// Connect to both services up front instead of on first use.
    #[instrument(skip(self))]
    pub async fn connect(&self) -> Result<()> {
        self.brew.connect().await?;
        self.menu.connect().await?;
        info!("Connected to brew and menu services");
        Ok(())
    }

    pub async fn close(&self) {
        self.brew.close().await;
        self.menu.close().await;
    }

    pub async fn is_connected(&self) -> bool {
        self.brew.is_connected().await && self.menu.is_connected().await
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    async fn with_timeout<T>(
        &self,
        fut: impl Future<Output = std::result::Result<T, ClientError>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.config.request_timeout, fut).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(SdkError::Timeout(
                self.config.request_timeout.as_millis() as u64
            )),
        }
    }

    async fn send_brew(
        &self,
        request: brew_proto::rpc_request::Request,
    ) -> Result<brew_proto::rpc_response::Response> {
        use brew_proto::rpc_response::Response;

        let rpc_request = brew_proto::RpcRequest {
            request: Some(request),
        };
        let rpc_response: brew_proto::RpcResponse =
            self.with_timeout(self.brew.request(&rpc_request)).await?;

        match rpc_response.response {
            Some(Response::Error(err)) => Err(SdkError::from_server(err.code, err.message)),
            Some(response) => Ok(response),
            None => Err(SdkError::UnexpectedResponse(
                "empty response from brew service".to_string(),
            )),
        }
    }

    async fn send_menu(
        &self,
        request: menu_proto::rpc_request::Request,
    ) -> Result<menu_proto::rpc_response::Response> {
        use menu_proto::rpc_response::Response;

        let rpc_request = menu_proto::RpcRequest {
            request: Some(request),
        };
        let rpc_response: menu_proto::RpcResponse =
            self.with_timeout(self.menu.request(&rpc_request)).await?;

        match rpc_response.response {
            Some(Response::Error(err)) => Err(SdkError::from_server(err.code, err.message)),
            Some(response) => Ok(response),
            None => Err(SdkError::UnexpectedResponse(
                "empty response from menu service".to_string(),
            )),
        }
    }

    // =========================================================================
    // Menu
    // =========================================================================

    /// Fetch the full menu, in catalog order.
    #[instrument(skip(self))]
    pub async fn get_menu(&self) -> Result<Vec<MenuItem>> {
        use menu_proto::rpc_request::Request;
        use menu_proto::rpc_response::Response;

        match self.send_menu(Request::GetMenu(GetMenuRequest {})).await? {
            Response::GetMenu(resp) => Ok(resp.items.into_iter().map(MenuItem::from).collect()),
            _ => Err(SdkError::UnexpectedResponse(
                "expected GetMenuResponse".to_string(),
            )),
        }
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Place an order and return its public id.
    #[instrument(skip(self), fields(menu_item_name = %menu_item_name))]
    pub async fn order_drink(&self, menu_item_name: &str) -> Result<String> {
        use brew_proto::rpc_request::Request;
        use brew_proto::rpc_response::Response;

        debug!("Placing order");
        let response = self
            .send_brew(Request::OrderDrink(OrderRequest {
                menu_item_name: menu_item_name.to_string(),
            }))
            .await?;

        match response {
            Response::OrderDrink(resp) => {
                info!(order_id = %resp.order_id, "Order placed");
                Ok(resp.order_id)
            }
            _ => Err(SdkError::UnexpectedResponse(
                "expected OrderResponse".to_string(),
            )),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderSummary>> {
        use brew_proto::rpc_request::Request;
        use brew_proto::rpc_response::Response;

        match self.send_brew(Request::ListOrders(ListOrdersRequest {})).await? {
            Response::ListOrders(resp) => resp
                .orders
                .into_iter()
                .map(OrderSummary::try_from)
                .collect(),
            _ => Err(SdkError::UnexpectedResponse(
                "expected ListOrdersResponse".to_string(),
            )),
        }
    }

    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_order(&self, order_id: &str) -> Result<OrderSummary> {
        use brew_proto::rpc_request::Request;
        use brew_proto::rpc_response::Response;

        let response = self
            .send_brew(Request::GetOrder(GetOrderRequest {
                order_id: order_id.to_string(),
            }))
            .await?;

        match response {
            Response::GetOrder(resp) => expect_order(resp.order),
            _ => Err(SdkError::UnexpectedResponse(
                "expected GetOrderResponse".to_string(),
            )),
        }
    }

    /// Set the order's status. Any stage may follow any other.
    #[instrument(skip(self), fields(order_id = %order_id, status = %status))]
    pub async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<OrderSummary> {
        use brew_proto::rpc_request::Request;
        use brew_proto::rpc_response::Response;

        let response = self
            .send_brew(Request::UpdateOrderStatus(UpdateOrderStatusRequest {
                order_id: order_id.to_string(),
                status: status.into(),
            }))
            .await?;

        match response {
            Response::UpdateOrderStatus(resp) => expect_order(resp.order),
            _ => Err(SdkError::UnexpectedResponse(
                "expected UpdateOrderStatusResponse".to_string(),
            )),
        }
    }

    /// Move the order to the next stage of the usual progression.
    ///
    /// Returns `InvalidInput` if the order is already `READY`.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn advance_order(&self, order_id: &str) -> Result<OrderSummary> {
        let current = self.get_order(order_id).await?;
        let next = current.status.next().ok_or_else(|| {
            SdkError::InvalidInput(format!("order {} is already {}", order_id, current.status))
        })?;
        self.update_order_status(order_id, next).await
    }

    /// Delete an order. Deleting an order that does not exist still succeeds.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn delete_order(&self, order_id: &str) -> Result<bool> {
        use brew_proto::rpc_request::Request;
        use brew_proto::rpc_response::Response;

        let response = self
            .send_brew(Request::DeleteOrder(DeleteOrderRequest {
                order_id: order_id.to_string(),
            }))
            .await?;

        match response {
            Response::DeleteOrder(resp) => Ok(resp.success),
            _ => Err(SdkError::UnexpectedResponse(
                "expected DeleteOrderResponse".to_string(),
            )),
        }
    }

    // =========================================================================
    // Health
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<HealthStatus> {
        use brew_proto::rpc_request::Request;
        use brew_proto::rpc_response::Response;

        match self.send_brew(Request::HealthCheck(HealthCheckRequest {})).await? {
            Response::HealthCheck(resp) => Ok(HealthStatus::from(resp)),
            _ => Err(SdkError::UnexpectedResponse(
                "expected HealthCheckResponse".to_string(),
            )),
        }
    }
}

fn client_config(config: &SdkConfig, server_addr: std::net::SocketAddr) -> CoffeeClientConfig {
    CoffeeClientConfig {
        server_addr,
        server_name: config.server_name.clone(),
        dangerous_skip_cert_verification: config.skip_cert_verification,
        connect_timeout_ms: config.connect_timeout.as_millis() as u64,
        ..Default::default()
    }
}

fn expect_order(order: Option<brew_proto::Order>) -> Result<OrderSummary> {
    order
        .ok_or_else(|| SdkError::UnexpectedResponse("response carried no order".to_string()))?
        .try_into()
}
