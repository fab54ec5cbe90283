// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Brew protocol messages (`coffee.brew`).
//!
//! Protobuf schema:
//!
//! ```text
//! enum OrderStatus {
//!   ORDER_STATUS_UNSPECIFIED = 0; QUEUED = 1; GRINDING = 2;
//!   BREWING = 3; FROTHING = 4; READY = 5;
//! }
//!
//! message Order { string order_id = 1; string menu_item_name = 2; string status = 3; }
//!
//! message OrderRequest              { string menu_item_name = 1; }
//! message OrderResponse             { string order_id = 1; }
//! message ListOrdersRequest         {}
//! message ListOrdersResponse        { repeated Order orders = 1; }
//! message GetOrderRequest           { string order_id = 1; }
//! message GetOrderResponse          { Order order = 1; }
//! message UpdateOrderStatusRequest  { string order_id = 1; OrderStatus status = 2; }
//! message UpdateOrderStatusResponse { Order order = 1; }
//! message DeleteOrderRequest        { string order_id = 1; }
//! message DeleteOrderResponse       { bool success = 1; }
//! message HealthCheckRequest        {}
//! message HealthCheckResponse       { bool healthy = 1; string version = 2; int64 uptime_ms = 3; }
//! message RpcError                  { string code = 1; string message = 2; }
//!
//! message RpcRequest {
//!   oneof request {
//!     OrderRequest order_drink = 1; ListOrdersRequest list_orders = 2;
//!     GetOrderRequest get_order = 3; UpdateOrderStatusRequest update_order_status = 4;
//!     DeleteOrderRequest delete_order = 5; HealthCheckRequest health_check = 6;
//!   }
//! }
//! message RpcResponse {
//!   oneof response {
//!     OrderResponse order_drink = 1; ListOrdersResponse list_orders = 2;
//!     GetOrderResponse get_order = 3; UpdateOrderStatusResponse update_order_status = 4;
//!     DeleteOrderResponse delete_order = 5; HealthCheckResponse health_check = 6;
//!     RpcError error = 100;
//!   }
//! }
//! ```

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum OrderStatus {
    Unspecified = 0,
    Queued = 1,
    Grinding = 2,
    Brewing = 3,
    Frothing = 4,
    Ready = 5,
}

impl OrderStatus {
    /// Name of the value as it appears in the protobuf schema.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "ORDER_STATUS_UNSPECIFIED",
            Self::Queued => "QUEUED",
            Self::Grinding => "GRINDING",
            Self::Brewing => "BREWING",
            Self::Frothing => "FROTHING",
            Self::Ready => "READY",
        }
    }

    /// Look up a value by its schema name.
    pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
        match value {
            "ORDER_STATUS_UNSPECIFIED" => Some(Self::Unspecified),
            "QUEUED" => Some(Self::Queued),
            "GRINDING" => Some(Self::Grinding),
            "BREWING" => Some(Self::Brewing),
            "FROTHING" => Some(Self::Frothing),
            "READY" => Some(Self::Ready),
            _ => None,
        }
    }
}

/// An order as exposed over the wire.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Order {
    /// Public identifier (`order-<id>`).
    #[prost(string, tag = "1")]
    pub order_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub menu_item_name: ::prost::alloc::string::String,
    /// Canonical status name (`QUEUED`, `GRINDING`, ...).
    #[prost(string, tag = "3")]
    pub status: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OrderRequest {
    #[prost(string, tag = "1")]
    pub menu_item_name: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OrderResponse {
    #[prost(string, tag = "1")]
    pub order_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListOrdersRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListOrdersResponse {
    #[prost(message, repeated, tag = "1")]
    pub orders: ::prost::alloc::vec::Vec<Order>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOrderRequest {
    #[prost(string, tag = "1")]
    pub order_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetOrderResponse {
    #[prost(message, optional, tag = "1")]
    pub order: ::core::option::Option<Order>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateOrderStatusRequest {
    #[prost(string, tag = "1")]
    pub order_id: ::prost::alloc::string::String,
    #[prost(enumeration = "OrderStatus", tag = "2")]
    pub status: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateOrderStatusResponse {
    #[prost(message, optional, tag = "1")]
    pub order: ::core::option::Option<Order>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteOrderRequest {
    #[prost(string, tag = "1")]
    pub order_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteOrderResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HealthCheckRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HealthCheckResponse {
    #[prost(bool, tag = "1")]
    pub healthy: bool,
    #[prost(string, tag = "2")]
    pub version: ::prost::alloc::string::String,
    #[prost(int64, tag = "3")]
    pub uptime_ms: i64,
}

/// Error returned in place of a response.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcError {
    /// One of `invalid_argument`, `not_found`, `internal`.
    #[prost(string, tag = "1")]
    pub code: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcRequest {
    #[prost(oneof = "rpc_request::Request", tags = "1, 2, 3, 4, 5, 6")]
    pub request: ::core::option::Option<rpc_request::Request>,
}

pub mod rpc_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Request {
        #[prost(message, tag = "1")]
        OrderDrink(super::OrderRequest),
        #[prost(message, tag = "2")]
        ListOrders(super::ListOrdersRequest),
        #[prost(message, tag = "3")]
        GetOrder(super::GetOrderRequest),
        #[prost(message, tag = "4")]
        UpdateOrderStatus(super::UpdateOrderStatusRequest),
        #[prost(message, tag = "5")]
        DeleteOrder(super::DeleteOrderRequest),
        #[prost(message, tag = "6")]
        HealthCheck(super::HealthCheckRequest),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcResponse {
    #[prost(oneof = "rpc_response::Response", tags = "1, 2, 3, 4, 5, 6, 100")]
    pub response: ::core::option::Option<rpc_response::Response>,
}

pub mod rpc_response {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Response {
        #[prost(message, tag = "1")]
        OrderDrink(super::OrderResponse),
        #[prost(message, tag = "2")]
        ListOrders(super::ListOrdersResponse),
        #[prost(message, tag = "3")]
        GetOrder(super::GetOrderResponse),
        #[prost(message, tag = "4")]
        UpdateOrderStatus(super::UpdateOrderStatusResponse),
        #[prost(message, tag = "5")]
        DeleteOrder(super::DeleteOrderResponse),
        #[prost(message, tag = "6")]
        HealthCheck(super::HealthCheckResponse),
        #[prost(message, tag = "100")]
        Error(super::RpcError),
    }
}
