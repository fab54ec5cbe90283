// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Menu protocol messages (`coffee.menu`).
//!
//! Protobuf schema:
//!
//! ```text
//! message MenuItem        { string name = 1; string description = 2; double price = 3; }
//! message GetMenuRequest  {}
//! message GetMenuResponse { repeated MenuItem items = 1; }
//! message RpcError        { string code = 1; string message = 2; }
//!
//! message RpcRequest  { oneof request  { GetMenuRequest get_menu = 1; } }
//! message RpcResponse { oneof response { GetMenuResponse get_menu = 1; RpcError error = 100; } }
//! ```

/// A single drink on the menu.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MenuItem {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub description: ::prost::alloc::string::String,
    #[prost(double, tag = "3")]
    pub price: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetMenuRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetMenuResponse {
    #[prost(message, repeated, tag = "1")]
    pub items: ::prost::alloc::vec::Vec<MenuItem>,
}

/// Error returned in place of a response.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcError {
    #[prost(string, tag = "1")]
    pub code: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcRequest {
    #[prost(oneof = "rpc_request::Request", tags = "1")]
    pub request: ::core::option::Option<rpc_request::Request>,
}

pub mod rpc_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Request {
        #[prost(message, tag = "1")]
        GetMenu(super::GetMenuRequest),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RpcResponse {
    #[prost(oneof = "rpc_response::Response", tags = "1, 100")]
    pub response: ::core::option::Option<rpc_response::Response>,
}

pub mod rpc_response {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Response {
        #[prost(message, tag = "1")]
        GetMenu(super::GetMenuResponse),
        #[prost(message, tag = "100")]
        Error(super::RpcError),
    }
}
