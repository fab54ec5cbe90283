// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Coffee Protocol - QUIC + Protobuf communication layer
//!
//! Wire protocol shared by the coffee services and their clients:
//! - `menu_proto`: the menu catalog service
//! - `brew_proto`: the order lifecycle service
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    coffee-protocol                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RPC Layer: one request/response per bidirectional stream   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Serialization: Protobuf (prost)                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Transport: QUIC (quinn)                                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use coffee_protocol::{CoffeeClient, brew_proto};
//!
//! let client = CoffeeClient::localhost("127.0.0.1:50051".parse()?)?;
//! let rpc_request = brew_proto::RpcRequest {
//!     request: Some(brew_proto::rpc_request::Request::OrderDrink(
//!         brew_proto::OrderRequest { menu_item_name: "Latte".to_string() },
//!     )),
//! };
//! let response: brew_proto::RpcResponse = client.request(&rpc_request).await?;
//! ```

pub mod brew_proto;
pub mod client;
pub mod frame;
pub mod menu_proto;
pub mod server;

pub use client::{ClientError, CoffeeClient, CoffeeClientConfig};
pub use frame::{Frame, FrameError, MessageType};
pub use server::{ConnectionHandler, CoffeeServer, CoffeeServerConfig, ServerError, StreamHandler};
