// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Driving ports: what the RPC facade calls into.

pub mod menu;
pub mod orders;

pub use menu::StaticMenu;
pub use orders::OrderLifecycle;

use async_trait::async_trait;

use crate::domain::{MenuItem, Order, OrderStatus};
use crate::error::CoreError;

/// Read-only access to the drinks on offer.
pub trait MenuService: Send + Sync {
    fn list_items(&self) -> Vec<MenuItem>;
}

/// Order lifecycle operations.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Create an order in `QUEUED`. The name must be non-blank.
    async fn create_order(&self, menu_item_name: &str) -> Result<Order, CoreError>;

    async fn list_orders(&self) -> Result<Vec<Order>, CoreError>;

    async fn get_order(&self, id: i64) -> Result<Order, CoreError>;

    /// Set the status unconditionally. Any stage may follow any other.
    async fn update_order_status(&self, id: i64, status: OrderStatus) -> Result<Order, CoreError>;

    /// Succeeds whether or not the order existed.
    async fn delete_order(&self, id: i64) -> Result<(), CoreError>;

    /// Whether the underlying store is reachable.
    async fn storage_healthy(&self) -> bool;
}
