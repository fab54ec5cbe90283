// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The downstream the HTTP handlers call.

use async_trait::async_trait;
use coffee_sdk::{CoffeeSdk, HealthStatus, MenuItem, OrderStatus, OrderSummary, Result};

/// Operations the aggregator forwards to the brew and menu services.
///
/// Implemented by [`CoffeeSdk`]; tests substitute an in-process fake.
#[async_trait]
pub trait CoffeeBackend: Send + Sync {
    async fn get_menu(&self) -> Result<Vec<MenuItem>>;
    async fn order_drink(&self, menu_item_name: &str) -> Result<String>;
    async fn list_orders(&self) -> Result<Vec<OrderSummary>>;
    async fn get_order(&self, order_id: &str) -> Result<OrderSummary>;
    async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<OrderSummary>;
    async fn delete_order(&self, order_id: &str) -> Result<bool>;
    async fn health_check(&self) -> Result<HealthStatus>;
}

#[async_trait]
impl CoffeeBackend for CoffeeSdk {
    async fn get_menu(&self) -> Result<Vec<MenuItem>> {
        CoffeeSdk::get_menu(self).await
    }

    async fn order_drink(&self, menu_item_name: &str) -> Result<String> {
        CoffeeSdk::order_drink(self, menu_item_name).await
    }

    async fn list_orders(&self) -> Result<Vec<OrderSummary>> {
        CoffeeSdk::list_orders(self).await
    }

    async fn get_order(&self, order_id: &str) -> Result<OrderSummary> {
        CoffeeSdk::get_order(self, order_id).await
    }

    async fn update_order_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<OrderSummary> {
        CoffeeSdk::update_order_status(self, order_id, status).await
    }

    async fn delete_order(&self, order_id: &str) -> Result<bool> {
        CoffeeSdk::delete_order(self, order_id).await
    }

    async fn health_check(&self) -> Result<HealthStatus> {
        CoffeeSdk::health_check(self).await
    }
}
