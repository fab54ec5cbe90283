// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The order lifecycle service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::domain::{Order, OrderStatus};
use crate::error::CoreError;
use crate::persistence::OrderStore;

use super::OrderService;

/// Order lifecycle over any [`OrderStore`].
///
/// Holds no state of its own; every operation is one store round trip
/// (two for a status update: load, then write).
#[derive(Clone)]
pub struct OrderLifecycle {
    store: Arc<dyn OrderStore>,
}

impl OrderLifecycle {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrderService for OrderLifecycle {
    #[instrument(skip(self))]
    async fn create_order(&self, menu_item_name: &str) -> Result<Order, CoreError> {
        if menu_item_name.trim().is_empty() {
            return Err(CoreError::invalid_argument(
                "menu_item_name",
                "menu item name must not be empty",
            ));
        }

        let order = self
            .store
            .create(menu_item_name, OrderStatus::Queued)
            .await
            .map_err(|e| e.with_operation("create_order"))?;

        debug!(order_id = order.id, "Order created");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<Order>, CoreError> {
        self.store
            .find_all()
            .await
            .map_err(|e| e.with_operation("list_orders"))
    }

    #[instrument(skip(self))]
    async fn get_order(&self, id: i64) -> Result<Order, CoreError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|e| e.with_operation("get_order"))
    }

    #[instrument(skip(self), fields(status = %status))]
    async fn update_order_status(&self, id: i64, status: OrderStatus) -> Result<Order, CoreError> {
        let mut order = self
            .store
            .find_by_id(id)
            .await
            .map_err(|e| e.with_operation("update_order_status"))?;

        let previous = order.status;
        order.status = status;

        let updated = self
            .store
            .update(&order)
            .await
            .map_err(|e| e.with_operation("update_order_status"))?;

        debug!(from = %previous, to = %status, "Order status changed");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_order(&self, id: i64) -> Result<(), CoreError> {
        self.store
            .delete(id)
            .await
            .map_err(|e| e.with_operation("delete_order"))
    }

    async fn storage_healthy(&self) -> bool {
        match self.store.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "Storage health check failed");
                false
            }
        }
    }
}
