// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! In-process order store. Used by tests and for running without a database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{Order, OrderStatus};
use crate::error::CoreError;

use super::OrderStore;

#[derive(Default)]
struct State {
    last_id: i64,
    orders: BTreeMap<i64, Order>,
}

/// Order store kept in a `BTreeMap`, so iteration follows id order.
#[derive(Default)]
pub struct MemoryOrderStore {
    state: RwLock<State>,
}

impl MemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn create(&self, menu_item_name: &str, status: OrderStatus) -> Result<Order, CoreError> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let now = Utc::now();
        let order = Order {
            id: state.last_id,
            menu_item_name: menu_item_name.to_string(),
            status,
            created_at: now,
            updated_at: now,
        };
        state.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_all(&self) -> Result<Vec<Order>, CoreError> {
        Ok(self.state.read().await.orders.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Order, CoreError> {
        self.state
            .read()
            .await
            .orders
            .get(&id)
            .cloned()
            .ok_or(CoreError::OrderNotFound { order_id: id })
    }

    async fn update(&self, order: &Order) -> Result<Order, CoreError> {
        let mut state = self.state.write().await;
        let stored = state
            .orders
            .get_mut(&order.id)
            .ok_or(CoreError::OrderNotFound { order_id: order.id })?;
        stored.menu_item_name = order.menu_item_name.clone();
        stored.status = order.status;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.state.write().await.orders.remove(&id);
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, CoreError> {
        Ok(true)
    }
}
