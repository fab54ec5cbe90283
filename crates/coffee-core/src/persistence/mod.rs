// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Order storage: the `OrderStore` port and its adapters.

pub mod memory;
pub mod postgres;
pub mod sqlite;

pub use self::memory::MemoryOrderStore;
pub use self::postgres::PostgresOrderStore;
pub use self::sqlite::SqliteOrderStore;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{Order, OrderStatus};
use crate::error::CoreError;

/// Row shape of the `orders` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRecord {
    pub id: i64,
    pub menu_item_name: String,
    /// Canonical status name, see [`OrderStatus::as_str`].
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRecord> for Order {
    type Error = CoreError;

    fn try_from(record: OrderRecord) -> Result<Self, Self::Error> {
        let status = record
            .status
            .parse::<OrderStatus>()
            .map_err(|_| CoreError::DatabaseError {
                operation: "decode_order".to_string(),
                details: format!(
                    "order {} has unknown status '{}'",
                    record.id, record.status
                ),
            })?;

        Ok(Order {
            id: record.id,
            menu_item_name: record.menu_item_name,
            status,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

fn into_orders(records: Vec<OrderRecord>) -> Result<Vec<Order>, CoreError> {
    records.into_iter().map(Order::try_from).collect()
}

/// Persistence contract for orders.
///
/// Adapters own id assignment and both timestamps. No method spans more than
/// one round trip to the backing store.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert a new order. The store assigns `id`, `created_at` and `updated_at`.
    async fn create(&self, menu_item_name: &str, status: OrderStatus) -> Result<Order, CoreError>;

    /// All orders in insertion order. Empty when there are none.
    async fn find_all(&self) -> Result<Vec<Order>, CoreError>;

    /// Fails with `OrderNotFound` when no row matches.
    async fn find_by_id(&self, id: i64) -> Result<Order, CoreError>;

    /// Persist the mutable fields of `order` (keyed by its id) and refresh
    /// `updated_at`. Fails with `OrderNotFound` when the id does not exist.
    async fn update(&self, order: &Order) -> Result<Order, CoreError>;

    /// Remove the row. Deleting a missing id is not an error.
    async fn delete(&self, id: i64) -> Result<(), CoreError>;

    /// Whether the backing store answers a trivial query.
    async fn health_check(&self) -> Result<bool, CoreError>;

    /// Release pooled connections. Later calls fail.
    async fn close(&self) {}
}

/// Open a store for `database_url` (`sqlite:` URLs select SQLite, anything
/// else PostgreSQL), optionally applying pending migrations.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    run_migrations: bool,
) -> Result<Arc<dyn OrderStore>, CoreError> {
    if database_url.starts_with("sqlite:") {
        info!(backend = "sqlite", max_connections, run_migrations, "Connecting to database");
        let store = SqliteOrderStore::connect(database_url, max_connections, run_migrations).await?;
        Ok(Arc::new(store))
    } else {
        info!(backend = "postgres", max_connections, run_migrations, "Connecting to database");
        let store =
            PostgresOrderStore::connect(database_url, max_connections, run_migrations).await?;
        Ok(Arc::new(store))
    }
}
