// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! SQLite-backed order store.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::domain::{Order, OrderStatus};
use crate::error::CoreError;
use crate::migrations;

use super::{OrderRecord, OrderStore, into_orders};

#[derive(Clone)]
pub struct SqliteOrderStore {
    pool: SqlitePool,
}

impl SqliteOrderStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Pool for a `sqlite:` URL. The database file and its parent directory
    /// are created when missing.
    pub async fn open_pool(
        database_url: &str,
        max_connections: u32,
    ) -> Result<SqlitePool, CoreError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| CoreError::from(e).with_operation("connect"))?
            .create_if_missing(true);

        if let Some(parent) = options.get_filename().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::DatabaseError {
                operation: "create_dir".to_string(),
                details: format!("Failed to create directory {:?}: {}", parent, e),
            })?;
        }

        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| CoreError::from(e).with_operation("connect"))
    }

    /// Open `database_url` and optionally apply pending migrations.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        run_migrations: bool,
    ) -> Result<Self, CoreError> {
        let pool = Self::open_pool(database_url, max_connections).await?;
        if run_migrations {
            migrations::run_sqlite(&pool).await?;
        }
        Ok(Self { pool })
    }
}

#[async_trait]
impl OrderStore for SqliteOrderStore {
    async fn create(&self, menu_item_name: &str, status: OrderStatus) -> Result<Order, CoreError> {
        let now = Utc::now();
        let record = sqlx::query_as::<_, OrderRecord>(
            r#"
            INSERT INTO orders (menu_item_name, status, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, menu_item_name, status, created_at, updated_at
            "#,
        )
        .bind(menu_item_name)
        .bind(status.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        record.try_into()
    }

    async fn find_all(&self) -> Result<Vec<Order>, CoreError> {
        let records = sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT id, menu_item_name, status, created_at, updated_at
            FROM orders
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        into_orders(records)
    }

    async fn find_by_id(&self, id: i64) -> Result<Order, CoreError> {
        sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT id, menu_item_name, status, created_at, updated_at
            FROM orders
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CoreError::OrderNotFound { order_id: id })?
        .try_into()
    }

    async fn update(&self, order: &Order) -> Result<Order, CoreError> {
        sqlx::query_as::<_, OrderRecord>(
            r#"
            UPDATE orders
            SET menu_item_name = ?, status = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, menu_item_name, status, created_at, updated_at
            "#,
        )
        .bind(&order.menu_item_name)
        .bind(order.status.as_str())
        .bind(Utc::now())
        .bind(order.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(CoreError::OrderNotFound { order_id: order.id })?
        .try_into()
    }

    async fn delete(&self, id: i64) -> Result<(), CoreError> {
        sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn health_check(&self) -> Result<bool, CoreError> {
        let row: (i32,) = sqlx::query_as("SELECT 1").fetch_one(&self.pool).await?;
        Ok(row.0 == 1)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
