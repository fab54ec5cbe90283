// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! PostgreSQL-backed order store.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::domain::{Order, OrderStatus};
use crate::error::CoreError;
use crate::migrations;

use super::{OrderRecord, OrderStore, into_orders};

#[derive(Clone)]
pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open `database_url` and optionally apply pending migrations.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        run_migrations: bool,
    ) -> Result<Self, CoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| CoreError::from(e).with_operation("connect"))?;
        if run_migrations {
            migrations::run_postgres(&pool).await?;
        }
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn create(&self, menu_item_name: &str, status: OrderStatus) -> Result<Order, CoreError> {
        let now = Utc::now();
        let record = sqlx::query_as::<_, OrderRecord>(
            r#"
            INSERT INTO orders (menu_item_name, status, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id, menu_item_name, status, created_at, updated_at
            "#,
        )
        .bind(menu_item_name)
        .bind(status.as_str())
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
            WHERE id = $1
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
            SET menu_item_name = $1, status = $2, updated_at = $3
            WHERE id = $4
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
        sqlx::query("DELETE FROM orders WHERE id = $1")
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
