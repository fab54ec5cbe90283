// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Coffee Core - order lifecycle and menu services
//!
//! ```text
//! client ──► RPC facade (brew/menu servers) ──► OrderService ──► OrderStore ──► orders table
//!                     │
//!                     └──────────────────────► MenuService (static catalog)
//! ```
//!
//! The order service depends only on the [`persistence::OrderStore`] trait;
//! PostgreSQL, SQLite and in-memory adapters are provided.

pub mod brew_handlers;
pub mod config;
pub mod domain;
pub mod error;
pub mod menu;
pub mod menu_handlers;
pub mod migrations;
pub mod order_ref;
pub mod persistence;
pub mod server;
pub mod services;

pub use domain::{MenuItem, Order, OrderStatus};
pub use error::CoreError;
pub use order_ref::OrderRef;
