// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Typed client for the coffee brew and menu services.
//!
//! # Example
//!
//! ```ignore
//! use coffee_sdk::{CoffeeSdk, OrderStatus};
//!
//! let sdk = CoffeeSdk::localhost()?;
//! let menu = sdk.get_menu().await?;
//! let order_id = sdk.order_drink(&menu[0].name).await?;
//! sdk.update_order_status(&order_id, OrderStatus::Grinding).await?;
//! ```

mod client;
mod config;
mod error;
mod types;

pub use client::CoffeeSdk;
pub use config::SdkConfig;
pub use error::{Result, SdkError};
pub use types::{HealthStatus, MenuItem, OrderStatus, OrderSummary};
