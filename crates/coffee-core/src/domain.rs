// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Domain model: orders, their status, menu items.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Brewing stage of an order.
///
/// The variants are listed in the order a drink usually moves through them,
/// but nothing enforces that progression: any status may be set at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Queued,
    Grinding,
    Brewing,
    Frothing,
    Ready,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Queued,
        OrderStatus::Grinding,
        OrderStatus::Brewing,
        OrderStatus::Frothing,
        OrderStatus::Ready,
    ];

    /// Canonical spelling used on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
            Self::Grinding => "GRINDING",
            Self::Brewing => "BREWING",
            Self::Frothing => "FROTHING",
            Self::Ready => "READY",
        }
    }

    /// Next stage of the usual progression. `None` once the drink is ready.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            Self::Queued => Some(Self::Grinding),
            Self::Grinding => Some(Self::Brewing),
            Self::Brewing => Some(Self::Frothing),
            Self::Frothing => Some(Self::Ready),
            Self::Ready => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                CoreError::invalid_argument("status", format!("unknown order status '{}'", s))
            })
    }
}

/// A single customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub menu_item_name: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An entry in the menu catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub price: f64,
}
