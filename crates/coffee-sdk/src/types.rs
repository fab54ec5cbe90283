// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! High-level types for the coffee SDK.
//!
//! These serialize to the JSON shapes the HTTP aggregator exposes.

use std::fmt;
use std::str::FromStr;

use coffee_protocol::{brew_proto, menu_proto};
use serde::{Deserialize, Serialize};

use crate::error::SdkError;

/// Preparation stage of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Queued => "QUEUED",
            OrderStatus::Grinding => "GRINDING",
            OrderStatus::Brewing => "BREWING",
            OrderStatus::Frothing => "FROTHING",
            OrderStatus::Ready => "READY",
        }
    }

    /// Next stage of the usual progression. `Ready` has none.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Queued => Some(OrderStatus::Grinding),
            OrderStatus::Grinding => Some(OrderStatus::Brewing),
            OrderStatus::Brewing => Some(OrderStatus::Frothing),
            OrderStatus::Frothing => Some(OrderStatus::Ready),
            OrderStatus::Ready => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                SdkError::InvalidInput(format!(
                    "unknown status '{}', expected one of QUEUED, GRINDING, BREWING, FROTHING, READY",
                    s
                ))
            })
    }
}

impl From<OrderStatus> for brew_proto::OrderStatus {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Queued => brew_proto::OrderStatus::Queued,
            OrderStatus::Grinding => brew_proto::OrderStatus::Grinding,
            OrderStatus::Brewing => brew_proto::OrderStatus::Brewing,
            OrderStatus::Frothing => brew_proto::OrderStatus::Frothing,
            OrderStatus::Ready => brew_proto::OrderStatus::Ready,
        }
    }
}

impl From<OrderStatus> for i32 {
    fn from(status: OrderStatus) -> Self {
        brew_proto::OrderStatus::from(status) as i32
    }
}

/// A drink on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl From<menu_proto::MenuItem> for MenuItem {
    fn from(item: menu_proto::MenuItem) -> Self {
        Self {
            name: item.name,
            description: item.description,
            price: item.price,
        }
    }
}

/// An order as seen by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Public identifier, `order-<n>`.
    pub order_id: String,
    pub menu_item_name: String,
    pub status: OrderStatus,
}

impl TryFrom<brew_proto::Order> for OrderSummary {
    type Error = SdkError;

    fn try_from(order: brew_proto::Order) -> Result<Self, Self::Error> {
        let status = order.status.parse().map_err(|_| {
            SdkError::UnexpectedResponse(format!(
                "order {} has unknown status '{}'",
                order.order_id, order.status
            ))
        })?;
        Ok(Self {
            order_id: order.order_id,
            menu_item_name: order.menu_item_name,
            status,
        })
    }
}

/// Health of the brew service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// Whether the service and its storage are reachable.
    pub healthy: bool,
    pub version: String,
    pub uptime_ms: i64,
}

impl From<brew_proto::HealthCheckResponse> for HealthStatus {
    fn from(resp: brew_proto::HealthCheckResponse) -> Self {
        Self {
            healthy: resp.healthy,
            version: resp.version,
            uptime_ms: resp.uptime_ms,
        }
    }
}
