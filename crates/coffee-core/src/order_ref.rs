// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Public order identifiers (`order-<id>`).

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

const PREFIX: &str = "order-";

/// Order identifier as seen by clients.
///
/// Renders as `order-<id>` and parses only that exact shape: the prefix
/// followed by ASCII digits that fit a non-negative `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderRef(i64);

impl OrderRef {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> i64 {
        self.0
    }
}

impl From<i64> for OrderRef {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for OrderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PREFIX, self.0)
    }
}

impl FromStr for OrderRef {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::invalid_argument("order_id", format!("invalid order ID '{}'", s));

        let digits = s.strip_prefix(PREFIX).ok_or_else(invalid)?;
        // i64::from_str would accept a leading '+'.
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        digits.parse::<i64>().map(Self).map_err(|_| invalid())
    }
}
