// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Aggregator configuration.

use coffee_sdk::{SdkConfig, SdkError};

pub const DEFAULT_PORT: u16 = 9000;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port (`COFFEE_API_PORT`, default 9000).
    pub port: u16,
    /// Downstream service settings, see [`SdkConfig::from_env`].
    pub sdk: SdkConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, SdkError> {
        let port = match std::env::var("COFFEE_API_PORT") {
            Ok(value) => value
                .parse()
                .map_err(|e| SdkError::Config(format!("invalid COFFEE_API_PORT: {}", e)))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            sdk: SdkConfig::from_env()?,
        })
    }
}
