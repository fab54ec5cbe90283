// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration for the coffee SDK.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{Result, SdkError};

const DEFAULT_BREW_ADDR: &str = "127.0.0.1:50051";
const DEFAULT_MENU_ADDR: &str = "127.0.0.1:50052";

/// Configuration for [`CoffeeSdk`](crate::CoffeeSdk).
#[derive(Debug, Clone)]
pub struct SdkConfig {
    /// Brew service address.
    pub brew_addr: SocketAddr,
    /// Menu service address.
    pub menu_addr: SocketAddr,
    /// Server name for TLS verification.
    pub server_name: String,
    /// Skip TLS certificate verification (development only).
    pub skip_cert_verification: bool,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            brew_addr: SocketAddr::from(([127, 0, 0, 1], 50051)),
            menu_addr: SocketAddr::from(([127, 0, 0, 1], 50052)),
            server_name: "localhost".to_string(),
            skip_cert_verification: false,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl SdkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for local development against self-signed servers.
    pub fn localhost() -> Self {
        Self {
            skip_cert_verification: true,
            ..Self::default()
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `COFFEE_BREW_ADDR`: Brew service address (default: "127.0.0.1:50051")
    /// - `COFFEE_MENU_ADDR`: Menu service address (default: "127.0.0.1:50052")
    /// - `COFFEE_SERVER_NAME`: Server name for TLS (default: "localhost")
    /// - `COFFEE_SKIP_CERT_VERIFICATION`: Skip TLS verification (default: "false")
    /// - `COFFEE_CONNECT_TIMEOUT_MS`: Connection timeout in milliseconds (default: 10000)
    /// - `COFFEE_REQUEST_TIMEOUT_MS`: Request timeout in milliseconds (default: 30000)
    pub fn from_env() -> Result<Self> {
        let brew_addr = parse_var("COFFEE_BREW_ADDR", DEFAULT_BREW_ADDR)?;
        let menu_addr = parse_var("COFFEE_MENU_ADDR", DEFAULT_MENU_ADDR)?;

        let server_name =
            std::env::var("COFFEE_SERVER_NAME").unwrap_or_else(|_| "localhost".to_string());

        let skip_cert_verification = std::env::var("COFFEE_SKIP_CERT_VERIFICATION")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let connect_timeout_ms: u64 = parse_var("COFFEE_CONNECT_TIMEOUT_MS", "10000")?;
        let request_timeout_ms: u64 = parse_var("COFFEE_REQUEST_TIMEOUT_MS", "30000")?;

        Ok(Self {
            brew_addr,
            menu_addr,
            server_name,
            skip_cert_verification,
            connect_timeout: Duration::from_millis(connect_timeout_ms),
            request_timeout: Duration::from_millis(request_timeout_ms),
        })
    }

    pub fn with_brew_addr(mut self, addr: SocketAddr) -> Self {
        self.brew_addr = addr;
        self
    }

    pub fn with_menu_addr(mut self, addr: SocketAddr) -> Self {
        self.menu_addr = addr;
        self
    }

    pub fn with_server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    pub fn with_skip_cert_verification(mut self, skip: bool) -> Self {
        self.skip_cert_verification = skip;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

fn parse_var<T>(name: &str, default: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| SdkError::Config(format!("invalid {}: {}", name, e)))
}
