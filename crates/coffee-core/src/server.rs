// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! QUIC servers for the coffee services.
//!
//! - Brew server: order lifecycle plus health check
//! - Menu server: the menu catalog

pub mod brew_server;
pub mod menu_server;

pub use brew_server::{dispatch_brew_request, run_brew_server, serve_brew};
pub use menu_server::{dispatch_menu_request, run_menu_server, serve_menu};
