// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Coffee Core - runs the brew and menu QUIC services.

use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinError;
use tracing::{error, info};

use coffee_core::brew_handlers::BrewHandlerState;
use coffee_core::config::Config;
use coffee_core::menu_handlers::MenuHandlerState;
use coffee_core::persistence;
use coffee_core::server;
use coffee_core::services::{OrderLifecycle, StaticMenu};
use coffee_protocol::server::CoffeeServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("coffee_core=info".parse()?),
        )
        .init();

    info!("Starting Coffee Core");

    let config = Config::from_env().map_err(|e| {
        error!("Configuration error: {}", e);
        e
    })?;

    info!(
        brew_addr = %config.brew_addr,
        menu_addr = %config.menu_addr,
        max_connections = config.db_max_connections,
        run_migrations = config.run_migrations,
        "Configuration loaded"
    );

    CoffeeServerConfig::from_env().map_err(|e| {
        error!("QUIC configuration error: {}", e);
        e
    })?;

    let store = persistence::connect(
        &config.database_url,
        config.db_max_connections,
        config.run_migrations,
    )
    .await?;

    if !store.health_check().await? {
        anyhow::bail!("database health check failed");
    }
    info!("Database health check passed");

    let brew_state = Arc::new(BrewHandlerState::new(Arc::new(OrderLifecycle::new(
        store.clone(),
    ))));
    let menu_state = Arc::new(MenuHandlerState::new(Arc::new(StaticMenu)));

    let brew_addr = config.brew_addr;
    let mut brew_handle =
        tokio::spawn(async move { server::run_brew_server(brew_addr, brew_state).await });

    let menu_addr = config.menu_addr;
    let mut menu_handle =
        tokio::spawn(async move { server::run_menu_server(menu_addr, menu_state).await });

    let outcome = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            info!("Shutting down...");
            signal.map_err(anyhow::Error::from)
        }
        result = &mut brew_handle => server_exited("Brew", result),
        result = &mut menu_handle => server_exited("Menu", result),
    };

    brew_handle.abort();
    menu_handle.abort();
    store.close().await;

    info!("Shutdown complete");
    outcome
}

/// A QUIC server task finishing on its own is always a failure.
fn server_exited(name: &str, result: Result<Result<()>, JoinError>) -> Result<()> {
    match result {
        Ok(Ok(())) => {
            error!("{} QUIC server stopped unexpectedly", name);
            anyhow::bail!("{} QUIC server stopped", name)
        }
        Ok(Err(e)) => {
            error!("{} QUIC server error: {}", name, e);
            Err(e)
        }
        Err(e) => {
            error!("{} QUIC server task failed: {}", name, e);
            Err(e.into())
        }
    }
}
