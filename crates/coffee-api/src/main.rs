// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Coffee API - HTTP aggregator binary.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};

use coffee_api::{ApiConfig, build_router};
use coffee_sdk::CoffeeSdk;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("coffee_api=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    let config = ApiConfig::from_env().map_err(|e| {
        error!("Configuration error: {}", e);
        e
    })?;

    info!(
        port = config.port,
        brew_addr = %config.sdk.brew_addr,
        menu_addr = %config.sdk.menu_addr,
        "Configuration loaded"
    );

    let sdk = Arc::new(CoffeeSdk::new(config.sdk.clone())?);
    let app = build_router(sdk.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Coffee API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutting down...");
        })
        .await?;

    sdk.close().await;
    info!("Shutdown complete");
    Ok(())
}
