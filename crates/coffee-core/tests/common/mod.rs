// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Common test infrastructure for coffee-core E2E tests.
//!
//! Starts both QUIC servers on ephemeral loopback ports over a fresh store.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use coffee_core::brew_handlers::BrewHandlerState;
use coffee_core::menu_handlers::MenuHandlerState;
use coffee_core::persistence::{MemoryOrderStore, OrderStore, SqliteOrderStore};
use coffee_core::server::{serve_brew, serve_menu};
use coffee_core::services::{OrderLifecycle, StaticMenu};
use coffee_protocol::{CoffeeClient, CoffeeServer, CoffeeServerConfig, brew_proto, menu_proto};

pub struct TestContext {
    pub brew_client: CoffeeClient,
    pub menu_client: CoffeeClient,
    pub brew_addr: SocketAddr,
    pub menu_addr: SocketAddr,
    brew_server: Arc<CoffeeServer>,
    menu_server: Arc<CoffeeServer>,
}

impl TestContext {
    /// Servers backed by the in-memory store.
    pub async fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryOrderStore::new())).await
    }

    /// Servers backed by an in-memory SQLite database.
    pub async fn sqlite() -> Self {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory SQLite pool");
        coffee_core::migrations::run_sqlite(&pool)
            .await
            .expect("Failed to run migrations");
        Self::with_store(Arc::new(SqliteOrderStore::new(pool))).await
    }

    pub async fn with_store(store: Arc<dyn OrderStore>) -> Self {
        let brew_state = Arc::new(BrewHandlerState::new(Arc::new(OrderLifecycle::new(store))));
        let menu_state = Arc::new(MenuHandlerState::new(Arc::new(StaticMenu)));

        let brew_server = Arc::new(bind_loopback());
        let menu_server = Arc::new(bind_loopback());
        let brew_addr = brew_server.local_addr().expect("brew addr");
        let menu_addr = menu_server.local_addr().expect("menu addr");

        let server = brew_server.clone();
        tokio::spawn(async move {
            if let Err(e) = serve_brew(&server, brew_state).await {
                eprintln!("Test brew server error: {}", e);
            }
        });

        let server = menu_server.clone();
        tokio::spawn(async move {
            if let Err(e) = serve_menu(&server, menu_state).await {
                eprintln!("Test menu server error: {}", e);
            }
        });

        Self {
            brew_client: CoffeeClient::localhost(brew_addr).expect("brew client"),
            menu_client: CoffeeClient::localhost(menu_addr).expect("menu client"),
            brew_addr,
            menu_addr,
            brew_server,
            menu_server,
        }
    }

    pub async fn brew(
        &self,
        request: brew_proto::rpc_request::Request,
    ) -> brew_proto::rpc_response::Response {
        let response: brew_proto::RpcResponse = self
            .brew_client
            .request(&brew_proto::RpcRequest {
                request: Some(request),
            })
            .await
            .expect("brew request failed");
        response.response.expect("empty brew response")
    }

    pub async fn menu(&self) -> menu_proto::rpc_response::Response {
        let response: menu_proto::RpcResponse = self
            .menu_client
            .request(&menu_proto::RpcRequest {
                request: Some(menu_proto::rpc_request::Request::GetMenu(
                    menu_proto::GetMenuRequest {},
                )),
            })
            .await
            .expect("menu request failed");
        response.response.expect("empty menu response")
    }

    /// Place an order and return its public id.
    pub async fn order(&self, name: &str) -> String {
        match self
            .brew(brew_proto::rpc_request::Request::OrderDrink(
                brew_proto::OrderRequest {
                    menu_item_name: name.to_string(),
                },
            ))
            .await
        {
            brew_proto::rpc_response::Response::OrderDrink(resp) => resp.order_id,
            other => panic!("unexpected response: {:?}", other),
        }
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.brew_server.close();
        self.menu_server.close();
    }
}

fn bind_loopback() -> CoffeeServer {
    CoffeeServer::localhost_with_config(
        "127.0.0.1:0".parse().expect("loopback addr"),
        CoffeeServerConfig::default(),
    )
    .expect("Failed to bind test server")
}
