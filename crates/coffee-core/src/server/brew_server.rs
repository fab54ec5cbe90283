// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Brew QUIC server: routes brew protocol requests to the brew handlers.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, error, info, instrument, warn};

use coffee_protocol::brew_proto::{
    RpcError, RpcRequest, RpcResponse, rpc_request::Request, rpc_response::Response,
};
use coffee_protocol::frame::Frame;
use coffee_protocol::server::{CoffeeServer, ConnectionHandler, StreamHandler};

use crate::brew_handlers::{
    BrewHandlerState, handle_delete_order, handle_get_order, handle_health_check,
    handle_list_orders, handle_order_drink, handle_update_order_status,
};

/// Bind `bind_addr` with a self-signed certificate and serve until closed.
#[instrument(skip(state))]
pub async fn run_brew_server(bind_addr: SocketAddr, state: Arc<BrewHandlerState>) -> Result<()> {
    let server = CoffeeServer::localhost(bind_addr)?;
    serve_brew(&server, state).await
}

/// Serve the brew protocol on an already bound server.
pub async fn serve_brew(server: &CoffeeServer, state: Arc<BrewHandlerState>) -> Result<()> {
    info!(addr = %server.local_addr()?, "Brew QUIC server starting");

    server
        .run(move |conn: ConnectionHandler| {
            let state = state.clone();
            async move {
                handle_connection(conn, state).await;
            }
        })
        .await?;

    Ok(())
}

#[instrument(skip(conn, state), fields(remote = %conn.remote_address()))]
async fn handle_connection(conn: ConnectionHandler, state: Arc<BrewHandlerState>) {
    debug!("Brew connection accepted");

    conn.run(move |stream: StreamHandler| {
        let state = state.clone();
        async move {
            if let Err(e) = handle_stream(stream, state).await {
                error!("Stream error: {}", e);
            }
        }
    })
    .await;

    debug!("Brew connection closed");
}

async fn handle_stream(mut stream: StreamHandler, state: Arc<BrewHandlerState>) -> Result<()> {
    let rpc_request: RpcRequest = stream.read_frame().await?.decode()?;
    let response = dispatch_brew_request(&state, rpc_request).await;

    stream.write_frame(&Frame::response(&response)?).await?;
    stream.finish()?;
    Ok(())
}

/// Route one envelope to its handler. Failures become in-band `RpcError`s.
pub async fn dispatch_brew_request(state: &BrewHandlerState, rpc_request: RpcRequest) -> RpcResponse {
    let Some(request) = rpc_request.request else {
        warn!("Received empty RpcRequest");
        return RpcResponse {
            response: Some(Response::Error(RpcError {
                code: "invalid_argument".to_string(),
                message: "RpcRequest contained no request".to_string(),
            })),
        };
    };

    let result = match request {
        Request::OrderDrink(req) => handle_order_drink(state, req).await.map(Response::OrderDrink),
        Request::ListOrders(req) => handle_list_orders(state, req).await.map(Response::ListOrders),
        Request::GetOrder(req) => handle_get_order(state, req).await.map(Response::GetOrder),
        Request::UpdateOrderStatus(req) => handle_update_order_status(state, req)
            .await
            .map(Response::UpdateOrderStatus),
        Request::DeleteOrder(req) => handle_delete_order(state, req)
            .await
            .map(Response::DeleteOrder),
        Request::HealthCheck(req) => handle_health_check(state, req)
            .await
            .map(Response::HealthCheck),
    };

    let response = result.unwrap_or_else(|e| {
        match e.error_code() {
            "internal" => error!(error = %e, "Brew request failed"),
            _ => debug!(error = %e, "Brew request rejected"),
        }
        Response::Error(e.to_rpc_error())
    });

    RpcResponse {
        response: Some(response),
    }
}
