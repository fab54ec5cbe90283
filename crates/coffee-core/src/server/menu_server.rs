// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Menu QUIC server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, error, info, instrument, warn};

use coffee_protocol::frame::Frame;
use coffee_protocol::menu_proto::{
    RpcError, RpcRequest, RpcResponse, rpc_request::Request, rpc_response::Response,
};
use coffee_protocol::server::{CoffeeServer, ConnectionHandler, StreamHandler};

use crate::menu_handlers::{MenuHandlerState, handle_get_menu};

#[instrument(skip(state))]
pub async fn run_menu_server(bind_addr: SocketAddr, state: Arc<MenuHandlerState>) -> Result<()> {
    let server = CoffeeServer::localhost(bind_addr)?;
    serve_menu(&server, state).await
}

pub async fn serve_menu(server: &CoffeeServer, state: Arc<MenuHandlerState>) -> Result<()> {
    info!(addr = %server.local_addr()?, "Menu QUIC server starting");

    server
        .run(move |conn: ConnectionHandler| {
            let state = state.clone();
            async move {
                debug!(remote = %conn.remote_address(), "Menu connection accepted");
                conn.run(move |stream: StreamHandler| {
                    let state = state.clone();
                    async move {
                        if let Err(e) = handle_stream(stream, state).await {
                            error!("Stream error: {}", e);
                        }
                    }
                })
                .await;
            }
        })
        .await?;

    Ok(())
}

async fn handle_stream(mut stream: StreamHandler, state: Arc<MenuHandlerState>) -> Result<()> {
    let rpc_request: RpcRequest = stream.read_frame().await?.decode()?;
    let response = dispatch_menu_request(&state, rpc_request).await;

    stream.write_frame(&Frame::response(&response)?).await?;
    stream.finish()?;
    Ok(())
}

pub async fn dispatch_menu_request(state: &MenuHandlerState, rpc_request: RpcRequest) -> RpcResponse {
    let response = match rpc_request.request {
        Some(Request::GetMenu(req)) => match handle_get_menu(state, req).await {
            Ok(resp) => Response::GetMenu(resp),
            Err(e) => Response::Error(RpcError {
                code: e.error_code().to_string(),
                message: e.to_string(),
            }),
        },
        None => {
            warn!("Received empty RpcRequest");
            Response::Error(RpcError {
                code: "invalid_argument".to_string(),
                message: "RpcRequest contained no request".to_string(),
            })
        }
    };

    RpcResponse {
        response: Some(response),
    }
}
