// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::{get, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::CoffeeBackend;
use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn CoffeeBackend>,
}

/// Build the aggregator with CORS and request tracing.
pub fn build_router(backend: Arc<dyn CoffeeBackend>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/menu", get(handlers::get_menu))
        .route(
            "/api/orders",
            get(handlers::list_orders).post(handlers::create_order),
        )
        .route(
            "/api/orders/{order_id}",
            get(handlers::get_order).delete(handlers::delete_order),
        )
        .route(
            "/api/orders/{order_id}/status",
            put(handlers::update_order_status),
        )
        .route("/health", get(handlers::health))
        .with_state(AppState { backend })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
