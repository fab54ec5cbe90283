// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Coffee API - JSON over HTTP in front of the brew and menu services.
//!
//! | Route | Downstream |
//! |-------|------------|
//! | `GET /api/menu` | `GetMenu` |
//! | `GET /api/orders` | `ListOrders` |
//! | `POST /api/orders` | `OrderDrink` |
//! | `GET /api/orders/{orderId}` | `GetOrder` |
//! | `PUT /api/orders/{orderId}/status` | `UpdateOrderStatus` |
//! | `DELETE /api/orders/{orderId}` | `DeleteOrder` |
//! | `GET /health` | `HealthCheck` |

pub mod backend;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;

pub use backend::CoffeeBackend;
pub use config::ApiConfig;
pub use error::ApiError;
pub use router::{AppState, build_router};
