// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Menu protocol handlers.

use std::sync::Arc;

use tracing::instrument;

use coffee_protocol::menu_proto::{self, GetMenuRequest, GetMenuResponse};

use crate::error::Result;
use crate::services::MenuService;

/// Shared state for menu handlers.
pub struct MenuHandlerState {
    pub menu: Arc<dyn MenuService>,
}

impl MenuHandlerState {
    pub fn new(menu: Arc<dyn MenuService>) -> Self {
        Self { menu }
    }
}

#[instrument(skip(state, _request))]
pub async fn handle_get_menu(
    state: &MenuHandlerState,
    _request: GetMenuRequest,
) -> Result<GetMenuResponse> {
    let items = state
        .menu
        .list_items()
        .into_iter()
        .map(|item| menu_proto::MenuItem {
            name: item.name,
            description: item.description,
            price: item.price,
        })
        .collect();

    Ok(GetMenuResponse { items })
}
