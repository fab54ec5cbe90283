// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::domain::MenuItem;
use crate::menu;

use super::MenuService;

/// Menu backed by the compiled-in catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticMenu;

impl MenuService for StaticMenu {
    fn list_items(&self) -> Vec<MenuItem> {
        menu::catalog()
    }
}
