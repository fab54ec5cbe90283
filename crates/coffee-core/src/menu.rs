// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The fixed menu catalog.

use crate::domain::MenuItem;

const CATALOG: [(&str, &str, f64); 4] = [
    ("Espresso", "Strong and rich Italian-style coffee", 2.50),
    (
        "Latte",
        "Espresso with steamed milk and a light layer of foam",
        3.50,
    ),
    ("Cortado", "Equal parts espresso and steamed milk", 3.25),
    ("Ice Latte", "Espresso with cold milk and ice", 3.75),
];

/// The four drinks on offer, always in the same order.
pub fn catalog() -> Vec<MenuItem> {
    CATALOG
        .iter()
        .map(|(name, description, price)| MenuItem {
            name: name.to_string(),
            description: description.to_string(),
            price: *price,
        })
        .collect()
}
