// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Brew protocol over real QUIC connections.

mod common;

use coffee_protocol::brew_proto::{
    DeleteOrderRequest, GetOrderRequest, HealthCheckRequest, ListOrdersRequest, OrderStatus,
    UpdateOrderStatusRequest, rpc_request::Request, rpc_response::Response,
};
use common::TestContext;

fn expect_error(response: Response) -> (String, String) {
    match response {
        Response::Error(err) => (err.code, err.message),
        other => panic!("expected error, got {:?}", other),
    }
}

async fn set_status(ctx: &TestContext, order_id: &str, status: OrderStatus) -> Response {
    ctx.brew(Request::UpdateOrderStatus(UpdateOrderStatusRequest {
        order_id: order_id.to_string(),
        status: status as i32,
    }))
    .await
}

#[tokio::test]
async fn test_order_then_get() {
    let ctx = TestContext::in_memory().await;
    let order_id = ctx.order("Latte").await;
    assert_eq!(order_id, "order-1");

    match ctx
        .brew(Request::GetOrder(GetOrderRequest {
            order_id: order_id.clone(),
        }))
        .await
    {
        Response::GetOrder(resp) => {
            let order = resp.order.expect("order present");
            assert_eq!(order.order_id, order_id);
            assert_eq!(order.menu_item_name, "Latte");
            assert_eq!(order.status, "QUEUED");
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[tokio::test]
async fn test_full_lifecycle_on_sqlite() {
    let ctx = TestContext::sqlite().await;
    let order_id = ctx.order("Cortado").await;

    for status in [
        OrderStatus::Grinding,
        OrderStatus::Brewing,
        OrderStatus::Frothing,
        OrderStatus::Ready,
    ] {
        match set_status(&ctx, &order_id, status).await {
            Response::UpdateOrderStatus(resp) => {
                assert_eq!(resp.order.unwrap().status, status.as_str_name());
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    match ctx
        .brew(Request::DeleteOrder(DeleteOrderRequest {
            order_id: order_id.clone(),
        }))
        .await
    {
        Response::DeleteOrder(resp) => assert!(resp.success),
        other => panic!("unexpected response: {:?}", other),
    }

    let (code, _) = expect_error(
        ctx.brew(Request::GetOrder(GetOrderRequest { order_id }))
            .await,
    );
    assert_eq!(code, "not_found");
}

#[tokio::test]
async fn test_status_can_move_backwards() {
    let ctx = TestContext::in_memory().await;
    let order_id = ctx.order("Espresso").await;

    set_status(&ctx, &order_id, OrderStatus::Ready).await;
    match set_status(&ctx, &order_id, OrderStatus::Queued).await {
        Response::UpdateOrderStatus(resp) => assert_eq!(resp.order.unwrap().status, "QUEUED"),
        other => panic!("unexpected response: {:?}", other),
    }
}

#[tokio::test]
async fn test_list_orders_is_stable() {
    let ctx = TestContext::in_memory().await;
    for name in ["Espresso", "Latte", "Ice Latte"] {
        ctx.order(name).await;
    }

    let list = || async {
        match ctx.brew(Request::ListOrders(ListOrdersRequest {})).await {
            Response::ListOrders(resp) => resp.orders,
            other => panic!("unexpected response: {:?}", other),
        }
    };

    let first = list().await;
    let second = list().await;
    assert_eq!(first, second);
    let ids: Vec<&str> = first.iter().map(|o| o.order_id.as_str()).collect();
    assert_eq!(ids, vec!["order-1", "order-2", "order-3"]);
}

#[tokio::test]
async fn test_error_codes_over_the_wire() {
    let ctx = TestContext::in_memory().await;

    let (code, message) = expect_error(
        ctx.brew(Request::GetOrder(GetOrderRequest {
            order_id: "abc".to_string(),
        }))
        .await,
    );
    assert_eq!(code, "invalid_argument");
    assert!(message.contains("abc"));

    let (code, _) = expect_error(set_status(&ctx, "order-77", OrderStatus::Ready).await);
    assert_eq!(code, "not_found");

    let order_id = ctx.order("Latte").await;
    let (code, _) = expect_error(set_status(&ctx, &order_id, OrderStatus::Unspecified).await);
    assert_eq!(code, "invalid_argument");

    let (code, _) = expect_error(
        ctx.brew(Request::OrderDrink(
            coffee_protocol::brew_proto::OrderRequest {
                menu_item_name: "   ".to_string(),
            },
        ))
        .await,
    );
    assert_eq!(code, "invalid_argument");
}

#[tokio::test]
async fn test_delete_unknown_order_succeeds() {
    let ctx = TestContext::in_memory().await;
    match ctx
        .brew(Request::DeleteOrder(DeleteOrderRequest {
            order_id: "order-404".to_string(),
        }))
        .await
    {
        Response::DeleteOrder(resp) => assert!(resp.success),
        other => panic!("unexpected response: {:?}", other),
    }
}

#[tokio::test]
async fn test_health_check() {
    let ctx = TestContext::sqlite().await;
    match ctx.brew(Request::HealthCheck(HealthCheckRequest {})).await {
        Response::HealthCheck(resp) => {
            assert!(resp.healthy);
            assert!(!resp.version.is_empty());
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[tokio::test]
async fn test_concurrent_orders_get_distinct_ids() {
    let ctx = std::sync::Arc::new(TestContext::in_memory().await);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let ctx = ctx.clone();
        handles.push(tokio::spawn(async move { ctx.order("Latte").await }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
}
