// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Coffee Control CLI
//!
//! Command-line client for the brew and menu services.
//!
//! Usage:
//!   coffee-ctl <command> [args]
//!
//! Commands:
//!   menu                          Show the menu
//!   order <menu item name>        Place an order
//!   orders                        List all orders
//!   get <order-id>                Show one order
//!   status <order-id> <STATUS>    Set an order's status
//!   advance <order-id>            Move an order to its next stage
//!   delete <order-id>             Delete an order
//!   health                        Check brew service health
//!   interactive                   Numbered-choice loop

use std::process::ExitCode;

use coffee_sdk::{CoffeeSdk, MenuItem, OrderStatus, OrderSummary, SdkConfig};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

fn print_usage() {
    eprintln!(
        r#"Usage: coffee-ctl <command> [args]

Talk to the coffee brew and menu services.

COMMANDS:
    menu                            Show the menu
    order <menu item name>          Place an order (the rest of the line is the name)
    orders                          List all orders
    get <order-id>                  Show one order
    status <order-id> <STATUS>      Set status (QUEUED, GRINDING, BREWING, FROTHING, READY)
    advance <order-id>              Move an order to its next stage
    delete <order-id>               Delete an order
    health                          Check brew service health
    interactive                     Start the interactive menu

ENVIRONMENT:
    COFFEE_BREW_ADDR                Brew service address (default: 127.0.0.1:50051)
    COFFEE_MENU_ADDR                Menu service address (default: 127.0.0.1:50052)
    COFFEE_SKIP_CERT_VERIFICATION   Skip TLS verification (default: false)

EXAMPLES:
    coffee-ctl order Ice Latte
    coffee-ctl status order-1 brewing
    coffee-ctl advance order-1"#
    );
}

#[derive(Debug, PartialEq)]
enum Command {
    Menu,
    Order { menu_item_name: String },
    Orders,
    Get { order_id: String },
    Status { order_id: String, status: OrderStatus },
    Advance { order_id: String },
    Delete { order_id: String },
    Health,
    Interactive,
}

fn parse_args() -> Result<Command, String> {
    let args: Vec<String> = std::env::args().collect();
    parse_args_from_vec(&args)
}

fn parse_args_from_vec(args: &[String]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("No command specified".to_string());
    }

    let order_id = |name: &str| -> Result<String, String> {
        args.get(2)
            .cloned()
            .ok_or_else(|| format!("{} requires an order id", name))
    };

    match args[1].as_str() {
        "help" | "--help" | "-h" => {
            print_usage();
            std::process::exit(0);
        }
        "menu" => Ok(Command::Menu),
        "order" => {
            let menu_item_name = args[2..].join(" ");
            if menu_item_name.trim().is_empty() {
                return Err("order requires a menu item name".to_string());
            }
            Ok(Command::Order { menu_item_name })
        }
        "orders" => Ok(Command::Orders),
        "get" => Ok(Command::Get {
            order_id: order_id("get")?,
        }),
        "status" => {
            let order_id = order_id("status")?;
            let status = args
                .get(3)
                .ok_or("status requires a status value")?
                .parse::<OrderStatus>()
                .map_err(|e| e.to_string())?;
            Ok(Command::Status { order_id, status })
        }
        "advance" => Ok(Command::Advance {
            order_id: order_id("advance")?,
        }),
        "delete" => Ok(Command::Delete {
            order_id: order_id("delete")?,
        }),
        "health" => Ok(Command::Health),
        "interactive" => Ok(Command::Interactive),
        other => Err(format!("Unknown command: {}", other)),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cmd = match parse_args() {
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    let config = match SdkConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let sdk = match CoffeeSdk::new(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to create SDK: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = execute_command(&sdk, cmd).await;
    sdk.close().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute_command(sdk: &CoffeeSdk, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Menu => {
            let items = sdk.get_menu().await.map_err(|e| e.to_string())?;
            print!("{}", format_menu(&items));
        }
        Command::Order { menu_item_name } => {
            let order_id = sdk
                .order_drink(&menu_item_name)
                .await
                .map_err(|e| e.to_string())?;
            println!("Order placed: {}", order_id);
        }
        Command::Orders => {
            let orders = sdk.list_orders().await.map_err(|e| e.to_string())?;
            print!("{}", format_orders(&orders));
        }
        Command::Get { order_id } => {
            let order = sdk.get_order(&order_id).await.map_err(|e| e.to_string())?;
            println!("{}", format_order(&order));
        }
        Command::Status { order_id, status } => {
            let order = sdk
                .update_order_status(&order_id, status)
                .await
                .map_err(|e| e.to_string())?;
            println!("{}", format_order(&order));
        }
        Command::Advance { order_id } => {
            let order = sdk
                .advance_order(&order_id)
                .await
                .map_err(|e| e.to_string())?;
            println!("{}", format_order(&order));
        }
        Command::Delete { order_id } => {
            sdk.delete_order(&order_id)
                .await
                .map_err(|e| e.to_string())?;
            println!("Deleted {}", order_id);
        }
        Command::Health => {
            let health = sdk.health_check().await.map_err(|e| e.to_string())?;
            println!(
                "{}",
                serde_json::to_string_pretty(&health).map_err(|e| e.to_string())?
            );
            if !health.healthy {
                return Err("brew service reports unhealthy storage".to_string());
            }
        }
        Command::Interactive => {
            let stdin = BufReader::new(tokio::io::stdin());
            run_interactive(sdk, stdin).await?;
        }
    }

    Ok(())
}

// =============================================================================
// Interactive mode
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Choice {
    ViewMenu,
    PlaceOrder,
    ListOrders,
    CheckStatus,
    Quit,
}

fn parse_choice(input: &str) -> Option<Choice> {
    match input.trim() {
        "1" => Some(Choice::ViewMenu),
        "2" => Some(Choice::PlaceOrder),
        "3" => Some(Choice::ListOrders),
        "4" => Some(Choice::CheckStatus),
        "5" | "q" | "quit" => Some(Choice::Quit),
        _ => None,
    }
}

fn print_choices() {
    println!("Welcome to the Coffee CLI!");
    println!();
    println!("1. View menu");
    println!("2. Place an order");
    println!("3. List orders");
    println!("4. Check order status");
    println!("5. Quit");
    println!();
    println!("Choose an option:");
}

/// Read one trimmed line. `None` on end of input.
async fn prompt<R: AsyncBufRead + Unpin>(
    input: &mut R,
    label: &str,
) -> Result<Option<String>, String> {
    if !label.is_empty() {
        println!("{}", label);
    }
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .await
        .map_err(|e| format!("failed to read input: {}", e))?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

async fn run_interactive<R: AsyncBufRead + Unpin>(
    sdk: &CoffeeSdk,
    mut input: R,
) -> Result<(), String> {
    loop {
        print_choices();
        let Some(line) = prompt(&mut input, "").await? else {
            break;
        };

        // Failures inside a choice are reported and the loop continues.
        match parse_choice(&line) {
            Some(Choice::Quit) => break,
            Some(Choice::ViewMenu) => match sdk.get_menu().await {
                Ok(items) => print!("{}", format_menu(&items)),
                Err(e) => println!("Get menu error: {}", e),
            },
            Some(Choice::PlaceOrder) => {
                let Some(name) = prompt(&mut input, "Menu item name:").await? else {
                    break;
                };
                match sdk.order_drink(&name).await {
                    Ok(order_id) => println!("Order placed: {}", order_id),
                    Err(e) => println!("Order error: {}", e),
                }
            }
            Some(Choice::ListOrders) => match sdk.list_orders().await {
                Ok(orders) => print!("{}", format_orders(&orders)),
                Err(e) => println!("List orders error: {}", e),
            },
            Some(Choice::CheckStatus) => {
                let Some(order_id) = prompt(&mut input, "Order id:").await? else {
                    break;
                };
                match sdk.get_order(&order_id).await {
                    Ok(order) => println!("{}", format_order(&order)),
                    Err(e) => println!("Order status error: {}", e),
                }
            }
            None => println!("Invalid option. Please choose 1, 2, 3, 4, or 5."),
        }
        println!();
    }

    println!("Goodbye!");
    Ok(())
}

// =============================================================================
// Output formatting
// =============================================================================

fn format_menu(items: &[MenuItem]) -> String {
    let mut out = String::from("Menu Items:\n===============================\n");
    for (index, item) in items.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} - ${:.2}\n   {}\n",
            index + 1,
            item.name,
            item.price,
            item.description
        ));
    }
    out
}

fn format_order(order: &OrderSummary) -> String {
    format!(
        "{:<12} {:<20} {}",
        order.order_id, order.menu_item_name, order.status
    )
}

fn format_orders(orders: &[OrderSummary]) -> String {
    if orders.is_empty() {
        return "No orders.\n".to_string();
    }
    let mut out = format!("{:<12} {:<20} {}\n", "ORDER", "ITEM", "STATUS");
    for order in orders {
        out.push_str(&format_order(order));
        out.push('\n');
    }
    out
}
