//! Order commands - place, list, inspect, pay

use crate::commands::Context;
use crate::output::{field, or_dash, render};
use anyhow::Result;
use clap::Subcommand;
use eleme_api_client::endpoints::order::{OrderDetail, OrderRequest, UserOrder};
use owo_colors::OwoColorize;
use tracing::debug;

#[derive(Subcommand)]
pub enum OrderCommand {
    /// Place an order
    Create {
        /// Shop id
        #[arg(short, long)]
        business_id: i64,

        /// Ordering user's phone number
        #[arg(short, long)]
        phone: String,

        /// Dish ids, one per portion (e.g. 7,7,8)
        #[arg(short, long, value_delimiter = ',', required = true)]
        items: Vec<i64>,

        /// Total price
        #[arg(long)]
        price: f64,

        /// Delivery address
        #[arg(long, requires = "receiver")]
        address: Option<String>,

        /// Receiver name
        #[arg(long, requires = "receiver_phone")]
        receiver: Option<String>,

        /// Receiver phone number
        #[arg(long, requires = "address")]
        receiver_phone: Option<String>,

        /// Note for the shop
        #[arg(long)]
        remark: Option<String>,
    },

    /// List a user's orders
    List {
        /// Phone number the orders were placed from
        phone: String,
    },

    /// List a user's orders with shop and dish details
    Details {
        /// Phone number the orders were placed from
        phone: String,
    },

    /// Show when an order was placed
    Time {
        /// Order id
        id: i64,
    },

    /// Mark an order as paid
    Pay {
        /// Order id
        id: i64,
    },
}

/// Run an order command
pub async fn run(command: OrderCommand, ctx: &Context) -> Result<()> {
    let api = ctx.client.order();

    match command {
        OrderCommand::Create {
            business_id,
            phone,
            items,
            price,
            address,
            receiver,
            receiver_phone,
            remark,
        } => {
            let mut order = OrderRequest::new(business_id, phone, items, price);
            if let (Some(address), Some(name), Some(receiver_phone)) =
                (address, receiver, receiver_phone)
            {
                order = order.with_delivery(address, name, receiver_phone);
            }
            if let Some(remark) = remark {
                order = order.with_remark(remark);
            }
            debug!(business_id, items = order.order_list.len(), "Placing order");

            let response = api.create(&order).await?;
            let message = response.message.clone();
            render(&ctx.format, "🧾 Order Placed", response, |_| {
                println!("  {} {}", "✓".green(), or_dash(message.as_deref()));
            })
        }

        OrderCommand::List { phone } => {
            let response = api.get_user_orders(&phone).await?;
            render(&ctx.format, "🧾 Orders", response, |orders| print_orders(orders))
        }

        OrderCommand::Details { phone } => {
            let response = api.get_user_order_details(&phone).await?;
            render(&ctx.format, "🧾 Orders", response, |orders| print_details(orders))
        }

        OrderCommand::Time { id } => {
            let response = api.get_order_time(id).await?;
            render(&ctx.format, "🕒 Order Time", response, |time| {
                field("Order", id.cyan());
                field("Placed at", time);
            })
        }

        OrderCommand::Pay { id } => {
            let response = api.mark_paid(id).await?;
            render(&ctx.format, "💳 Payment", response, |paid| {
                if *paid {
                    println!("  {} order {} marked as paid", "✓".green(), id.cyan());
                } else {
                    println!("  {} order {} was not updated", "!".yellow(), id.cyan());
                }
            })
        }
    }
}

fn state_label(state: Option<i32>) -> String {
    match state {
        Some(1) => "paid".green().to_string(),
        Some(0) => "unpaid".yellow().to_string(),
        _ => "-".to_string(),
    }
}

fn print_orders(orders: &[UserOrder]) {
    println!(
        "  {:<6} {:<8} {:<10} {:<8} {}",
        "ID".dimmed(),
        "Shop".dimmed(),
        "Price".dimmed(),
        "State".dimmed(),
        "Created".dimmed()
    );
    println!("  {}", "─".repeat(60).dimmed());

    for order in orders {
        println!(
            "  {:<6} {:<8} {:<10} {:<8} {}",
            order.id.to_string().cyan(),
            order.business_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            order.price.map_or_else(|| "-".to_string(), |p| format!("¥{p:.2}")),
            state_label(order.state),
            or_dash(order.created_at.as_deref())
        );
    }

    println!();
    println!("  {} {}", "Total:".dimmed(), orders.len().to_string().bold());
}

fn print_details(orders: &[OrderDetail]) {
    for order in orders {
        let shop = order
            .business
            .as_ref()
            .and_then(|b| b.business_name.as_deref());
        println!(
            "  {} {} {}",
            format!("#{}", order.id).cyan().bold(),
            or_dash(shop).bold(),
            state_label(order.state)
        );
        field("Price", order.price.map_or_else(|| "-".to_string(), |p| format!("¥{p:.2}")));
        field("Created", or_dash(order.created_at.as_deref()));
        field("Address", or_dash(order.delivery_address.as_deref()));
        for dish in &order.order_items {
            println!("    {} {}", "•".dimmed(), or_dash(dish.name.as_deref()));
        }
        println!();
    }
}
