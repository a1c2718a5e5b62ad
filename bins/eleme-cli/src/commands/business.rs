//! Business commands - list, look up and search shops

use crate::commands::Context;
use crate::output::{field, or_dash, render};
use anyhow::Result;
use clap::Subcommand;
use eleme_api_client::endpoints::business::Business;
use owo_colors::OwoColorize;

#[derive(Subcommand)]
pub enum BusinessCommand {
    /// List every shop
    List,

    /// Show one shop with its menu sections
    Get {
        /// Shop id
        id: i64,
    },

    /// Search shops by keyword
    Search {
        /// Keyword, e.g. "饺子"
        keyword: String,
    },
}

/// Run a business command
pub async fn run(command: BusinessCommand, ctx: &Context) -> Result<()> {
    let api = ctx.client.business();

    match command {
        BusinessCommand::List => {
            let response = api.get_all().await?;
            render(&ctx.format, "🏪 Shops", response, |shops| print_table(shops))
        }

        BusinessCommand::Get { id } => {
            let response = api.get_by_id(id).await?;
            render(&ctx.format, "🏪 Shop", response, print_detail)
        }

        BusinessCommand::Search { keyword } => {
            let response = api.search(&keyword).await?;
            let title = format!("🔍 Shops matching \"{keyword}\"");
            render(&ctx.format, &title, response, |shops| print_table(shops))
        }
    }
}

fn print_table(shops: &[Business]) {
    println!(
        "  {:<6} {:<24} {:<8} {:<10} {}",
        "ID".dimmed(),
        "Name".dimmed(),
        "Rating".dimmed(),
        "Min order".dimmed(),
        "Delivery".dimmed()
    );
    println!("  {}", "─".repeat(60).dimmed());

    for shop in shops {
        println!(
            "  {:<6} {:<24} {:<8} {:<10} {}",
            shop.id.to_string().cyan(),
            or_dash(shop.business_name.as_deref()),
            or_dash(shop.rating.as_deref()).yellow(),
            or_dash(shop.min_order.as_deref()),
            or_dash(shop.delivery.as_deref())
        );
    }

    println!();
    println!("  {} {}", "Total:".dimmed(), shops.len().to_string().bold());
}

fn print_detail(shop: &Business) {
    field("ID", shop.id.cyan());
    field("Name", or_dash(shop.business_name.as_deref()).bold());
    field("Rating", or_dash(shop.rating.as_deref()));
    field("Monthly sales", or_dash(shop.sales.as_deref()));
    field("Distance", or_dash(shop.distance.as_deref()));
    field("Min order", or_dash(shop.min_order.as_deref()));
    field("Delivery", or_dash(shop.delivery.as_deref()));
    field("Notice", or_dash(shop.notice.as_deref()));

    let tags = shop.discount_tags();
    if !tags.is_empty() {
        field("Discounts", tags.join(" | ").red());
    }

    let sections = shop.sidebar_sections();
    if !sections.is_empty() {
        field("Menu", sections.join(" · "));
    }

    if let Some(dishes) = &shop.food_list {
        println!();
        for dish in dishes {
            println!(
                "  {} {:<20} {}",
                "•".dimmed(),
                or_dash(dish.name.as_deref()),
                dish.red_price.map_or_else(|| "-".to_string(), |p| format!("¥{p:.2}")).red()
            );
        }
    }
}
