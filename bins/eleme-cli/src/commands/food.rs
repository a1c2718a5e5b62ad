//! Food commands

use crate::commands::Context;
use crate::output::{field, or_dash, render};
use anyhow::Result;
use clap::Subcommand;
use eleme_api_client::endpoints::food::Food;
use owo_colors::OwoColorize;

#[derive(Subcommand)]
pub enum FoodCommand {
    /// Show one dish
    Get {
        /// Dish id
        id: i64,
    },

    /// List a shop's dishes
    ByBusiness {
        /// Shop id
        business_id: i64,
    },
}

/// Run a food command
pub async fn run(command: FoodCommand, ctx: &Context) -> Result<()> {
    let api = ctx.client.food();

    match command {
        FoodCommand::Get { id } => {
            let response = api.get_by_id(id).await?;
            render(&ctx.format, "🍜 Dish", response, |dish| {
                field("ID", dish.id.cyan());
                field("Name", or_dash(dish.name.as_deref()).bold());
                field("Description", or_dash(dish.text.as_deref()));
                field("Sold", or_dash(dish.amount.as_deref()));
                field("Price", price(dish).red());
                field("Was", or_dash(dish.gray_price.as_deref()).dimmed());
                let tags = dish.discount_tags();
                if !tags.is_empty() {
                    field("Discounts", tags.join(" | "));
                }
            })
        }

        FoodCommand::ByBusiness { business_id } => {
            let response = api.get_by_business_id(business_id).await?;
            let title = format!("🍜 Menu of shop {business_id}");
            render(&ctx.format, &title, response, |dishes: &Vec<Food>| {
                println!(
                    "  {:<6} {:<24} {}",
                    "ID".dimmed(),
                    "Name".dimmed(),
                    "Price".dimmed()
                );
                println!("  {}", "─".repeat(44).dimmed());
                for dish in dishes {
                    println!(
                        "  {:<6} {:<24} {}",
                        dish.id.to_string().cyan(),
                        or_dash(dish.name.as_deref()),
                        price(dish).red()
                    );
                }
            })
        }
    }
}

fn price(dish: &Food) -> String {
    dish.red_price
        .map_or_else(|| "-".to_string(), |p| format!("¥{p:.2}"))
}
