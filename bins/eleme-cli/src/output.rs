//! Text and JSON rendering shared by the commands

use anyhow::Result;
use eleme_api_client::ApiResponse;
use owo_colors::OwoColorize;
use serde::Serialize;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Section banner
pub fn banner(title: &str) {
    println!();
    println!("{}", RULE.blue());
    println!("  {}", title.blue().bold());
    println!("{}", RULE.blue());
    println!();
}

/// Print a service response
///
/// JSON mode dumps the whole wrapper; text mode prints `title` and hands
/// the payload to `text`. A failure code becomes an error in both modes.
pub fn render<T: Serialize>(
    format: &str,
    title: &str,
    response: ApiResponse<T>,
    text: impl FnOnce(&T),
) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&response)?);
        response.into_data()?;
        return Ok(());
    }

    let data = response.into_data()?;
    banner(title);
    match data {
        Some(data) => text(&data),
        None => println!("  {}", "(no data)".dimmed()),
    }
    println!();
    Ok(())
}

/// Print a bare service body (services without the result wrapper)
pub fn render_plain<T: Serialize>(
    format: &str,
    title: &str,
    value: &T,
    text: impl FnOnce(&T),
) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    }

    banner(title);
    text(value);
    println!();
    Ok(())
}

/// `-` for missing fields
pub fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Label/value line
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {:<14} {}", format!("{label}:").dimmed(), value);
}
