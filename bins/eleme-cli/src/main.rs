//! Eleme CLI - storefront gateway from the terminal
//!
//! Every subcommand goes through the same request pipeline the web
//! storefront uses: bearer token, notices on failure, login redirect on 401.

use clap::{Parser, Subcommand};
use eleme_api_client::{ClientConfig, ElemeClient, MemorySession};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod console;
mod output;

use commands::{business, captcha, food, notify, order, user, Context};
use console::{ConsoleNavigator, ConsoleNotifier};

/// Command-line client for the Eleme storefront gateway
#[derive(Parser)]
#[command(name = "eleme")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// TOML file with `base_url`, `timeout_secs` and `user_agent`
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Bearer token for authenticated routes
    #[arg(long, global = true, env = "ELEME_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Gateway base URL
    #[arg(long, global = true, env = "ELEME_API_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login, registration and profile
    User {
        #[command(subcommand)]
        command: user::UserCommand,
    },

    /// Browse and search shops
    Business {
        #[command(subcommand)]
        command: business::BusinessCommand,
    },

    /// Look up dishes
    Food {
        #[command(subcommand)]
        command: food::FoodCommand,
    },

    /// Place and inspect orders
    Order {
        #[command(subcommand)]
        command: order::OrderCommand,
    },

    /// Generate and check captchas
    Captcha {
        #[command(subcommand)]
        command: captcha::CaptchaCommand,
    },

    /// Send email and SMS notifications
    Notify {
        #[command(subcommand)]
        command: notify::NotifyCommand,
    },
}

fn build_client(cli: &Cli) -> anyhow::Result<ElemeClient> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_toml_file(path)?,
        None => ClientConfig::from_env()?,
    };
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url);
    }

    let session = MemorySession::new();
    if let Some(token) = &cli.token {
        session.set_token(token);
    }

    let client = ElemeClient::builder()
        .config(config)
        .session(session)
        .notifier(ConsoleNotifier)
        .navigator(ConsoleNavigator)
        .build()?;
    Ok(client)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context {
        client: build_client(&cli)?,
        format: cli.format,
    };

    match cli.command {
        Commands::User { command } => user::run(command, &ctx).await,
        Commands::Business { command } => business::run(command, &ctx).await,
        Commands::Food { command } => food::run(command, &ctx).await,
        Commands::Order { command } => order::run(command, &ctx).await,
        Commands::Captcha { command } => captcha::run(command, &ctx).await,
        Commands::Notify { command } => notify::run(command, &ctx).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("eleme=debug,eleme_api_client=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
