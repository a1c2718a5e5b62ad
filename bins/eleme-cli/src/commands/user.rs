//! User commands - login, registration, profile

use crate::commands::Context;
use crate::output::{field, or_dash, render};
use anyhow::Result;
use clap::Subcommand;
use eleme_api_client::endpoints::user::{LoginRequest, RegisterRequest, VerifyCodeRequest};
use owo_colors::OwoColorize;
use tracing::debug;

#[derive(Subcommand)]
pub enum UserCommand {
    /// Log in and print the bearer token
    Login {
        /// Phone number
        phone: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Captcha key from `eleme captcha generate`
        #[arg(long, requires = "captcha_value")]
        captcha_id: Option<String>,

        /// Captcha answer
        #[arg(long, requires = "captcha_id")]
        captcha_value: Option<String>,
    },

    /// Create an account
    Register {
        /// Phone number
        phone: String,

        /// Password (6 to 20 characters)
        #[arg(short, long)]
        password: String,

        /// Repeated password (defaults to --password)
        #[arg(long)]
        confirm_password: Option<String>,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address the verification code was sent to
        #[arg(short, long)]
        email: String,

        /// Gender ("男" or "女")
        #[arg(short, long)]
        gender: Option<String>,

        /// Verification code from `eleme user send-code`
        #[arg(long)]
        code: String,
    },

    /// Email a registration verification code
    SendCode {
        /// Email address
        email: String,
    },

    /// Show the logged-in user's profile
    Info,
}

/// Run a user command
pub async fn run(command: UserCommand, ctx: &Context) -> Result<()> {
    let api = ctx.client.user();

    match command {
        UserCommand::Login {
            phone,
            password,
            captcha_id,
            captcha_value,
        } => {
            let mut credentials = LoginRequest::new(phone, password);
            if let (Some(id), Some(value)) = (captcha_id, captcha_value) {
                credentials = credentials.with_captcha(id, value);
            }
            debug!(phone = %credentials.phone_number, "Logging in");

            let response = api.login(&credentials).await?;
            render(&ctx.format, "🔑 Logged In", response, |login| {
                field("Name", or_dash(login.user.name.as_deref()));
                field("Phone", &login.user.phone_number);
                field("Email", or_dash(login.user.email.as_deref()));
                println!();
                println!("  {}", "Token:".dimmed());
                println!("  {}", login.token.green());
                println!();
                println!(
                    "  {}",
                    "Pass it with --token or export ELEME_TOKEN".dimmed()
                );
            })
        }

        UserCommand::Register {
            phone,
            password,
            confirm_password,
            name,
            email,
            gender,
            code,
        } => {
            let form = RegisterRequest {
                phone_number: phone,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
                name,
                email,
                gender,
                verify_code: code,
            };

            let response = api.register(&form).await?;
            let message = response.message.clone();
            render(&ctx.format, "📝 Registered", response, |_| {
                println!("  {} {}", "✓".green(), or_dash(message.as_deref()));
            })
        }

        UserCommand::SendCode { email } => {
            let response = api.send_verify_code(&VerifyCodeRequest { email: email.clone() }).await?;
            render(&ctx.format, "✉️  Verification Code", response, |_| {
                println!("  {} code sent to {}", "✓".green(), email.cyan());
            })
        }

        UserCommand::Info => {
            let response = api.get_user_info().await?;
            render(&ctx.format, "👤 Profile", response, |user| {
                field("Phone", &user.phone_number);
                field("Name", or_dash(user.name.as_deref()));
                field("Gender", or_dash(user.gender.as_deref()));
                field("Email", or_dash(user.email.as_deref()));
                field("Created", or_dash(user.created_at.as_deref()));
            })
        }
    }
}
