//! Captcha commands

use crate::commands::Context;
use crate::output::{field, or_dash, render_plain};
use anyhow::Result;
use clap::Subcommand;
use eleme_api_client::endpoints::captcha::{CaptchaKind, CaptchaValidateRequest};
use owo_colors::OwoColorize;

#[derive(Subcommand)]
pub enum CaptchaCommand {
    /// Generate a captcha
    Generate {
        /// IMAGE, SMS, EMAIL, SLIDER or CLICK (default IMAGE)
        #[arg(short = 't', long = "type")]
        kind: Option<CaptchaKind>,
    },

    /// Check an answer
    Validate {
        /// Key returned by `generate`
        key: String,

        /// The user's answer
        value: String,

        /// Captcha type
        #[arg(short = 't', long = "type", default_value = "IMAGE")]
        kind: CaptchaKind,

        /// Keep the captcha valid after a correct answer
        #[arg(long)]
        keep: bool,
    },
}

/// Run a captcha command
pub async fn run(command: CaptchaCommand, ctx: &Context) -> Result<()> {
    let api = ctx.client.captcha();

    match command {
        CaptchaCommand::Generate { kind } => {
            let captcha = api.generate(kind).await?;
            render_plain(&ctx.format, "🧩 Captcha", &captcha, |captcha| {
                field("Key", captcha.key.cyan());
                field(
                    "Type",
                    captcha.kind.map_or_else(|| "-".to_string(), |k| k.to_string()),
                );
                field(
                    "Expires in",
                    captcha
                        .expire_seconds
                        .map_or_else(|| "-".to_string(), |s| format!("{s}s")),
                );
                if let Some(text) = &captcha.click_text {
                    field("Click", text);
                }
                if let Some(receiver) = &captcha.receiver {
                    field("Sent to", receiver);
                }
                if let Some(image) = &captcha.image_base64 {
                    field("Image", format!("{} bytes of base64", image.len()).dimmed());
                }
                field("Message", or_dash(captcha.message.as_deref()));
            })
        }

        CaptchaCommand::Validate {
            key,
            value,
            kind,
            keep,
        } => {
            let mut answer = CaptchaValidateRequest::new(kind, key, value);
            answer.use_immediately = !keep;

            let verdict = api.validate(&answer).await?;
            render_plain(&ctx.format, "🧩 Captcha Check", &verdict, |verdict| {
                let message = or_dash(verdict.message.as_deref());
                if verdict.valid {
                    println!("  {} {}", "✓".green(), message);
                } else {
                    println!("  {} {}", "✗".red(), message);
                }
            })
        }
    }
}
