//! Notification commands - email and SMS dispatch

use crate::commands::Context;
use crate::output::{field, or_dash, render_plain};
use anyhow::{anyhow, Result};
use clap::Subcommand;
use eleme_api_client::endpoints::notification::{
    EmailRequest, NotificationResponse, SmsRequest, TemplateParams,
};
use owo_colors::OwoColorize;
use serde_json::Value;

#[derive(Subcommand)]
pub enum NotifyCommand {
    /// Send an email
    Email {
        /// Recipient address
        to: String,

        /// Subject line
        #[arg(short, long)]
        subject: String,

        /// Body text
        #[arg(short, long)]
        content: String,

        /// Send the body as HTML
        #[arg(long)]
        html: bool,
    },

    /// Send a templated SMS
    Sms {
        /// Recipient phone number
        phone: String,

        /// Template code
        #[arg(short, long)]
        template: String,

        /// Template variable as key=value (repeatable)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
}

/// Run a notification command
pub async fn run(command: NotifyCommand, ctx: &Context) -> Result<()> {
    let api = ctx.client.notification();

    match command {
        NotifyCommand::Email {
            to,
            subject,
            content,
            html,
        } => {
            let mut email = EmailRequest::text(to, subject, content);
            if html {
                email = email.html();
            }
            let record = api.send_email(&email).await?;
            render_plain(&ctx.format, "✉️  Email", &record, print_record)
        }

        NotifyCommand::Sms {
            phone,
            template,
            params,
        } => {
            let params = parse_params(&params)?;
            let sms = SmsRequest {
                phone,
                template_code: template,
                template_params: (!params.is_empty()).then_some(params),
                business_type: None,
                business_id: None,
            };
            let record = api.send_sms(&sms).await?;
            render_plain(&ctx.format, "📱 SMS", &record, print_record)
        }
    }
}

/// `key=value` pairs; values that parse as JSON keep their type
fn parse_params(raw: &[String]) -> Result<TemplateParams> {
    raw.iter()
        .map(|pair| {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("invalid template param '{pair}', expected KEY=VALUE"))?;
            let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
            Ok((key.to_string(), value))
        })
        .collect()
}

fn print_record(record: &NotificationResponse) {
    field("ID", record.id.map_or_else(|| "-".to_string(), |id| id.to_string()).cyan());
    field("Receiver", or_dash(record.receiver.as_deref()));
    field("Status", or_dash(record.status.as_deref()).green());
    if let Some(reason) = &record.failure_reason {
        field("Failure", reason.red());
    }
}
