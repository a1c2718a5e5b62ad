//! Terminal collaborators for the request pipeline

use eleme_api_client::{Navigator, Notifier};
use owo_colors::OwoColorize;

/// Prints user notices to stderr in red
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message.red());
    }
}

/// A terminal has no router; tell the user where the storefront would go
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn redirect_to(&self, path: &str) {
        eprintln!(
            "  {} {} {}",
            "→".yellow(),
            format!("redirect to {path}").yellow(),
            "(run `eleme user login` and pass the new token with --token)".dimmed()
        );
    }
}
