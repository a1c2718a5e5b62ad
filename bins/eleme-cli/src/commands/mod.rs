//! CLI command implementations

use eleme_api_client::ElemeClient;

pub mod business;
pub mod captcha;
pub mod food;
pub mod notify;
pub mod order;
pub mod user;

/// Shared state for a single invocation
pub struct Context {
    pub client: ElemeClient,
    /// `text` or `json`
    pub format: String,
}
