//! HTTP client for the Eleme storefront gateway
//!
//! This crate wraps every storefront call in one request pipeline:
//!
//! - **Outbound interception**: attaches `Authorization: Bearer <token>` from an
//!   injected session and emits a diagnostic trace
//! - **Transport**: one `reqwest` exchange against the gateway, default
//!   `http://localhost:8888` with a 10 second timeout
//! - **Inbound interception**: traces the outcome; failures raise a user notice,
//!   and a 401 also clears the session and redirects to `/login`
//!
//! Above the pipeline sits a typed endpoint registry grouped by service:
//! user, business, food, order, captcha and notification.
//!
//! # Example
//!
//! ```rust,no_run
//! use eleme_api_client::{ClientConfig, ElemeClient, MemorySession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = MemorySession::with_token("eyJhbGciOiJIUzI1NiJ9...");
//!     let client = ElemeClient::builder()
//!         .config(ClientConfig::from_env()?)
//!         .session(session)
//!         .build()?;
//!
//!     let shops = client.business().search("饺子").await?;
//!     println!("Found {} shops", shops.data.map_or(0, |d| d.len()));
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod request;
pub mod response;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::{ClientBuilder, ElemeClient};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use middleware::{
    DiagnosticSink, Disposition, Hooks, MemorySession, Navigator, Notifier, SessionProvider,
    TraceEvent,
};
pub use request::RequestDescriptor;
pub use response::{ApiResponse, ResponseEnvelope};
pub use transport::{ReqwestTransport, Transport};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::{ClientBuilder, ElemeClient};
    pub use crate::config::ClientConfig;
    pub use crate::endpoints::{
        BusinessApi, CaptchaApi, FoodApi, NotificationApi, OrderApi, UserApi,
    };
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::middleware::{
        DiagnosticSink, Hooks, MemorySession, Navigator, Notifier, SessionProvider, TraceEvent,
    };
    pub use crate::response::ApiResponse;
}
