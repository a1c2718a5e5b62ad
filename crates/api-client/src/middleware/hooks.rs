//! Side-effect collaborators invoked by the request pipeline
//!
//! The pipeline never talks to a UI directly. It reports through three
//! injected capabilities:
//!
//! - [`Notifier`]: user-visible notices ("request timed out", ...)
//! - [`Navigator`]: redirects, used to send the user to `/login` on 401
//! - [`DiagnosticSink`]: structured request/response/error traces
//!
//! Defaults forward everything to `tracing`, which suits headless use.

use crate::request::Headers;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Shows a message to the user
pub trait Notifier: Send + Sync {
    /// Fire-and-forget notice
    fn notify(&self, message: &str);
}

/// Moves the user to another route
pub trait Navigator: Send + Sync {
    /// Navigate to `path`
    fn redirect_to(&self, path: &str);
}

/// Receives diagnostic trace events
///
/// Implementations must not fail the call; errors are theirs to swallow.
pub trait DiagnosticSink: Send + Sync {
    /// Record one event
    fn trace(&self, event: &TraceEvent);
}

/// Diagnostic record emitted at each pipeline stage
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    /// Request about to be sent
    Request {
        /// Correlates the events of one call
        request_id: Uuid,
        /// When the event was emitted
        at: DateTime<Utc>,
        /// HTTP method
        method: String,
        /// Full URL
        url: String,
        /// JSON payload
        body: Option<serde_json::Value>,
        /// Query parameters
        params: Vec<(String, String)>,
        /// Request headers, credentials redacted
        headers: Headers,
    },
    /// 2xx response received
    Response {
        /// Correlates the events of one call
        request_id: Uuid,
        /// When the event was emitted
        at: DateTime<Utc>,
        /// HTTP status
        status: u16,
        /// Reason phrase
        status_text: String,
        /// URL that answered
        url: String,
        /// Raw body
        body: String,
        /// Response headers
        headers: Headers,
        /// Round trip time in milliseconds
        elapsed_ms: u64,
    },
    /// Call failed
    Error {
        /// Correlates the events of one call
        request_id: Uuid,
        /// When the event was emitted
        at: DateTime<Utc>,
        /// Error message
        message: String,
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// URL that was requested
        url: String,
        /// Response body, when a response was received
        body: Option<String>,
        /// Response headers, when a response was received
        headers: Option<Headers>,
    },
}

impl TraceEvent {
    /// Correlation id of the call this event belongs to
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        match self {
            Self::Request { request_id, .. }
            | Self::Response { request_id, .. }
            | Self::Error { request_id, .. } => *request_id,
        }
    }
}

/// Sink that forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn trace(&self, event: &TraceEvent) {
        match event {
            TraceEvent::Request {
                request_id,
                method,
                url,
                body,
                params,
                headers,
                ..
            } => {
                debug!(
                    request_id = %request_id,
                    method = %method,
                    url = %url,
                    body = ?body,
                    params = ?params,
                    headers = ?headers,
                    "Sending request"
                );
            }
            TraceEvent::Response {
                request_id,
                status,
                url,
                body,
                elapsed_ms,
                ..
            } => {
                debug!(
                    request_id = %request_id,
                    status = status,
                    url = %url,
                    elapsed_ms = elapsed_ms,
                    body_len = body.len(),
                    "Received response"
                );
            }
            TraceEvent::Error {
                request_id,
                message,
                status,
                url,
                body,
                ..
            } => {
                warn!(
                    request_id = %request_id,
                    status = ?status,
                    url = %url,
                    body = ?body,
                    "Request failed: {message}"
                );
            }
        }
    }
}

/// Notifier that logs notices instead of displaying them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        warn!(notice = %message, "User notice");
    }
}

/// Navigator for environments without routes
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn redirect_to(&self, path: &str) {
        info!(path = %path, "Redirect requested with no navigator attached");
    }
}

/// The full collaborator set handed to the pipeline
#[derive(Clone)]
pub struct Hooks {
    /// User notices
    pub notifier: Arc<dyn Notifier>,
    /// Route changes
    pub navigator: Arc<dyn Navigator>,
    /// Diagnostic traces
    pub sink: Arc<dyn DiagnosticSink>,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            notifier: Arc::new(LogNotifier),
            navigator: Arc::new(NoopNavigator),
            sink: Arc::new(TracingSink),
        }
    }
}

impl Hooks {
    /// Replace the notifier
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Replace the navigator
    #[must_use]
    pub fn with_navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Arc::new(navigator);
        self
    }

    /// Replace the diagnostic sink
    #[must_use]
    pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}
