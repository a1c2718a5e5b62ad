//! Middleware components for request/response processing
//!
//! Session access, the injected side-effect collaborators and the
//! interceptors that run around every transport call.

pub mod hooks;
pub(crate) mod interceptor;
pub mod session;

pub use hooks::{
    DiagnosticSink, Hooks, LogNotifier, Navigator, NoopNavigator, Notifier, TraceEvent,
    TracingSink,
};
pub use interceptor::{
    Disposition, LOGIN_PATH, SERVER_ERROR_NOTICE, SESSION_EXPIRED_NOTICE, TIMEOUT_NOTICE,
};
pub use session::{MemorySession, SessionProvider};
