//! Outbound and inbound interception around the transport
//!
//! Outbound: stamp `Authorization` from the session and trace the request.
//! Inbound: trace the response, or trace, classify and react to the error.
//! Errors are never swallowed here; the caller always gets them back.

use super::hooks::{Hooks, TraceEvent};
use super::session::SessionProvider;
use crate::error::ApiError;
use crate::request::{AUTHORIZATION, Headers, RequestDescriptor};
use crate::response::ResponseEnvelope;
use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

/// Notice shown when the gateway rejects the session
pub const SESSION_EXPIRED_NOTICE: &str = "session expired, please log in again";

/// Notice shown on a 500 response
pub const SERVER_ERROR_NOTICE: &str = "internal server error";

/// Notice shown when no response arrived in time
pub const TIMEOUT_NOTICE: &str = "request timed out";

/// Route the user is sent to after a 401
pub const LOGIN_PATH: &str = "/login";

const REDACTED: &str = "Bearer <redacted>";

/// How a failed call is handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// 401: clear the session, tell the user, go to login
    SessionExpired,
    /// 500: tell the user the server failed
    ServerError,
    /// Transport timed out
    TimedOut,
    /// Anything else: show the error's own message
    Other(String),
}

impl Disposition {
    /// Classify an error. Only 401 and 500 get status-specific handling.
    #[must_use]
    pub fn classify(err: &ApiError) -> Self {
        match err.status() {
            Some(401) => Self::SessionExpired,
            Some(500) => Self::ServerError,
            _ if err.is_timeout() => Self::TimedOut,
            _ => Self::Other(err.user_message()),
        }
    }

    /// Text of the user notice
    #[must_use]
    pub fn notice(&self) -> &str {
        match self {
            Self::SessionExpired => SESSION_EXPIRED_NOTICE,
            Self::ServerError => SERVER_ERROR_NOTICE,
            Self::TimedOut => TIMEOUT_NOTICE,
            Self::Other(message) => message,
        }
    }
}

/// Identity of one call, shared by all its trace events
#[derive(Debug, Clone)]
pub(crate) struct CallContext {
    /// Correlates the trace events of one call
    pub request_id: Uuid,
    /// Absolute URL of the call
    pub url: String,
}

/// The interceptor pair bound to a session and collaborator set
pub(crate) struct Interceptors<'a> {
    session: &'a dyn SessionProvider,
    hooks: &'a Hooks,
}

impl<'a> Interceptors<'a> {
    pub(crate) fn new(session: &'a dyn SessionProvider, hooks: &'a Hooks) -> Self {
        Self { session, hooks }
    }

    /// Stamp the bearer token (if any) and trace the request
    pub(crate) fn outbound(
        &self,
        mut request: RequestDescriptor,
        ctx: &CallContext,
    ) -> RequestDescriptor {
        if let Some(token) = self.session.token().filter(|t| !t.is_empty()) {
            request.set_header(AUTHORIZATION, format!("Bearer {token}"));
        }

        self.hooks.sink.trace(&TraceEvent::Request {
            request_id: ctx.request_id,
            at: Utc::now(),
            method: request.method.to_string(),
            url: ctx.url.clone(),
            body: request.body.clone(),
            params: request.query.clone(),
            headers: redact(&request.headers),
        });

        request
    }

    /// Trace a successful response
    pub(crate) fn on_success(
        &self,
        response: &ResponseEnvelope,
        ctx: &CallContext,
        elapsed: Duration,
    ) {
        self.hooks.sink.trace(&TraceEvent::Response {
            request_id: ctx.request_id,
            at: Utc::now(),
            status: response.status,
            status_text: response.status_text.clone(),
            url: response.url.clone(),
            body: response.body.clone(),
            headers: response.headers.clone(),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        });
    }

    /// Trace, classify and react to a failure
    pub(crate) fn on_failure(
        &self,
        err: &ApiError,
        response_headers: Option<&Headers>,
        ctx: &CallContext,
    ) -> Disposition {
        let (url, body) = match err {
            ApiError::Http { url, body, .. } => (url.clone(), Some(body.clone())),
            _ => (ctx.url.clone(), None),
        };

        self.hooks.sink.trace(&TraceEvent::Error {
            request_id: ctx.request_id,
            at: Utc::now(),
            message: err.to_string(),
            status: err.status(),
            url,
            body,
            headers: response_headers.cloned(),
        });

        let disposition = Disposition::classify(err);
        if disposition == Disposition::SessionExpired {
            self.session.clear();
            self.hooks.notifier.notify(disposition.notice());
            self.hooks.navigator.redirect_to(LOGIN_PATH);
        } else {
            self.hooks.notifier.notify(disposition.notice());
        }

        disposition
    }
}

fn redact(headers: &Headers) -> Headers {
    headers
        .iter()
        .map(|(k, v)| {
            if k.eq_ignore_ascii_case(AUTHORIZATION) {
                (k.clone(), REDACTED.to_string())
            } else {
                (k.clone(), v.clone())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::session::MemorySession;
    use crate::testing::Recorder;

    fn ctx() -> CallContext {
        CallContext {
            request_id: Uuid::new_v4(),
            url: "http://localhost:8888/api/user/info".to_string(),
        }
    }

    fn http(status: u16) -> ApiError {
        ApiError::Http {
            status,
            status_text: String::new(),
            url: "http://localhost:8888/api/user/info".to_string(),
            body: String::new(),
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(Disposition::classify(&http(401)), Disposition::SessionExpired);
        assert_eq!(Disposition::classify(&http(500)), Disposition::ServerError);
        assert_eq!(
            Disposition::classify(&ApiError::Timeout(Duration::from_secs(10))),
            Disposition::TimedOut
        );
        assert_eq!(
            Disposition::classify(&http(403)),
            Disposition::Other("Request failed with status code 403".to_string())
        );
        assert_eq!(
            Disposition::classify(&ApiError::Network(String::new())).notice(),
            "network error"
        );
    }

    #[test]
    fn test_502_is_not_treated_as_500() {
        assert!(matches!(Disposition::classify(&http(502)), Disposition::Other(_)));
    }

    #[test]
    fn test_outbound_adds_bearer_when_token_present() {
        let session = MemorySession::with_token("tok-1");
        let recorder = Recorder::default();
        let hooks = recorder.hooks();
        let interceptors = Interceptors::new(&session, &hooks);

        let request = interceptors.outbound(RequestDescriptor::get("/api/user/info"), &ctx());
        assert_eq!(request.header_value("authorization"), Some("Bearer tok-1"));

        let events = recorder.events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            TraceEvent::Request { headers, .. } => {
                assert_eq!(headers.get(AUTHORIZATION).map(String::as_str), Some(REDACTED));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_outbound_leaves_anonymous_requests_alone() {
        let recorder = Recorder::default();
        let hooks = recorder.hooks();

        for session in [MemorySession::new(), MemorySession::with_token("")] {
            let interceptors = Interceptors::new(&session, &hooks);
            let original = RequestDescriptor::get("/api/business/getAll");
            let request = interceptors.outbound(original.clone(), &ctx());
            assert_eq!(request, original);
        }
    }

    #[test]
    fn test_on_failure_401_clears_and_redirects_once() {
        let session = MemorySession::with_token("stale");
        let recorder = Recorder::default();
        let hooks = recorder.hooks();
        let interceptors = Interceptors::new(&session, &hooks);

        let disposition = interceptors.on_failure(&http(401), None, &ctx());

        assert_eq!(disposition, Disposition::SessionExpired);
        assert_eq!(session.token(), None);
        assert_eq!(recorder.redirects(), vec![LOGIN_PATH.to_string()]);
        assert_eq!(recorder.notices(), vec![SESSION_EXPIRED_NOTICE.to_string()]);
    }

    #[test]
    fn test_on_failure_500_keeps_session() {
        let session = MemorySession::with_token("fresh");
        let recorder = Recorder::default();
        let hooks = recorder.hooks();
        let interceptors = Interceptors::new(&session, &hooks);

        interceptors.on_failure(&http(500), None, &ctx());

        assert_eq!(session.token().as_deref(), Some("fresh"));
        assert!(recorder.redirects().is_empty());
        assert_eq!(recorder.notices(), vec![SERVER_ERROR_NOTICE.to_string()]);
    }

    #[test]
    fn test_on_failure_traces_before_notifying() {
        let session = MemorySession::new();
        let recorder = Recorder::default();
        let hooks = recorder.hooks();
        let interceptors = Interceptors::new(&session, &hooks);

        interceptors.on_failure(&ApiError::Network("connection refused".into()), None, &ctx());

        let log = recorder.log();
        assert_eq!(log.len(), 2);
        assert!(log[0].starts_with("trace:error"));
        assert_eq!(log[1], "notify:connection refused");
    }
}
