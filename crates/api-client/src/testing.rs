//! Test doubles for the transport and collaborators

use crate::error::{ApiError, ApiResult};
use crate::middleware::hooks::{DiagnosticSink, Hooks, Navigator, Notifier, TraceEvent};
use crate::request::{Headers, RequestDescriptor};
use crate::response::ResponseEnvelope;
use crate::transport::Transport;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct RecorderState {
    events: Vec<TraceEvent>,
    notices: Vec<String>,
    redirects: Vec<String>,
    log: Vec<String>,
}

/// Records every collaborator call in order
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    state: Arc<Mutex<RecorderState>>,
}

impl Recorder {
    pub(crate) fn hooks(&self) -> Hooks {
        Hooks::default()
            .with_notifier(self.clone())
            .with_navigator(self.clone())
            .with_sink(self.clone())
    }

    pub(crate) fn events(&self) -> Vec<TraceEvent> {
        self.state.lock().unwrap().events.clone()
    }

    pub(crate) fn notices(&self) -> Vec<String> {
        self.state.lock().unwrap().notices.clone()
    }

    pub(crate) fn redirects(&self) -> Vec<String> {
        self.state.lock().unwrap().redirects.clone()
    }

    pub(crate) fn log(&self) -> Vec<String> {
        self.state.lock().unwrap().log.clone()
    }
}

impl Notifier for Recorder {
    fn notify(&self, message: &str) {
        let mut state = self.state.lock().unwrap();
        state.notices.push(message.to_string());
        state.log.push(format!("notify:{message}"));
    }
}

impl Navigator for Recorder {
    fn redirect_to(&self, path: &str) {
        let mut state = self.state.lock().unwrap();
        state.redirects.push(path.to_string());
        state.log.push(format!("redirect:{path}"));
    }
}

impl DiagnosticSink for Recorder {
    fn trace(&self, event: &TraceEvent) {
        let kind = match event {
            TraceEvent::Request { .. } => "request",
            TraceEvent::Response { .. } => "response",
            TraceEvent::Error { .. } => "error",
        };
        let mut state = self.state.lock().unwrap();
        state.events.push(event.clone());
        state.log.push(format!("trace:{kind}"));
    }
}

/// Canned transport outcome
pub(crate) enum Scripted {
    Status(u16, String),
    Timeout,
    Network(String),
}

/// Transport that records requests and replays scripted outcomes
///
/// When the script runs dry it answers 200 with an empty success wrapper.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    requests: Arc<Mutex<Vec<RequestDescriptor>>>,
    script: Arc<Mutex<VecDeque<Scripted>>>,
}

impl ScriptedTransport {
    pub(crate) fn push(&self, outcome: Scripted) {
        self.script.lock().unwrap().push_back(outcome);
    }

    pub(crate) fn respond_json(&self, body: &serde_json::Value) {
        self.push(Scripted::Status(200, body.to_string()));
    }

    pub(crate) fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> RequestDescriptor {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: &RequestDescriptor) -> ApiResult<ResponseEnvelope> {
        self.requests.lock().unwrap().push(request.clone());

        let outcome = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Scripted::Status(200, r#"{"code":200,"message":"ok"}"#.into()));

        let url = format!("http://localhost:8888{}", request.path);
        match outcome {
            Scripted::Status(status, body) => Ok(ResponseEnvelope {
                status,
                status_text: reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or_default()
                    .to_string(),
                headers: Headers::from([(
                    "content-type".to_string(),
                    "application/json".to_string(),
                )]),
                body,
                url,
            }),
            Scripted::Timeout => Err(ApiError::Timeout(Duration::from_secs(10))),
            Scripted::Network(message) => Err(ApiError::Network(message)),
        }
    }
}
