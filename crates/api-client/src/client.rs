//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{BusinessApi, CaptchaApi, FoodApi, NotificationApi, OrderApi, UserApi};
use crate::error::ApiResult;
use crate::middleware::interceptor::{CallContext, Interceptors};
use crate::middleware::{DiagnosticSink, Hooks, MemorySession, Navigator, Notifier, SessionProvider};
use crate::request::RequestDescriptor;
use crate::response::ResponseEnvelope;
use crate::transport::{ReqwestTransport, Transport};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;
use uuid::Uuid;

/// Eleme gateway client
///
/// Every call runs through the same pipeline:
/// - outbound: attach `Authorization: Bearer <token>` when the session has one, trace
/// - transport: one HTTP exchange, no retries
/// - inbound: trace; on failure notify the user, and on 401 clear the session
///   and redirect to `/login`; the error is always returned to the caller
///
/// Cloning is cheap; clones share the connection pool, session and hooks.
#[derive(Clone)]
pub struct ElemeClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionProvider>,
    hooks: Hooks,
}

impl ElemeClient {
    /// Create a client configured from the environment, with an anonymous
    /// in-memory session and the default `tracing` hooks
    pub fn new() -> ApiResult<Self> {
        Self::builder().config(ClientConfig::from_env()?).build()
    }

    /// Create a client with a specific configuration and default collaborators
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        Self::builder().config(config).build()
    }

    /// Start building a client with custom collaborators
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Session the client reads tokens from
    #[must_use]
    pub fn session(&self) -> &Arc<dyn SessionProvider> {
        &self.session
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access user account endpoints
    #[must_use]
    pub fn user(&self) -> UserApi {
        UserApi::new(self.clone())
    }

    /// Access business (shop) endpoints
    #[must_use]
    pub fn business(&self) -> BusinessApi {
        BusinessApi::new(self.clone())
    }

    /// Access food endpoints
    #[must_use]
    pub fn food(&self) -> FoodApi {
        FoodApi::new(self.clone())
    }

    /// Access order endpoints
    #[must_use]
    pub fn order(&self) -> OrderApi {
        OrderApi::new(self.clone())
    }

    /// Access captcha endpoints
    #[must_use]
    pub fn captcha(&self) -> CaptchaApi {
        CaptchaApi::new(self.clone())
    }

    /// Access notification endpoints
    #[must_use]
    pub fn notification(&self) -> NotificationApi {
        NotificationApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Request pipeline
    // -------------------------------------------------------------------------

    /// Send a request through the interceptors and the transport
    ///
    /// Non-2xx responses come back as [`ApiError::Http`](crate::ApiError::Http).
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: RequestDescriptor) -> ApiResult<ResponseEnvelope> {
        let ctx = CallContext {
            request_id: Uuid::new_v4(),
            url: self.config.url_for(&request.path),
        };
        let interceptors = Interceptors::new(self.session.as_ref(), &self.hooks);

        let request = interceptors.outbound(request, &ctx);

        let start = Instant::now();
        let result = self.transport.execute(&request).await;
        let elapsed = start.elapsed();

        match result {
            Ok(response) if response.is_success() => {
                interceptors.on_success(&response, &ctx, elapsed);
                Ok(response)
            }
            Ok(response) => {
                let headers = response.headers.clone();
                let err = response.into_error();
                interceptors.on_failure(&err, Some(&headers), &ctx);
                Err(err)
            }
            Err(err) => {
                interceptors.on_failure(&err, None, &ctx);
                Err(err)
            }
        }
    }

    /// Send a request and decode the JSON body
    ///
    /// Decoding failures are returned as-is and do not reach the notifier.
    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestDescriptor) -> ApiResult<T> {
        self.send(request).await?.json()
    }
}

impl std::fmt::Debug for ElemeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElemeClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ElemeClient`]
#[derive(Default)]
pub struct ClientBuilder {
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn Transport>>,
    session: Option<Arc<dyn SessionProvider>>,
    hooks: Hooks,
}

impl ClientBuilder {
    /// Use `config` instead of the defaults
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a custom transport instead of `reqwest`
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Read and clear tokens through `session`
    #[must_use]
    pub fn session(mut self, session: impl SessionProvider + 'static) -> Self {
        self.session = Some(Arc::new(session));
        self
    }

    /// Share an existing session handle
    #[must_use]
    pub fn shared_session(mut self, session: Arc<dyn SessionProvider>) -> Self {
        self.session = Some(session);
        self
    }

    /// Replace the whole collaborator set
    #[must_use]
    pub fn hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Replace the user-notice collaborator
    #[must_use]
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.hooks = self.hooks.with_notifier(notifier);
        self
    }

    /// Replace the navigation collaborator
    #[must_use]
    pub fn navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.hooks = self.hooks.with_navigator(navigator);
        self
    }

    /// Replace the diagnostic sink
    #[must_use]
    pub fn sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
        self.hooks = self.hooks.with_sink(sink);
        self
    }

    /// Validate the configuration and assemble the client
    pub fn build(self) -> ApiResult<ElemeClient> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let config = Arc::new(config);

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(Arc::clone(&config))?),
        };

        Ok(ElemeClient {
            config,
            transport,
            session: self
                .session
                .unwrap_or_else(|| Arc::new(MemorySession::new())),
            hooks: self.hooks,
        })
    }
}
