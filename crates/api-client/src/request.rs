//! Outbound request descriptors
//!
//! A [`RequestDescriptor`] is everything the pipeline needs to perform one
//! call: method, path relative to the gateway, query pairs, optional JSON
//! body and extra headers. Endpoint functions build one per call.

use crate::error::ApiResult;
use reqwest::Method;
use serde::Serialize;
use std::collections::BTreeMap;

/// Header map used by descriptors, envelopes and traces
pub type Headers = BTreeMap<String, String>;

/// Bearer authorization header name
pub const AUTHORIZATION: &str = "Authorization";

/// Content type header name
pub const CONTENT_TYPE: &str = "Content-Type";

/// A single HTTP call as shaped by an endpoint function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: Method,
    /// Path relative to the gateway base URL, e.g. `/api/user/info`
    pub path: String,
    /// Query parameters, in insertion order
    pub query: Vec<(String, String)>,
    /// JSON payload
    pub body: Option<serde_json::Value>,
    /// Extra headers
    pub headers: Headers,
}

impl RequestDescriptor {
    /// Create a descriptor with no body, query or headers
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Headers::new(),
        }
    }

    /// GET `path`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST `path`
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a header, replacing any existing value under a case-insensitive match
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// In-place variant of [`header`](Self::header)
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|k, _| !k.eq_ignore_ascii_case(&name));
        self.headers.insert(name, value.into());
    }

    /// Look up a header by case-insensitive name
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
