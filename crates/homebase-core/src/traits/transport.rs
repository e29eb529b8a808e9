// # HTTP Transport Trait
//
// The narrow HTTP capability the resolver and the record repository depend on.
//
// ## Implementations
//
// - `ReqwestTransport` (this crate, `crate::http`): the production transport
// - Canned-response doubles in tests
//
// A transport only moves bytes. It never inspects status codes, never retries
// and never parses bodies; that is left to the component issuing the request.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Failure inside the transport itself (connect, send, or body stream)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(String);

impl TransportError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// HTTP method used by the updater
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Put => f.write_str("PUT"),
        }
    }
}

/// An outgoing request with method, headers and optional body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Look up a header value (case-insensitive name)
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A received response whose body has not been read yet
///
/// Reading the body consumes the response. Dropping it without reading
/// releases the underlying connection.
#[async_trait]
pub trait HttpResponse: Send {
    /// HTTP status code
    fn status(&self) -> u16;

    /// Drain the whole body as text
    async fn text(self: Box<Self>) -> Result<String, TransportError>;
}

/// Minimal HTTP client capability
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a plain GET without extra headers
    async fn get(&self, url: &str) -> Result<Box<dyn HttpResponse>, TransportError>;

    /// Perform an arbitrary request
    async fn send(&self, request: HttpRequest) -> Result<Box<dyn HttpResponse>, TransportError>;
}
