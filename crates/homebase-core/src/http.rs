//! Default [`HttpTransport`] backed by `reqwest`

use crate::error::{Error, Result};
use crate::traits::transport::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
use async_trait::async_trait;
use std::time::Duration;

const USER_AGENT: &str = concat!("homebase/", env!("CARGO_PKG_VERSION"));

/// Production transport over a shared `reqwest::Client`
///
/// Without an explicit timeout the client keeps reqwest's defaults.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with reqwest's default settings
    pub fn new() -> Result<Self> {
        Self::build(None)
    }

    /// Create a transport that aborts requests after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

struct ReqwestResponse(reqwest::Response);

#[async_trait]
impl HttpResponse for ReqwestResponse {
    fn status(&self) -> u16 {
        self.0.status().as_u16()
    }

    async fn text(self: Box<Self>) -> std::result::Result<String, TransportError> {
        self.0
            .text()
            .await
            .map_err(|e| TransportError::new(e.to_string()))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> std::result::Result<Box<dyn HttpResponse>, TransportError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        Ok(Box::new(ReqwestResponse(response)))
    }

    async fn send(
        &self,
        request: HttpRequest,
    ) -> std::result::Result<Box<dyn HttpResponse>, TransportError> {
        tracing::debug!("{} {}", request.method, request.url);

        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        Ok(Box::new(ReqwestResponse(response)))
    }
}
