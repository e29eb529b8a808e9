// # HTTP Address Resolver
//
// This crate resolves the caller's public address by asking an "echo my IP"
// web service.
//
// ## Protocol
//
// GET the configured URL (default `http://checkip.amazonaws.com`). A 200
// response carries the address as plain text, possibly padded with
// whitespace or a trailing newline. Any other status is an error.
//
// One request per `resolve()` call. No caching, no retries, no polling.

use homebase_core::config::DEFAULT_ADDRESS_ECHO_URL;
use homebase_core::traits::{AddressResolver, HttpTransport};
use homebase_core::{Error, Operation, Result};

use std::net::IpAddr;
use std::sync::Arc;

/// Address resolver backed by an HTTP echo service
pub struct HttpAddressResolver {
    /// URL to fetch the address from
    url: String,

    /// HTTP transport
    transport: Arc<dyn HttpTransport>,
}

impl HttpAddressResolver {
    /// Create a resolver for the default echo service
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_url(transport, DEFAULT_ADDRESS_ECHO_URL)
    }

    /// Create a resolver for a custom echo service
    pub fn with_url(transport: Arc<dyn HttpTransport>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            transport,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Debug for HttpAddressResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAddressResolver")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl AddressResolver for HttpAddressResolver {
    async fn resolve(&self) -> Result<IpAddr> {
        let op = Operation::ResolveAddress;

        let response = self
            .transport
            .get(&self.url)
            .await
            .map_err(|e| Error::network(op, e.to_string()))?;

        let status = response.status();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Echo service {} answered with status {}", self.url, status);
            return Err(Error::http_status(op, status, body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::body_read(op, e.to_string()))?;

        let ip: IpAddr = body
            .trim()
            .parse()
            .map_err(|_| Error::InvalidAddress(body.clone()))?;

        tracing::debug!("Echo service {} reported {}", self.url, ip);
        Ok(ip)
    }

    fn resolver_name(&self) -> &'static str {
        "http"
    }
}
