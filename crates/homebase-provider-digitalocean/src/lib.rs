// # DigitalOcean DNS Provider
//
// Record repository for domains hosted on DigitalOcean DNS.
//
// ## Behavior
//
// - One HTTP request per call (list on lookup, PUT on save)
// - Bearer token supplied by the caller on every call, never stored
// - No retry, no backoff, no caching; errors go straight back to the caller
// - Non-200 responses are returned with their status and raw body
//
// ## Security
//
// - The API token never appears in logs or `Debug` output
//
// ## API Reference
//
// - DigitalOcean API v2: https://docs.digitalocean.com/reference/api/
// - List Domain Records: GET `/v2/domains/:domain/records`
// - Update Domain Record: PUT `/v2/domains/:domain/records/:id`

use async_trait::async_trait;
use homebase_core::config::DEFAULT_API_BASE_URL;
use homebase_core::traits::{HttpRequest, HttpTransport, Method, RecordRepository};
use homebase_core::{ApiToken, DomainRecord, Error, Operation, RecordList, Result};
use std::sync::Arc;

/// DigitalOcean domain record repository
pub struct DigitalOceanRecords {
    /// API base URL without trailing slash
    api_base: String,

    /// HTTP transport for API requests
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for DigitalOceanRecords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitalOceanRecords")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl DigitalOceanRecords {
    /// Create a repository against the public DigitalOcean API
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self::with_api_base(transport, DEFAULT_API_BASE_URL)
    }

    /// Create a repository against a custom API base URL
    pub fn with_api_base(transport: Arc<dyn HttpTransport>, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            api_base,
            transport,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn records_url(&self, domain: &str) -> String {
        format!("{}/v2/domains/{}/records", self.api_base, domain)
    }

    fn record_url(&self, domain: &str, id: u64) -> String {
        format!("{}/v2/domains/{}/records/{}", self.api_base, domain, id)
    }

    fn request(method: Method, url: String, credential: &ApiToken) -> HttpRequest {
        HttpRequest::new(method, url)
            .header("Authorization", credential.bearer())
            .header("Content-Type", "application/json")
    }

    /// Send a request and return the body of a 200 response
    ///
    /// The body is drained before the status is checked so that error bodies
    /// end up in the returned error.
    async fn exchange(&self, request: HttpRequest, op: Operation) -> Result<String> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| Error::network(op, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::body_read(op, e.to_string()))?;

        if status != 200 {
            tracing::warn!(
                "DigitalOcean API error {}: status {}{}",
                op,
                status,
                status_hint(status)
            );
            return Err(Error::http_status(op, status, body));
        }

        Ok(body)
    }
}

fn status_hint(status: u16) -> &'static str {
    match status {
        401 | 403 => " (check the API token and its scopes)",
        404 => " (unknown domain or record)",
        429 => " (rate limited, try again later)",
        500..=599 => " (provider error, usually transient)",
        _ => "",
    }
}

#[async_trait]
impl RecordRepository for DigitalOceanRecords {
    /// List the domain's records and pick the first with a matching name
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /v2/domains/example.com/records
    /// Authorization: Bearer <token>
    /// ```
    async fn find_by_name(
        &self,
        domain: &str,
        name: &str,
        credential: &ApiToken,
    ) -> Result<DomainRecord> {
        let op = Operation::FindRecord;
        let url = self.records_url(domain);
        tracing::debug!("Looking up record {} in {}", name, domain);

        let body = self
            .exchange(Self::request(Method::Get, url, credential), op)
            .await?;

        let list: RecordList =
            serde_json::from_str(&body).map_err(|source| Error::Decode {
                operation: op,
                source,
            })?;

        tracing::debug!("{} returned {} record(s)", domain, list.records.len());

        list.into_found(name)
            .ok_or_else(|| Error::record_not_found(name))
    }

    /// Write the full record back
    ///
    /// # API Call
    ///
    /// ```http
    /// PUT /v2/domains/example.com/records/:id
    /// Authorization: Bearer <token>
    /// Content-Type: application/json
    ///
    /// {"id": 1, "type": "A", "name": "home", "data": "1.2.3.4"}
    /// ```
    async fn save(&self, record: &DomainRecord, domain: &str, credential: &ApiToken) -> Result<()> {
        let op = Operation::SaveRecord;

        let payload = serde_json::to_vec(record).map_err(|source| Error::Encode {
            operation: op,
            source,
        })?;

        let url = self.record_url(domain, record.id);
        tracing::debug!("Saving record {} ({}) in {}", record.id, record.name, domain);

        self.exchange(Self::request(Method::Put, url, credential).body(payload), op)
            .await?;

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "digitalocean"
    }
}
