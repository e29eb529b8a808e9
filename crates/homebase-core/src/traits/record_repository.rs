// # Record Repository Trait
//
// Defines the interface for reading and writing one DNS record at a provider.
//
// ## Implementations
//
// - DigitalOcean: `homebase-provider-digitalocean` crate
//
// ## Usage
//
// ```rust,ignore
// use homebase_core::{ApiToken, RecordRepository};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let repository = /* RecordRepository implementation */;
//     let token = ApiToken::new("...");
//
//     let mut record = repository.find_by_name("example.com", "home", &token).await?;
//     record.data = "1.2.3.4".to_string();
//     repository.save(&record, "example.com", &token).await?;
//
//     Ok(())
// }
// ```

use crate::credential::ApiToken;
use crate::record::DomainRecord;
use async_trait::async_trait;

/// Trait for DNS record repositories
///
/// The credential is handed in on every call; implementations hold no session
/// and cache nothing between calls.
///
/// ## Rules
///
/// - One HTTP round trip per call
/// - No retry or backoff; return the error and let the caller decide
/// - Non-success responses carry the raw status and body in the error
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Find a record under `domain` by its exact name
    ///
    /// If the provider returns several records with the same name, the first
    /// one in response order is returned.
    ///
    /// # Returns
    ///
    /// - `Ok(DomainRecord)`: The first matching record
    /// - `Err(Error::RecordNotFound)`: No record has that name
    /// - `Err(Error)`: Transport, status or decode failure
    async fn find_by_name(
        &self,
        domain: &str,
        name: &str,
        credential: &ApiToken,
    ) -> Result<DomainRecord, crate::Error>;

    /// Persist the full record back to the provider
    ///
    /// The response body is not parsed; a success status is the only
    /// confirmation.
    async fn save(
        &self,
        record: &DomainRecord,
        domain: &str,
        credential: &ApiToken,
    ) -> Result<(), crate::Error>;

    /// Get the provider name (for logging)
    fn provider_name(&self) -> &'static str;
}
