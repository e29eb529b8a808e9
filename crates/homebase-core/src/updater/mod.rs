//! Update pipeline
//!
//! The [`Updater`] runs one straight-line update:
//!
//! ```text
//! ┌─────────────────┐   IpAddr   ┌──────────┐
//! │ AddressResolver │──────────▶│          │
//! └─────────────────┘            │          │  find_by_name   ┌──────────────────┐
//!                                │ Updater  │────────────────▶│ RecordRepository │
//!                                │          │◀────────────────│                  │
//!                                │          │  save           │                  │
//!                                │          │────────────────▶│                  │
//!                                └──────────┘                  └──────────────────┘
//! ```
//!
//! 1. Resolve the public address
//! 2. Fetch the record by name
//! 3. Refuse anything that is not an address record
//! 4. Overwrite the record's data with the address
//! 5. Save the record
//!
//! The first failure ends the run and is returned as-is. Nothing is retried;
//! scheduling and retry policy belong to whoever calls the updater.

use crate::credential::ApiToken;
use crate::error::{Error, Result};
use crate::traits::{AddressResolver, RecordRepository};
use std::net::IpAddr;
use tracing::{debug, info};

/// Orchestrates one dynamic DNS update
pub struct Updater {
    resolver: Box<dyn AddressResolver>,
    repository: Box<dyn RecordRepository>,

    /// If true, everything up to the save runs but the save is skipped
    dry_run: bool,
}

impl Updater {
    pub fn new(resolver: Box<dyn AddressResolver>, repository: Box<dyn RecordRepository>) -> Self {
        Self {
            resolver,
            repository,
            dry_run: false,
        }
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Point `record_name` under `domain` at the current public address
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: The address the record now holds
    /// - `Err(Error)`: The first failure, unchanged
    pub async fn update_to_current_address(
        &self,
        domain: &str,
        record_name: &str,
        credential: &ApiToken,
    ) -> Result<IpAddr> {
        let ip = self.resolver.resolve().await?;
        info!(
            "Public address is {} (via {})",
            ip,
            self.resolver.resolver_name()
        );

        let mut record = self
            .repository
            .find_by_name(domain, record_name, credential)
            .await?;
        debug!(
            "Found record {} ({}) in {} with data {}",
            record.id, record.record_type, domain, record.data
        );

        if !record.is_address() {
            return Err(Error::UnsupportedRecordType {
                actual: record.record_type,
            });
        }

        let new_data = ip.to_string();
        if record.data == new_data {
            info!(
                "Record {}.{} already points at {}",
                record_name, domain, new_data
            );
        }
        record.data = new_data;

        if self.dry_run {
            info!(
                "[DRY-RUN] Would save record to {}: {}",
                self.repository.provider_name(),
                serde_json::to_string(&record).unwrap_or_else(|_| format!("{:?}", record))
            );
            return Ok(ip);
        }

        self.repository.save(&record, domain, credential).await?;
        info!(
            "Updated {}.{} -> {} ({})",
            record_name,
            domain,
            ip,
            self.repository.provider_name()
        );

        Ok(ip)
    }
}

impl std::fmt::Debug for Updater {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Updater")
            .field("resolver", &self.resolver.resolver_name())
            .field("repository", &self.repository.provider_name())
            .field("dry_run", &self.dry_run)
            .finish()
    }
}
