//! Configuration types for the updater
//!
//! The core never reads the environment itself; callers build an
//! [`UpdaterConfig`] (the binary does it from flags and environment variables)
//! and validate it before constructing components.

use crate::credential::ApiToken;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default address echo service
pub const DEFAULT_ADDRESS_ECHO_URL: &str = "http://checkip.amazonaws.com";

/// Default DigitalOcean API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.digitalocean.com";

/// Record name DigitalOcean uses for the zone apex
pub const APEX_RECORD_NAME: &str = "@";

/// Leftmost label of a wildcard record
pub const WILDCARD_LABEL: &str = "*";

/// Everything one update run needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Domain hosted at the provider (e.g., "example.com")
    pub domain: String,

    /// Subdomain record to update (e.g., "home")
    pub record_name: String,

    /// Provider API token
    pub api_token: ApiToken,

    /// URL of the address echo service
    #[serde(default = "default_address_echo_url")]
    pub address_echo_url: String,

    /// Base URL of the provider API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds; `None` keeps the transport default
    #[serde(default)]
    pub http_timeout_secs: Option<u64>,

    /// Look everything up but skip the final save
    #[serde(default)]
    pub dry_run: bool,
}

impl UpdaterConfig {
    /// Create a configuration with default endpoints
    pub fn new(
        domain: impl Into<String>,
        record_name: impl Into<String>,
        api_token: impl Into<ApiToken>,
    ) -> Self {
        Self {
            domain: domain.into(),
            record_name: record_name.into(),
            api_token: api_token.into(),
            address_echo_url: default_address_echo_url(),
            api_base_url: default_api_base_url(),
            http_timeout_secs: None,
            dry_run: false,
        }
    }

    pub fn with_address_echo_url(mut self, url: impl Into<String>) -> Self {
        self.address_echo_url = url.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_http_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.http_timeout_secs = secs;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Transport timeout, if one was configured
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http_timeout_secs.map(Duration::from_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.domain.is_empty() {
            return Err(crate::Error::config("domain is required"));
        }
        if self.record_name.is_empty() {
            return Err(crate::Error::config("record name is required"));
        }
        if self.api_token.is_empty() {
            return Err(crate::Error::config("API token is required"));
        }

        validate_domain_name(&self.domain)?;
        validate_record_name(&self.record_name)?;

        validate_url("address echo URL", &self.address_echo_url)?;
        validate_url("API base URL", &self.api_base_url)?;

        if self.http_timeout_secs == Some(0) {
            return Err(crate::Error::config("HTTP timeout must be > 0"));
        }

        Ok(())
    }
}

fn default_address_echo_url() -> String {
    DEFAULT_ADDRESS_ECHO_URL.to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn validate_url(what: &str, url: &str) -> Result<(), crate::Error> {
    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(crate::Error::config(format!(
            "{} must use HTTP or HTTPS scheme. Got: {}",
            what, url
        )));
    }
    Ok(())
}

/// Record names are relative to the domain: `@` for the apex, and a leading
/// `*` label for wildcard records
fn validate_record_name(name: &str) -> Result<(), crate::Error> {
    if name == APEX_RECORD_NAME || name == WILDCARD_LABEL {
        return Ok(());
    }
    match name.strip_prefix("*.") {
        Some(rest) => validate_domain_name(rest),
        None => validate_domain_name(name),
    }
}

/// Basic RFC 1035 domain name check
///
/// Not exhaustive, but catches the usual typos before any request is made.
fn validate_domain_name(domain: &str) -> Result<(), crate::Error> {
    if domain.len() > 253 {
        return Err(crate::Error::config(format!(
            "Domain name too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        )));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(crate::Error::config(format!(
                "Domain name has empty label: '{}'",
                domain
            )));
        }

        if label.len() > 63 {
            return Err(crate::Error::config(format!(
                "Domain label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            )));
        }

        // Underscores show up in service labels such as "_dmarc"
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(crate::Error::config(format!(
                "Domain label contains invalid characters. Label: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(crate::Error::config(format!(
                "Domain label cannot start or end with hyphen. Label: '{}'",
                label
            )));
        }
    }

    Ok(())
}
