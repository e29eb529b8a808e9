//! Test doubles shared by the pipeline contract tests
//!
//! The doubles count calls and record what they were given so tests can check
//! which steps ran and what was sent to the provider.

#![allow(dead_code)]

use homebase_core::error::{Error, Operation, Result};
use homebase_core::traits::{AddressResolver, RecordRepository};
use homebase_core::{ApiToken, DomainRecord, RecordList};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// How a double should fail when asked to
#[derive(Debug, Clone)]
pub enum Failure {
    Network(&'static str),
    Status(u16, &'static str),
    BodyRead(&'static str),
}

impl Failure {
    fn into_error(self, operation: Operation) -> Error {
        match self {
            Failure::Network(msg) => Error::network(operation, msg),
            Failure::Status(code, body) => Error::http_status(operation, code, body),
            Failure::BodyRead(msg) => Error::body_read(operation, msg),
        }
    }
}

/// Resolver that always reports the same address, or always fails
pub struct StaticResolver {
    outcome: std::result::Result<IpAddr, Failure>,
    calls: Arc<AtomicUsize>,
}

impl StaticResolver {
    pub fn new(ip: IpAddr) -> Self {
        Self {
            outcome: Ok(ip),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            outcome: Err(failure),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared handle to the call counter
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait::async_trait]
impl AddressResolver for StaticResolver {
    async fn resolve(&self) -> Result<IpAddr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome
            .clone()
            .map_err(|f| f.into_error(Operation::ResolveAddress))
    }

    fn resolver_name(&self) -> &'static str {
        "static"
    }
}

/// What the mock repository observed
#[derive(Debug, Default)]
pub struct RepositoryLog {
    pub lookups: Vec<(String, String, String)>,
    pub saves: Vec<(DomainRecord, String, String)>,
}

/// In-memory record repository holding one domain's record list
pub struct MockRecordRepository {
    records: RecordList,
    find_failure: Option<Failure>,
    save_failure: Option<Failure>,
    log: Arc<Mutex<RepositoryLog>>,
}

impl MockRecordRepository {
    pub fn new(records: Vec<DomainRecord>) -> Self {
        Self {
            records: RecordList { records },
            find_failure: None,
            save_failure: None,
            log: Arc::new(Mutex::new(RepositoryLog::default())),
        }
    }

    pub fn failing_find(mut self, failure: Failure) -> Self {
        self.find_failure = Some(failure);
        self
    }

    pub fn failing_save(mut self, failure: Failure) -> Self {
        self.save_failure = Some(failure);
        self
    }

    /// Shared handle to the observation log
    pub fn log(&self) -> Arc<Mutex<RepositoryLog>> {
        Arc::clone(&self.log)
    }
}

#[async_trait::async_trait]
impl RecordRepository for MockRecordRepository {
    async fn find_by_name(
        &self,
        domain: &str,
        name: &str,
        credential: &ApiToken,
    ) -> Result<DomainRecord> {
        self.log.lock().unwrap().lookups.push((
            domain.to_string(),
            name.to_string(),
            credential.expose().to_string(),
        ));

        if let Some(failure) = self.find_failure.clone() {
            return Err(failure.into_error(Operation::FindRecord));
        }

        self.records
            .find(name)
            .cloned()
            .ok_or_else(|| Error::record_not_found(name))
    }

    async fn save(&self, record: &DomainRecord, domain: &str, credential: &ApiToken) -> Result<()> {
        self.log.lock().unwrap().saves.push((
            record.clone(),
            domain.to_string(),
            credential.expose().to_string(),
        ));

        match self.save_failure.clone() {
            Some(failure) => Err(failure.into_error(Operation::SaveRecord)),
            None => Ok(()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().expect("test IP literal")
}

pub fn token() -> ApiToken {
    ApiToken::new("12345")
}
