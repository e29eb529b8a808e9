//! DNS record model shared by the provider crates and the updater

use serde::{Deserialize, Serialize};

/// Record type of an address record (IPv4)
pub const ADDRESS_RECORD_TYPE: &str = "A";

/// One DNS record as the provider stores it
///
/// Instances are built fresh from each listing response and are never cached.
/// The updater only ever writes `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Provider-assigned identifier, needed to address the record on update
    pub id: u64,

    /// Record kind, e.g. "A", "CNAME", "TXT"
    #[serde(rename = "type")]
    pub record_type: String,

    /// Subdomain label, e.g. "www" or "@" for the apex
    pub name: String,

    /// Record value; an IP literal for address records
    pub data: String,
}

impl DomainRecord {
    pub fn new(
        id: u64,
        record_type: impl Into<String>,
        name: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            id,
            record_type: record_type.into(),
            name: name.into(),
            data: data.into(),
        }
    }

    /// Whether this is an address record the updater may rewrite
    pub fn is_address(&self) -> bool {
        self.record_type == ADDRESS_RECORD_TYPE
    }
}

/// Envelope of the provider's record listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordList {
    #[serde(rename = "domain_records")]
    pub records: Vec<DomainRecord>,
}

impl RecordList {
    /// First record whose name matches exactly, in provider order
    pub fn find(&self, name: &str) -> Option<&DomainRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn into_found(self, name: &str) -> Option<DomainRecord> {
        self.records.into_iter().find(|r| r.name == name)
    }
}
