//! Error types for the homebase updater
//!
//! Every failure in the update pipeline is surfaced as a variant of [`Error`].
//! Variants produced by a remote call carry the [`Operation`] that failed so a
//! caller can tell which step broke without re-running.

use std::fmt;
use thiserror::Error;

/// Result type alias for homebase operations
pub type Result<T> = std::result::Result<T, Error>;

/// The pipeline step an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Asking the echo service for the public address
    ResolveAddress,
    /// Listing the domain's records to find one by name
    FindRecord,
    /// Refusing records that are not address records
    CheckRecordType,
    /// Writing the updated record back to the provider
    SaveRecord,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            Operation::ResolveAddress => "requesting IP",
            Operation::FindRecord => "requesting records",
            Operation::CheckRecordType => "checking record type",
            Operation::SaveRecord => "saving record",
        };
        f.write_str(step)
    }
}

/// Core error type for the updater
#[derive(Error, Debug)]
pub enum Error {
    /// The remote host could not be reached or the request could not be sent
    #[error("Network error {operation}: {message}")]
    Network {
        operation: Operation,
        message: String,
    },

    /// The remote host answered with a non-success status
    #[error("Bad response {operation}: {code}: {body}")]
    HttpStatus {
        operation: Operation,
        /// HTTP status code
        code: u16,
        /// Raw response body, verbatim
        body: String,
    },

    /// The response body could not be drained
    #[error("Error reading body {operation}: {message}")]
    BodyRead {
        operation: Operation,
        message: String,
    },

    /// The response payload was not the expected JSON shape
    #[error("Error in json {operation}: {source}")]
    Decode {
        operation: Operation,
        source: serde_json::Error,
    },

    /// The request payload could not be serialized
    #[error("JSON error {operation}: {source}")]
    Encode {
        operation: Operation,
        source: serde_json::Error,
    },

    /// The echo service returned something that is not an IP address
    #[error("Invalid IP: {0}")]
    InvalidAddress(String),

    /// No record with the requested name exists under the domain
    #[error("Record not found: {name}")]
    RecordNotFound { name: String },

    /// The matched record is not an address record
    #[error("Record type must be A, was: {actual}")]
    UnsupportedRecordType { actual: String },

    /// Caller-side configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a network error
    pub fn network(operation: Operation, msg: impl Into<String>) -> Self {
        Self::Network {
            operation,
            message: msg.into(),
        }
    }

    /// Create a body read error
    pub fn body_read(operation: Operation, msg: impl Into<String>) -> Self {
        Self::BodyRead {
            operation,
            message: msg.into(),
        }
    }

    /// Create a bad status error
    pub fn http_status(operation: Operation, code: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            operation,
            code,
            body: body.into(),
        }
    }

    /// Create a "record not found" error
    pub fn record_not_found(name: impl Into<String>) -> Self {
        Self::RecordNotFound { name: name.into() }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this is the "no such record" condition
    pub fn is_record_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }

    /// The pipeline step this error came from
    ///
    /// Only configuration errors, raised before any step runs, have none.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Network { operation, .. }
            | Self::HttpStatus { operation, .. }
            | Self::BodyRead { operation, .. }
            | Self::Decode { operation, .. }
            | Self::Encode { operation, .. } => Some(*operation),
            Self::InvalidAddress(_) => Some(Operation::ResolveAddress),
            Self::RecordNotFound { .. } => Some(Operation::FindRecord),
            Self::UnsupportedRecordType { .. } => Some(Operation::CheckRecordType),
            Self::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_failing_step() {
        let err = Error::http_status(Operation::FindRecord, 404, "Not Found");
        assert_eq!(
            err.to_string(),
            "Bad response requesting records: 404: Not Found"
        );

        let err = Error::body_read(Operation::SaveRecord, "timeout");
        assert_eq!(err.to_string(), "Error reading body saving record: timeout");

        let err = Error::network(Operation::ResolveAddress, "I HATE THE INTERNET");
        assert_eq!(
            err.to_string(),
            "Network error requesting IP: I HATE THE INTERNET"
        );
    }

    #[test]
    fn test_record_not_found_is_distinguishable() {
        assert!(Error::record_not_found("sub").is_record_not_found());
        assert!(!Error::network(Operation::FindRecord, "Not found").is_record_not_found());
        assert!(!Error::http_status(Operation::FindRecord, 404, "Not Found").is_record_not_found());
    }

    #[test]
    fn test_operation_tag() {
        assert_eq!(
            Error::InvalidAddress("x".into()).operation(),
            Some(Operation::ResolveAddress)
        );
        assert_eq!(
            Error::record_not_found("x").operation(),
            Some(Operation::FindRecord)
        );
        assert_eq!(
            Error::UnsupportedRecordType {
                actual: "CNAME".into()
            }
            .operation(),
            Some(Operation::CheckRecordType)
        );
        assert_eq!(Error::config("domain is required").operation(), None);
        assert_eq!(Operation::CheckRecordType.to_string(), "checking record type");
    }
}
