//! Core traits for the updater
//!
//! - [`AddressResolver`]: Discover the current public address
//! - [`RecordRepository`]: Read and write a DNS record at a provider
//! - [`HttpTransport`]: Narrow HTTP capability used by both

pub mod address_resolver;
pub mod record_repository;
pub mod transport;

pub use address_resolver::AddressResolver;
pub use record_repository::RecordRepository;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};
