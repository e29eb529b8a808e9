// # homebase-core
//
// Core library for the homebase dynamic DNS updater.
//
// ## Architecture Overview
//
// One run resolves the current public address and writes it into a single
// address record at the DNS provider:
// - **AddressResolver**: Trait for discovering the public IP address
// - **RecordRepository**: Trait for reading and saving a provider's DNS record
// - **HttpTransport**: Narrow HTTP capability both of the above sit on
// - **Updater**: Runs resolve → find → check type → mutate → save
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Pipeline logic lives here, providers live in their own crates
// 2. **Stateless**: Nothing is cached or persisted between runs
// 3. **Fail Fast**: The first error ends the run and is returned to the caller
// 4. **Library-First**: Process exit and argument parsing belong to the binary

pub mod config;
pub mod credential;
pub mod error;
pub mod http;
pub mod record;
pub mod traits;
pub mod updater;

// Re-export core types for convenience
pub use config::UpdaterConfig;
pub use credential::ApiToken;
pub use error::{Error, Operation, Result};
pub use http::ReqwestTransport;
pub use record::{DomainRecord, RecordList};
pub use traits::{AddressResolver, HttpTransport, RecordRepository};
pub use updater::Updater;
