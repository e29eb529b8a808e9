// # Address Resolver Trait
//
// Defines the interface for discovering the caller's current public address.
//
// ## Implementations
//
// - HTTP echo service: `homebase-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use homebase_core::AddressResolver;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let resolver = /* AddressResolver implementation */;
//
//     let ip = resolver.resolve().await?;
//     println!("public address: {}", ip);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::net::IpAddr;

/// Trait for public address resolvers
///
/// A resolver performs exactly one lookup per call. It does not cache the
/// result and does not retry; failures go straight back to the caller.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Get the current public IP address
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: The address, IPv4 or IPv6
    /// - `Err(Error)`: Network, status, body or parse failure
    async fn resolve(&self) -> Result<IpAddr, crate::Error>;

    /// Name of the resolver (for logging)
    fn resolver_name(&self) -> &'static str;
}
