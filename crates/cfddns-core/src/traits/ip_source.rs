// # Public IP Source Trait
//
// Defines the interface for discovering the caller's public IPv4 address.
//
// ## Implementations
//
// - HTTP echo service (ipify): `cfddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use cfddns_core::PublicIpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* PublicIpSource implementation */;
//
//     // Raw, trimmed answer from the echo service
//     let ip = source.public_ip().await?;
//     println!("public address: {ip}");
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for public IP source implementations
///
/// A source performs exactly one lookup per call and returns the raw
/// answer as text. It does not validate the address; the engine runs the
/// IPv4 syntax check on whatever comes back.
///
/// # Errors
///
/// Transport failures, non-success HTTP statuses and unreadable bodies are
/// reported as [`crate::Error::Network`].
#[async_trait]
pub trait PublicIpSource: Send + Sync {
    /// Fetch the current public IP address as a trimmed string
    async fn public_ip(&self) -> Result<String, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
