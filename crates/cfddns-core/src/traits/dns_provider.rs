// # DNS Provider Traits
//
// Defines the capabilities the engine needs from a DNS provider, split so
// that each step of the pipeline can be replaced by a test double:
//
// - `ZoneResolver`: domain name → provider zone identifier
// - `RecordLister`: zone identifier → every record in the zone
// - `RecordUpdater`: submit one record update
//
// `DnsProvider` bundles all three together with a provider name.
//
// ## Implementations
//
// - Cloudflare: `cfddns-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use cfddns_core::DnsProvider;
//
// let zone_id = provider.zone_id("example.com").await?;
// let records = provider.list_records(&zone_id).await?;
// ```

use async_trait::async_trait;

use crate::record::{DnsRecord, RecordUpdate};

/// Resolves a human-readable domain to the provider's zone identifier
#[async_trait]
pub trait ZoneResolver: Send + Sync {
    /// Look up the zone identifier for `domain`
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The opaque zone identifier
    /// - `Err(Error::AuthOrLookup)`: Credential rejected or no such zone
    async fn zone_id(&self, domain: &str) -> Result<String, crate::Error>;
}

/// Lists the DNS records of a zone
#[async_trait]
pub trait RecordLister: Send + Sync {
    /// List every record in the zone, in the order the provider returns them
    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>, crate::Error>;
}

/// Submits record updates
#[async_trait]
pub trait RecordUpdater: Send + Sync {
    /// Submit a single update for `update.id` within `zone_id`
    ///
    /// No retries: any failure response is returned as
    /// [`crate::Error::UpdateRejected`] with the provider's messages.
    /// The provider's echo of the updated record is not inspected.
    async fn update_record(
        &self,
        zone_id: &str,
        update: &RecordUpdate,
    ) -> Result<(), crate::Error>;
}

/// A complete DNS provider
pub trait DnsProvider: ZoneResolver + RecordLister + RecordUpdater {
    /// Get the provider name (for logging/debugging)
    ///
    /// A static string identifying the provider (e.g., "cloudflare")
    fn provider_name(&self) -> &'static str;
}
