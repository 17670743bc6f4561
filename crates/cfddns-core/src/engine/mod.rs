//! One-shot update engine
//!
//! The DdnsEngine runs the whole update as a single pass:
//!
//! ```text
//! ┌────────────────┐   ip    ┌──────────────┐  zone, records  ┌─────────────┐
//! │ PublicIpSource │───────▶│  DdnsEngine  │◀────────────────│ DnsProvider │
//! └────────────────┘         └──────────────┘                 └─────────────┘
//!                                   │                                ▲
//!                                   └──────── update (if changed) ───┘
//! ```
//!
//! ## Flow
//!
//! 1. Fetch the public IP and run the IPv4 syntax check
//! 2. Resolve the zone, list its records, select `subdomain.domain`
//! 3. If the record already holds the IP, stop with [`UpdateResult::Unchanged`]
//! 4. Otherwise build a [`RecordUpdate`] and submit it once
//!
//! Step 1 must succeed before any provider call is made. Nothing is retried.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};

use crate::address::is_ipv4;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::{DnsRecord, RecordUpdate, audit_comment, find_record};
use crate::traits::{DnsProvider, PublicIpSource};

/// Message reported when the record already points at the public IP
pub const NO_CHANGES_MESSAGE: &str = "No changes detected";

/// Outcome of a single engine run
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateResult {
    /// Record already had the correct IP (no-op)
    Unchanged {
        /// Full record name
        record_name: String,
        /// The current IP address
        current_ip: String,
    },

    /// Record was successfully updated
    Updated {
        /// Full record name
        record_name: String,
        /// The previous record content
        previous_ip: String,
        /// The new IP address
        new_ip: String,
        /// Comment written with the update
        comment: String,
    },

    /// Record would have been updated, but dry-run mode is on
    DryRun {
        /// Full record name
        record_name: String,
        /// The current record content
        previous_ip: String,
        /// The IP that would have been written
        new_ip: String,
        /// The payload that would have been submitted
        update: RecordUpdate,
    },
}

impl UpdateResult {
    /// Line printed on success
    ///
    /// `No changes detected` for a no-op, otherwise the comment that was
    /// written (the audit string, or the record's preserved comment).
    pub fn message(&self) -> String {
        match self {
            Self::Unchanged { .. } => NO_CHANGES_MESSAGE.to_string(),
            Self::Updated { comment, .. } => comment.clone(),
            Self::DryRun {
                record_name,
                previous_ip,
                new_ip,
                ..
            } => format!("Dry run: would update {record_name} from {previous_ip} to {new_ip}"),
        }
    }
}

/// Core cfddns engine
///
/// Holds the two collaborators and the configuration for one run.
/// [`DdnsEngine::run_once`] returns a typed result and never exits the
/// process; the binary owns printing and exit codes.
pub struct DdnsEngine {
    /// Source of the public IP
    ip_source: Box<dyn PublicIpSource>,

    /// DNS provider for zone lookup, listing and updates
    provider: Box<dyn DnsProvider>,

    /// Run configuration
    config: Config,

    /// Local wall clock, used for audit comment timestamps
    clock: fn() -> NaiveDateTime,
}

impl DdnsEngine {
    /// Create a new engine
    pub fn new(
        ip_source: Box<dyn PublicIpSource>,
        provider: Box<dyn DnsProvider>,
        config: Config,
    ) -> Self {
        Self {
            ip_source,
            provider,
            config,
            clock: local_now,
        }
    }

    /// Replace the clock used for audit comment timestamps
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Run the full pipeline once
    ///
    /// # Returns
    ///
    /// - `Ok(UpdateResult)`: Unchanged, Updated or DryRun
    /// - `Err(Error)`: The first failure; later steps are not attempted
    pub async fn run_once(&self) -> Result<UpdateResult> {
        let record_name = self.config.record_name();
        info!(
            "Checking {} (source: {}, provider: {}) [mode: {}]",
            record_name,
            self.ip_source.source_name(),
            self.provider.provider_name(),
            if self.config.dry_run { "DRY-RUN" } else { "LIVE" }
        );

        let public_ip = self.resolve_public_ip().await?;
        let (zone_id, record) = self.locate_record(&record_name).await?;

        if record.content == public_ip {
            info!("DNS record already has correct IP: {} -> {}", record_name, public_ip);
            return Ok(UpdateResult::Unchanged {
                record_name,
                current_ip: public_ip,
            });
        }

        let update = self.build_update(&record, &public_ip);
        let zone_id = if record.zone_id.is_empty() {
            zone_id
        } else {
            record.zone_id.clone()
        };

        if self.config.dry_run {
            info!(
                "[DRY-RUN] Would update {} -> {} (was: {}) with payload: {}",
                record_name,
                public_ip,
                record.content,
                serde_json::to_string(&update).unwrap_or_default()
            );
            return Ok(UpdateResult::DryRun {
                record_name,
                previous_ip: record.content,
                new_ip: public_ip,
                update,
            });
        }

        info!("Updating DNS record: {} -> {} (was: {})", record_name, public_ip, record.content);
        self.provider.update_record(&zone_id, &update).await?;
        info!("DNS record updated successfully: {} -> {}", record_name, public_ip);

        Ok(UpdateResult::Updated {
            record_name,
            previous_ip: record.content,
            new_ip: public_ip,
            comment: update.comment,
        })
    }

    /// Fetch the public IP and reject anything that is not an IPv4 literal
    async fn resolve_public_ip(&self) -> Result<String> {
        let ip = self.ip_source.public_ip().await?;
        if !is_ipv4(&ip) {
            return Err(Error::invalid_address(ip));
        }
        debug!("Public IP: {}", ip);
        Ok(ip)
    }

    /// Resolve the zone and select the target record
    ///
    /// Returns the resolved zone ID together with a copy of the record.
    async fn locate_record(&self, record_name: &str) -> Result<(String, DnsRecord)> {
        let zone_id = self.provider.zone_id(&self.config.domain).await?;
        debug!("Found zone ID: {}", zone_id);

        let records = self.provider.list_records(&zone_id).await?;
        debug!("Zone {} has {} record(s)", zone_id, records.len());

        let record = find_record(&records, record_name)
            .cloned()
            .ok_or_else(|| Error::not_found(format!("subdomain not found: {record_name}")))?;
        debug!("Found record ID: {} with content {}", record.id, record.content);

        Ok((zone_id, record))
    }

    /// Build the update payload for a changed record
    ///
    /// The proxied flag always comes from configuration. The comment is the
    /// audit string when comment tracking is on, otherwise the record's own.
    fn build_update(&self, record: &DnsRecord, public_ip: &str) -> RecordUpdate {
        let comment = if self.config.comment {
            audit_comment(&record.content, public_ip, (self.clock)())
        } else {
            record.comment.clone().unwrap_or_default()
        };

        RecordUpdate::from_record(record, public_ip, self.config.proxy, comment)
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}
