//! Core traits for cfddns
//!
//! This module defines the abstract interfaces the engine runs against.
//!
//! - [`PublicIpSource`]: Discover the caller's public IPv4 address
//! - [`ZoneResolver`], [`RecordLister`], [`RecordUpdater`]: DNS provider capabilities
//! - [`DnsProvider`]: All provider capabilities together

pub mod ip_source;
pub mod dns_provider;

pub use ip_source::PublicIpSource;
pub use dns_provider::{DnsProvider, RecordLister, RecordUpdater, ZoneResolver};
