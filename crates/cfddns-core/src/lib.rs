// # cfddns-core
//
// Core library for the one-shot Cloudflare dynamic DNS updater.
//
// ## Architecture Overview
//
// - **PublicIpSource**: Trait for discovering the caller's public IPv4 address
// - **ZoneResolver / RecordLister / RecordUpdater**: Provider capabilities
// - **DnsProvider**: All provider capabilities behind one object
// - **DdnsEngine**: Runs IP lookup → record lookup → compare → update once
//
// Implementations of the traits live in their own crates
// (`cfddns-ip-http`, `cfddns-provider-cloudflare`) so the engine can be
// driven by test doubles.

pub mod address;
pub mod config;
pub mod engine;
pub mod error;
pub mod record;
pub mod traits;

// Re-export core types for convenience
pub use address::is_ipv4;
pub use config::Config;
pub use engine::{DdnsEngine, NO_CHANGES_MESSAGE, UpdateResult};
pub use error::{Error, Result};
pub use record::{DnsRecord, RecordUpdate, audit_comment, find_record};
pub use traits::{DnsProvider, PublicIpSource, RecordLister, RecordUpdater, ZoneResolver};
