//! DNS record model
//!
//! [`DnsRecord`] is the provider's view of a record, deserialized as-is.
//! [`RecordUpdate`] is the payload sent back: a copy of the record with the
//! content, proxied flag and comment replaced.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Prefix of every audit comment written by cfddns
pub const AUDIT_PREFIX: &str = "cfddns";

/// Timestamp layout embedded in audit comments (`YYYY-MM-DDTHH:MM`)
pub const AUDIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A single provider-side DNS record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// The record ID (provider-specific)
    pub id: String,

    /// Zone the record belongs to; newer API responses leave this out
    #[serde(default)]
    pub zone_id: String,

    /// Fully qualified record name (e.g., "home.example.com")
    pub name: String,

    /// Record type ("A", "AAAA", "CNAME", ...)
    #[serde(rename = "type")]
    pub record_type: String,

    /// Record value; an IPv4 literal for A records
    pub content: String,

    /// Time-to-live in seconds (1 means automatic)
    #[serde(default)]
    pub ttl: u32,

    /// Priority, for MX/SRV/URI records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,

    /// Free-form tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    /// Whether traffic is routed through the provider's edge
    #[serde(default)]
    pub proxied: Option<bool>,

    /// Free-form comment
    #[serde(default)]
    pub comment: Option<String>,

    /// Structured data for record types that carry it (SRV, CAA, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Update payload for a single record
///
/// Field names and omission rules follow the Cloudflare v4 record schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordUpdate {
    /// ID of the record being updated; part of the URL, not the body
    #[serde(skip)]
    pub id: String,

    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub record_type: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,

    #[serde(skip_serializing_if = "is_zero")]
    pub ttl: u32,

    pub proxied: bool,

    pub comment: String,

    pub tags: Vec<String>,
}

impl RecordUpdate {
    /// Build an update from an existing record
    ///
    /// Every field is copied from `record` except `content`, `proxied` and
    /// `comment`, which are taken from the arguments.
    pub fn from_record(
        record: &DnsRecord,
        content: impl Into<String>,
        proxied: bool,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id: record.id.clone(),
            record_type: record.record_type.clone(),
            name: record.name.clone(),
            content: content.into(),
            data: record.data.clone(),
            priority: record.priority,
            ttl: record.ttl,
            proxied,
            comment: comment.into(),
            tags: record.tags.clone(),
        }
    }
}

/// Find the first record whose name is exactly `name`
///
/// Matching is byte-exact and case-sensitive; with duplicates, the first in
/// provider order wins.
pub fn find_record<'a>(records: &'a [DnsRecord], name: &str) -> Option<&'a DnsRecord> {
    records.iter().find(|record| record.name == name)
}

/// Build the audit comment `cfddns:<old>-><new>@<YYYY-MM-DDTHH:MM>`
pub fn audit_comment(old: &str, new: &str, at: NaiveDateTime) -> String {
    format!(
        "{AUDIT_PREFIX}:{old}->{new}@{}",
        at.format(AUDIT_TIMESTAMP_FORMAT)
    )
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
