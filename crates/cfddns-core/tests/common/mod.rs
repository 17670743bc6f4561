//! Test doubles and common utilities for pipeline contract tests
//!
//! The doubles record every call so tests can assert which network steps
//! the engine did (or did not) perform.

#![allow(dead_code)]

use cfddns_core::error::{Error, Result};
use cfddns_core::traits::{DnsProvider, PublicIpSource, RecordLister, RecordUpdater, ZoneResolver};
use cfddns_core::{Config, DnsRecord, RecordUpdate};
use chrono::{NaiveDate, NaiveDateTime};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An IP source that always answers with the same text
pub struct FixedIpSource {
    answer: Result<String>,
    call_count: Arc<AtomicUsize>,
}

impl FixedIpSource {
    pub fn new(ip: &str) -> Self {
        Self {
            answer: Ok(ip.to_string()),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A source whose lookup fails with the given error
    pub fn failing(error: Error) -> Self {
        Self {
            answer: Err(error),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times public_ip() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Create a new FixedIpSource that shares its counter with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            answer: other.answer.clone(),
            call_count: Arc::clone(&other.call_count),
        }
    }
}

#[async_trait::async_trait]
impl PublicIpSource for FixedIpSource {
    async fn public_ip(&self) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }

    fn source_name(&self) -> &'static str {
        "fixed"
    }
}

/// A mock DnsProvider backed by an in-memory zone
///
/// Successful updates are applied to the zone, so a second run sees the
/// record as the first run left it.
pub struct MockDnsProvider {
    zone_name: String,
    zone_id: String,
    records: Arc<Mutex<Vec<DnsRecord>>>,
    reject_updates: Option<String>,
    zone_call_count: Arc<AtomicUsize>,
    list_call_count: Arc<AtomicUsize>,
    submitted: Arc<Mutex<Vec<(String, RecordUpdate)>>>,
}

impl MockDnsProvider {
    pub fn new(zone_name: &str, records: Vec<DnsRecord>) -> Self {
        Self {
            zone_name: zone_name.to_string(),
            zone_id: "zone-1".to_string(),
            records: Arc::new(Mutex::new(records)),
            reject_updates: None,
            zone_call_count: Arc::new(AtomicUsize::new(0)),
            list_call_count: Arc::new(AtomicUsize::new(0)),
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make every update fail with the given provider message
    pub fn rejecting_updates(mut self, message: &str) -> Self {
        self.reject_updates = Some(message.to_string());
        self
    }

    /// Get the number of times zone_id() was called
    pub fn zone_call_count(&self) -> usize {
        self.zone_call_count.load(Ordering::SeqCst)
    }

    /// Get the number of times list_records() was called
    pub fn list_call_count(&self) -> usize {
        self.list_call_count.load(Ordering::SeqCst)
    }

    /// Get the number of times update_record() was called
    pub fn update_call_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    /// Get the submitted updates with the zone they were sent to
    pub fn submitted(&self) -> Vec<(String, RecordUpdate)> {
        self.submitted.lock().unwrap().clone()
    }

    /// Total provider calls of any kind
    pub fn total_call_count(&self) -> usize {
        self.zone_call_count() + self.list_call_count() + self.update_call_count()
    }

    /// Create a new MockDnsProvider that shares state with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            zone_name: other.zone_name.clone(),
            zone_id: other.zone_id.clone(),
            records: Arc::clone(&other.records),
            reject_updates: other.reject_updates.clone(),
            zone_call_count: Arc::clone(&other.zone_call_count),
            list_call_count: Arc::clone(&other.list_call_count),
            submitted: Arc::clone(&other.submitted),
        }
    }
}

#[async_trait::async_trait]
impl ZoneResolver for MockDnsProvider {
    async fn zone_id(&self, domain: &str) -> Result<String> {
        self.zone_call_count.fetch_add(1, Ordering::SeqCst);
        if domain == self.zone_name {
            Ok(self.zone_id.clone())
        } else {
            Err(Error::auth(format!("zone could not be found: {domain}")))
        }
    }
}

#[async_trait::async_trait]
impl RecordLister for MockDnsProvider {
    async fn list_records(&self, _zone_id: &str) -> Result<Vec<DnsRecord>> {
        self.list_call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.lock().unwrap().clone())
    }
}

#[async_trait::async_trait]
impl RecordUpdater for MockDnsProvider {
    async fn update_record(&self, zone_id: &str, update: &RecordUpdate) -> Result<()> {
        self.submitted
            .lock()
            .unwrap()
            .push((zone_id.to_string(), update.clone()));

        if let Some(message) = &self.reject_updates {
            return Err(Error::rejected(message.clone()));
        }

        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == update.id)
            .ok_or_else(|| Error::rejected("81044: Record does not exist."))?;
        record.content = update.content.clone();
        record.proxied = Some(update.proxied);
        record.comment = Some(update.comment.clone());
        Ok(())
    }
}

impl DnsProvider for MockDnsProvider {
    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Build an A record in zone-1
pub fn a_record(id: &str, name: &str, content: &str, comment: Option<&str>) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        zone_id: "zone-1".to_string(),
        name: name.to_string(),
        record_type: "A".to_string(),
        content: content.to_string(),
        ttl: 300,
        priority: None,
        tags: vec!["owner:ops".to_string()],
        proxied: Some(false),
        comment: comment.map(str::to_string),
        data: None,
    }
}

/// Helper to create a config for `home.example.com`
pub fn config(proxy: bool, comment: bool) -> Config {
    Config {
        token: "test-token".to_string(),
        domain: "example.com".to_string(),
        subdomain: "home".to_string(),
        proxy,
        comment,
        dry_run: false,
        ip_url: "https://api.ipify.org".to_string(),
        log_level: "warn".to_string(),
    }
}

/// Fixed clock for audit comments: 2024-01-02T03:04
pub fn fixed_clock() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 2)
        .and_then(|d| d.and_hms_opt(3, 4, 5))
        .expect("valid date")
}
