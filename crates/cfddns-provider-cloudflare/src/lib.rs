// # Cloudflare DNS Provider
//
// This crate provides the Cloudflare implementation of the cfddns provider
// capabilities:
//
// - Zone lookup by name
// - Record listing (all pages, provider order preserved)
// - Single record update
//
// One request per step, no retries, no caching between calls.
//
// ## Security Requirements
//
// - API token NEVER appears in logs or `Debug` output
// - Provider fails fast if the token is empty
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones?name=...`
// - List DNS Records: GET `/zones/:zone_id/dns_records?page=...&per_page=...`
// - Update DNS Record: PATCH `/zones/:zone_id/dns_records/:record_id`

pub mod models;

use async_trait::async_trait;
use cfddns_core::traits::{DnsProvider, RecordLister, RecordUpdater, ZoneResolver};
use cfddns_core::{DnsRecord, Error, RecordUpdate, Result};
use reqwest::StatusCode;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::time::Duration;

use models::{ApiResponse, Zone, describe_errors};

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Records requested per page when listing a zone
const RECORDS_PER_PAGE: u32 = 100;

const PROVIDER_NAME: &str = "cloudflare";

/// Which API step a response belongs to; decides how failures are classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    ZoneLookup,
    ListRecords,
    Update,
}

/// Cloudflare DNS provider
///
/// Stateless: every call goes to the API.
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
pub struct CloudflareProvider {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: String,

    /// API base URL
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider
    ///
    /// # Parameters
    ///
    /// - `api_token`: Cloudflare API token with Zone:Read and DNS:Edit permissions
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_token, CLOUDFLARE_API_BASE)
    }

    /// Create a provider that talks to a different API root
    pub fn with_base_url(api_token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.trim().is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_token,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Send an authenticated request and unwrap the v4 envelope
    ///
    /// Bodies are attached by the caller with `.json(..)`, which also sets
    /// `Content-Type`.
    ///
    /// The response body is read to the end before returning, so the
    /// connection is released whichever way this function exits.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        step: Step,
    ) -> Result<ApiResponse<T>> {
        let response = request
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| Error::network(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response: {}", e)))?;

        let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(Error::provider(
                    PROVIDER_NAME,
                    format!("Failed to parse response: {}", e),
                ));
            }
            Err(_) => return Err(classify(step, status, body.trim())),
        };

        if !status.is_success() || !envelope.success {
            let detail = if envelope.errors.is_empty() {
                body.trim().to_string()
            } else {
                describe_errors(&envelope.errors)
            };
            return Err(classify(step, status, &detail));
        }

        Ok(envelope)
    }

    fn records_url(&self, zone_id: &str) -> String {
        format!("{}/zones/{}/dns_records", self.base_url, zone_id)
    }
}

/// Map a failed API response to the error taxonomy
fn classify(step: Step, status: StatusCode, detail: &str) -> Error {
    let auth_failure = matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN);

    match step {
        Step::ZoneLookup if auth_failure => Error::auth(format!(
            "Authentication failed: Invalid API token or insufficient permissions. Status: {} - {}",
            status, detail
        )),
        Step::ZoneLookup => Error::auth(format!("Zone lookup failed: {} - {}", status, detail)),
        Step::ListRecords if auth_failure => Error::auth(format!(
            "Authentication failed: Invalid API token or insufficient permissions. Status: {} - {}",
            status, detail
        )),
        Step::ListRecords if status == StatusCode::TOO_MANY_REQUESTS => Error::provider(
            PROVIDER_NAME,
            format!("Rate limit exceeded. Status: {} - {}", status, detail),
        ),
        Step::ListRecords => Error::provider(
            PROVIDER_NAME,
            format!("Record listing failed: {} - {}", status, detail),
        ),
        Step::Update => Error::rejected(detail.to_string()),
    }
}

#[async_trait]
impl ZoneResolver for CloudflareProvider {
    /// Look up the zone ID for `domain`
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones?name=example.com
    /// Authorization: Bearer <token>
    /// ```
    async fn zone_id(&self, domain: &str) -> Result<String> {
        tracing::debug!("Looking up zone ID for domain: {}", domain);

        let url = format!("{}/zones", self.base_url);
        let request = self.client.get(&url).query(&[("name", domain)]);
        let envelope: ApiResponse<Vec<Zone>> = self.send(request, Step::ZoneLookup).await?;

        let zone = envelope
            .result
            .unwrap_or_default()
            .into_iter()
            .find(|zone| zone.name == domain)
            .ok_or_else(|| Error::auth(format!("zone could not be found: {}", domain)))?;

        tracing::debug!("Found zone ID: {}", zone.id);
        Ok(zone.id)
    }
}

#[async_trait]
impl RecordLister for CloudflareProvider {
    /// List every DNS record in the zone, following pagination
    ///
    /// # API Call
    ///
    /// ```http
    /// GET /zones/:zone_id/dns_records?page=1&per_page=100
    /// Authorization: Bearer <token>
    /// ```
    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        let url = self.records_url(zone_id);
        let per_page = RECORDS_PER_PAGE.to_string();
        let mut records = Vec::new();
        let mut page: u32 = 1;

        loop {
            tracing::debug!("Listing records of zone {} (page {})", zone_id, page);

            let page_param = page.to_string();
            let request = self
                .client
                .get(&url)
                .query(&[("page", page_param.as_str()), ("per_page", per_page.as_str())]);
            let envelope: ApiResponse<Vec<DnsRecord>> =
                self.send(request, Step::ListRecords).await?;

            let batch = envelope.result.unwrap_or_default();
            let batch_len = batch.len();
            records.extend(batch);

            match envelope.result_info {
                Some(info) if batch_len > 0 && info.has_more(page) => page += 1,
                _ => break,
            }
        }

        tracing::debug!("Listed {} record(s) in zone {}", records.len(), zone_id);
        Ok(records)
    }
}

#[async_trait]
impl RecordUpdater for CloudflareProvider {
    /// Submit a record update
    ///
    /// # API Call
    ///
    /// ```http
    /// PATCH /zones/:zone_id/dns_records/:record_id
    /// {
    ///   "type": "A",
    ///   "name": "home.example.com",
    ///   "content": "203.0.113.5",
    ///   "ttl": 1,
    ///   "proxied": true,
    ///   "comment": "cfddns:203.0.113.1->203.0.113.5@2024-01-02T03:04",
    ///   "tags": []
    /// }
    /// ```
    async fn update_record(&self, zone_id: &str, update: &RecordUpdate) -> Result<()> {
        let url = format!("{}/{}", self.records_url(zone_id), update.id);
        tracing::debug!("Updating record {} in zone {}", update.id, zone_id);

        // The echoed record is not needed; a successful envelope is enough
        let request = self.client.patch(&url).json(update);
        let _: ApiResponse<IgnoredAny> = self.send(request, Step::Update).await?;

        Ok(())
    }
}

impl DnsProvider for CloudflareProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
