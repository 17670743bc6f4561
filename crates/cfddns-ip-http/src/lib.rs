// # HTTP IP Source
//
// Discovers the caller's public IPv4 address with one GET request to a
// plain-text echo service (ipify by default).
//
// The response body is returned trimmed and unvalidated; the engine applies
// the IPv4 syntax check. The response is consumed inside `public_ip`, so the
// connection goes back to the pool (or is closed) on every return path.

use cfddns_core::config::DEFAULT_IP_URL;
use cfddns_core::traits::PublicIpSource;
use cfddns_core::{Error, Result};

use std::time::Duration;

/// Default HTTP timeout for the echo request
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP echo-service IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// URL to fetch the IP from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `url`: URL to fetch IP from (e.g., "https://api.ipify.org")
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Create a source for the default echo service
    pub fn ipify() -> Result<Self> {
        Self::new(DEFAULT_IP_URL)
    }

    /// URL this source queries
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl PublicIpSource for HttpIpSource {
    async fn public_ip(&self) -> Result<String> {
        tracing::debug!("Fetching public IP from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::network(format!(
                "IP echo service returned HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response: {}", e)))?;

        Ok(normalize_body(&body))
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}

/// Strip surrounding whitespace (ipify sends none, other services add a newline)
fn normalize_body(body: &str) -> String {
    body.trim().to_string()
}
