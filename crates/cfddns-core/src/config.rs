//! Configuration for cfddns
//!
//! All configuration comes from environment variables under the `CLOUDFLARE_` prefix:
//!
//! - `CLOUDFLARE_TOKEN`: Cloudflare API token (required)
//! - `CLOUDFLARE_DOMAIN`: zone name, e.g. `example.com` (required)
//! - `CLOUDFLARE_SUBDOMAIN`: record label, e.g. `home` (required)
//! - `CLOUDFLARE_PROXY`: route traffic through Cloudflare's edge (default: false)
//! - `CLOUDFLARE_COMMENT`: write an audit comment on update (default: false)
//! - `CLOUDFLARE_DRY_RUN`: read everything, submit nothing (default: false)
//! - `CLOUDFLARE_IP_URL`: IP echo endpoint (default: `https://api.ipify.org`)
//! - `CLOUDFLARE_LOG_LEVEL`: trace, debug, info, warn or error (default: warn)

use crate::error::{Error, Result};

/// Prefix shared by every environment variable
pub const ENV_PREFIX: &str = "CLOUDFLARE";

/// Default IP echo endpoint
pub const DEFAULT_IP_URL: &str = "https://api.ipify.org";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Runtime configuration, built once at startup
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    pub token: String,

    /// Zone name (e.g., "example.com")
    pub domain: String,

    /// Record label inside the zone (e.g., "home")
    pub subdomain: String,

    /// Proxied flag written on every update
    pub proxy: bool,

    /// Overwrite the record comment with an audit string on update
    pub comment: bool,

    /// Perform reads only; never submit the update
    pub dry_run: bool,

    /// URL of the IP echo service
    pub ip_url: String,

    /// Log level for the binary's subscriber
    pub log_level: String,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<REDACTED>")
            .field("domain", &self.domain)
            .field("subdomain", &self.subdomain)
            .field("proxy", &self.proxy)
            .field("comment", &self.comment)
            .field("dry_run", &self.dry_run)
            .field("ip_url", &self.ip_url)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// `lookup` receives fully prefixed names such as `CLOUDFLARE_TOKEN`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            let key = env_key(name);
            let value = lookup(&key);
            (key, value)
        };

        let required = |name: &str| -> Result<String> {
            match get(name) {
                (_, Some(value)) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                (key, _) => Err(Error::missing(key)),
            }
        };

        let flag = |name: &str| -> Result<bool> {
            match get(name) {
                (_, None) => Ok(false),
                (key, Some(value)) => parse_bool(&key, &value),
            }
        };

        let config = Self {
            token: required("TOKEN")?,
            domain: required("DOMAIN")?,
            subdomain: required("SUBDOMAIN")?,
            proxy: flag("PROXY")?,
            comment: flag("COMMENT")?,
            dry_run: flag("DRY_RUN")?,
            ip_url: get("IP_URL")
                .1
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_IP_URL.to_string()),
            log_level: get("LOG_LEVEL")
                .1
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim().to_lowercase())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validate_segment(&env_key("DOMAIN"), &self.domain)?;
        validate_segment(&env_key("SUBDOMAIN"), &self.subdomain)?;

        if !self.ip_url.starts_with("https://") && !self.ip_url.starts_with("http://") {
            return Err(Error::config(format!(
                "{} must use HTTP or HTTPS scheme. Got: {}",
                env_key("IP_URL"),
                self.ip_url
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(Error::config(format!(
                "{} '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                env_key("LOG_LEVEL"),
                other
            ))),
        }
    }

    /// Full name of the record to update: `subdomain.domain`
    pub fn record_name(&self) -> String {
        format!("{}.{}", self.subdomain, self.domain)
    }
}

/// Build a prefixed environment variable name
pub fn env_key(name: &str) -> String {
    format!("{ENV_PREFIX}_{name}")
}

/// Parse a boolean using the same spellings as Go's `strconv.ParseBool`
fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim() {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(Error::config(format!(
            "{key} must be a boolean (true/false/1/0). Got: '{other}'"
        ))),
    }
}

fn validate_segment(key: &str, value: &str) -> Result<()> {
    if value.chars().any(char::is_whitespace) {
        return Err(Error::config(format!("{key} may not contain whitespace")));
    }
    if value.starts_with('.') || value.ends_with('.') {
        return Err(Error::config(format!(
            "{key} may not start or end with '.'. Got: '{value}'"
        )));
    }
    Ok(())
}
