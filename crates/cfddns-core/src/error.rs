//! Error types for cfddns
//!
//! Every error is terminal: the binary prints it and exits non-zero.

use thiserror::Error;

/// Result type alias for cfddns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for cfddns
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required environment variable is absent or empty
    #[error("required configuration {0} is not set")]
    MissingConfiguration(String),

    /// An environment variable is present but cannot be used
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Transport failure talking to the IP echo service or the provider
    #[error("network error: {0}")]
    Network(String),

    /// The public IP returned by the echo service is not an IPv4 literal
    #[error("invalid IPv4 address: {0:?}")]
    InvalidAddress(String),

    /// Credential rejected, or the domain does not resolve to a zone
    #[error("authentication or zone lookup failed: {0}")]
    AuthOrLookup(String),

    /// No DNS record matches the target name
    #[error("record not found: {0}")]
    NotFound(String),

    /// The provider refused the update submission
    #[error("update rejected: {0}")]
    UpdateRejected(String),

    /// Provider-specific error (malformed responses, listing failures)
    #[error("provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create a missing configuration error for the given variable
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingConfiguration(key.into())
    }

    /// Create an invalid configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an invalid address error
    pub fn invalid_address(addr: impl Into<String>) -> Self {
        Self::InvalidAddress(addr.into())
    }

    /// Create an authentication or zone lookup error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::AuthOrLookup(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an update rejected error
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::UpdateRejected(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Whether this error was raised before any network traffic
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::MissingConfiguration(_) | Self::InvalidConfiguration(_)
        )
    }
}
