//! Infoblox client errors

use thiserror::Error;

/// Errors that can occur when talking to the Infoblox WAPI
#[derive(Debug, Error)]
pub enum IbError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// WAPI returned an error
    #[error("WAPI error: {0}")]
    Api(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (bad credentials, locked account, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No object matched a reference or a search
    #[error("{kind} not found: {criteria}")]
    NotFound {
        /// Resource kind that was looked up
        kind: String,
        /// Reference or search criteria used for the lookup
        criteria: String,
    },

    /// Local validation rejected the request before it reached the connector
    #[error("Invalid value for '{field}': {constraint}")]
    Validation {
        /// Offending field
        field: String,
        /// Constraint that was violated
        constraint: String,
    },

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl IbError {
    /// Build a validation error for `field`
    pub fn validation(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    /// Build a not-found error for `kind`
    pub fn not_found(kind: impl Into<String>, criteria: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            criteria: criteria.into(),
        }
    }

    /// Whether this error means "no such object" rather than a transport or server failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
