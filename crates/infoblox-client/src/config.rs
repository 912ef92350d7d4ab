//! Client configuration
//!
//! [`HostConfig`] describes how to reach the grid; [`ManagerConfig`] carries
//! the attributes the object manager stamps on everything it creates.

use crate::error::IbError;
use crate::models::Ea;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

fn default_port() -> u16 {
    443
}

fn default_version() -> String {
    "2.12".to_string()
}

fn default_ssl_verify() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

/// Connection settings for a grid master
#[derive(Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Grid master host name or address
    pub host: String,

    /// HTTPS port
    #[serde(default = "default_port")]
    pub port: u16,

    /// WAPI version, e.g. "2.12"
    #[serde(default = "default_version")]
    pub version: String,

    /// User name for basic authentication
    pub username: String,

    /// Password for basic authentication
    pub password: String,

    /// Verify the grid's TLS certificate
    #[serde(default = "default_ssl_verify")]
    pub ssl_verify: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl fmt::Debug for HostConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("version", &self.version)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("ssl_verify", &self.ssl_verify)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl HostConfig {
    /// Settings with defaults for everything but the host and credentials
    pub fn new(host: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            version: default_version(),
            username: username.into(),
            password: password.into(),
            ssl_verify: default_ssl_verify(),
            timeout_secs: default_timeout(),
        }
    }

    /// Load from `INFOBLOX_*` environment variables.
    ///
    /// `INFOBLOX_HOST`, `INFOBLOX_USERNAME` and `INFOBLOX_PASSWORD` are
    /// required; `INFOBLOX_PORT`, `INFOBLOX_WAPI_VERSION`,
    /// `INFOBLOX_SSL_VERIFY` and `INFOBLOX_TIMEOUT_SECS` fall back to defaults.
    pub fn from_env() -> Result<Self, IbError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, IbError> {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| {
                IbError::InvalidConfig(format!("{key} environment variable is required"))
            })
        };

        let mut config = Self::new(
            required("INFOBLOX_HOST")?,
            required("INFOBLOX_USERNAME")?,
            required("INFOBLOX_PASSWORD")?,
        );

        if let Some(port) = lookup("INFOBLOX_PORT") {
            config.port = port
                .parse()
                .map_err(|e| IbError::InvalidConfig(format!("INFOBLOX_PORT is not a port: {port} ({e})")))?;
        }
        if let Some(version) = lookup("INFOBLOX_WAPI_VERSION") {
            config.version = version;
        }
        if let Some(verify) = lookup("INFOBLOX_SSL_VERIFY") {
            config.ssl_verify = !matches!(verify.to_ascii_lowercase().as_str(), "false" | "0" | "no");
        }
        if let Some(timeout) = lookup("INFOBLOX_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().map_err(|e| {
                IbError::InvalidConfig(format!("INFOBLOX_TIMEOUT_SECS is not a number: {timeout} ({e})"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce a usable base URL
    pub fn validate(&self) -> Result<(), IbError> {
        if self.host.trim().is_empty() {
            return Err(IbError::InvalidConfig("host must not be empty".to_string()));
        }
        if self.version.trim().is_empty() {
            return Err(IbError::InvalidConfig("WAPI version must not be empty".to_string()));
        }
        Ok(())
    }

    /// `https://<host>:<port>/wapi/v<version>/`
    pub fn base_url(&self) -> String {
        format!("https://{}:{}/wapi/v{}/", self.host, self.port, self.version)
    }
}

/// Attributes the object manager owns on every object it creates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Value of the `CMP Type` attribute
    #[serde(default)]
    pub cmp_type: Option<String>,

    /// Value of the `Tenant ID` attribute
    #[serde(default)]
    pub tenant_id: Option<String>,

    /// Value of the `Cloud API Owned` attribute
    #[serde(default)]
    pub cloud_api_owned: Option<bool>,
}

impl ManagerConfig {
    /// Config that tags objects as owned by `cmp_type` for `tenant_id`
    pub fn owned_by(cmp_type: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            cmp_type: Some(cmp_type.into()),
            tenant_id: Some(tenant_id.into()),
            cloud_api_owned: Some(true),
        }
    }

    /// Attributes to stamp on created objects
    pub fn owner_attributes(&self) -> Ea {
        let mut ea = Ea::new();
        if let Some(cmp_type) = &self.cmp_type {
            ea.insert("CMP Type", cmp_type.as_str());
        }
        if let Some(tenant_id) = &self.tenant_id {
            ea.insert("Tenant ID", tenant_id.as_str());
        }
        if let Some(owned) = self.cloud_api_owned {
            ea.insert("Cloud API Owned", owned);
        }
        ea
    }
}
