//! DNS resource records: A, MX, SRV and HTTPS

use super::network::check_cidr;
use super::{Descriptor, Ea, IbObject, Reference, check_required, check_u16};
use crate::common::query::SearchFilter;
use crate::error::IbError;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Prefix of the WAPI function call that allocates the next free address
pub const NEXT_AVAILABLE_IP: &str = "func:nextavailableip:";

/// Address of an A record: either a literal address or a request for the
/// store to pick the next free address in a network.
///
/// `NextAvailable` travels as `func:nextavailableip:<cidr>,<network view>`
/// and is resolved by the store, never locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressTarget {
    /// Literal address
    Explicit(Ipv4Addr),
    /// Let the store allocate from `network` in `network_view`
    NextAvailable {
        /// Network in CIDR notation
        network: String,
        /// Network view owning `network`
        network_view: String,
    },
}

impl AddressTarget {
    /// Literal address, if any
    pub fn address(&self) -> Option<Ipv4Addr> {
        match self {
            Self::Explicit(ip) => Some(*ip),
            Self::NextAvailable { .. } => None,
        }
    }
}

impl fmt::Display for AddressTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(ip) => write!(f, "{ip}"),
            Self::NextAvailable {
                network,
                network_view,
            } => write!(f, "{NEXT_AVAILABLE_IP}{network},{network_view}"),
        }
    }
}

impl std::str::FromStr for AddressTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(args) = s.strip_prefix(NEXT_AVAILABLE_IP) {
            let (network, network_view) = args
                .split_once(',')
                .ok_or_else(|| format!("missing network view in '{s}'"))?;
            return Ok(Self::NextAvailable {
                network: network.to_string(),
                network_view: network_view.to_string(),
            });
        }
        s.parse::<Ipv4Addr>()
            .map(Self::Explicit)
            .map_err(|e| format!("invalid IPv4 address '{s}': {e}"))
    }
}

impl Serialize for AddressTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AddressTarget {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// A record (`record:a`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordA {
    #[serde(skip, default = "RecordA::default_descriptor")]
    descriptor: Descriptor,
    /// Reference of the stored object; `None` until created
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
    /// Record name (FQDN)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Literal address, or a network to allocate the next free one from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4addr: Option<AddressTarget>,
    /// DNS view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    /// TTL in seconds; only honoured when `use_ttl` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Whether `ttl` overrides the zone default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_ttl: Option<bool>,
    /// Free-form comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Extensible attributes
    #[serde(rename = "extattrs", default, skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
}

impl RecordA {
    /// Unbound A record
    pub fn new(view: impl Into<String>, name: impl Into<String>, ipv4addr: AddressTarget) -> Self {
        Self {
            descriptor: Self::default_descriptor(),
            reference: None,
            name: Some(name.into()),
            ipv4addr: Some(ipv4addr),
            view: Some(view.into()),
            ttl: None,
            use_ttl: None,
            comment: None,
            ea: Ea::new(),
        }
    }

    /// Set an explicit TTL
    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self.use_ttl = Some(true);
        self
    }

    /// Set the comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set extensible attributes
    #[must_use]
    pub fn with_ea(mut self, ea: Ea) -> Self {
        self.ea = ea;
        self
    }
}

impl IbObject for RecordA {
    const KIND: &'static str = "record:a";
    const RETURN_FIELDS: &'static [&'static str] =
        &["name", "ipv4addr", "view", "ttl", "use_ttl", "comment"];
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["view"];

    object_accessors!();

    fn search_fields(&self) -> SearchFilter {
        let mut filter = SearchFilter::new();
        filter.insert_opt("view", self.view.as_deref());
        filter.insert_opt("name", self.name.as_deref());
        if let Some(ip) = self.ipv4addr.as_ref().and_then(AddressTarget::address) {
            filter.insert("ipv4addr", ip.to_string());
        }
        filter
    }

    fn validate(&self) -> Result<(), IbError> {
        check_required("name", self.name.as_deref())?;
        match &self.ipv4addr {
            None => Err(IbError::validation(
                "ipv4addr",
                "an address or a network to allocate from is required",
            )),
            Some(AddressTarget::NextAvailable { network, .. }) => check_cidr("ipv4addr", Some(network)),
            Some(AddressTarget::Explicit(_)) => Ok(()),
        }
    }
}

/// MX record (`record:mx`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMx {
    #[serde(skip, default = "RecordMx::default_descriptor")]
    descriptor: Descriptor,
    /// Reference of the stored object; `None` until created
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
    /// Record name (FQDN)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Host that accepts mail for `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mail_exchanger: Option<String>,
    /// Preference, 0 to 65535; lower is preferred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<u32>,
    /// DNS view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    /// TTL in seconds; only honoured when `use_ttl` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Whether `ttl` overrides the zone default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_ttl: Option<bool>,
    /// Free-form comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Extensible attributes
    #[serde(rename = "extattrs", default, skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
}

impl RecordMx {
    /// Unbound MX record
    pub fn new(
        view: impl Into<String>,
        name: impl Into<String>,
        mail_exchanger: impl Into<String>,
        preference: u32,
    ) -> Self {
        Self {
            descriptor: Self::default_descriptor(),
            reference: None,
            name: Some(name.into()),
            mail_exchanger: Some(mail_exchanger.into()),
            preference: Some(preference),
            view: Some(view.into()),
            ttl: None,
            use_ttl: None,
            comment: None,
            ea: Ea::new(),
        }
    }

    /// Set an explicit TTL
    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self.use_ttl = Some(true);
        self
    }

    /// Set the comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set extensible attributes
    #[must_use]
    pub fn with_ea(mut self, ea: Ea) -> Self {
        self.ea = ea;
        self
    }
}

impl IbObject for RecordMx {
    const KIND: &'static str = "record:mx";
    const RETURN_FIELDS: &'static [&'static str] = &[
        "name",
        "mail_exchanger",
        "preference",
        "view",
        "ttl",
        "use_ttl",
        "comment",
    ];
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["view"];

    object_accessors!();

    fn search_fields(&self) -> SearchFilter {
        let mut filter = SearchFilter::new();
        filter.insert_opt("view", self.view.as_deref());
        filter.insert_opt("name", self.name.as_deref());
        filter.insert_opt("mail_exchanger", self.mail_exchanger.as_deref());
        filter
    }

    fn validate(&self) -> Result<(), IbError> {
        check_required("name", self.name.as_deref())?;
        check_required("mail_exchanger", self.mail_exchanger.as_deref())?;
        if self.preference.is_none() {
            return Err(IbError::validation("preference", "is required"));
        }
        check_u16("preference", self.preference)
    }
}

/// SRV record (`record:srv`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSrv {
    #[serde(skip, default = "RecordSrv::default_descriptor")]
    descriptor: Descriptor,
    /// Reference of the stored object; `None` until created
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
    /// Record name (FQDN)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Priority, 0 to 65535; lower is tried first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Weight among equal priorities, 0 to 65535
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Service port, 0 to 65535
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u32>,
    /// Host providing the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// DNS view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    /// TTL in seconds; only honoured when `use_ttl` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Whether `ttl` overrides the zone default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_ttl: Option<bool>,
    /// Free-form comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Extensible attributes
    #[serde(rename = "extattrs", default, skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
}

impl RecordSrv {
    /// Unbound SRV record
    pub fn new(
        view: impl Into<String>,
        name: impl Into<String>,
        priority: u32,
        weight: u32,
        port: u32,
        target: impl Into<String>,
    ) -> Self {
        Self {
            descriptor: Self::default_descriptor(),
            reference: None,
            name: Some(name.into()),
            priority: Some(priority),
            weight: Some(weight),
            port: Some(port),
            target: Some(target.into()),
            view: Some(view.into()),
            ttl: None,
            use_ttl: None,
            comment: None,
            ea: Ea::new(),
        }
    }

    /// Set an explicit TTL
    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self.use_ttl = Some(true);
        self
    }

    /// Set the comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set extensible attributes
    #[must_use]
    pub fn with_ea(mut self, ea: Ea) -> Self {
        self.ea = ea;
        self
    }
}

impl IbObject for RecordSrv {
    const KIND: &'static str = "record:srv";
    const RETURN_FIELDS: &'static [&'static str] = &[
        "name", "priority", "weight", "port", "target", "view", "ttl", "use_ttl", "comment",
    ];
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["view"];

    object_accessors!();

    fn search_fields(&self) -> SearchFilter {
        let mut filter = SearchFilter::new();
        filter.insert_opt("view", self.view.as_deref());
        filter.insert_opt("name", self.name.as_deref());
        filter.insert_opt("target", self.target.as_deref());
        if let Some(port) = self.port {
            filter.insert_number("port", port);
        }
        filter
    }

    fn validate(&self) -> Result<(), IbError> {
        check_required("name", self.name.as_deref())?;
        check_required("target", self.target.as_deref())?;
        for (field, value) in [
            ("priority", self.priority),
            ("weight", self.weight),
            ("port", self.port),
        ] {
            if value.is_none() {
                return Err(IbError::validation(field, "is required"));
            }
            check_u16(field, value)?;
        }
        Ok(())
    }
}

/// HTTPS service binding record (`record:https`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHttps {
    #[serde(skip, default = "RecordHttps::default_descriptor")]
    descriptor: Descriptor,
    /// Reference of the stored object; `None` until created
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
    /// Record name (FQDN)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 0 selects alias mode, anything else service mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    /// Target host of the service binding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_name: Option<String>,
    /// DNS view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    /// TTL in seconds; only honoured when `use_ttl` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Whether `ttl` overrides the zone default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_ttl: Option<bool>,
    /// Free-form comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Extensible attributes
    #[serde(rename = "extattrs", default, skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
}

impl RecordHttps {
    /// Unbound HTTPS record
    pub fn new(
        view: impl Into<String>,
        name: impl Into<String>,
        priority: u32,
        target_name: impl Into<String>,
    ) -> Self {
        Self {
            descriptor: Self::default_descriptor(),
            reference: None,
            name: Some(name.into()),
            priority: Some(priority),
            target_name: Some(target_name.into()),
            view: Some(view.into()),
            ttl: None,
            use_ttl: None,
            comment: None,
            ea: Ea::new(),
        }
    }

    /// Set an explicit TTL
    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self.use_ttl = Some(true);
        self
    }

    /// Set the comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set extensible attributes
    #[must_use]
    pub fn with_ea(mut self, ea: Ea) -> Self {
        self.ea = ea;
        self
    }
}

impl IbObject for RecordHttps {
    const KIND: &'static str = "record:https";
    const RETURN_FIELDS: &'static [&'static str] = &[
        "name",
        "priority",
        "target_name",
        "view",
        "ttl",
        "use_ttl",
        "comment",
    ];
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["view"];

    object_accessors!();

    fn search_fields(&self) -> SearchFilter {
        let mut filter = SearchFilter::new();
        filter.insert_opt("view", self.view.as_deref());
        filter.insert_opt("name", self.name.as_deref());
        filter.insert_opt("target_name", self.target_name.as_deref());
        filter
    }

    fn validate(&self) -> Result<(), IbError> {
        check_required("name", self.name.as_deref())?;
        check_required("target_name", self.target_name.as_deref())?;
        if self.priority.is_none() {
            return Err(IbError::validation("priority", "is required"));
        }
        check_u16("priority", self.priority)
    }
}
