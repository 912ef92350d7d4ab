//! Object references
//!
//! Every stored object is addressed by a server-issued reference:
//!
//! ```text
//! <kind>/<opaque token>:<human readable suffix>
//! networkview/ZG5zLm5ldHdvcmtfdmlldyQx:global_view/false
//! network/ZG5zLm5ldHdvcmskMTAuMC4wLjAvMjQvMA:10.0.0.0/24/default
//! record:mx/ZG5zLmJpbmRfbXgkLl9kZWZhdWx0:test.example.com/default
//! ```
//!
//! The token is never parsed or generated by the client. The suffix grammar
//! depends on the kind; the parsers below return `None` for references that
//! do not match, since callers routinely probe references of other kinds.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

#[allow(clippy::expect_used, reason = "patterns are compile-time constants")]
fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("invalid reference pattern")
}

/// `networkview/<token>:<name>/<is_default>`
pub static NETWORK_VIEW_REF: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^networkview/[^:]+:([^/]+)/(true|false)$"));

/// `network/<token>:<a.b.c.d>/<prefix>/<network view>`
pub static NETWORK_REF: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"^network/[^:]+:(\d{1,3}(?:\.\d{1,3}){3}/\d{1,2})/(.+)$")
});

/// `record:<type>/<token>:<name>/<dns view>`
pub static RECORD_REF: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^record:[a-z]+/[^:]+:([^/]+)/(.+)$"));

/// Server-issued identifier of a stored object
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    /// Wrap a reference string returned by the store
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The raw reference string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resource kind prefix (`record:mx`, `networkview`, ...)
    pub fn kind(&self) -> &str {
        self.0.split_once('/').map_or(self.0.as_str(), |(kind, _)| kind)
    }

    /// Human readable part after the opaque token, if any
    pub fn suffix(&self) -> Option<&str> {
        self.0
            .split_once('/')
            .and_then(|(_, rest)| rest.split_once(':'))
            .map(|(_, suffix)| suffix)
    }

    /// Apply `pattern` and return its capture groups, or `None` when the
    /// reference does not conform
    pub fn captures(&self, pattern: &Regex) -> Option<Vec<String>> {
        let caps = pattern.captures(&self.0)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Reference {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Reference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identity recovered from a network view reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkViewRef {
    /// Network view name
    pub name: String,
    /// Whether this is the grid's default view
    pub is_default: bool,
}

/// Identity recovered from a network reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkRef {
    /// Network in CIDR notation
    pub cidr: String,
    /// Owning network view
    pub network_view: String,
}

/// Identity recovered from a DNS record reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRef {
    /// Record kind (`record:a`, `record:mx`, ...)
    pub kind: String,
    /// Record FQDN
    pub name: String,
    /// DNS view
    pub view: String,
}

/// Parse a `networkview` reference
pub fn parse_network_view_ref(reference: &Reference) -> Option<NetworkViewRef> {
    let mut caps = reference.captures(&NETWORK_VIEW_REF)?.into_iter();
    let name = caps.next()?;
    let is_default = caps.next()? == "true";
    Some(NetworkViewRef { name, is_default })
}

/// Parse a `network` reference
pub fn parse_network_ref(reference: &Reference) -> Option<NetworkRef> {
    let mut caps = reference.captures(&NETWORK_REF)?.into_iter();
    Some(NetworkRef {
        cidr: caps.next()?,
        network_view: caps.next()?,
    })
}

/// Parse any `record:*` reference
pub fn parse_record_ref(reference: &Reference) -> Option<RecordRef> {
    let mut caps = reference.captures(&RECORD_REF)?.into_iter();
    Some(RecordRef {
        kind: reference.kind().to_string(),
        name: caps.next()?,
        view: caps.next()?,
    })
}
