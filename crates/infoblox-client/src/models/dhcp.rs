//! DHCP objects

use super::{Descriptor, Ea, IbObject, Reference, check_required};
use crate::common::query::SearchFilter;
use crate::error::IbError;
use serde::{Deserialize, Serialize};

/// DHCP range template (`rangetemplate`)
///
/// A template sized relative to the network a range is later created in:
/// `offset` addresses past the network start, `number_of_addresses` long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeTemplate {
    #[serde(skip, default = "RangeTemplate::default_descriptor")]
    descriptor: Descriptor,
    /// Reference of the stored object; `None` until created
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
    /// Template name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Range length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_addresses: Option<u32>,
    /// Start of the range as an offset into the network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Free-form comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Extensible attributes
    #[serde(rename = "extattrs", default, skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
}

impl RangeTemplate {
    /// Unbound range template
    pub fn new(name: impl Into<String>, number_of_addresses: u32, offset: u32) -> Self {
        Self {
            descriptor: Self::default_descriptor(),
            reference: None,
            name: Some(name.into()),
            number_of_addresses: Some(number_of_addresses),
            offset: Some(offset),
            comment: None,
            ea: Ea::new(),
        }
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

impl IbObject for RangeTemplate {
    const KIND: &'static str = "rangetemplate";
    const RETURN_FIELDS: &'static [&'static str] =
        &["name", "number_of_addresses", "offset", "comment"];

    object_accessors!();

    fn search_fields(&self) -> SearchFilter {
        let mut filter = SearchFilter::new();
        filter.insert_opt("name", self.name.as_deref());
        filter
    }

    fn validate(&self) -> Result<(), IbError> {
        check_required("name", self.name.as_deref())?;
        match self.number_of_addresses {
            Some(n) if n > 0 => Ok(()),
            _ => Err(IbError::validation(
                "number_of_addresses",
                "must be at least 1",
            )),
        }
    }
}
