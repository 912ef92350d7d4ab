//! IPAM containers: network views and networks

use super::{Descriptor, Ea, IbObject, Reference, check_required};
use crate::common::query::SearchFilter;
use crate::error::IbError;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Network view (`networkview`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkView {
    #[serde(skip, default = "NetworkView::default_descriptor")]
    descriptor: Descriptor,
    /// Reference of the stored object; `None` until created
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
    /// View name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Read-only; set by the grid for its default view
    #[serde(default, skip_serializing)]
    pub is_default: Option<bool>,
    /// Extensible attributes
    #[serde(rename = "extattrs", default, skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
}

impl NetworkView {
    /// Unbound network view
    pub fn new(name: impl Into<String>, comment: Option<String>, ea: Ea) -> Self {
        Self {
            descriptor: Self::default_descriptor(),
            reference: None,
            name: Some(name.into()),
            comment,
            is_default: None,
            ea,
        }
    }
}

impl IbObject for NetworkView {
    const KIND: &'static str = "networkview";
    const RETURN_FIELDS: &'static [&'static str] = &["name", "comment", "is_default"];

    object_accessors!();

    fn search_fields(&self) -> SearchFilter {
        let mut filter = SearchFilter::new();
        filter.insert_opt("name", self.name.as_deref());
        filter
    }

    fn validate(&self) -> Result<(), IbError> {
        check_required("name", self.name.as_deref())
    }
}

/// IPv4 network (`network`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    #[serde(skip, default = "Network::default_descriptor")]
    descriptor: Descriptor,
    /// Reference of the stored object; `None` until created
    #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
    /// Network view owning the network
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_view: Option<String>,
    /// Network in CIDR notation
    #[serde(rename = "network", default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
    /// Free-form comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Extensible attributes
    #[serde(rename = "extattrs", default, skip_serializing_if = "Ea::is_empty")]
    pub ea: Ea,
}

impl Network {
    /// Unbound network
    pub fn new(
        network_view: impl Into<String>,
        cidr: impl Into<String>,
        comment: Option<String>,
        ea: Ea,
    ) -> Self {
        Self {
            descriptor: Self::default_descriptor(),
            reference: None,
            network_view: Some(network_view.into()),
            cidr: Some(cidr.into()),
            comment,
            ea,
        }
    }
}

/// Check `a.b.c.d/len` with `len <= 32`
pub fn check_cidr(field: &str, value: Option<&str>) -> Result<(), IbError> {
    check_required(field, value)?;
    let value = value.unwrap_or_default();
    let valid = value.split_once('/').is_some_and(|(addr, len)| {
        addr.parse::<Ipv4Addr>().is_ok() && len.parse::<u8>().is_ok_and(|len| len <= 32)
    });
    if valid {
        Ok(())
    } else {
        Err(IbError::validation(
            field,
            format!("'{value}' is not an IPv4 network in CIDR notation"),
        ))
    }
}

impl IbObject for Network {
    const KIND: &'static str = "network";
    const RETURN_FIELDS: &'static [&'static str] = &["network", "network_view", "comment"];
    const IMMUTABLE_FIELDS: &'static [&'static str] = &["network_view"];

    object_accessors!();

    fn search_fields(&self) -> SearchFilter {
        let mut filter = SearchFilter::new();
        filter.insert_opt("network_view", self.network_view.as_deref());
        filter.insert_opt("network", self.cidr.as_deref());
        filter
    }

    fn validate(&self) -> Result<(), IbError> {
        check_required("network_view", self.network_view.as_deref())?;
        check_cidr("network", self.cidr.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructor_attaches_descriptor() {
        let a = NetworkView::new("blue", None, Ea::new());
        let b = NetworkView::new("red", Some("x".to_string()), Ea::new().with("Site", "Blr"));
        assert_eq!(a.descriptor(), &NetworkView::default_descriptor());
        assert_eq!(a.descriptor(), b.descriptor());
        assert_eq!(a.descriptor().kind(), "networkview");
    }

    #[test]
    fn test_decoded_object_gets_descriptor() {
        let nv: NetworkView = serde_json::from_value(json!({
            "_ref": "networkview/ZG5z:default/true",
            "name": "default",
            "is_default": true,
        }))
        .unwrap();
        assert_eq!(nv.descriptor().kind(), "networkview");
        assert_eq!(nv.is_default, Some(true));
        assert!(nv.ea.is_empty());
    }

    #[test]
    fn test_wire_shape_omits_unset_fields() {
        let nv = NetworkView::new("blue", None, Ea::new());
        assert_eq!(serde_json::to_value(&nv).unwrap(), json!({ "name": "blue" }));

        let net = Network::new("default", "10.0.0.0/24", Some(String::new()), Ea::new().with("Owned", true));
        assert_eq!(
            serde_json::to_value(&net).unwrap(),
            json!({
                "network_view": "default",
                "network": "10.0.0.0/24",
                "comment": "",
                "extattrs": { "Owned": { "value": "True" } },
            })
        );
    }

    #[test]
    fn test_network_validation() {
        assert!(Network::new("default", "10.0.0.0/24", None, Ea::new()).validate().is_ok());
        assert!(Network::new("default", "10.0.0.0/33", None, Ea::new()).validate().is_err());
        assert!(Network::new("default", "10.0.0.0", None, Ea::new()).validate().is_err());
        assert!(Network::new("", "10.0.0.0/24", None, Ea::new()).validate().is_err());
    }

    #[test]
    fn test_network_search_fields() {
        let net = Network::new("default", "10.0.0.0/24", None, Ea::new());
        let filter = net.search_fields();
        assert_eq!(filter.get("network_view"), Some("default"));
        assert_eq!(filter.get("network"), Some("10.0.0.0/24"));
    }
}
