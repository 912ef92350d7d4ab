//! WAPI object models
//!
//! Every domain type carries a [`Descriptor`] (resource kind plus the fields
//! to request on reads) and implements [`IbObject`], which is all the object
//! manager needs to run the shared create/read/update/delete protocol.
//! Field names match the WAPI object reference.

/// Trait plumbing shared by every domain type: the descriptor, `_ref` and
/// `extattrs` fields all live under the same names.
macro_rules! object_accessors {
    () => {
        fn descriptor(&self) -> &Descriptor {
            &self.descriptor
        }

        fn descriptor_mut(&mut self) -> &mut Descriptor {
            &mut self.descriptor
        }

        fn reference(&self) -> Option<&Reference> {
            self.reference.as_ref()
        }

        fn set_reference(&mut self, reference: Reference) {
            self.reference = Some(reference);
        }

        fn ea(&self) -> &Ea {
            &self.ea
        }

        fn ea_mut(&mut self) -> &mut Ea {
            &mut self.ea
        }
    };
}

pub mod dhcp;
pub mod dns;
pub mod ea;
pub mod network;
pub mod reference;

pub use dhcp::RangeTemplate;
pub use dns::{AddressTarget, RecordA, RecordHttps, RecordMx, RecordSrv};
pub use ea::{Ea, EaDiff, EaValue};
pub use network::{Network, NetworkView};
pub use reference::{
    NetworkRef, NetworkViewRef, RecordRef, Reference, parse_network_ref, parse_network_view_ref,
    parse_record_ref,
};

use crate::common::query::SearchFilter;
use crate::error::IbError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Per-type request metadata attached to every domain object.
///
/// The kind is fixed by the type constructor; the return-field set starts
/// from the type defaults and can only grow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    kind: &'static str,
    return_fields: Vec<String>,
}

impl Descriptor {
    /// Descriptor for `kind` with the given default return fields
    pub fn new(kind: &'static str, return_fields: &[&str]) -> Self {
        Self {
            kind,
            return_fields: return_fields.iter().map(|f| (*f).to_string()).collect(),
        }
    }

    /// Resource kind (`record:mx`, `networkview`, ...)
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Fields requested on reads, in order
    pub fn return_fields(&self) -> &[String] {
        &self.return_fields
    }

    /// Request an extra field; duplicates are ignored
    pub fn add_return_field(&mut self, field: &str) {
        if !self.return_fields.iter().any(|f| f == field) {
            self.return_fields.push(field.to_string());
        }
    }
}

/// A WAPI object type the manager can create, read, update and delete.
///
/// Implementors supply only data: their kind, field sets, validation rules
/// and identity search. The protocol itself lives in
/// [`crate::manager::ObjectManager`].
pub trait IbObject: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Resource kind in the WAPI object model
    const KIND: &'static str;

    /// Fields requested when reading this type
    const RETURN_FIELDS: &'static [&'static str];

    /// Fields the store sets at creation and refuses on update
    const IMMUTABLE_FIELDS: &'static [&'static str] = &[];

    /// Fresh descriptor with the type defaults
    fn default_descriptor() -> Descriptor {
        Descriptor::new(Self::KIND, Self::RETURN_FIELDS)
    }

    /// Embedded descriptor
    fn descriptor(&self) -> &Descriptor;

    /// Embedded descriptor, for extending return fields
    fn descriptor_mut(&mut self) -> &mut Descriptor;

    /// Reference once the object exists in the store
    fn reference(&self) -> Option<&Reference>;

    /// Bind the object to a stored instance
    fn set_reference(&mut self, reference: Reference);

    /// Extensible attributes
    fn ea(&self) -> &Ea;

    /// Extensible attributes, mutable
    fn ea_mut(&mut self) -> &mut Ea;

    /// Identity fields usable to find this object without a reference
    fn search_fields(&self) -> SearchFilter;

    /// Local checks run before any connector call
    fn validate(&self) -> Result<(), IbError> {
        Ok(())
    }
}

/// Reject values outside `[0, 65535]`
pub fn check_u16(field: &str, value: Option<u32>) -> Result<(), IbError> {
    match value {
        Some(v) if v > u32::from(u16::MAX) => Err(IbError::validation(
            field,
            format!("must be between 0 and 65535, got {v}"),
        )),
        _ => Ok(()),
    }
}

/// Reject a missing or blank required string
pub fn check_required(field: &str, value: Option<&str>) -> Result<(), IbError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(IbError::validation(field, "is required")),
    }
}
