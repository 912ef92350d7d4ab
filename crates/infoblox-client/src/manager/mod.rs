//! Object manager
//!
//! One generic create/read/update/delete protocol for every [`IbObject`]
//! type, plus thin typed methods per record type in the submodules.
//!
//! - **create**: validate, stamp owner attributes, create, bind the returned reference
//! - **read**: by reference (authoritative) or by exact-match search
//! - **update**: re-fetch by reference, apply the caller's fields and EA diff to
//!   the fetched copy, write it back, rebind to the returned reference
//! - **delete**: by reference, or by identity search resolving to the first match
//!
//! An update is two round trips and is not atomic; concurrent updates to the
//! same object race.

mod dhcp;
mod dns;
mod network;

pub use dhcp::RangeTemplateUpdate;
pub use dns::{ARecordUpdate, HttpsRecordUpdate, MxRecordUpdate, SrvRecordUpdate};
pub use network::{NetworkUpdate, NetworkViewUpdate};

use crate::common::query::{QueryParams, SearchFilter};
use crate::config::ManagerConfig;
use crate::connector_trait::{IbConnector, decode_many, decode_one};
use crate::error::IbError;
use crate::models::{Descriptor, EaDiff, IbObject, Reference};
use serde_json::Value;
use tracing::{debug, info, warn};

/// How to address a stored object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// By reference; bypasses any search
    Reference(Reference),
    /// By exact-match identity fields
    Search(SearchFilter),
}

impl Selector {
    /// Address `object` by its reference when bound, by its identity fields otherwise
    pub fn of<T: IbObject>(object: &T) -> Self {
        match object.reference() {
            Some(reference) => Self::Reference(reference.clone()),
            None => Self::Search(object.search_fields()),
        }
    }

    fn criteria(&self) -> String {
        match self {
            Self::Reference(reference) => reference.to_string(),
            Self::Search(filter) => filter.to_string(),
        }
    }
}

impl From<Reference> for Selector {
    fn from(reference: Reference) -> Self {
        Self::Reference(reference)
    }
}

impl From<SearchFilter> for Selector {
    fn from(filter: SearchFilter) -> Self {
        Self::Search(filter)
    }
}

/// Result of a delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The object existed and was removed
    Deleted(Reference),
    /// No object matched the identity search; nothing was removed
    Absent,
}

impl DeleteOutcome {
    /// Reference of the removed object, if any
    pub fn reference(&self) -> Option<&Reference> {
        match self {
            Self::Deleted(reference) => Some(reference),
            Self::Absent => None,
        }
    }
}

/// Typed facade over an [`IbConnector`]
#[derive(Debug)]
pub struct ObjectManager<C: IbConnector> {
    connector: C,
    config: ManagerConfig,
}

impl<C: IbConnector> ObjectManager<C> {
    /// Create a manager; `config` decides which owner attributes are stamped on creates
    pub fn new(connector: C, config: ManagerConfig) -> Self {
        Self { connector, config }
    }

    /// Underlying connector
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Manager configuration
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Descriptor used for reads: type defaults plus `extattrs`
    fn read_descriptor<T: IbObject>() -> Descriptor {
        let mut descriptor = T::default_descriptor();
        descriptor.add_return_field("extattrs");
        descriptor
    }

    /// Create `object` in the store and return it bound to its new reference
    pub async fn create_object<T: IbObject>(&self, mut object: T) -> Result<T, IbError> {
        if object.reference().is_some() {
            return Err(IbError::validation("_ref", "object already exists in the store"));
        }
        object.validate()?;
        object.ea_mut().extend_from(&self.config.owner_attributes());

        let body = serde_json::to_value(&object)?;
        let reference = self
            .connector
            .create_object(object.descriptor(), body)
            .await?;
        info!("Created {} {}", T::KIND, reference);

        object.set_reference(reference);
        Ok(object)
    }

    /// Read one object by reference
    pub async fn get_by_ref<T: IbObject>(&self, reference: &Reference) -> Result<T, IbError> {
        debug!("Fetching {} by reference {}", T::KIND, reference);
        let query = QueryParams::new(true, SearchFilter::new());
        let value = self
            .connector
            .get_object(&Self::read_descriptor::<T>(), Some(reference), &query)
            .await?;
        decode_one(value)?.ok_or_else(|| IbError::not_found(T::KIND, reference.to_string()))
    }

    /// Every object of type `T` matching `filter`, ordered by reference.
    ///
    /// No match is an empty vector, not an error.
    pub async fn search<T: IbObject>(&self, filter: SearchFilter) -> Result<Vec<T>, IbError> {
        self.query(QueryParams::new(true, filter)).await
    }

    /// Search with explicit query parameters (proxying, paging)
    pub async fn query<T: IbObject>(&self, query: QueryParams) -> Result<Vec<T>, IbError> {
        debug!("Searching {} with {}", T::KIND, query.search);
        let value = self
            .connector
            .get_object(&Self::read_descriptor::<T>(), None, &query)
            .await?;
        let mut objects: Vec<T> = decode_many(value)?;
        objects.sort_by(|a, b| a.reference().cmp(&b.reference()));
        Ok(objects)
    }

    /// All objects addressed by `selector` (at most one for a reference)
    pub async fn fetch_all<T: IbObject>(&self, selector: &Selector) -> Result<Vec<T>, IbError> {
        match selector {
            Selector::Reference(reference) => Ok(vec![self.get_by_ref(reference).await?]),
            Selector::Search(filter) => self.search(filter.clone()).await,
        }
    }

    /// Exactly one object addressed by `selector`.
    ///
    /// A search with no match is `NotFound` carrying the criteria; a search
    /// with several matches resolves to the first by reference.
    pub async fn fetch_one<T: IbObject>(&self, selector: &Selector) -> Result<T, IbError> {
        match selector {
            Selector::Reference(reference) => self.get_by_ref(reference).await,
            Selector::Search(filter) => {
                let matches = self.search::<T>(filter.clone()).await?;
                Self::first_match(matches, filter)
                    .ok_or_else(|| IbError::not_found(T::KIND, selector.criteria()))
            }
        }
    }

    /// First search result, if any
    pub async fn find_first<T: IbObject>(&self, filter: SearchFilter) -> Result<Option<T>, IbError> {
        let matches = self.search::<T>(filter.clone()).await?;
        Ok(Self::first_match(matches, &filter))
    }

    fn first_match<T: IbObject>(matches: Vec<T>, filter: &SearchFilter) -> Option<T> {
        if matches.len() > 1 {
            warn!(
                "{} {} objects match {}; using the first by reference",
                matches.len(),
                T::KIND,
                filter
            );
        }
        matches.into_iter().next()
    }

    /// Fetch `reference`, apply `patch` and `ea` to the stored copy and write it back.
    ///
    /// Returns the updated object bound to the reference the store returned,
    /// which differs from `reference` when the update changed a field the
    /// reference suffix is derived from.
    pub async fn update_object<T, F>(
        &self,
        reference: &Reference,
        patch: F,
        ea: &EaDiff,
    ) -> Result<T, IbError>
    where
        T: IbObject,
        F: FnOnce(&mut T) + Send,
    {
        let mut current: T = self.get_by_ref(reference).await?;
        patch(&mut current);
        current.ea_mut().merge(ea);
        current.validate()?;

        let body = Self::update_body(&current)?;
        let new_reference = self
            .connector
            .update_object(current.descriptor(), reference, body)
            .await?;
        if &new_reference == reference {
            info!("Updated {} {}", T::KIND, reference);
        } else {
            info!("Updated {} {} (now {})", T::KIND, reference, new_reference);
        }

        current.set_reference(new_reference);
        Ok(current)
    }

    /// Update body: every serialized field except `_ref` and the type's
    /// immutable fields, with `extattrs` always present so removals land.
    fn update_body<T: IbObject>(object: &T) -> Result<Value, IbError> {
        let mut body = serde_json::to_value(object)?;
        if let Value::Object(fields) = &mut body {
            fields.remove("_ref");
            for field in T::IMMUTABLE_FIELDS {
                fields.remove(*field);
            }
            fields.insert("extattrs".to_string(), object.ea().encode());
        }
        Ok(body)
    }

    /// Delete the object addressed by `selector`.
    ///
    /// A reference is deleted directly. A search deletes the first match by
    /// reference and reports [`DeleteOutcome::Absent`] when nothing matches.
    pub async fn delete_object<T: IbObject>(&self, selector: &Selector) -> Result<DeleteOutcome, IbError> {
        let reference = match selector {
            Selector::Reference(reference) => reference.clone(),
            Selector::Search(filter) => {
                if filter.is_empty() {
                    return Err(IbError::validation(
                        "search",
                        format!("deleting {} by identity needs at least one field", T::KIND),
                    ));
                }
                let matches = self.search::<T>(filter.clone()).await?;
                let Some(first) = Self::first_match(matches, filter) else {
                    debug!("No {} matches {}; nothing to delete", T::KIND, filter);
                    return Ok(DeleteOutcome::Absent);
                };
                first.reference().cloned().ok_or_else(|| {
                    IbError::Api(format!("{} search result carried no reference", T::KIND))
                })?
            }
        };

        let deleted = self.connector.delete_object(&reference).await?;
        info!("Deleted {} {}", T::KIND, deleted);
        Ok(DeleteOutcome::Deleted(deleted))
    }
}
