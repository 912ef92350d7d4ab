//! Connector trait
//!
//! The object manager talks to the store only through this trait. The
//! concrete [`crate::HttpConnector`] speaks WAPI over HTTPS; tests use the
//! in-memory `MockConnector` behind the `test-util` feature.

use crate::common::query::QueryParams;
use crate::error::IbError;
use crate::models::{Descriptor, Reference};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Generic object-store operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait IbConnector: Send + Sync {
    /// Store a new object of `descriptor.kind()` and return its reference
    async fn create_object(&self, descriptor: &Descriptor, body: Value) -> Result<Reference, IbError>;

    /// Read by reference (single object) or search by `query` (array)
    async fn get_object(
        &self,
        descriptor: &Descriptor,
        reference: Option<&Reference>,
        query: &QueryParams,
    ) -> Result<Value, IbError>;

    /// Overwrite the fields present in `body`, returning the (possibly new) reference
    async fn update_object(
        &self,
        descriptor: &Descriptor,
        reference: &Reference,
        body: Value,
    ) -> Result<Reference, IbError>;

    /// Remove the object, returning the reference it had
    async fn delete_object(&self, reference: &Reference) -> Result<Reference, IbError>;
}

/// Decode a `get_object` result into a sequence, whichever shape the store returned
pub fn decode_many<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, IbError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(IbError::from))
            .collect(),
        Value::Null => Ok(Vec::new()),
        single => Ok(vec![serde_json::from_value(single)?]),
    }
}

/// Decode a `get_object` result into a single instance.
///
/// Returns `None` for an empty result; the first element of an array otherwise.
pub fn decode_one<T: DeserializeOwned>(value: Value) -> Result<Option<T>, IbError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .next()
            .map(serde_json::from_value)
            .transpose()
            .map_err(IbError::from),
        Value::Null => Ok(None),
        single => Ok(Some(serde_json::from_value(single)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NetworkView;
    use serde_json::json;

    #[test]
    fn test_decode_many_accepts_both_shapes() {
        let one = json!({ "_ref": "networkview/A:one/false", "name": "one" });
        let many = json!([one.clone(), { "_ref": "networkview/B:two/false", "name": "two" }]);

        assert_eq!(decode_many::<NetworkView>(one).unwrap().len(), 1);
        assert_eq!(decode_many::<NetworkView>(many).unwrap().len(), 2);
        assert!(decode_many::<NetworkView>(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_decode_one() {
        let nv = decode_one::<NetworkView>(json!([{ "name": "first" }, { "name": "second" }]))
            .unwrap()
            .unwrap();
        assert_eq!(nv.name.as_deref(), Some("first"));
        assert!(decode_one::<NetworkView>(json!([])).unwrap().is_none());
    }

    #[test]
    fn test_decode_reports_shape_errors() {
        let result = decode_many::<NetworkView>(json!([{ "name": 5 }]));
        assert!(matches!(result, Err(IbError::Serialization(_))));
    }
}
