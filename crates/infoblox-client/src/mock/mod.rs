//! Mock connector for unit testing
//!
//! An in-memory object store implementing [`IbConnector`] the way the grid
//! does: it issues references, derives their readable suffix from the
//! object's fields, resolves `func:nextavailableip` on create and rekeys an
//! object when an update changes its suffix.

mod helpers;

use crate::common::query::QueryParams;
use crate::connector_trait::IbConnector;
use crate::error::IbError;
use crate::models::dns::NEXT_AVAILABLE_IP;
use crate::models::{Descriptor, Reference};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone)]
struct StoredObject {
    kind: String,
    token: String,
    fields: Map<String, Value>,
}

/// In-memory connector for tests
///
/// Clones share the same store, so a test can keep a handle for inspection
/// after moving one into an `ObjectManager`.
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    objects: Arc<Mutex<BTreeMap<Reference, StoredObject>>>,
    allocations: Arc<Mutex<HashMap<String, u32>>>,
    calls: Arc<Mutex<Vec<String>>>,
    fail_next: Arc<Mutex<Option<String>>>,
    // Counter for generating reference tokens
    next_id: Arc<Mutex<u64>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

impl MockConnector {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object directly (for test setup) and return its reference
    pub fn add_object(&self, kind: &str, object: Value) -> Reference {
        let fields = match object {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let token = self.next_token();
        self.insert(kind, token, fields)
    }

    /// Stored fields of `reference`, including `_ref`
    pub fn object(&self, reference: &Reference) -> Option<Value> {
        lock(&self.objects)
            .get(reference)
            .map(|stored| Self::render(reference, stored))
    }

    /// References of every stored object of `kind`
    pub fn references(&self, kind: &str) -> Vec<Reference> {
        lock(&self.objects)
            .iter()
            .filter(|(_, stored)| stored.kind == kind)
            .map(|(reference, _)| reference.clone())
            .collect()
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        lock(&self.objects).len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        lock(&self.objects).is_empty()
    }

    /// Connector calls made so far, as `"<operation> <kind or reference>"`
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    /// Make the next connector call fail with an API error
    pub fn fail_next(&self, message: impl Into<String>) {
        *lock(&self.fail_next) = Some(message.into());
    }

    fn next_token(&self) -> String {
        let mut id = lock(&self.next_id);
        *id += 1;
        format!("bW9jay{:06}", *id)
    }

    fn record(&self, call: String) -> Result<(), IbError> {
        lock(&self.calls).push(call);
        match lock(&self.fail_next).take() {
            Some(message) => Err(IbError::Api(message)),
            None => Ok(()),
        }
    }

    fn insert(&self, kind: &str, token: String, fields: Map<String, Value>) -> Reference {
        let reference = Self::reference_for(kind, &token, &fields);
        lock(&self.objects).insert(
            reference.clone(),
            StoredObject {
                kind: kind.to_string(),
                token,
                fields,
            },
        );
        reference
    }

    fn reference_for(kind: &str, token: &str, fields: &Map<String, Value>) -> Reference {
        let suffix = helpers::reference_suffix(kind, &Value::Object(fields.clone()));
        Reference::new(format!("{kind}/{token}:{suffix}"))
    }

    fn render(reference: &Reference, stored: &StoredObject) -> Value {
        let mut fields = stored.fields.clone();
        fields.insert("_ref".to_string(), Value::String(reference.to_string()));
        Value::Object(fields)
    }

    fn resolve_next_available(&self, fields: &mut Map<String, Value>) -> Result<(), IbError> {
        let Some(args) = fields
            .get("ipv4addr")
            .and_then(Value::as_str)
            .and_then(|addr| addr.strip_prefix(NEXT_AVAILABLE_IP))
            .map(str::to_string)
        else {
            return Ok(());
        };

        let network = args.split_once(',').map_or(args.as_str(), |(net, _)| net);
        let mut allocations = lock(&self.allocations);
        let next = allocations.entry(args.clone()).or_insert(0);
        *next += 1;
        let ip = helpers::host_in_network(network, *next)
            .ok_or_else(|| IbError::Api(format!("No free IP address in network {network}")))?;
        fields.insert("ipv4addr".to_string(), Value::String(ip.to_string()));
        Ok(())
    }
}

#[async_trait::async_trait]
impl IbConnector for MockConnector {
    async fn create_object(&self, descriptor: &Descriptor, body: Value) -> Result<Reference, IbError> {
        self.record(format!("create {}", descriptor.kind()))?;
        let Value::Object(mut fields) = body else {
            return Err(IbError::Api("create body must be a JSON object".to_string()));
        };
        fields.remove("_ref");
        self.resolve_next_available(&mut fields)?;

        let token = self.next_token();
        let candidate = Self::reference_for(descriptor.kind(), &token, &fields);
        let duplicate = lock(&self.objects)
            .values()
            .any(|stored| stored.kind == descriptor.kind() && stored.fields == fields);
        if duplicate {
            return Err(IbError::Api(format!(
                "The record '{}' already exists.",
                candidate.suffix().unwrap_or_default()
            )));
        }

        Ok(self.insert(descriptor.kind(), token, fields))
    }

    async fn get_object(
        &self,
        descriptor: &Descriptor,
        reference: Option<&Reference>,
        query: &QueryParams,
    ) -> Result<Value, IbError> {
        if let Some(reference) = reference {
            self.record(format!("get {reference}"))?;
            return self
                .object(reference)
                .ok_or_else(|| IbError::not_found(descriptor.kind(), reference.to_string()));
        }

        self.record(format!("search {}", descriptor.kind()))?;
        let objects = lock(&self.objects);
        let matches = objects
            .iter()
            .filter(|(_, stored)| stored.kind == descriptor.kind())
            .map(|(reference, stored)| Self::render(reference, stored))
            .filter(|object| {
                query
                    .search
                    .iter()
                    .all(|(field, value)| helpers::matches_constraint(object, field, value))
            })
            .collect();
        Ok(Value::Array(matches))
    }

    async fn update_object(
        &self,
        descriptor: &Descriptor,
        reference: &Reference,
        body: Value,
    ) -> Result<Reference, IbError> {
        self.record(format!("update {reference}"))?;
        let Value::Object(changes) = body else {
            return Err(IbError::Api("update body must be a JSON object".to_string()));
        };

        let mut objects = lock(&self.objects);
        let mut stored = objects
            .remove(reference)
            .ok_or_else(|| IbError::not_found(descriptor.kind(), reference.to_string()))?;
        for (field, value) in changes {
            if field != "_ref" {
                stored.fields.insert(field, value);
            }
        }
        let new_reference = Self::reference_for(&stored.kind, &stored.token, &stored.fields);
        objects.insert(new_reference.clone(), stored);
        Ok(new_reference)
    }

    async fn delete_object(&self, reference: &Reference) -> Result<Reference, IbError> {
        self.record(format!("delete {reference}"))?;
        lock(&self.objects)
            .remove(reference)
            .map(|_| reference.clone())
            .ok_or_else(|| IbError::not_found(reference.kind().to_string(), reference.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::query::SearchFilter;
    use serde_json::json;

    fn mx_descriptor() -> Descriptor {
        Descriptor::new("record:mx", &["name"])
    }

    #[tokio::test]
    async fn test_create_issues_reference_with_readable_suffix() {
        let mock = MockConnector::new();
        let reference = mock
            .create_object(&mx_descriptor(), json!({ "name": "test.example.com", "view": "default" }))
            .await
            .unwrap();

        assert_eq!(reference.kind(), "record:mx");
        assert_eq!(reference.suffix(), Some("test.example.com/default"));
        assert_eq!(mock.calls(), vec!["create record:mx".to_string()]);
    }

    #[tokio::test]
    async fn test_update_rekeys_when_suffix_changes() {
        let mock = MockConnector::new();
        let old = mock.add_object("record:mx", json!({ "name": "old.example.com", "view": "default" }));

        let new = mock
            .update_object(&mx_descriptor(), &old, json!({ "name": "new.example.com" }))
            .await
            .unwrap();

        assert_ne!(old, new);
        assert!(mock.object(&old).is_none());
        assert_eq!(mock.object(&new).unwrap()["name"], "new.example.com");
    }

    #[tokio::test]
    async fn test_search_filters_by_exact_match() {
        let mock = MockConnector::new();
        mock.add_object("record:mx", json!({ "name": "a.example.com", "view": "default" }));
        mock.add_object("record:mx", json!({ "name": "b.example.com", "view": "default" }));
        mock.add_object("record:a", json!({ "name": "a.example.com", "view": "default" }));

        let query = QueryParams::new(true, SearchFilter::new().with("name", "a.example.com"));
        let found = mock.get_object(&mx_descriptor(), None, &query).await.unwrap();
        assert_eq!(found.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fail_next_fails_once() {
        let mock = MockConnector::new();
        mock.fail_next("boom");
        let err = mock.delete_object(&Reference::new("record:mx/x:y/z")).await.unwrap_err();
        assert!(matches!(err, IbError::Api(ref m) if m == "boom"));

        let err = mock.delete_object(&Reference::new("record:mx/x:y/z")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_next_available_ip_is_resolved() {
        let mock = MockConnector::new();
        let descriptor = Descriptor::new("record:a", &[]);
        let body = json!({
            "name": "h.example.com",
            "view": "default",
            "ipv4addr": "func:nextavailableip:10.0.0.0/24,default",
        });
        let first = mock.create_object(&descriptor, body.clone()).await.unwrap();
        let mut second_body = body;
        second_body["name"] = json!("h2.example.com");
        let second = mock.create_object(&descriptor, second_body).await.unwrap();

        assert_eq!(mock.object(&first).unwrap()["ipv4addr"], "10.0.0.1");
        assert_eq!(mock.object(&second).unwrap()["ipv4addr"], "10.0.0.2");
    }
}
