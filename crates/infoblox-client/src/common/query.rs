//! Query utilities for WAPI searches
//!
//! WAPI searches are exact string matches on field values: no ranges, no
//! boolean operators. Numbers are sent as decimal strings and extensible
//! attributes are matched with a `*` prefix on the attribute name.

use crate::models::{Descriptor, EaValue};
use std::collections::BTreeMap;
use std::fmt;

/// Exact-match search constraints keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter(BTreeMap<String, String>);

impl SearchFilter {
    /// Empty filter (matches every object of a kind)
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Require `field == value` in place
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Require `field == value` when a value is present
    pub fn insert_opt(&mut self, field: impl Into<String>, value: Option<&str>) {
        if let Some(value) = value {
            self.insert(field, value);
        }
    }

    /// Require a numeric field to equal `value`, sent as a decimal string
    pub fn insert_number(&mut self, field: impl Into<String>, value: impl Into<u64>) {
        self.insert(field, value.into().to_string());
    }

    /// Require extensible attribute `name` to equal `value`
    pub fn insert_ea(&mut self, name: &str, value: &EaValue) {
        self.insert(format!("*{name}"), value.to_filter_string());
    }

    /// Constraint for `field`, if any
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Number of constraints
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the filter is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Constraints in field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{parts}}}")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchFilter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Field selection and search payload sent with a read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    /// Request the descriptor's full return-field set instead of the server defaults
    pub return_all_fields: bool,
    /// Exact-match constraints
    pub search: SearchFilter,
    /// Search on the grid master even when connected to a member (`_proxy_search=GM`)
    pub force_proxy: bool,
    /// Enable WAPI paging with this page size
    pub page_size: Option<u32>,
}

impl QueryParams {
    /// Build query parameters. Pure: equal inputs give equal values.
    pub fn new(return_all_fields: bool, search: SearchFilter) -> Self {
        Self {
            return_all_fields,
            search,
            force_proxy: false,
            page_size: None,
        }
    }

    /// Force the search through the grid master
    #[must_use]
    pub fn with_force_proxy(mut self) -> Self {
        self.force_proxy = true;
        self
    }

    /// Page through results `size` objects at a time
    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Flatten into WAPI query-string pairs for `descriptor`.
    ///
    /// Paging pairs are left to the transport, which owns the page cursor.
    pub fn to_pairs(&self, descriptor: &Descriptor) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if self.return_all_fields && !descriptor.return_fields().is_empty() {
            pairs.push((
                "_return_fields".to_string(),
                descriptor.return_fields().join(","),
            ));
        }
        if self.force_proxy {
            pairs.push(("_proxy_search".to_string(), "GM".to_string()));
        }
        pairs.extend(self.search.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> Descriptor {
        Descriptor::new("record:mx", &["name", "preference"])
    }

    #[test]
    fn test_new_is_pure() {
        let filter = SearchFilter::new().with("name", "a7.test.com").with("view", "default");
        assert_eq!(
            QueryParams::new(true, filter.clone()),
            QueryParams::new(true, filter)
        );
    }

    #[test]
    fn test_numbers_become_decimal_strings() {
        let mut filter = SearchFilter::new();
        filter.insert_number("preference", 10u32);
        filter.insert_number("port", 65535u16);
        assert_eq!(filter.get("preference"), Some("10"));
        assert_eq!(filter.get("port"), Some("65535"));
    }

    #[test]
    fn test_ea_constraints_are_prefixed() {
        let mut filter = SearchFilter::new();
        filter.insert_ea("Site", &EaValue::from("Blr"));
        filter.insert_ea("Cloud API Owned", &EaValue::Bool(true));
        assert_eq!(filter.get("*Site"), Some("Blr"));
        assert_eq!(filter.get("*Cloud API Owned"), Some("True"));
    }

    #[test]
    fn test_insert_opt_skips_none() {
        let mut filter = SearchFilter::new();
        filter.insert_opt("view", None);
        filter.insert_opt("name", Some("host"));
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_to_pairs() {
        let params = QueryParams::new(true, SearchFilter::new().with("view", "default"))
            .with_force_proxy();
        assert_eq!(
            params.to_pairs(&descriptor()),
            vec![
                ("_return_fields".to_string(), "name,preference".to_string()),
                ("_proxy_search".to_string(), "GM".to_string()),
                ("view".to_string(), "default".to_string()),
            ]
        );

        let defaults_only = QueryParams::new(false, SearchFilter::new());
        assert!(defaults_only.to_pairs(&descriptor()).is_empty());
    }

    #[test]
    fn test_display_lists_criteria() {
        let filter = SearchFilter::new().with("name", "x").with("view", "default");
        assert_eq!(filter.to_string(), "{name=x, view=default}");
    }
}
