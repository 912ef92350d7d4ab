//! Helper functions for the in-memory object store

use serde_json::Value;
use std::net::Ipv4Addr;

/// Human readable reference suffix the grid derives for `kind`
pub fn reference_suffix(kind: &str, object: &Value) -> String {
    let field = |name: &str| object.get(name).and_then(Value::as_str).unwrap_or_default();
    match kind {
        "networkview" => {
            let name = field("name");
            format!("{}/{}", name, name == "default")
        }
        "network" => format!("{}/{}", field("network"), field("network_view")),
        k if k.starts_with("record:") => format!("{}/{}", field("name"), field("view")),
        _ => field("name").to_string(),
    }
}

/// String form of a stored field for exact-match search
pub fn field_as_filter_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(field_as_filter_string)
                .collect::<Vec<_>>()
                .join(","),
        ),
        _ => None,
    }
}

/// Whether `object` satisfies a single `field=value` constraint.
///
/// Keys prefixed with `*` match extensible attribute values.
pub fn matches_constraint(object: &Value, field: &str, expected: &str) -> bool {
    let actual = match field.strip_prefix('*') {
        Some(ea_name) => object
            .get("extattrs")
            .and_then(|ea| ea.get(ea_name))
            .and_then(|entry| entry.get("value")),
        None => object.get(field),
    };
    actual
        .and_then(field_as_filter_string)
        .is_some_and(|actual| actual == expected)
}

/// Address `offset` hosts into `cidr`, if it fits
pub fn host_in_network(cidr: &str, offset: u32) -> Option<Ipv4Addr> {
    let (addr, len) = cidr.split_once('/')?;
    let base = u32::from(addr.parse::<Ipv4Addr>().ok()?);
    let len: u32 = len.parse().ok()?;
    if len > 32 {
        return None;
    }
    let size = 1u64 << (32 - len);
    if u64::from(offset) >= size.saturating_sub(1) {
        return None;
    }
    Some(Ipv4Addr::from(base.checked_add(offset)?))
}
