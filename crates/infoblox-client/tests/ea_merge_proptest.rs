#![allow(clippy::unwrap_used)]
//! Property-based tests for extensible attribute merging.

use infoblox_client::{Ea, EaDiff, EaValue};
use proptest::prelude::*;

fn ea_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Site", "Owner", "Tenant ID", "Rack", "Managed"]).prop_map(String::from)
}

fn ea_value() -> impl Strategy<Value = EaValue> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,12}".prop_map(EaValue::String),
        prop::sample::select(vec!["True", "False"]).prop_map(EaValue::from),
        any::<i64>().prop_map(EaValue::Int),
        any::<bool>().prop_map(EaValue::Bool),
    ]
}

fn ea() -> impl Strategy<Value = Ea> {
    prop::collection::vec((ea_name(), ea_value()), 0..5).prop_map(|pairs| pairs.into_iter().collect())
}

fn diff() -> impl Strategy<Value = EaDiff> {
    (ea(), prop::collection::vec(ea_name(), 0..3)).prop_map(|(add, remove)| {
        let diff = add.iter().fold(EaDiff::new(), |d, (k, v)| d.add(k, v.clone()));
        remove.into_iter().fold(diff, |d, name| d.remove(name))
    })
}

proptest! {
    #[test]
    fn merge_is_idempotent(base in ea(), diff in diff()) {
        let mut once = base.clone();
        once.merge(&diff);
        let mut twice = once.clone();
        twice.merge(&diff);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn removed_names_are_absent(base in ea(), diff in diff()) {
        let mut merged = base;
        merged.merge(&diff);
        for name in diff.remove.keys() {
            prop_assert!(!merged.contains_key(name));
        }
    }

    #[test]
    fn added_names_carry_added_values(base in ea(), diff in diff()) {
        let mut merged = base;
        merged.merge(&diff);
        for (name, value) in diff.add.iter() {
            if !diff.remove.contains_key(name) {
                prop_assert_eq!(merged.get(name), Some(value));
            }
        }
    }

    #[test]
    fn untouched_names_are_preserved(base in ea(), diff in diff()) {
        let mut merged = base.clone();
        merged.merge(&diff);
        for (name, value) in base.iter() {
            if !diff.add.contains_key(name) && !diff.remove.contains_key(name) {
                prop_assert_eq!(merged.get(name), Some(value));
            }
        }
    }

    #[test]
    fn wire_encoding_round_trips(base in ea()) {
        let decoded: Ea = serde_json::from_value(base.encode()).unwrap();
        prop_assert_eq!(decoded, base);
    }
}
