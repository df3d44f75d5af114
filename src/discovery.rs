//! Field discovery over arbitrary JSON
//!
//! Enumerates addressable dot-notation field paths and builds a lightweight
//! structural summary. Both run only at configuration ("test") time to aid
//! field selection; nothing here is persisted.

use crate::types::JsonValue;
use serde_json::{json, Map, Value};

/// Enumerate dot-notation field paths, depth-first in document order
///
/// Every object key yields a path; non-array object values recurse with the
/// extended prefix, so parent and descendant paths both appear. Arrays are
/// sampled from their first element only; empty arrays and scalars contribute
/// nothing beyond their own key.
///
/// # Examples
///
/// ```
/// use dashsource::discovery::discover_fields;
/// use serde_json::json;
///
/// let fields = discover_fields(&json!({"a": {"b": 1}, "c": [{"d": 2}]}));
/// assert_eq!(fields, vec!["a", "a.b", "c", "c.d"]);
/// ```
pub fn discover_fields(value: &JsonValue) -> Vec<String> {
    let mut fields = Vec::new();
    collect_fields(value, None, &mut fields);
    fields
}

fn collect_fields(value: &Value, prefix: Option<&str>, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, val) in map {
                let path = match prefix {
                    Some(p) => format!("{p}.{key}"),
                    None => key.clone(),
                };
                out.push(path.clone());

                match val {
                    Value::Object(_) => collect_fields(val, Some(&path), out),
                    Value::Array(arr) => {
                        if let Some(first) = arr.first() {
                            if first.is_object() {
                                collect_fields(first, Some(&path), out);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        Value::Array(arr) => {
            // top-level arrays: the first element is the representative shape
            if let Some(first) = arr.first() {
                collect_fields(first, prefix, out);
            }
        }
        _ => {}
    }
}

/// Build a type-shape tree mirroring the discovery traversal
///
/// Scalars become their type tag, arrays become a one-element sample of the
/// first element's structure (or an empty array), objects become a map of
/// key to recursive structure.
pub fn structure_of(value: &JsonValue) -> JsonValue {
    match value {
        Value::Null => json!("null"),
        Value::Bool(_) => json!("boolean"),
        Value::Number(_) => json!("number"),
        Value::String(_) => json!("string"),
        Value::Array(arr) => match arr.first() {
            Some(first) => Value::Array(vec![structure_of(first)]),
            None => Value::Array(vec![]),
        },
        Value::Object(map) => {
            let mut shape = Map::new();
            for (key, val) in map {
                shape.insert(key.clone(), structure_of(val));
            }
            Value::Object(shape)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_discover_parent_before_child() {
        let fields = discover_fields(&json!({"a": {"b": 1}, "c": [{"d": 2}]}));
        assert_eq!(fields, vec!["a", "a.b", "c", "c.d"]);
    }

    #[test]
    fn test_discover_document_order() {
        let fields = discover_fields(&json!({"zeta": 1, "alpha": 2, "mid": {"x": 3}}));
        assert_eq!(fields, vec!["zeta", "alpha", "mid", "mid.x"]);
    }

    #[test]
    fn test_discover_deep_nesting_accumulates() {
        let fields = discover_fields(&json!({"a": {"b": {"c": 1}}}));
        assert_eq!(fields, vec!["a", "a.b", "a.b.c"]);
    }

    #[test]
    fn test_discover_top_level_array_samples_first() {
        let fields = discover_fields(&json!([{"id": 1, "name": "x"}, {"other": true}]));
        assert_eq!(fields, vec!["id", "name"]);
    }

    #[test]
    fn test_discover_empty_array_contributes_key_only() {
        let fields = discover_fields(&json!({"items": []}));
        assert_eq!(fields, vec!["items"]);
    }

    #[test]
    fn test_discover_array_of_scalars() {
        let fields = discover_fields(&json!({"tags": ["a", "b"]}));
        assert_eq!(fields, vec!["tags"]);
    }

    #[test]
    fn test_discover_scalars_and_null() {
        assert!(discover_fields(&json!(42)).is_empty());
        assert!(discover_fields(&json!("text")).is_empty());
        assert!(discover_fields(&json!(null)).is_empty());
        assert!(discover_fields(&json!([])).is_empty());
    }

    #[test]
    fn test_structure_scalars() {
        assert_eq!(structure_of(&json!("x")), json!("string"));
        assert_eq!(structure_of(&json!(1.5)), json!("number"));
        assert_eq!(structure_of(&json!(true)), json!("boolean"));
        assert_eq!(structure_of(&json!(null)), json!("null"));
    }

    #[test]
    fn test_structure_object() {
        let shape = structure_of(&json!({"id": 1, "meta": {"ok": true}}));
        assert_eq!(shape, json!({"id": "number", "meta": {"ok": "boolean"}}));
    }

    #[test]
    fn test_structure_array_samples_first_element() {
        let shape = structure_of(&json!([{"id": 1}, {"id": 2, "extra": "y"}]));
        assert_eq!(shape, json!([{"id": "number"}]));
    }

    #[test]
    fn test_structure_empty_array() {
        assert_eq!(structure_of(&json!([])), json!([]));
    }
}
