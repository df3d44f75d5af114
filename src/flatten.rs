//! Row flattening and field selection
//!
//! Turns a raw JSON payload into the normalized flat-record shape consumed by
//! the presentation layer: one map per row, dot-paths for fields that came
//! from nested objects, and a display name for every emitted field.

use crate::types::{JsonValue, Row, StringMap};
use serde::Serialize;
use serde_json::Value;

/// Normalized output of one flattening pass
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedData {
    /// Flattened rows, or row-per-key for object payloads
    pub rows: Vec<Row>,
    /// Field paths actually present, in first-seen order
    pub fields: Vec<String>,
    /// Field path -> human-readable label
    pub field_display_names: StringMap,
}

/// Flatten a payload into normalized rows
///
/// Array payloads flatten each element independently: nested non-array
/// objects merge into the parent key space as `parent.key` (one pass only,
/// so doubly-nested objects remain object values), and nested arrays stay
/// intact at their key. Object payloads transpose into one row per
/// top-level key, shaped `{name, value}`. Scalar payloads produce nothing.
///
/// An empty `selected_fields` keeps every field; otherwise rows and the
/// field list are restricted to the selection (absent keys are omitted from
/// a row, not set to null). Display names default to the trailing path
/// segment; entries in `display_names` override verbatim.
pub fn flatten(
    payload: &JsonValue,
    selected_fields: &[String],
    display_names: &StringMap,
) -> FlattenedData {
    let rows = match payload {
        Value::Array(elements) => elements.iter().map(flatten_element).collect(),
        Value::Object(map) => transpose_object(map),
        _ => Vec::new(),
    };

    finish(rows, selected_fields, display_names)
}

/// Apply selection and display-name resolution to already-flat rows
///
/// Adapters that map backend responses into flat records themselves (JIRA,
/// SMAX) share this tail of the pipeline.
pub fn finish(rows: Vec<Row>, selected_fields: &[String], display_names: &StringMap) -> FlattenedData {
    let mut fields: Vec<String> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !fields.iter().any(|f| f == key) {
                fields.push(key.clone());
            }
        }
    }

    let (rows, fields) = if selected_fields.is_empty() {
        (rows, fields)
    } else {
        let rows: Vec<Row> = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .filter(|(key, _)| selected_fields.contains(key))
                    .collect()
            })
            .collect();
        let fields: Vec<String> = fields
            .into_iter()
            .filter(|f| selected_fields.contains(f))
            .collect();
        (rows, fields)
    };

    let field_display_names = resolve_display_names(&fields, display_names);

    FlattenedData {
        rows,
        fields,
        field_display_names,
    }
}

/// Flatten one array element into a row
///
/// Non-object elements have no enumerable keys and yield an empty row.
fn flatten_element(element: &Value) -> Row {
    let mut row = Row::new();

    if let Value::Object(map) = element {
        for (key, val) in map {
            match val {
                Value::Object(inner) => {
                    for (inner_key, inner_val) in inner {
                        row.insert(format!("{key}.{inner_key}"), inner_val.clone());
                    }
                }
                _ => {
                    row.insert(key.clone(), val.clone());
                }
            }
        }
    }

    row
}

/// Row-per-key transposition for scalar "summary" objects
fn transpose_object(map: &serde_json::Map<String, Value>) -> Vec<Row> {
    map.iter()
        .map(|(key, val)| {
            let mut row = Row::new();
            row.insert("name".to_string(), Value::String(key.clone()));
            row.insert("value".to_string(), val.clone());
            row
        })
        .collect()
}

/// Default display name: the trailing segment after the last `.`
fn default_display_name(field: &str) -> &str {
    field.rsplit('.').next().unwrap_or(field)
}

fn resolve_display_names(fields: &[String], overrides: &StringMap) -> StringMap {
    fields
        .iter()
        .map(|field| {
            let label = overrides
                .get(field)
                .cloned()
                .unwrap_or_else(|| default_display_name(field).to_string());
            (field.clone(), label)
        })
        .collect()
}

/// Presentation-time rendering policy for a single cell
///
/// Objects and arrays serialize as compact JSON, null renders as an empty
/// string, strings render unquoted, and everything else uses its natural
/// string conversion.
pub fn display_value(value: &JsonValue) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => {
            serde_json::to_string(value).unwrap_or_default()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    fn no_overrides() -> StringMap {
        HashMap::new()
    }

    #[test]
    fn test_flatten_array_of_nested_objects() {
        let out = flatten(&json!([{"a": {"b": 1}}, {"a": {"b": 2}}]), &[], &no_overrides());

        assert_eq!(out.rows.len(), 2);
        assert_eq!(out.rows[0].get("a.b").unwrap(), &json!(1));
        assert_eq!(out.rows[1].get("a.b").unwrap(), &json!(2));
        assert_eq!(out.fields, vec!["a.b"]);
        assert_eq!(out.field_display_names.get("a.b").unwrap(), "b");
    }

    #[test]
    fn test_flatten_single_pass_only() {
        // doubly-nested objects stay intact at their dotted key
        let out = flatten(&json!([{"a": {"b": {"c": 1}}}]), &[], &no_overrides());
        assert_eq!(out.rows[0].get("a.b").unwrap(), &json!({"c": 1}));
        assert_eq!(out.fields, vec!["a.b"]);
    }

    #[test]
    fn test_flatten_nested_array_stays_intact() {
        let out = flatten(&json!([{"id": 1, "tags": [{"t": "x"}]}]), &[], &no_overrides());
        assert_eq!(out.rows[0].get("tags").unwrap(), &json!([{"t": "x"}]));
        assert_eq!(out.fields, vec!["id", "tags"]);
    }

    #[test]
    fn test_flatten_object_transposes_row_per_key() {
        let out = flatten(&json!({"x": 1, "y": 2}), &[], &no_overrides());

        assert_eq!(out.rows.len(), 2);
        assert_eq!(out.rows[0].get("name").unwrap(), &json!("x"));
        assert_eq!(out.rows[0].get("value").unwrap(), &json!(1));
        assert_eq!(out.rows[1].get("name").unwrap(), &json!("y"));
        assert_eq!(out.rows[1].get("value").unwrap(), &json!(2));
        assert_eq!(out.fields, vec!["name", "value"]);
    }

    #[test]
    fn test_flatten_selection_filters_rows_and_fields() {
        let payload = json!([{"a": {"b": 1}, "extra": true}, {"a": {"b": 2}, "extra": false}]);
        let selected = vec!["a.b".to_string()];
        let mut overrides = HashMap::new();
        overrides.insert("a.b".to_string(), "Value B".to_string());

        let out = flatten(&payload, &selected, &overrides);

        assert_eq!(out.fields, vec!["a.b"]);
        for row in &out.rows {
            assert_eq!(row.len(), 1);
            assert!(row.contains_key("a.b"));
        }
        assert_eq!(out.field_display_names.get("a.b").unwrap(), "Value B");
    }

    #[test]
    fn test_flatten_selection_omits_absent_keys() {
        let payload = json!([{"a": 1, "b": 2}, {"b": 3}]);
        let selected = vec!["a".to_string()];

        let out = flatten(&payload, &selected, &no_overrides());

        assert_eq!(out.rows[0].get("a").unwrap(), &json!(1));
        assert!(out.rows[1].is_empty());
    }

    #[test]
    fn test_flatten_fields_first_seen_order() {
        let payload = json!([{"b": 1}, {"a": 2, "b": 3}]);
        let out = flatten(&payload, &[], &no_overrides());
        assert_eq!(out.fields, vec!["b", "a"]);
    }

    #[test]
    fn test_flatten_scalar_payload_is_empty() {
        let out = flatten(&json!(42), &[], &no_overrides());
        assert!(out.rows.is_empty());
        assert!(out.fields.is_empty());
    }

    #[test]
    fn test_flatten_non_object_array_elements_yield_empty_rows() {
        let out = flatten(&json!([1, 2]), &[], &no_overrides());
        assert_eq!(out.rows.len(), 2);
        assert!(out.rows[0].is_empty());
        assert!(out.fields.is_empty());
    }

    #[test]
    fn test_display_name_default_trailing_segment() {
        let out = flatten(&json!([{"a": {"b": {"c": 1}}}]), &[], &no_overrides());
        assert_eq!(out.field_display_names.get("a.b").unwrap(), "b");

        let deep = finish(
            vec![{
                let mut row = Row::new();
                row.insert("a.b.c".to_string(), json!(1));
                row
            }],
            &[],
            &no_overrides(),
        );
        assert_eq!(deep.field_display_names.get("a.b.c").unwrap(), "c");
    }

    #[test]
    fn test_display_value_policy() {
        assert_eq!(display_value(&json!(null)), "");
        assert_eq!(display_value(&json!("text")), "text");
        assert_eq!(display_value(&json!(7)), "7");
        assert_eq!(display_value(&json!(true)), "true");
        assert_eq!(display_value(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(display_value(&json!([1, 2])), "[1,2]");
    }
}
