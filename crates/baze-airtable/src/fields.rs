//! Readers for loosely-shaped record fields.
//!
//! Linked-record and lookup columns come back as arrays even when they hold a
//! single value, and the same logical column has been renamed across schema
//! revisions. Business code reads fields only through these helpers.

use serde_json::{Map, Value};

/// First element of an array, or the value itself when it is a scalar.
///
/// Returns `None` for `null`, an empty array, or an array whose first element
/// is `null`; callers supply their own default.
#[must_use]
pub fn first_or_scalar(value: &Value) -> Option<&Value> {
    match value {
        Value::Null => None,
        Value::Array(items) => items.first().filter(|v| !v.is_null()),
        other => Some(other),
    }
}

/// Whether a field value counts as "set".
///
/// `null`, `false`, empty strings and empty arrays are treated as absent.
#[must_use]
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Number(_) | Value::Object(_) => true,
    }
}

/// Resolves the first present field among `aliases`, in priority order.
///
/// Returns the alias that matched together with its normalized value.
#[must_use]
pub fn resolve_aliased<'a>(
    fields: &'a Map<String, Value>,
    aliases: &[&'a str],
) -> Option<(&'a str, &'a Value)> {
    aliases.iter().find_map(|alias| {
        let value = fields.get(*alias).filter(|v| is_present(v))?;
        first_or_scalar(value).map(|v| (*alias, v))
    })
}

/// Renders a scalar as text. Arrays, objects and `null` yield `None`.
#[must_use]
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Returns the inner `value` of a `{ "value": ... }` wrapper object, or the
/// input unchanged.
#[must_use]
pub fn unwrap_value_object(value: &Value) -> &Value {
    match value {
        Value::Object(map) => map
            .get("value")
            .filter(|inner| is_present(inner))
            .unwrap_or(value),
        other => other,
    }
}

/// Text of a field after scalar-or-array normalization.
#[must_use]
pub fn text(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(first_or_scalar)
        .map(unwrap_value_object)
        .and_then(scalar_text)
}

/// Numeric value of a field. Numeric strings are accepted.
#[must_use]
pub fn number(fields: &Map<String, Value>, name: &str) -> Option<f64> {
    let value = fields.get(name).and_then(first_or_scalar)?;
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    }
}

/// Every scalar element of a field as text, in stored order.
///
/// A scalar field yields a single-element list; a missing field an empty one.
#[must_use]
pub fn string_list(fields: &Map<String, Value>, name: &str) -> Vec<String> {
    match fields.get(name) {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(value) => scalar_text(value).into_iter().collect(),
        None => Vec::new(),
    }
}

/// URL of the first attachment in an attachment field.
#[must_use]
pub fn attachment_url(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(first_or_scalar)
        .and_then(|attachment| attachment.get("url"))
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn first_or_scalar_takes_first_array_element() {
        let value = json!(["a", "b", "c"]);
        assert_eq!(first_or_scalar(&value), Some(&json!("a")));
    }

    #[test]
    fn first_or_scalar_passes_scalars_through() {
        let value = json!("a");
        assert_eq!(first_or_scalar(&value), Some(&json!("a")));
        let number = json!(7);
        assert_eq!(first_or_scalar(&number), Some(&json!(7)));
    }

    #[test]
    fn first_or_scalar_yields_none_for_null_and_empty() {
        assert_eq!(first_or_scalar(&Value::Null), None);
        assert_eq!(first_or_scalar(&json!([])), None);
        assert_eq!(
            first_or_scalar(&Value::Null).map_or("default", |_| "set"),
            "default"
        );
    }

    #[test]
    fn resolve_aliased_respects_priority_order() {
        let f = fields(json!({
            "id": "generic",
            "id_lavoratore": ["recW1"],
            "lavoratore_id": ""
        }));
        let resolved = resolve_aliased(&f, &["lavoratore_id", "id_lavoratore", "id"]);
        assert_eq!(resolved, Some(("id_lavoratore", &json!("recW1"))));
    }

    #[test]
    fn resolve_aliased_skips_empty_arrays() {
        let f = fields(json!({ "lavoratore_id": [], "id": "recX" }));
        assert_eq!(
            resolve_aliased(&f, &["lavoratore_id", "id"]),
            Some(("id", &json!("recX")))
        );
    }

    #[test]
    fn resolve_aliased_returns_none_when_no_alias_is_present() {
        let f = fields(json!({ "other": "x" }));
        assert_eq!(resolve_aliased(&f, &["lavoratore_id", "id"]), None);
    }

    #[test]
    fn text_unwraps_arrays_and_value_objects() {
        let f = fields(json!({
            "tipo_lavoro": ["Colf"],
            "match": { "value": "Alta" },
            "eta": 41
        }));
        assert_eq!(text(&f, "tipo_lavoro").as_deref(), Some("Colf"));
        assert_eq!(text(&f, "match").as_deref(), Some("Alta"));
        assert_eq!(text(&f, "eta").as_deref(), Some("41"));
        assert_eq!(text(&f, "missing"), None);
    }

    #[test]
    fn number_accepts_numbers_and_numeric_strings() {
        let f = fields(json!({ "a": [3], "b": "2,5", "c": "n/a" }));
        assert_eq!(number(&f, "a"), Some(3.0));
        assert_eq!(number(&f, "b"), Some(2.5));
        assert_eq!(number(&f, "c"), None);
    }

    #[test]
    fn string_list_handles_scalars_and_arrays() {
        let f = fields(json!({ "many": ["cucina", "stiro"], "one": "pulizie" }));
        assert_eq!(string_list(&f, "many"), vec!["cucina", "stiro"]);
        assert_eq!(string_list(&f, "one"), vec!["pulizie"]);
        assert!(string_list(&f, "none").is_empty());
    }

    #[test]
    fn attachment_url_reads_first_attachment() {
        let f = fields(json!({
            "foto": [{ "url": "https://cdn.example/1.jpg" }, { "url": "https://cdn.example/2.jpg" }]
        }));
        assert_eq!(
            attachment_url(&f, "foto").as_deref(),
            Some("https://cdn.example/1.jpg")
        );
        assert_eq!(attachment_url(&f, "missing"), None);
    }
}
