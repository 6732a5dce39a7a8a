//! Entity accessors for JSON-LD crate entities
//!
//! Entities are plain `serde_json::Value` objects. Accessors here normalize
//! the loose JSON-LD shapes found in crates: scalar-or-list property values,
//! string-or-reference ids, and string-or-number SHACL counts.

use serde_json::Value;

/// Extract @id from an entity
pub fn extract_id(entity: &Value) -> Option<&str> {
    entity.get("@id").and_then(|v| v.as_str())
}

/// Extract @type as a list of type names
pub fn extract_types(entity: &Value) -> Vec<String> {
    match entity.get("@type") {
        Some(Value::String(t)) => vec![t.clone()],
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        _ => vec![],
    }
}

/// Check if an entity has a specific @type
pub fn has_type(entity: &Value, type_name: &str) -> bool {
    extract_types(entity).iter().any(|t| t == type_name)
}

/// View a property value as a list
///
/// Scalars and objects become one-element lists, missing keys become
/// empty lists. This mirrors the `array: true` loader convention so
/// callers never branch on multiplicity.
pub fn values<'a>(entity: &'a Value, key: &str) -> Vec<&'a Value> {
    match entity.get(key) {
        Some(Value::Array(arr)) => arr.iter().collect(),
        Some(v) => vec![v],
        None => vec![],
    }
}

/// First string value of a property, skipping non-string entries
pub fn first_str<'a>(entity: &'a Value, key: &str) -> Option<&'a str> {
    values(entity, key).into_iter().find_map(|v| v.as_str())
}

/// Extract the target id from a reference value
///
/// Accepts both `{"@id": "..."}` objects and bare strings.
pub fn ref_id(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        Value::Object(_) => value.get("@id").and_then(|v| v.as_str()),
        _ => None,
    }
}

/// Display label with an ordered fallback: name, rdfs:label, @id
///
/// Every place that sorts, anchors or titles an entity goes through this
/// single fallback so ordering and anchor targets stay consistent.
pub fn display_label(entity: &Value) -> String {
    first_str(entity, "name")
        .or_else(|| first_str(entity, "rdfs:label"))
        .or_else(|| extract_id(entity))
        .unwrap_or_default()
        .to_string()
}

/// Description with fallback: description, rdfs:comment, empty
pub fn description(entity: &Value) -> String {
    first_str(entity, "description")
        .or_else(|| first_str(entity, "rdfs:comment"))
        .unwrap_or_default()
        .to_string()
}

/// Read an integer-valued constraint such as sh:minCount
///
/// Profile crates carry counts as JSON numbers or strings; both parse.
pub fn int_value(entity: &Value, key: &str) -> Option<i64> {
    values(entity, key).into_iter().find_map(|v| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Collapse all whitespace runs to single spaces
///
/// Multi-line text inside table cells breaks markdown rendering, so all
/// text interpolated into fragments is normalized first.
pub fn clean(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check whether an id is an http(s) URI
pub fn is_http_uri(id: &str) -> bool {
    id.starts_with("http://") || id.starts_with("https://")
}

/// Local name of an identifier: the segment after the last '#' or '/'
///
/// "https://schema.org/Dataset" -> "Dataset", "#Book" -> "Book"
pub fn local_name(id: &str) -> &str {
    let after_hash = id.rsplit('#').next().unwrap_or(id);
    after_hash.rsplit('/').next().unwrap_or(after_hash)
}
