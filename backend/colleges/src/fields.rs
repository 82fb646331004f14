//! Column name mapping.
//!
//! Store rows use backend column names (`college_type`, `ownership_type`, `official_website`),
//! the public API uses the stable names. Rows from either side are accepted: every field is
//! looked up under its stable key first and then under its backend column. A `null` counts
//! as absent and falls through to the next key.
use serde_json::{Map, Value};

pub type Row = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Name,
    District,
    Type,
    Ownership,
    ImageUrl,
    Website,
    Verified,
    CreatedAt,
}

/// Columns requested from the store, in backend naming.
pub const STORE_COLUMNS: &str =
    "id,name,district,college_type,ownership_type,official_website,image_url,verified,created_at";

/// `(preferred key, fallback key)`
pub const fn keys(field: Field) -> (&'static str, Option<&'static str>) {
    match field {
        Field::Id => ("id", None),
        Field::Name => ("name", None),
        Field::District => ("district", None),
        Field::Type => ("type", Some("college_type")),
        Field::Ownership => ("ownership", Some("ownership_type")),
        Field::ImageUrl => ("image_url", None),
        Field::Website => ("website", Some("official_website")),
        Field::Verified => ("verified", None),
        Field::CreatedAt => ("created_at", None),
    }
}

pub fn lookup(row: &Row, field: Field) -> Option<&Value> {
    let (preferred, fallback) = keys(field);

    present(row, preferred).or_else(|| fallback.and_then(|key| present(row, key)))
}

fn present<'a>(row: &'a Row, key: &str) -> Option<&'a Value> {
    row.get(key).filter(|value| !value.is_null())
}

/// Text fields: strings as-is, numbers and booleans stringified, anything else empty.
pub fn text(row: &Row, field: Field) -> String {
    lookup(row, field).and_then(scalar_string).unwrap_or_default()
}

/// Optional URL fields: empty strings count as absent.
pub fn optional_text(row: &Row, field: Field) -> Option<String> {
    lookup(row, field)
        .and_then(scalar_string)
        .filter(|value| !value.is_empty())
}

pub fn flag(row: &Row, field: Field) -> bool {
    match lookup(row, field) {
        Some(Value::Bool(value)) => *value,
        Some(Value::String(value)) => value.eq_ignore_ascii_case("true"),
        Some(Value::Number(value)) => value.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
