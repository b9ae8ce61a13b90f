use serde_json::{Map, Value};

/// A vacancy exactly as the listing source produced it (and as the store keeps it).
///
/// Keys used by the domain: `name`, `link`, `salary`, `description`, `area`, `contact`.
/// Anything else is carried along untouched.
pub type RawVacancy = Map<String, Value>;

/// Key the store deduplicates on.
pub const NAME_KEY: &str = "name";

/// Renders a raw field as text: strings verbatim, everything else as compact JSON.
///
/// Returns `None` for absent or `null` fields.
pub fn field_text(raw: &RawVacancy, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Dedup key of a raw record: a non-empty `name` value.
pub fn dedup_name(raw: &RawVacancy) -> Option<&Value> {
    match raw.get(NAME_KEY)? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        value => Some(value),
    }
}
