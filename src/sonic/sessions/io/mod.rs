pub mod lab;
pub mod template;
pub mod testbed;

use serde_yaml::Value;
use serde_yaml::Index;

/// Looks up `key` in a YAML mapping, treating an explicit `null` like an
/// absent key. Non-mapping values have no keys. Keys may be strings or
/// arbitrary YAML values, so `2024:` is found by the number 2024.
pub(crate) fn present<'a, I: Index>(value: &'a Value, key: I) -> Option<&'a Value> {
    value.get(key).filter(|found| !found.is_null())
}

/// Textual form of a scalar YAML value; `None` for null and collections.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Short name of a YAML value's shape, for error messages.
pub(crate) fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
