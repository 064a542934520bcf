use minijinja::Value;
use minijinja::value::ValueKind;

use super::text;

/// Elements of a sequence; anything else has none.
fn items(value: &Value) -> Vec<Value> {
    match value.kind() {
        ValueKind::Seq | ValueKind::Iterable => {
            value.try_iter().map(|iter| iter.collect()).unwrap_or_default()
        }
        _ => Vec::new(),
    }
}

/// Membership in a sequence, or substring test when both sides are strings.
pub fn includes(haystack: Value, needle: Value) -> bool {
    if let (Some(haystack), Some(needle)) = (haystack.as_str(), needle.as_str()) {
        return haystack.contains(needle);
    }
    items(&haystack).contains(&needle)
}

pub fn join(value: Value, separator: Option<Value>) -> String {
    let separator = separator.map(|s| text(&s)).unwrap_or_else(|| ", ".to_string());
    items(&value).iter().map(text).collect::<Vec<_>>().join(&separator)
}

/// Length of a sequence, map or string; `0` for anything else.
pub fn count(value: Value) -> usize {
    match value.kind() {
        ValueKind::String => value.as_str().map(|s| s.chars().count()).unwrap_or(0),
        ValueKind::Seq | ValueKind::Map => value.len().unwrap_or(0),
        ValueKind::Iterable => items(&value).len(),
        _ => 0,
    }
}

pub fn first(value: Value) -> Value {
    items(&value).into_iter().next().unwrap_or_else(|| Value::from(()))
}

pub fn last(value: Value) -> Value {
    items(&value).pop().unwrap_or_else(|| Value::from(()))
}
