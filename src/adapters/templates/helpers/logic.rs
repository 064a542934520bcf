use std::cmp::Ordering;

use minijinja::value::{Rest, ValueKind};
use minijinja::{Error, ErrorKind, Value};

use super::text;

/// Detail prefix of the error raised by `required`; the engine reads the
/// variable name back out of it.
pub const REQUIRED_PREFIX: &str = "required variable ";

pub fn eq(a: Value, b: Value) -> bool {
    a == b
}

pub fn ne(a: Value, b: Value) -> bool {
    a != b
}

/// Numbers compare numerically and strings lexically; mixed kinds never order.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a.kind(), b.kind()) {
        (ValueKind::Number, ValueKind::Number) => {
            let a = f64::try_from(a.clone()).ok()?;
            let b = f64::try_from(b.clone()).ok()?;
            a.partial_cmp(&b)
        }
        (ValueKind::String, ValueKind::String) => Some(a.as_str()?.cmp(b.as_str()?)),
        _ => None,
    }
}

pub fn gt(a: Value, b: Value) -> bool {
    compare(&a, &b) == Some(Ordering::Greater)
}

pub fn gte(a: Value, b: Value) -> bool {
    matches!(compare(&a, &b), Some(Ordering::Greater | Ordering::Equal))
}

pub fn lt(a: Value, b: Value) -> bool {
    compare(&a, &b) == Some(Ordering::Less)
}

pub fn lte(a: Value, b: Value) -> bool {
    matches!(compare(&a, &b), Some(Ordering::Less | Ordering::Equal))
}

pub fn and(values: Rest<Value>) -> bool {
    !values.is_empty() && values.iter().all(Value::is_true)
}

pub fn or(values: Rest<Value>) -> bool {
    values.iter().any(Value::is_true)
}

pub fn not(value: Value) -> bool {
    !value.is_true()
}

fn is_blank(value: &Value) -> bool {
    value.is_undefined() || value.is_none() || value.as_str().is_some_and(str::is_empty)
}

/// First argument that is defined, not none and not an empty string.
pub fn coalesce(values: Rest<Value>) -> Value {
    values.iter().find(|value| !is_blank(value)).cloned().unwrap_or_else(|| Value::from(()))
}

pub fn when(condition: Value, then: Value, otherwise: Option<Value>) -> Value {
    if condition.is_true() { then } else { otherwise.unwrap_or_else(|| Value::from(())) }
}

/// Pass `value` through, or fail the render naming the missing variable.
pub fn required(value: Value, name: Option<Value>) -> Result<Value, Error> {
    if !is_blank(&value) {
        return Ok(value);
    }
    let name = name.map(|n| text(&n)).filter(|n| !n.is_empty()).unwrap_or_else(|| "value".into());
    Err(Error::new(ErrorKind::UndefinedError, format!("{REQUIRED_PREFIX}'{name}' is missing")))
}
