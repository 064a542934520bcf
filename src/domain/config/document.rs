//! Raw configuration document as read from disk.

use serde_json::{Map, Value};

use crate::domain::AppError;

/// A parsed configuration document whose root is a JSON object.
///
/// Keeps the original text so the packager can copy it verbatim into the bundle.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    raw: String,
    root: Map<String, Value>,
}

impl ConfigDocument {
    /// Parse configuration text. Anything that is not a JSON object is a
    /// configuration error, not a validation failure.
    pub fn parse(raw: impl Into<String>) -> Result<Self, AppError> {
        let raw = raw.into();
        let value: Value = serde_json::from_str(&raw)
            .map_err(|e| AppError::config_error(format!("not a valid JSON document: {e}")))?;
        match value {
            Value::Object(root) => Ok(Self { raw, root }),
            other => Err(AppError::config_error(format!(
                "configuration root must be an object, found {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn from_value(value: Value) -> Result<Self, AppError> {
        let raw = serde_json::to_string_pretty(&value)
            .map_err(|e| AppError::config_error(format!("cannot serialize configuration: {e}")))?;
        Self::parse(raw)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
