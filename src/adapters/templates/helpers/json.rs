use minijinja::Value;

use super::text;

/// Compact JSON; undefined encodes as `null`.
pub fn to_json(value: Value) -> String {
    serde_json::to_string(&value).unwrap_or_else(|_| "null".to_string())
}

pub fn to_json_pretty(value: Value) -> String {
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "null".to_string())
}

/// Escape text for use inside an existing JSON string literal.
pub fn json_escape(value: Value) -> String {
    let quoted = json_string(value);
    quoted[1..quoted.len() - 1].to_string()
}

/// Text as a complete, quoted JSON string literal.
pub fn json_string(value: Value) -> String {
    serde_json::to_string(&text(&value)).unwrap_or_else(|_| "\"\"".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn to_json_encodes_values() {
        assert_eq!(to_json(Value::from(vec!["a", "b"])), r#"["a","b"]"#);
        assert_eq!(to_json(Value::from(true)), "true");
        assert_eq!(to_json(Value::UNDEFINED), "null");
        let map: BTreeMap<&str, i32> = [("retries", 3)].into_iter().collect();
        assert_eq!(to_json(Value::from_serialize(&map)), r#"{"retries":3}"#);
    }

    #[test]
    fn pretty_json_is_indented() {
        let map: BTreeMap<&str, i32> = [("a", 1)].into_iter().collect();
        assert_eq!(to_json_pretty(Value::from_serialize(&map)), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn escaping() {
        assert_eq!(json_escape(Value::from("say \"hi\"\n")), "say \\\"hi\\\"\\n");
        assert_eq!(json_string(Value::from("a\\b")), "\"a\\\\b\"");
        assert_eq!(json_string(Value::UNDEFINED), "\"\"");
    }
}
