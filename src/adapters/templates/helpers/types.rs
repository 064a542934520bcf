use minijinja::Value;
use minijinja::value::ValueKind;

pub fn is_array(value: Value) -> bool {
    value.kind() == ValueKind::Seq
}

pub fn is_object(value: Value) -> bool {
    value.kind() == ValueKind::Map
}

pub fn is_string(value: Value) -> bool {
    value.kind() == ValueKind::String
}

pub fn is_number(value: Value) -> bool {
    value.kind() == ValueKind::Number
}

pub fn is_bool(value: Value) -> bool {
    value.kind() == ValueKind::Bool
}

pub fn is_defined(value: Value) -> bool {
    !value.is_undefined()
}

/// Undefined, none, and zero-length strings, sequences and maps are empty.
pub fn is_empty(value: Value) -> bool {
    match value.kind() {
        ValueKind::Undefined | ValueKind::None => true,
        ValueKind::String | ValueKind::Seq | ValueKind::Map => value.len() == Some(0),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn kind_predicates() {
        assert!(is_array(Value::from(vec![1, 2])));
        assert!(!is_array(Value::from("12")));
        assert!(is_object(Value::from_serialize(BTreeMap::from([("a", 1)]))));
        assert!(is_string(Value::from("x")));
        assert!(is_number(Value::from(1.5)));
        assert!(is_bool(Value::from(false)));
        assert!(!is_defined(Value::UNDEFINED));
        assert!(is_defined(Value::from(())));
    }

    #[test]
    fn emptiness() {
        assert!(is_empty(Value::UNDEFINED));
        assert!(is_empty(Value::from("")));
        assert!(is_empty(Value::from(Vec::<i32>::new())));
        assert!(!is_empty(Value::from(0)));
        assert!(!is_empty(Value::from(vec!["a"])));
    }
}
