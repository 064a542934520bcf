use minijinja::Value;
use minijinja::value::ValueKind;

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn of(value: &Value) -> Option<Self> {
        if value.kind() != ValueKind::Number {
            return None;
        }
        if let Ok(int) = i64::try_from(value.clone()) {
            return Some(Number::Int(int));
        }
        f64::try_from(value.clone()).ok().map(Number::Float)
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::Int(int) => int as f64,
            Number::Float(float) => float,
        }
    }
}

fn zero() -> Value {
    Value::from(0)
}

fn float(result: f64) -> Value {
    if result.is_finite() { Value::from(result) } else { zero() }
}

fn apply(
    a: &Value,
    b: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Value {
    match (Number::of(a), Number::of(b)) {
        (Some(Number::Int(a)), Some(Number::Int(b))) => int_op(a, b).map(Value::from).unwrap_or_else(zero),
        (Some(a), Some(b)) => float(float_op(a.as_f64(), b.as_f64())),
        _ => zero(),
    }
}

pub fn add(a: Value, b: Value) -> Value {
    apply(&a, &b, i64::checked_add, |a, b| a + b)
}

pub fn subtract(a: Value, b: Value) -> Value {
    apply(&a, &b, i64::checked_sub, |a, b| a - b)
}

pub fn multiply(a: Value, b: Value) -> Value {
    apply(&a, &b, i64::checked_mul, |a, b| a * b)
}

/// Division by zero yields `0`. Integer operands that divide evenly stay integers.
pub fn divide(a: Value, b: Value) -> Value {
    match (Number::of(&a), Number::of(&b)) {
        (Some(_), Some(b)) if b.as_f64() == 0.0 => zero(),
        (Some(Number::Int(a)), Some(Number::Int(b))) if a.checked_rem(b) == Some(0) => {
            a.checked_div(b).map(Value::from).unwrap_or_else(zero)
        }
        (Some(a), Some(b)) => float(a.as_f64() / b.as_f64()),
        _ => zero(),
    }
}

pub fn modulo(a: Value, b: Value) -> Value {
    match (Number::of(&a), Number::of(&b)) {
        (Some(Number::Int(a)), Some(Number::Int(b))) => {
            a.checked_rem_euclid(b).map(Value::from).unwrap_or_else(zero)
        }
        (Some(a), Some(b)) if b.as_f64() != 0.0 => float(a.as_f64().rem_euclid(b.as_f64())),
        _ => zero(),
    }
}

pub fn round(value: Value, places: Option<Value>) -> Value {
    let Some(number) = Number::of(&value) else {
        return zero();
    };
    let places = places.and_then(|p| i32::try_from(p).ok()).unwrap_or(0).clamp(0, 10);
    let factor = 10f64.powi(places);
    let rounded = (number.as_f64() * factor).round() / factor;
    if places == 0 { Value::from(rounded as i64) } else { float(rounded) }
}
