use minijinja::Value;

use super::text;

pub fn upper(value: Value) -> String {
    text(&value).to_uppercase()
}

pub fn lower(value: Value) -> String {
    text(&value).to_lowercase()
}

pub fn trim(value: Value) -> String {
    text(&value).trim().to_string()
}

/// Split on non-alphanumeric characters and lower-to-upper case boundaries.
fn words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in input.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn camel_case(value: Value) -> String {
    let words = words(&text(&value));
    let mut out = String::new();
    for (index, word) in words.iter().enumerate() {
        if index == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

pub fn pascal_case(value: Value) -> String {
    words(&text(&value)).iter().map(|word| capitalize(word)).collect()
}

pub fn snake_case(value: Value) -> String {
    words(&text(&value)).join("_")
}

pub fn kebab_case(value: Value) -> String {
    words(&text(&value)).join("-")
}

pub fn title_case(value: Value) -> String {
    words(&text(&value)).iter().map(|word| capitalize(word)).collect::<Vec<_>>().join(" ")
}

/// First `n` characters. A missing or negative `n` leaves the text unchanged.
pub fn truncate(value: Value, n: Option<Value>) -> String {
    let text = text(&value);
    match n.and_then(|n| usize::try_from(n).ok()) {
        Some(n) => text.chars().take(n).collect(),
        None => text,
    }
}

pub fn replace(value: Value, from: Value, to: Value) -> String {
    let from = text(&from);
    let text = text(&value);
    if from.is_empty() {
        return text;
    }
    text.replace(&from, &super::text(&to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Value {
        Value::from(s)
    }

    #[test]
    fn case_conversions() {
        assert_eq!(camel_case(v("claim status query")), "claimStatusQuery");
        assert_eq!(pascal_case(v("claim-status_query")), "ClaimStatusQuery");
        assert_eq!(snake_case(v("queryMethods")), "query_methods");
        assert_eq!(kebab_case(v("Enhanced Claim Status")), "enhanced-claim-status");
        assert_eq!(title_case(v("attachments-ingest")), "Attachments Ingest");
    }

    #[test]
    fn undefined_and_none_become_empty() {
        assert_eq!(upper(Value::UNDEFINED), "");
        assert_eq!(lower(Value::from(())), "");
        assert_eq!(camel_case(Value::UNDEFINED), "");
    }

    #[test]
    fn numbers_are_stringified() {
        assert_eq!(upper(Value::from(42)), "42");
    }

    #[test]
    fn truncate_and_replace() {
        assert_eq!(truncate(v("mco001-health"), Some(Value::from(6))), "mco001");
        assert_eq!(truncate(v("abc"), Some(Value::from(-1))), "abc");
        assert_eq!(truncate(v("abc"), None), "abc");
        assert_eq!(replace(v("a.b.c"), v("."), v("/")), "a/b/c");
        assert_eq!(replace(v("abc"), v(""), v("x")), "abc");
        assert_eq!(trim(v("  x  ")), "x");
    }
}
