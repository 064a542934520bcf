//! Quoting for values interpolated into generated source files.

use minijinja::Value;

use super::text;

/// A POSIX shell word that expands to exactly the input text.
pub fn shell_quote(value: Value) -> String {
    format!("'{}'", text(&value).replace('\'', r"'\''"))
}

/// A single-quoted Bicep string literal. Interpolation (`${`) is escaped.
pub fn bicep_string(value: Value) -> String {
    let mut out = String::from("'");
    for c in text(&value).chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '\'' => out.push_str(r"\'"),
            '$' => out.push_str(r"\$"),
            '\n' => out.push_str(r"\n"),
            '\r' => out.push_str(r"\r"),
            '\t' => out.push_str(r"\t"),
            c if c.is_control() => out.push_str(&format!(r"\u{{{:X}}}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Collapse whitespace and control characters into single spaces, for
/// text placed inside a one-line comment.
pub fn single_line(value: Value) -> String {
    text(&value)
        .split(|c: char| c.is_whitespace() || c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_quote_wraps_and_escapes_single_quotes() {
        assert_eq!(shell_quote(Value::from("eastus")), "'eastus'");
        assert_eq!(shell_quote(Value::from("team=a\" b")), "'team=a\" b'");
        assert_eq!(shell_quote(Value::from("it's $(id)")), r"'it'\''s $(id)'");
        assert_eq!(shell_quote(Value::UNDEFINED), "''");
    }

    #[test]
    fn bicep_string_escapes_quotes_and_interpolation() {
        assert_eq!(bicep_string(Value::from("eastus")), "'eastus'");
        assert_eq!(bicep_string(Value::from("o'brien")), r"'o\'brien'");
        assert_eq!(bicep_string(Value::from("${secret}")), r"'\${secret}'");
        assert_eq!(bicep_string(Value::from("a\nb\\c")), r"'a\nb\\c'");
    }

    #[test]
    fn single_line_collapses_breaks() {
        assert_eq!(single_line(Value::from("Acme\ntouch /tmp/x")), "Acme touch /tmp/x");
        assert_eq!(single_line(Value::from("  a \r\n\t b  ")), "a b");
        assert_eq!(single_line(Value::from(42)), "42");
    }
}
