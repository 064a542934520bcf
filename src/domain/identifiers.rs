/// Validates a payer identifier.
///
/// Checks:
/// - Length between 2 and 20
/// - Starts with an ASCII letter or digit
/// - Characters are ASCII alphanumeric, '-', or '_'
pub fn validate_payer_id(id: &str) -> bool {
    if !(2..=20).contains(&id.len()) {
        return false;
    }
    if !id.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        return false;
    }
    id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Validates a resource token: lowercase alphanumeric with single inner hyphens.
pub fn validate_resource_token(token: &str, min: usize, max: usize) -> bool {
    if !(min..=max).contains(&token.len()) {
        return false;
    }
    if token.starts_with('-') || token.ends_with('-') || token.contains("--") {
        return false;
    }
    token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
