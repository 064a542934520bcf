//! Resource-name sanitizers for the target platform.
//!
//! All names are lowercase and length-bounded. Most allow inner hyphens;
//! storage accounts allow only letters and digits.

use serde::Serialize;

use super::config::PayerConfiguration;
use super::identifiers::validate_resource_token;

/// Maximum length of the shared naming prefix.
pub const PREFIX_MAX_LEN: usize = 16;
pub const PREFIX_MIN_LEN: usize = 3;

const STORAGE_ACCOUNT_MAX_LEN: usize = 24;
const KEY_VAULT_MAX_LEN: usize = 24;
const SERVICE_BUS_MAX_LEN: usize = 50;
const DEFAULT_MAX_LEN: usize = 60;

/// Lowercase, replace anything outside `[a-z0-9]` with a hyphen, collapse
/// runs of hyphens, trim hyphens at both ends and cut to `max_len`.
///
/// Returns an empty string when nothing alphanumeric survives.
pub fn sanitize_token(input: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.truncate(max_len);
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Like [`sanitize_token`] but drops hyphens entirely.
pub fn sanitize_alphanumeric(input: &str, max_len: usize) -> String {
    let mut out: String = input
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    out.truncate(max_len);
    out
}

/// `{prefix}-{suffix}` sanitized to the default length bound.
pub fn resource_name(prefix: &str, suffix: &str) -> String {
    sanitize_token(&format!("{prefix}-{suffix}"), DEFAULT_MAX_LEN)
}

pub fn storage_account_name(prefix: &str, suffix: &str) -> String {
    let mut name = sanitize_alphanumeric(&format!("{prefix}{suffix}"), STORAGE_ACCOUNT_MAX_LEN);
    while name.len() < 3 {
        name.push('0');
    }
    name
}

pub fn key_vault_name(prefix: &str) -> String {
    let name = sanitize_token(&format!("kv-{prefix}"), KEY_VAULT_MAX_LEN);
    if name.len() < 3 { format!("{name}-0") } else { name }
}

pub fn service_bus_name(prefix: &str) -> String {
    let name = sanitize_token(&format!("sb-{prefix}"), SERVICE_BUS_MAX_LEN);
    if name.len() < 6 { format!("{name}-bus") } else { name }
}

pub fn logic_app_name(prefix: &str, environment: &str) -> String {
    resource_name(&format!("la-{prefix}"), environment)
}

/// Prefix derived from a payer id when no explicit prefix is configured.
pub fn derive_prefix(payer_id: &str) -> String {
    sanitize_token(payer_id, PREFIX_MAX_LEN)
}

/// Whether an explicitly configured prefix is already a sanitized token.
pub fn is_valid_prefix(prefix: &str) -> bool {
    validate_resource_token(prefix, PREFIX_MIN_LEN, PREFIX_MAX_LEN)
        && sanitize_token(prefix, PREFIX_MAX_LEN) == prefix
}

/// Resource names computed once per configuration and exposed to templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceNames {
    pub prefix: String,
    pub resource_group: String,
    pub logic_app: String,
    pub storage_account: String,
    pub service_bus_namespace: String,
    pub key_vault: String,
    pub app_insights: String,
    pub log_analytics: String,
}

impl ResourceNames {
    pub fn derive(config: &PayerConfiguration) -> Self {
        let prefix = config
            .infrastructure
            .resource_name_prefix
            .clone()
            .unwrap_or_else(|| derive_prefix(&config.payer_id));
        let env = config.infrastructure.environment.as_str();
        let scoped = format!("{prefix}-{env}");

        Self {
            resource_group: resource_name("rg", &scoped),
            logic_app: logic_app_name(&prefix, env),
            storage_account: storage_account_name(&prefix, &format!("{env}sa")),
            service_bus_namespace: service_bus_name(&scoped),
            key_vault: key_vault_name(&scoped),
            app_insights: resource_name("appi", &scoped),
            log_analytics: resource_name("log", &scoped),
            prefix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_config;
    use proptest::prelude::*;

    #[test]
    fn sanitize_lowercases_and_collapses() {
        assert_eq!(sanitize_token("Acme Health  Plan!", 60), "acme-health-plan");
        assert_eq!(sanitize_token("--MCO_001--", 60), "mco-001");
        assert_eq!(sanitize_token("***", 60), "");
    }

    #[test]
    fn sanitize_respects_length_without_trailing_hyphen() {
        assert_eq!(sanitize_token("abcd efgh", 5), "abcd");
    }

    #[test]
    fn storage_account_names_are_alphanumeric() {
        assert_eq!(storage_account_name("mco-001", "devsa"), "mco001devsa");
        assert_eq!(storage_account_name("", ""), "000");
        assert!(storage_account_name("a-very-long-prefix-name", "prodsa").len() <= 24);
    }

    #[test]
    fn derived_names_use_payer_id() {
        let names = ResourceNames::derive(&sample_config());
        assert_eq!(names.prefix, "mco001");
        assert_eq!(names.resource_group, "rg-mco001-dev");
        assert_eq!(names.logic_app, "la-mco001-dev");
        assert_eq!(names.storage_account, "mco001devsa");
        assert_eq!(names.key_vault, "kv-mco001-dev");
    }

    #[test]
    fn explicit_prefix_validity() {
        assert!(is_valid_prefix("acme"));
        assert!(!is_valid_prefix("Acme"));
        assert!(!is_valid_prefix("ac"));
        assert!(!is_valid_prefix("acme-"));
    }

    proptest! {
        #[test]
        fn sanitized_tokens_are_well_formed(input in ".{0,80}", max in 1usize..64) {
            let token = sanitize_token(&input, max);
            prop_assert!(token.len() <= max);
            prop_assert!(!token.starts_with('-') && !token.ends_with('-'));
            prop_assert!(!token.contains("--"));
            prop_assert!(token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }

        #[test]
        fn sanitize_is_idempotent(input in ".{0,80}") {
            let once = sanitize_token(&input, 60);
            prop_assert_eq!(sanitize_token(&once, 60), once);
        }

        #[test]
        fn key_vault_names_fit_platform_bounds(prefix in "[a-zA-Z0-9 _-]{0,40}") {
            let name = key_vault_name(&prefix);
            prop_assert!((3..=24).contains(&name.len()));
            prop_assert!(name.starts_with("kv"));
        }
    }
}
