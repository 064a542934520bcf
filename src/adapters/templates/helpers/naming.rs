//! Template access to the resource-name sanitizers.

use minijinja::Value;

use crate::domain::naming;

use super::text;

const DEFAULT_MAX_LEN: usize = 60;

pub fn sanitize_name(value: Value, max_len: Option<Value>) -> String {
    let max_len = max_len.and_then(|n| usize::try_from(n).ok()).unwrap_or(DEFAULT_MAX_LEN);
    naming::sanitize_token(&text(&value), max_len)
}

pub fn resource_name(prefix: Value, suffix: Value) -> String {
    naming::resource_name(&text(&prefix), &text(&suffix))
}

pub fn storage_account_name(prefix: Value, suffix: Option<Value>) -> String {
    let suffix = suffix.map(|s| text(&s)).unwrap_or_default();
    naming::storage_account_name(&text(&prefix), &suffix)
}

pub fn key_vault_name(prefix: Value) -> String {
    naming::key_vault_name(&text(&prefix))
}

pub fn service_bus_name(prefix: Value) -> String {
    naming::service_bus_name(&text(&prefix))
}

pub fn logic_app_name(prefix: Value, environment: Value) -> String {
    naming::logic_app_name(&text(&prefix), &text(&environment))
}
