//! Business-rule pass. Runs only over fields the structural pass left clean.

use serde_json::{Map, Value};
use url::Url;

use crate::domain::config::ModuleKind;
use crate::domain::identifiers::validate_payer_id;
use crate::domain::naming::{PREFIX_MAX_LEN, PREFIX_MIN_LEN, derive_prefix, is_valid_prefix};

use super::diagnostics::Diagnostics;
use super::schema::{
    FieldSpec, FieldType, MODULES_KEY, Presence, TOP_LEVEL, TextRule, index_path, join_path,
    module_fields,
};

const PROD_MIN_RETENTION_DAYS: i64 = 90;

pub fn rule_checks(root: &Map<String, Value>, diagnostics: &mut Diagnostics) {
    let environment = clean_str(root, "infrastructure.environment", diagnostics).map(str::to_owned);
    let allow_http = environment.as_deref() == Some("dev");

    field_rules(root, TOP_LEVEL, "", false, allow_http, diagnostics);

    let enabled = enabled_modules(root, diagnostics);
    for (kind, module) in &enabled {
        let path = join_path(MODULES_KEY, kind.key());
        field_rules(module, module_fields(*kind), &path, true, allow_http, diagnostics);
    }

    identity_rules(root, diagnostics);
    module_rules(&enabled, diagnostics);
    monitoring_rules(root, environment.as_deref(), diagnostics);
    infrastructure_rules(root, environment.as_deref(), diagnostics);
}

/// Modules whose `enabled` flag is a clean `true`.
fn enabled_modules<'a>(
    root: &'a Map<String, Value>,
    diagnostics: &Diagnostics,
) -> Vec<(ModuleKind, &'a Map<String, Value>)> {
    let Some(Value::Object(modules)) = root.get(MODULES_KEY) else {
        return Vec::new();
    };

    ModuleKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let path = join_path(MODULES_KEY, kind.key());
            let module = modules.get(kind.key())?.as_object()?;
            let enabled = module.get("enabled").and_then(Value::as_bool).unwrap_or(false);
            (enabled && diagnostics.is_clean(&path)).then_some((kind, module))
        })
        .collect()
}

/// Table-driven rules: presence inside enabled modules, non-empty values,
/// numeric ranges and endpoint URLs.
fn field_rules(
    object: &Map<String, Value>,
    specs: &[FieldSpec],
    base: &str,
    in_module: bool,
    allow_http: bool,
    diagnostics: &mut Diagnostics,
) {
    for spec in specs {
        let path = join_path(base, spec.name);
        if !diagnostics.is_clean(&path) {
            continue;
        }

        let Some(value) = object.get(spec.name) else {
            if in_module && spec.presence == Presence::WhenEnabled {
                let module = base.split('.').nth(1).unwrap_or(base);
                diagnostics.push_error(
                    path,
                    "module.required-field",
                    format!("{} is required when module '{module}' is enabled", spec.name),
                );
            }
            continue;
        };

        if spec.non_empty && is_empty_value(value) {
            diagnostics.push_error(&path, "value.non-empty", format!("{} must not be empty", spec.name));
        }

        if let Some((min, max)) = spec.range
            && let Some(number) = value.as_f64()
            && !(min..=max).contains(&number)
        {
            diagnostics.push_error(
                &path,
                "range",
                format!("{} must be between {min} and {max}, found {number}", spec.name),
            );
        }

        if let Some(rule) = spec.text {
            text_rule(rule, value, &path, diagnostics);
        }

        match (spec.ty, value) {
            (FieldType::Url, Value::String(text)) => {
                endpoint_rule(text, &path, allow_http, diagnostics);
            }
            (FieldType::Object(children), Value::Object(child)) => {
                field_rules(child, children, &path, in_module, allow_http, diagnostics);
            }
            _ => {}
        }
    }
}

/// String content checks. Maps are checked key by key and value by value.
fn text_rule(rule: TextRule, value: &Value, path: &str, diagnostics: &mut Diagnostics) {
    let mut check = |text: &str, path: &str, what: &str| {
        if !text.is_empty() && !rule.accepts(text) {
            diagnostics.push_error(
                path,
                "value.text",
                format!("{what} {text:?} is not allowed: {}", rule.describe()),
            );
        }
    };
    match value {
        Value::String(text) => check(text, path, "value"),
        Value::Object(entries) => {
            for (key, item) in entries {
                let entry_path = join_path(path, key);
                check(key, &entry_path, "key");
                if let Some(text) = item.as_str() {
                    check(text, &entry_path, "value");
                }
            }
        }
        _ => {}
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::String(text) => text.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Endpoints must be absolute URLs with a host. `https` is required;
/// `http` is tolerated with a warning in the `dev` environment only.
fn endpoint_rule(text: &str, path: &str, allow_http: bool, diagnostics: &mut Diagnostics) {
    let url = match Url::parse(text) {
        Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => url,
        Ok(_) => {
            diagnostics.push_error(path, "endpoint.url", format!("'{text}' has no host"));
            return;
        }
        Err(err) => {
            diagnostics.push_error(
                path,
                "endpoint.url",
                format!("'{text}' is not a well-formed absolute URL: {err}"),
            );
            return;
        }
    };

    match url.scheme() {
        "https" => {}
        "http" if allow_http => diagnostics.push_warning(
            path,
            "endpoint.scheme",
            "plain http endpoint accepted for the dev environment only",
        ),
        scheme => diagnostics.push_error(
            path,
            "endpoint.scheme",
            format!("scheme '{scheme}' is not allowed; use https"),
        ),
    }
}

fn identity_rules(root: &Map<String, Value>, diagnostics: &mut Diagnostics) {
    let payer_id = clean_str(root, "payerId", diagnostics).map(str::to_owned);
    if let Some(id) = &payer_id
        && !validate_payer_id(id)
    {
        diagnostics.push_error(
            "payerId",
            "identity.payer-id",
            format!(
                "'{id}' must be 2-20 characters of letters, digits, '-' or '_', starting with a letter or digit"
            ),
        );
    }

    let prefix_path = "infrastructure.resourceNamePrefix";
    if let Some(prefix) = clean_str(root, prefix_path, diagnostics).map(str::to_owned) {
        if !is_valid_prefix(&prefix) {
            diagnostics.push_error(
                prefix_path,
                "identity.resource-prefix",
                format!(
                    "'{prefix}' must be {PREFIX_MIN_LEN}-{PREFIX_MAX_LEN} lowercase letters, digits or single hyphens"
                ),
            );
        } else if let Some(id) = payer_id.as_deref().filter(|id| validate_payer_id(id)) {
            let derived = derive_prefix(id);
            if !prefix.starts_with(&derived) {
                diagnostics.push_warning(
                    prefix_path,
                    "identity.prefix-mismatch",
                    format!("'{prefix}' does not start with the payer-derived prefix '{derived}'"),
                );
            }
        }
    }
}

fn module_rules(enabled: &[(ModuleKind, &Map<String, Value>)], diagnostics: &mut Diagnostics) {
    let is_enabled = |kind: ModuleKind| enabled.iter().any(|(k, _)| *k == kind);

    for (kind, module) in enabled {
        let base = join_path(MODULES_KEY, kind.key());
        match kind {
            ModuleKind::Appeals => {
                let path = join_path(&base, "documentUploadEnabled");
                if module.get("documentUploadEnabled").and_then(Value::as_bool) == Some(true)
                    && diagnostics.is_clean(&path)
                    && !is_enabled(ModuleKind::Attachments)
                {
                    diagnostics.push_error(
                        path,
                        "modules.dependency",
                        "document upload requires the 'attachments' module to be enabled",
                    );
                }
            }
            ModuleKind::Authorizations => {
                let inquiry = module.get("inquiryEnabled").and_then(Value::as_bool).unwrap_or(true);
                let response =
                    module.get("responseEnabled").and_then(Value::as_bool).unwrap_or(true);
                if !inquiry && !response {
                    diagnostics.push_error(
                        base,
                        "authorizations.direction",
                        "inquiryEnabled and responseEnabled cannot both be false",
                    );
                }
            }
            ModuleKind::Attachments => {
                let inbound = module.get("sftp").and_then(|sftp| sftp.get("inboundFolder"));
                let archive = module.get("sftp").and_then(|sftp| sftp.get("archiveFolder"));
                if let (Some(Value::String(inbound)), Some(Value::String(archive))) =
                    (inbound, archive)
                    && inbound == archive
                {
                    diagnostics.push_warning(
                        join_path(&base, "sftp.archiveFolder"),
                        "sftp.folders",
                        "archive folder is the same as the inbound folder; processed files will be picked up again",
                    );
                }
            }
            ModuleKind::Ecs => {}
        }
    }
}

fn monitoring_rules(
    root: &Map<String, Value>,
    environment: Option<&str>,
    diagnostics: &mut Diagnostics,
) {
    if !diagnostics.is_clean("monitoring") {
        return;
    }
    let Some(Value::Object(monitoring)) = root.get("monitoring") else {
        return;
    };

    let alerts = monitoring.get("enableAlerts").and_then(Value::as_bool).unwrap_or(true);
    let emails_path = "monitoring.alertEmails";
    if diagnostics.is_clean(emails_path) {
        let emails = monitoring.get("alertEmails").and_then(Value::as_array);
        if alerts && emails.is_none_or(|emails| emails.is_empty()) {
            diagnostics.push_error(
                emails_path,
                "monitoring.alert-recipients",
                "at least one alert email is required when alerts are enabled",
            );
        }
        for (index, email) in emails.into_iter().flatten().enumerate() {
            if let Some(email) = email.as_str() {
                email_rule(email, &index_path(emails_path, index), diagnostics);
            }
        }
    }

    if environment == Some("prod")
        && let Some(days) = monitoring.get("logRetentionDays").and_then(Value::as_i64)
        && days < PROD_MIN_RETENTION_DAYS
        && diagnostics.is_clean("monitoring.logRetentionDays")
    {
        diagnostics.push_warning(
            "monitoring.logRetentionDays",
            "monitoring.retention",
            format!("prod tenants usually retain logs for at least {PROD_MIN_RETENTION_DAYS} days"),
        );
    }

    if let Some(email) = clean_str(root, "contact.email", diagnostics).map(str::to_owned) {
        email_rule(&email, "contact.email", diagnostics);
    }
}

fn email_rule(email: &str, path: &str, diagnostics: &mut Diagnostics) {
    let forbidden = |c: char| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '`');
    let well_formed = !email.contains(forbidden)
        && email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        diagnostics.push_error(path, "monitoring.email", format!("'{email}' is not an email address"));
    }
}

fn infrastructure_rules(
    root: &Map<String, Value>,
    environment: Option<&str>,
    diagnostics: &mut Diagnostics,
) {
    if environment != Some("prod") {
        return;
    }
    let sku_path = "infrastructure.storageSku";
    if !diagnostics.is_clean(sku_path) {
        return;
    }
    let sku = root
        .get("infrastructure")
        .and_then(|infra| infra.get("storageSku"))
        .and_then(Value::as_str)
        .unwrap_or("Standard_LRS");
    if sku == "Standard_LRS" {
        diagnostics.push_warning(
            sku_path,
            "infrastructure.redundancy",
            "prod uses locally-redundant storage; consider Standard_GRS or Standard_ZRS",
        );
    }
}

/// String at a dotted path, if present and structurally clean.
fn clean_str<'a>(
    root: &'a Map<String, Value>,
    path: &str,
    diagnostics: &Diagnostics,
) -> Option<&'a str> {
    if !diagnostics.is_clean(path) {
        return None;
    }
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = root.get(first)?;
    for segment in segments {
        current = current.get(segment)?;
    }
    current.as_str()
}
