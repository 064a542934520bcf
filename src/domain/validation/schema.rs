//! Declarative field tables for the configuration document.

use crate::domain::config::{
    AppealRequestType, DeploymentEnvironment, LogicAppSku, ModuleKind, QueryMethod, ServiceBusSku,
    StorageSku, X12Version,
};

#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    String,
    Bool,
    Integer,
    Number,
    /// String that must parse as an endpoint URL (checked by the rule pass).
    Url,
    Enum(&'static [&'static str]),
    EnumArray(&'static [&'static str]),
    StringArray,
    StringMap,
    Object(&'static [FieldSpec]),
}

impl FieldType {
    pub fn expected(&self) -> &'static str {
        match self {
            FieldType::String | FieldType::Url | FieldType::Enum(_) => "string",
            FieldType::Bool => "boolean",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::EnumArray(_) | FieldType::StringArray => "array",
            FieldType::StringMap | FieldType::Object(_) => "object",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Must be present; checked by the structural pass.
    Required,
    Optional,
    /// Must be present when the owning module is enabled; checked by the rule pass.
    WhenEnabled,
}

/// Shape constraints on string content, for values that end up in generated
/// shell, Bicep or Markdown source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRule {
    /// Lowercase ASCII letters and digits only.
    Token,
    /// No control characters, quotes or backticks.
    Plain,
}

impl TextRule {
    pub fn accepts(self, text: &str) -> bool {
        match self {
            TextRule::Token => {
                !text.is_empty()
                    && text.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            }
            TextRule::Plain => !text.chars().any(|c| c.is_control() || matches!(c, '"' | '\'' | '`')),
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            TextRule::Token => "lowercase letters and digits only",
            TextRule::Plain => "no control characters, quotes or backticks",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub presence: Presence,
    pub range: Option<(f64, f64)>,
    pub non_empty: bool,
    /// Applies to a string value, or to every key and value of a string map.
    pub text: Option<TextRule>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty, presence: Presence::Required, range: None, non_empty: false, text: None }
    }

    pub const fn optional(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty, presence: Presence::Optional, range: None, non_empty: false, text: None }
    }

    pub const fn when_enabled(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty, presence: Presence::WhenEnabled, range: None, non_empty: false, text: None }
    }

    pub const fn range(self, min: f64, max: f64) -> Self {
        Self { range: Some((min, max)), ..self }
    }

    pub const fn non_empty(self) -> Self {
        Self { non_empty: true, ..self }
    }

    pub const fn token(self) -> Self {
        Self { text: Some(TextRule::Token), ..self }
    }

    pub const fn plain(self) -> Self {
        Self { text: Some(TextRule::Plain), ..self }
    }
}

/// Top-level keys other than these are reported as unknown.
pub const MODULES_KEY: &str = "modules";

pub const TOP_LEVEL: &[FieldSpec] = &[
    FieldSpec::required("payerId", FieldType::String),
    FieldSpec::required("payerName", FieldType::String).non_empty().plain(),
    FieldSpec::optional("organizationName", FieldType::String).plain(),
    FieldSpec::optional("contact", FieldType::Object(CONTACT)),
    FieldSpec::optional("schemaVersion", FieldType::String),
    FieldSpec::required(MODULES_KEY, FieldType::Object(&[])),
    FieldSpec::required("infrastructure", FieldType::Object(INFRASTRUCTURE)),
    FieldSpec::required("monitoring", FieldType::Object(MONITORING)),
];

const CONTACT: &[FieldSpec] = &[
    FieldSpec::required("name", FieldType::String).non_empty().plain(),
    FieldSpec::required("email", FieldType::String),
    FieldSpec::optional("phone", FieldType::String).plain(),
];

const INFRASTRUCTURE: &[FieldSpec] = &[
    FieldSpec::required("region", FieldType::String).non_empty().token(),
    FieldSpec::required("environment", FieldType::Enum(DeploymentEnvironment::VALUES)),
    FieldSpec::optional("resourceNamePrefix", FieldType::String),
    FieldSpec::optional("logicAppSku", FieldType::Enum(LogicAppSku::VALUES)),
    FieldSpec::optional("storageSku", FieldType::Enum(StorageSku::VALUES)),
    FieldSpec::optional("serviceBusSku", FieldType::Enum(ServiceBusSku::VALUES)),
    FieldSpec::optional("enableKeyVault", FieldType::Bool),
    FieldSpec::optional("enableApplicationInsights", FieldType::Bool),
    FieldSpec::optional("tags", FieldType::StringMap).plain(),
];

const MONITORING: &[FieldSpec] = &[
    FieldSpec::required("logRetentionDays", FieldType::Integer).range(30.0, 730.0),
    FieldSpec::optional("enableAlerts", FieldType::Bool),
    FieldSpec::optional("alertEmails", FieldType::StringArray),
    FieldSpec::optional("failureRateThresholdPercent", FieldType::Number).range(0.0, 100.0),
    FieldSpec::optional("latencyThresholdMs", FieldType::Integer).range(100.0, 300_000.0),
    FieldSpec::optional("availabilityTargetPercent", FieldType::Number).range(90.0, 100.0),
];

const SFTP: &[FieldSpec] = &[
    FieldSpec::when_enabled("host", FieldType::String).non_empty().plain(),
    FieldSpec::optional("port", FieldType::Integer).range(1.0, 65_535.0),
    FieldSpec::when_enabled("username", FieldType::String).non_empty().plain(),
    FieldSpec::when_enabled("inboundFolder", FieldType::String).non_empty().plain(),
    FieldSpec::when_enabled("outboundFolder", FieldType::String).non_empty().plain(),
    FieldSpec::optional("archiveFolder", FieldType::String).non_empty().plain(),
];

const ATTACHMENT_INTEGRATIONS: &[FieldSpec] = &[
    FieldSpec::optional("claimLinking", FieldType::Bool),
    FieldSpec::optional("notifyProvider", FieldType::Bool),
];

const ATTACHMENTS: &[FieldSpec] = &[
    FieldSpec::when_enabled("sftp", FieldType::Object(SFTP)),
    FieldSpec::optional("claimSystemEndpoint", FieldType::Url),
    FieldSpec::optional("rfaiEnabled", FieldType::Bool),
    FieldSpec::optional("pollingIntervalMinutes", FieldType::Integer).range(1.0, 1440.0),
    FieldSpec::optional("integrations", FieldType::Object(ATTACHMENT_INTEGRATIONS)),
];

const AUTHORIZATIONS: &[FieldSpec] = &[
    FieldSpec::when_enabled("x12Version", FieldType::Enum(X12Version::VALUES)),
    FieldSpec::when_enabled("endpoint", FieldType::Url),
    FieldSpec::optional("inquiryEnabled", FieldType::Bool),
    FieldSpec::optional("responseEnabled", FieldType::Bool),
    FieldSpec::optional("turnaroundHours", FieldType::Integer).range(1.0, 720.0),
];

const APPEALS: &[FieldSpec] = &[
    FieldSpec::when_enabled("endpoint", FieldType::Url),
    FieldSpec::when_enabled("requestTypes", FieldType::EnumArray(AppealRequestType::VALUES))
        .non_empty(),
    FieldSpec::optional("subStatusEnabled", FieldType::Bool),
    FieldSpec::optional("documentUploadEnabled", FieldType::Bool),
    FieldSpec::optional("maxDocumentSizeMb", FieldType::Integer).range(1.0, 100.0),
];

const ECS: &[FieldSpec] = &[
    FieldSpec::when_enabled("queryMethods", FieldType::EnumArray(QueryMethod::VALUES)).non_empty(),
    FieldSpec::when_enabled("endpoint", FieldType::Url),
    FieldSpec::optional("cacheTtlMinutes", FieldType::Integer).range(0.0, 1440.0),
    FieldSpec::optional("maxResults", FieldType::Integer).range(1.0, 500.0),
];

/// Module-specific fields, validated only when the module is enabled.
pub fn module_fields(kind: ModuleKind) -> &'static [FieldSpec] {
    match kind {
        ModuleKind::Attachments => ATTACHMENTS,
        ModuleKind::Authorizations => AUTHORIZATIONS,
        ModuleKind::Appeals => APPEALS,
        ModuleKind::Ecs => ECS,
    }
}

pub fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() { name.to_string() } else { format!("{base}.{name}") }
}

pub fn index_path(base: &str, index: usize) -> String {
    format!("{base}[{index}]")
}
