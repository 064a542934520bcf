//! Module kinds and their strongly-typed configuration payloads.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::domain::AppError;

/// The closed set of modules a tenant can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleKind {
    Attachments,
    Authorizations,
    Appeals,
    Ecs,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 4] =
        [ModuleKind::Attachments, ModuleKind::Authorizations, ModuleKind::Appeals, ModuleKind::Ecs];

    /// Key used under `modules` in the configuration document.
    pub fn key(self) -> &'static str {
        match self {
            ModuleKind::Attachments => "attachments",
            ModuleKind::Authorizations => "authorizations",
            ModuleKind::Appeals => "appeals",
            ModuleKind::Ecs => "ecs",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ModuleKind::Attachments => "Attachments",
            ModuleKind::Authorizations => "Authorizations",
            ModuleKind::Appeals => "Appeals",
            ModuleKind::Ecs => "Enhanced Claim Status",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn available_keys() -> String {
        Self::ALL.map(ModuleKind::key).join(", ")
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ModuleKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::from_key(&key).ok_or_else(|| AppError::UnknownModule {
            name: s.to_string(),
            available: Self::available_keys(),
        })
    }
}

// ----------------------------------------------------------------------------
// Attachments
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentsConfig {
    pub sftp: SftpConfig,
    #[serde(default)]
    pub claim_system_endpoint: Option<Url>,
    #[serde(default)]
    pub rfai_enabled: bool,
    #[serde(default = "default_polling_interval")]
    pub polling_interval_minutes: u32,
    #[serde(default)]
    pub integrations: AttachmentIntegrations,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SftpConfig {
    pub host: String,
    #[serde(default = "default_sftp_port")]
    pub port: u16,
    pub username: String,
    pub inbound_folder: String,
    pub outbound_folder: String,
    #[serde(default = "default_archive_folder")]
    pub archive_folder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentIntegrations {
    #[serde(default = "default_true")]
    pub claim_linking: bool,
    #[serde(default)]
    pub notify_provider: bool,
}

impl Default for AttachmentIntegrations {
    fn default() -> Self {
        Self { claim_linking: true, notify_provider: false }
    }
}

fn default_polling_interval() -> u32 {
    5
}

fn default_sftp_port() -> u16 {
    22
}

fn default_archive_folder() -> String {
    "archive".to_string()
}

// ----------------------------------------------------------------------------
// Authorizations
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum X12Version {
    #[serde(rename = "005010X215")]
    X215,
    #[serde(rename = "005010X217")]
    X217,
}

impl X12Version {
    pub const VALUES: &'static [&'static str] = &["005010X215", "005010X217"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationsConfig {
    pub x12_version: X12Version,
    pub endpoint: Url,
    #[serde(default = "default_true")]
    pub inquiry_enabled: bool,
    #[serde(default = "default_true")]
    pub response_enabled: bool,
    #[serde(default = "default_turnaround_hours")]
    pub turnaround_hours: u32,
}

fn default_turnaround_hours() -> u32 {
    72
}

// ----------------------------------------------------------------------------
// Appeals
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppealRequestType {
    Standard,
    Expedited,
    ExternalReview,
}

impl AppealRequestType {
    pub const VALUES: &'static [&'static str] = &["standard", "expedited", "external-review"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealsConfig {
    pub endpoint: Url,
    pub request_types: Vec<AppealRequestType>,
    #[serde(default)]
    pub sub_status_enabled: bool,
    #[serde(default)]
    pub document_upload_enabled: bool,
    #[serde(default = "default_max_document_size")]
    pub max_document_size_mb: u32,
}

fn default_max_document_size() -> u32 {
    25
}

// ----------------------------------------------------------------------------
// Enhanced Claim Status
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryMethod {
    ServiceDate,
    MemberId,
    CheckNumber,
    ClaimHistory,
}

impl QueryMethod {
    pub const VALUES: &'static [&'static str] =
        &["serviceDate", "memberId", "checkNumber", "claimHistory"];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcsConfig {
    pub query_methods: Vec<QueryMethod>,
    pub endpoint: Url,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_minutes: u32,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_cache_ttl() -> u32 {
    15
}

fn default_max_results() -> u32 {
    50
}

fn default_true() -> bool {
    true
}

// ----------------------------------------------------------------------------
// Module set
// ----------------------------------------------------------------------------

/// Configuration payload of one enabled module.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ModuleConfig {
    Attachments(AttachmentsConfig),
    Authorizations(AuthorizationsConfig),
    Appeals(AppealsConfig),
    Ecs(EcsConfig),
}

impl ModuleConfig {
    pub fn kind(&self) -> ModuleKind {
        match self {
            ModuleConfig::Attachments(_) => ModuleKind::Attachments,
            ModuleConfig::Authorizations(_) => ModuleKind::Authorizations,
            ModuleConfig::Appeals(_) => ModuleKind::Appeals,
            ModuleConfig::Ecs(_) => ModuleKind::Ecs,
        }
    }

    fn from_value(kind: ModuleKind, value: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            ModuleKind::Attachments => ModuleConfig::Attachments(serde_json::from_value(value)?),
            ModuleKind::Authorizations => {
                ModuleConfig::Authorizations(serde_json::from_value(value)?)
            }
            ModuleKind::Appeals => ModuleConfig::Appeals(serde_json::from_value(value)?),
            ModuleKind::Ecs => ModuleConfig::Ecs(serde_json::from_value(value)?),
        })
    }
}

/// Enabled modules keyed by kind. Disabled modules are absent: their internal
/// fields are never read.
#[derive(Debug, Clone, Default)]
pub struct ModuleSet {
    enabled: BTreeMap<ModuleKind, ModuleConfig>,
}

impl ModuleSet {
    /// Build the set from the raw `modules` object.
    pub fn from_raw(raw: &Map<String, Value>) -> Result<Self, AppError> {
        let mut enabled = BTreeMap::new();

        for (key, value) in raw {
            let kind = key.parse::<ModuleKind>()?;
            let is_enabled = value.get("enabled").and_then(Value::as_bool).unwrap_or(false);
            if !is_enabled {
                continue;
            }

            let config = ModuleConfig::from_value(kind, value.clone()).map_err(|e| {
                AppError::config_error(format!("modules.{}: {}", kind.key(), e))
            })?;
            enabled.insert(kind, config);
        }

        Ok(Self { enabled })
    }

    pub fn get(&self, kind: ModuleKind) -> Option<&ModuleConfig> {
        self.enabled.get(&kind)
    }

    pub fn is_enabled(&self, kind: ModuleKind) -> bool {
        self.enabled.contains_key(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    /// Enabled kinds in declaration order.
    pub fn kinds(&self) -> Vec<ModuleKind> {
        self.enabled.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleConfig> {
        self.enabled.values()
    }

    pub fn attachments(&self) -> Option<&AttachmentsConfig> {
        match self.get(ModuleKind::Attachments) {
            Some(ModuleConfig::Attachments(config)) => Some(config),
            _ => None,
        }
    }

    pub fn authorizations(&self) -> Option<&AuthorizationsConfig> {
        match self.get(ModuleKind::Authorizations) {
            Some(ModuleConfig::Authorizations(config)) => Some(config),
            _ => None,
        }
    }

    pub fn appeals(&self) -> Option<&AppealsConfig> {
        match self.get(ModuleKind::Appeals) {
            Some(ModuleConfig::Appeals(config)) => Some(config),
            _ => None,
        }
    }

    pub fn ecs(&self) -> Option<&EcsConfig> {
        match self.get(ModuleKind::Ecs) {
            Some(ModuleConfig::Ecs(config)) => Some(config),
            _ => None,
        }
    }

    /// Keep only the given kinds.
    pub fn restrict(&self, kinds: &[ModuleKind]) -> Self {
        let enabled = self
            .enabled
            .iter()
            .filter(|(kind, _)| kinds.contains(kind))
            .map(|(kind, config)| (*kind, config.clone()))
            .collect();
        Self { enabled }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn module_kind_parses_keys_case_insensitively() {
        assert_eq!("ECS".parse::<ModuleKind>().unwrap(), ModuleKind::Ecs);
        assert_eq!(" appeals ".parse::<ModuleKind>().unwrap(), ModuleKind::Appeals);
        let err = "apeals".parse::<ModuleKind>().unwrap_err();
        assert!(matches!(err, AppError::UnknownModule { name, .. } if name == "apeals"));
    }

    #[test]
    fn disabled_module_internals_are_not_read() {
        let raw = json!({
            "appeals": { "enabled": false, "endpoint": 42 },
            "ecs": {
                "enabled": true,
                "queryMethods": ["memberId"],
                "endpoint": "https://ecs.example.org"
            }
        });
        let set = ModuleSet::from_raw(raw.as_object().unwrap()).unwrap();
        assert!(!set.is_enabled(ModuleKind::Appeals));
        let ecs = set.ecs().unwrap();
        assert_eq!(ecs.query_methods, vec![QueryMethod::MemberId]);
        assert_eq!(ecs.cache_ttl_minutes, 15);
    }

    #[test]
    fn restrict_keeps_requested_kinds_only() {
        let raw = json!({
            "appeals": {
                "enabled": true,
                "endpoint": "https://appeals.example.org",
                "requestTypes": ["standard"]
            },
            "ecs": {
                "enabled": true,
                "queryMethods": ["memberId"],
                "endpoint": "https://ecs.example.org"
            }
        });
        let set = ModuleSet::from_raw(raw.as_object().unwrap()).unwrap();
        let restricted = set.restrict(&[ModuleKind::Ecs, ModuleKind::Attachments]);
        assert_eq!(restricted.kinds(), vec![ModuleKind::Ecs]);
    }

    #[test]
    fn enum_value_tables_match_serde_names() {
        for value in X12Version::VALUES {
            assert!(serde_json::from_value::<X12Version>(json!(value)).is_ok(), "{value}");
        }
        for value in AppealRequestType::VALUES {
            assert!(serde_json::from_value::<AppealRequestType>(json!(value)).is_ok(), "{value}");
        }
        for value in QueryMethod::VALUES {
            assert!(serde_json::from_value::<QueryMethod>(json!(value)).is_ok(), "{value}");
        }
    }
}
