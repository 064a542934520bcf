//! Infrastructure and monitoring sections of a payer configuration.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentEnvironment {
    Dev,
    Test,
    Uat,
    Prod,
}

impl DeploymentEnvironment {
    pub const VALUES: &'static [&'static str] = &["dev", "test", "uat", "prod"];

    pub fn as_str(self) -> &'static str {
        match self {
            DeploymentEnvironment::Dev => "dev",
            DeploymentEnvironment::Test => "test",
            DeploymentEnvironment::Uat => "uat",
            DeploymentEnvironment::Prod => "prod",
        }
    }
}

impl fmt::Display for DeploymentEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogicAppSku {
    #[default]
    WS1,
    WS2,
    WS3,
}

impl LogicAppSku {
    pub const VALUES: &'static [&'static str] = &["WS1", "WS2", "WS3"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StorageSku {
    #[default]
    #[serde(rename = "Standard_LRS")]
    StandardLrs,
    #[serde(rename = "Standard_GRS")]
    StandardGrs,
    #[serde(rename = "Standard_ZRS")]
    StandardZrs,
    #[serde(rename = "Standard_RAGRS")]
    StandardRagrs,
}

impl StorageSku {
    pub const VALUES: &'static [&'static str] =
        &["Standard_LRS", "Standard_GRS", "Standard_ZRS", "Standard_RAGRS"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ServiceBusSku {
    Basic,
    #[default]
    Standard,
    Premium,
}

impl ServiceBusSku {
    pub const VALUES: &'static [&'static str] = &["Basic", "Standard", "Premium"];
}

/// Naming, tier and region choices for provisioned resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureConfig {
    pub region: String,
    pub environment: DeploymentEnvironment,
    #[serde(default)]
    pub resource_name_prefix: Option<String>,
    #[serde(default)]
    pub logic_app_sku: LogicAppSku,
    #[serde(default)]
    pub storage_sku: StorageSku,
    #[serde(default)]
    pub service_bus_sku: ServiceBusSku,
    #[serde(default = "default_true")]
    pub enable_key_vault: bool,
    #[serde(default = "default_true")]
    pub enable_application_insights: bool,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// Alerting thresholds and retention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringConfig {
    pub log_retention_days: u32,
    #[serde(default = "default_true")]
    pub enable_alerts: bool,
    #[serde(default)]
    pub alert_emails: Vec<String>,
    #[serde(default = "default_failure_rate")]
    pub failure_rate_threshold_percent: f64,
    #[serde(default = "default_latency")]
    pub latency_threshold_ms: u32,
    #[serde(default = "default_availability")]
    pub availability_target_percent: f64,
}

fn default_true() -> bool {
    true
}

fn default_failure_rate() -> f64 {
    5.0
}

fn default_latency() -> u32 {
    30_000
}

fn default_availability() -> f64 {
    99.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn infrastructure_defaults_apply() {
        let infra: InfrastructureConfig =
            serde_json::from_value(json!({ "region": "eastus", "environment": "uat" })).unwrap();
        assert_eq!(infra.environment, DeploymentEnvironment::Uat);
        assert_eq!(infra.logic_app_sku, LogicAppSku::WS1);
        assert_eq!(infra.storage_sku, StorageSku::StandardLrs);
        assert_eq!(infra.service_bus_sku, ServiceBusSku::Standard);
        assert!(infra.enable_key_vault);
        assert!(infra.tags.is_empty());
    }

    #[test]
    fn monitoring_defaults_apply() {
        let monitoring: MonitoringConfig =
            serde_json::from_value(json!({ "logRetentionDays": 90 })).unwrap();
        assert!(monitoring.enable_alerts);
        assert_eq!(monitoring.latency_threshold_ms, 30_000);
        assert!((monitoring.failure_rate_threshold_percent - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn enum_value_tables_match_serde_names() {
        for value in DeploymentEnvironment::VALUES {
            assert!(serde_json::from_value::<DeploymentEnvironment>(json!(value)).is_ok());
        }
        for value in LogicAppSku::VALUES {
            assert!(serde_json::from_value::<LogicAppSku>(json!(value)).is_ok());
        }
        for value in StorageSku::VALUES {
            assert!(serde_json::from_value::<StorageSku>(json!(value)).is_ok());
        }
        for value in ServiceBusSku::VALUES {
            assert!(serde_json::from_value::<ServiceBusSku>(json!(value)).is_ok());
        }
    }
}
