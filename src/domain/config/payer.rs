//! Root configuration entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::AppError;

use super::document::ConfigDocument;
use super::infrastructure::{InfrastructureConfig, MonitoringConfig};
use super::modules::ModuleSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// One tenant's enabled modules and infrastructure choices. Read-only once built.
#[derive(Debug, Clone)]
pub struct PayerConfiguration {
    pub payer_id: String,
    pub payer_name: String,
    pub organization_name: Option<String>,
    pub contact: Option<Contact>,
    pub schema_version: Option<String>,
    pub modules: ModuleSet,
    pub infrastructure: InfrastructureConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPayerConfiguration {
    payer_id: String,
    payer_name: String,
    #[serde(default)]
    organization_name: Option<String>,
    #[serde(default)]
    contact: Option<Contact>,
    #[serde(default)]
    schema_version: Option<String>,
    #[serde(default)]
    modules: Map<String, Value>,
    infrastructure: InfrastructureConfig,
    monitoring: MonitoringConfig,
}

impl PayerConfiguration {
    /// Project a document into the typed model.
    ///
    /// Expects a document that already passed validation; any mismatch here is
    /// reported as a configuration error.
    pub fn from_document(document: &ConfigDocument) -> Result<Self, AppError> {
        let raw: RawPayerConfiguration = serde_json::from_value(document.to_value())
            .map_err(|e| AppError::config_error(format!("cannot load configuration: {e}")))?;

        Ok(Self {
            modules: ModuleSet::from_raw(&raw.modules)?,
            payer_id: raw.payer_id,
            payer_name: raw.payer_name,
            organization_name: raw.organization_name,
            contact: raw.contact,
            schema_version: raw.schema_version,
            infrastructure: raw.infrastructure,
            monitoring: raw.monitoring,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::ModuleKind;
    use crate::testing::sample_document;

    #[test]
    fn from_document_builds_typed_model() {
        let config = PayerConfiguration::from_document(&sample_document()).unwrap();
        assert_eq!(config.payer_id, "MCO001");
        assert!(config.modules.is_enabled(ModuleKind::Attachments));
        assert!(!config.modules.is_enabled(ModuleKind::Appeals));
        assert_eq!(config.infrastructure.region, "eastus");
    }
}
