//! Projection of a validated configuration handed to templates.
//!
//! Every field is either taken from the typed configuration or derived from
//! it (resource names, the active workflow and schema lists). Templates never
//! see the raw document.

use serde::Serialize;

use super::catalog::{SchemaSpec, WorkflowSpec, active_schemas, active_workflows};
use super::config::{
    AppealsConfig, AttachmentsConfig, AuthorizationsConfig, Contact, DeploymentEnvironment,
    EcsConfig, InfrastructureConfig, ModuleConfig, ModuleKind, MonitoringConfig,
};
use super::naming::ResourceNames;
use super::validation::ValidatedConfig;

pub const GENERATOR_NAME: &str = "payergen";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl Default for GeneratorInfo {
    fn default() -> Self {
        Self { name: GENERATOR_NAME, version: env!("CARGO_PKG_VERSION") }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerView {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
}

/// Enabled modules only; a disabled module is absent, not `null`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModulesView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<AttachmentsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorizations: Option<AuthorizationsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appeals: Option<AppealsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecs: Option<EcsConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub key: &'static str,
    pub name: &'static str,
    pub workflows: Vec<&'static str>,
    pub schemas: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSummary {
    pub name: &'static str,
    pub module: &'static str,
    pub module_name: &'static str,
    pub path: String,
    pub description: &'static str,
}

impl From<&WorkflowSpec> for WorkflowSummary {
    fn from(spec: &WorkflowSpec) -> Self {
        Self {
            name: spec.name,
            module: spec.module.key(),
            module_name: spec.module.display_name(),
            path: spec.output_path(),
            description: spec.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSummary {
    pub name: &'static str,
    pub module: &'static str,
    pub path: String,
    pub description: &'static str,
}

impl From<&SchemaSpec> for SchemaSummary {
    fn from(spec: &SchemaSpec) -> Self {
        Self {
            name: spec.name,
            module: spec.module.key(),
            path: spec.output_path(),
            description: spec.description,
        }
    }
}

/// The module a per-module template is rendered for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentModule {
    pub key: &'static str,
    pub name: &'static str,
    pub config: ModuleConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContext {
    pub generator: GeneratorInfo,
    pub payer: PayerView,
    pub environment: DeploymentEnvironment,
    pub region: String,
    pub names: ResourceNames,
    pub infrastructure: InfrastructureConfig,
    pub monitoring: MonitoringConfig,
    pub modules: ModulesView,
    pub enabled_modules: Vec<ModuleSummary>,
    pub workflows: Vec<WorkflowSummary>,
    pub schemas: Vec<SchemaSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<CurrentModule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<WorkflowSummary>,
}

impl TemplateContext {
    pub fn build(validated: &ValidatedConfig) -> Self {
        let config = validated.config();
        let modules = &config.modules;
        let workflows = active_workflows(modules);
        let schemas = active_schemas(modules);

        let enabled_modules = modules
            .kinds()
            .into_iter()
            .map(|kind| ModuleSummary {
                key: kind.key(),
                name: kind.display_name(),
                workflows: workflows.iter().filter(|w| w.module == kind).map(|w| w.name).collect(),
                schemas: schemas.iter().filter(|s| s.module == kind).map(|s| s.name).collect(),
            })
            .collect();

        Self {
            generator: GeneratorInfo::default(),
            payer: PayerView {
                id: config.payer_id.clone(),
                name: config.payer_name.clone(),
                organization_name: config.organization_name.clone(),
                contact: config.contact.clone(),
                schema_version: config.schema_version.clone(),
            },
            environment: config.infrastructure.environment,
            region: config.infrastructure.region.clone(),
            names: ResourceNames::derive(config),
            infrastructure: config.infrastructure.clone(),
            monitoring: config.monitoring.clone(),
            modules: ModulesView {
                attachments: modules.attachments().cloned(),
                authorizations: modules.authorizations().cloned(),
                appeals: modules.appeals().cloned(),
                ecs: modules.ecs().cloned(),
            },
            enabled_modules,
            workflows: workflows.into_iter().map(WorkflowSummary::from).collect(),
            schemas: schemas.into_iter().map(SchemaSummary::from).collect(),
            module: None,
            workflow: None,
        }
    }

    /// Copy of this context focused on one enabled module.
    pub fn for_module(&self, kind: ModuleKind, config: &ModuleConfig) -> Self {
        let mut scoped = self.clone();
        scoped.module =
            Some(CurrentModule { key: kind.key(), name: kind.display_name(), config: config.clone() });
        scoped
    }

    pub fn for_workflow(&self, spec: &WorkflowSpec, config: &ModuleConfig) -> Self {
        let mut scoped = self.for_module(spec.module, config);
        scoped.workflow = Some(WorkflowSummary::from(spec));
        scoped
    }
}
