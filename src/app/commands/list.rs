use serde::Serialize;

use crate::adapters::archetypes::list_archetypes;
use crate::adapters::templates::helpers::{HELPER_TABLE_VERSION, HelperRegistry};
use crate::domain::{AppError, WORKFLOWS};
use crate::ports::TemplateRenderer;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowTemplateInfo {
    pub name: &'static str,
    pub module: &'static str,
    pub template: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelperInfo {
    pub name: &'static str,
    pub category: &'static str,
    pub signature: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Workflow templates the engine can render, in catalog order.
pub fn workflows(renderer: &dyn TemplateRenderer) -> Vec<WorkflowTemplateInfo> {
    WORKFLOWS
        .iter()
        .filter(|spec| renderer.contains(spec.template))
        .map(|spec| WorkflowTemplateInfo {
            name: spec.name,
            module: spec.module.key(),
            template: spec.template,
            description: spec.description,
        })
        .collect()
}

/// The helper table, in name order, with its version.
pub fn helpers() -> Result<(u32, Vec<HelperInfo>), AppError> {
    let registry = HelperRegistry::builtin()?;
    let helpers = registry
        .specs()
        .map(|spec| HelperInfo {
            name: spec.name,
            category: spec.category.label(),
            signature: spec.signature,
        })
        .collect();
    Ok((HELPER_TABLE_VERSION, helpers))
}

pub fn archetypes() -> Result<Vec<ArchetypeInfo>, AppError> {
    Ok(list_archetypes()?
        .into_iter()
        .map(|a| ArchetypeInfo { name: a.name, description: a.description })
        .collect())
}
