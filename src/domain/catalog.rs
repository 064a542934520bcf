//! Fixed tables of the workflows and schemas each module contributes.

use super::config::{ModuleConfig, ModuleKind, ModuleSet};

/// A workflow a module can contribute, and when it does.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowSpec {
    pub module: ModuleKind,
    pub name: &'static str,
    pub template: &'static str,
    pub description: &'static str,
    pub condition: fn(&ModuleConfig) -> bool,
}

impl WorkflowSpec {
    pub fn output_path(&self) -> String {
        format!("workflows/{}/definition.json", self.name)
    }
}

/// A JSON Schema document a module exposes.
#[derive(Debug, Clone, Copy)]
pub struct SchemaSpec {
    pub module: ModuleKind,
    pub name: &'static str,
    pub template: &'static str,
    pub description: &'static str,
    pub condition: fn(&ModuleConfig) -> bool,
}

impl SchemaSpec {
    pub fn output_path(&self) -> String {
        format!("schemas/{}.json", self.name)
    }
}

fn always(_: &ModuleConfig) -> bool {
    true
}

fn rfai_enabled(config: &ModuleConfig) -> bool {
    matches!(config, ModuleConfig::Attachments(c) if c.rfai_enabled)
}

fn inquiry_enabled(config: &ModuleConfig) -> bool {
    matches!(config, ModuleConfig::Authorizations(c) if c.inquiry_enabled)
}

fn response_enabled(config: &ModuleConfig) -> bool {
    matches!(config, ModuleConfig::Authorizations(c) if c.response_enabled)
}

fn sub_status_enabled(config: &ModuleConfig) -> bool {
    matches!(config, ModuleConfig::Appeals(c) if c.sub_status_enabled)
}

pub const WORKFLOWS: &[WorkflowSpec] = &[
    WorkflowSpec {
        module: ModuleKind::Attachments,
        name: "attachments-ingest",
        template: "workflows/attachments/ingest.json",
        description: "Poll SFTP for X12 275 attachments, archive them and link to claims",
        condition: always,
    },
    WorkflowSpec {
        module: ModuleKind::Attachments,
        name: "attachments-rfai",
        template: "workflows/attachments/rfai.json",
        description: "Send X12 277 requests for additional information to providers",
        condition: rfai_enabled,
    },
    WorkflowSpec {
        module: ModuleKind::Authorizations,
        name: "authorizations-inquiry",
        template: "workflows/authorizations/inquiry.json",
        description: "Accept X12 278 authorization inquiries and forward them to the payer",
        condition: inquiry_enabled,
    },
    WorkflowSpec {
        module: ModuleKind::Authorizations,
        name: "authorizations-response",
        template: "workflows/authorizations/response.json",
        description: "Return X12 278 authorization responses to submitters",
        condition: response_enabled,
    },
    WorkflowSpec {
        module: ModuleKind::Appeals,
        name: "appeals-request",
        template: "workflows/appeals/request.json",
        description: "Receive appeal requests and route them by request type",
        condition: always,
    },
    WorkflowSpec {
        module: ModuleKind::Appeals,
        name: "appeals-substatus",
        template: "workflows/appeals/substatus.json",
        description: "Publish appeal sub-status updates",
        condition: sub_status_enabled,
    },
    WorkflowSpec {
        module: ModuleKind::Ecs,
        name: "ecs-query",
        template: "workflows/ecs/query.json",
        description: "Answer enhanced claim status queries by the enabled query methods",
        condition: always,
    },
];

pub const SCHEMAS: &[SchemaSpec] = &[
    SchemaSpec {
        module: ModuleKind::Attachments,
        name: "attachment-metadata",
        template: "schemas/attachment-metadata.json",
        description: "Metadata recorded for each ingested attachment",
        condition: always,
    },
    SchemaSpec {
        module: ModuleKind::Authorizations,
        name: "authorization-request",
        template: "schemas/authorization-request.json",
        description: "Authorization inquiry request body",
        condition: always,
    },
    SchemaSpec {
        module: ModuleKind::Authorizations,
        name: "authorization-response",
        template: "schemas/authorization-response.json",
        description: "Authorization response body",
        condition: always,
    },
    SchemaSpec {
        module: ModuleKind::Appeals,
        name: "appeals-request",
        template: "schemas/appeals-request.json",
        description: "Appeal request body",
        condition: always,
    },
    SchemaSpec {
        module: ModuleKind::Appeals,
        name: "appeals-substatus",
        template: "schemas/appeals-substatus.json",
        description: "Appeal sub-status event",
        condition: sub_status_enabled,
    },
    SchemaSpec {
        module: ModuleKind::Ecs,
        name: "ecs-query-request",
        template: "schemas/ecs-query-request.json",
        description: "Enhanced claim status query",
        condition: always,
    },
    SchemaSpec {
        module: ModuleKind::Ecs,
        name: "ecs-query-response",
        template: "schemas/ecs-query-response.json",
        description: "Enhanced claim status result page",
        condition: always,
    },
];

/// Workflows produced for the enabled modules, in catalog order.
pub fn active_workflows(modules: &ModuleSet) -> Vec<&'static WorkflowSpec> {
    WORKFLOWS
        .iter()
        .filter(|spec| modules.get(spec.module).is_some_and(|config| (spec.condition)(config)))
        .collect()
}

/// Schemas produced for the enabled modules, in catalog order.
pub fn active_schemas(modules: &ModuleSet) -> Vec<&'static SchemaSpec> {
    SCHEMAS
        .iter()
        .filter(|spec| modules.get(spec.module).is_some_and(|config| (spec.condition)(config)))
        .collect()
}
