use tracing::debug;

use crate::domain::catalog::active_workflows;
use crate::domain::{AppError, ArtifactDescriptor, ArtifactKind, TemplateContext, ValidatedConfig};
use crate::ports::{ArtifactGenerator, TemplateRenderer};

use super::render_artifact;

/// One Logic Apps workflow definition per active catalog entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowGenerator;

impl ArtifactGenerator for WorkflowGenerator {
    fn name(&self) -> &'static str {
        "workflow"
    }

    fn generate(
        &self,
        config: &ValidatedConfig,
        renderer: &dyn TemplateRenderer,
    ) -> Result<Vec<ArtifactDescriptor>, AppError> {
        let modules = &config.config().modules;
        let context = TemplateContext::build(config);

        let mut artifacts = Vec::new();
        for spec in active_workflows(modules) {
            let Some(module) = modules.get(spec.module) else {
                continue;
            };
            debug!(workflow = spec.name, module = spec.module.key(), "rendering workflow");
            let artifact = render_artifact(
                renderer,
                self.name(),
                spec.template,
                &context.for_workflow(spec, module),
                spec.output_path(),
                ArtifactKind::Workflow,
            )
            .map_err(|e| e.with_module(spec.module))?;
            artifacts.push(artifact);
        }
        Ok(artifacts)
    }
}
