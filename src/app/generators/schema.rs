use tracing::debug;

use crate::domain::catalog::active_schemas;
use crate::domain::{AppError, ArtifactDescriptor, ArtifactKind, TemplateContext, ValidatedConfig};
use crate::ports::{ArtifactGenerator, TemplateRenderer};

use super::render_artifact;

/// JSON Schema contracts for the request and response bodies of enabled modules.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaGenerator;

impl ArtifactGenerator for SchemaGenerator {
    fn name(&self) -> &'static str {
        "schema"
    }

    fn generate(
        &self,
        config: &ValidatedConfig,
        renderer: &dyn TemplateRenderer,
    ) -> Result<Vec<ArtifactDescriptor>, AppError> {
        let modules = &config.config().modules;
        let context = TemplateContext::build(config);

        let mut artifacts = Vec::new();
        for spec in active_schemas(modules) {
            let Some(module) = modules.get(spec.module) else {
                continue;
            };
            debug!(schema = spec.name, module = spec.module.key(), "rendering schema");
            let artifact = render_artifact(
                renderer,
                self.name(),
                spec.template,
                &context.for_module(spec.module, module),
                spec.output_path(),
                ArtifactKind::Schema,
            )
            .map_err(|e| e.with_module(spec.module))?;
            artifacts.push(artifact);
        }
        Ok(artifacts)
    }
}
