use crate::domain::{AppError, ArtifactDescriptor, ArtifactKind, TemplateContext, ValidatedConfig};
use crate::ports::{ArtifactGenerator, TemplateRenderer};

use super::render_artifact;

const GUIDES: &[&str] = &["docs/DEPLOYMENT.md", "docs/CONFIGURATION.md", "docs/TESTING.md"];

/// Tenant-specific deployment, configuration and testing guides.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentationGenerator;

impl ArtifactGenerator for DocumentationGenerator {
    fn name(&self) -> &'static str {
        "documentation"
    }

    fn generate(
        &self,
        config: &ValidatedConfig,
        renderer: &dyn TemplateRenderer,
    ) -> Result<Vec<ArtifactDescriptor>, AppError> {
        if config.config().modules.is_empty() {
            return Ok(Vec::new());
        }

        let context = TemplateContext::build(config);
        GUIDES
            .iter()
            .map(|guide| {
                render_artifact(renderer, self.name(), guide, &context, *guide, ArtifactKind::Documentation)
            })
            .collect()
    }
}
