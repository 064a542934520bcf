use crate::domain::{AppError, ArtifactDescriptor, ArtifactKind, TemplateContext, ValidatedConfig};
use crate::ports::{ArtifactGenerator, TemplateRenderer};

use super::render_artifact;

const TEMPLATE: &str = "infrastructure/main.bicep";
const PARAMETERS: &str = "infrastructure/main.parameters.json";
const DEPLOY_SCRIPT: &str = "infrastructure/deploy.sh";

/// Bicep template, its parameters file and the deployment script.
///
/// Emitted even when no module is enabled: shared resources are still
/// provisioned for an infrastructure-only tenant. This is the only generator
/// that does not return an empty list for an all-disabled configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfrastructureGenerator;

impl ArtifactGenerator for InfrastructureGenerator {
    fn name(&self) -> &'static str {
        "infrastructure"
    }

    fn generate(
        &self,
        config: &ValidatedConfig,
        renderer: &dyn TemplateRenderer,
    ) -> Result<Vec<ArtifactDescriptor>, AppError> {
        let context = TemplateContext::build(config);
        let render = |template: &str| {
            render_artifact(
                renderer,
                self.name(),
                template,
                &context,
                template,
                ArtifactKind::Infrastructure,
            )
        };

        Ok(vec![render(TEMPLATE)?, render(PARAMETERS)?, render(DEPLOY_SCRIPT)?.executable()])
    }
}
