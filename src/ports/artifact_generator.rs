use crate::domain::{AppError, ArtifactDescriptor, ValidatedConfig};

use super::TemplateRenderer;

/// One stage of bundle generation.
///
/// Generators read only the validated configuration and the renderer, so
/// they can run in any order. A configuration with no enabled modules is not
/// an error; generators with nothing to emit return an empty list.
pub trait ArtifactGenerator {
    /// Short name used in artifact origins and logs.
    fn name(&self) -> &'static str;

    fn generate(
        &self,
        config: &ValidatedConfig,
        renderer: &dyn TemplateRenderer,
    ) -> Result<Vec<ArtifactDescriptor>, AppError>;
}
