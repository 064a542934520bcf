//! The four artifact generators.
//!
//! Each generator reads the validated configuration and renders its templates
//! through the [`TemplateRenderer`] port. None of them depends on another's
//! output.

mod documentation;
mod infrastructure;
mod schema;
mod workflow;

pub use documentation::DocumentationGenerator;
pub use infrastructure::InfrastructureGenerator;
pub use schema::SchemaGenerator;
pub use workflow::WorkflowGenerator;

use crate::domain::{AppError, ArtifactDescriptor, ArtifactKind, ArtifactOrigin, TemplateContext};
use crate::ports::{ArtifactGenerator, TemplateRenderer};

/// Workflow, infrastructure, documentation and schema generators.
pub fn builtin_generators() -> Vec<Box<dyn ArtifactGenerator>> {
    vec![
        Box::new(WorkflowGenerator),
        Box::new(InfrastructureGenerator),
        Box::new(DocumentationGenerator),
        Box::new(SchemaGenerator),
    ]
}

/// Render one template into an artifact at `path`.
pub(crate) fn render_artifact(
    renderer: &dyn TemplateRenderer,
    generator: &'static str,
    template: &str,
    context: &TemplateContext,
    path: impl Into<String>,
    kind: ArtifactKind,
) -> Result<ArtifactDescriptor, AppError> {
    let content = renderer.render(template, context)?;
    Ok(ArtifactDescriptor::new(path, content, kind, ArtifactOrigin::new(generator, Some(template))))
}
