mod artifact_generator;
mod artifact_sink;
mod template_renderer;

pub use artifact_generator::ArtifactGenerator;
pub use artifact_sink::{ArtifactSink, WritePolicy};
pub use template_renderer::TemplateRenderer;
