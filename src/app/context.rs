use crate::app::generators::builtin_generators;
use crate::ports::{ArtifactGenerator, ArtifactSink, TemplateRenderer};

/// Application context holding dependencies for command execution.
pub struct AppContext<R: TemplateRenderer, S: ArtifactSink> {
    renderer: R,
    sink: S,
    generators: Vec<Box<dyn ArtifactGenerator>>,
}

impl<R: TemplateRenderer, S: ArtifactSink> AppContext<R, S> {
    /// Create a context running the built-in generators.
    pub fn new(renderer: R, sink: S) -> Self {
        Self::with_generators(renderer, sink, builtin_generators())
    }

    /// Create a context running a custom generator set.
    pub fn with_generators(
        renderer: R,
        sink: S,
        generators: Vec<Box<dyn ArtifactGenerator>>,
    ) -> Self {
        Self { renderer, sink, generators }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn generators(&self) -> &[Box<dyn ArtifactGenerator>] {
        &self.generators
    }
}
