use crate::domain::{AppError, TemplateContext};

/// Port for rendering named templates against a configuration context.
///
/// Rendering is deterministic: the same id and context always produce the
/// same text.
pub trait TemplateRenderer {
    /// Render a template by id (its path without the `.j2` suffix).
    fn render(&self, template_id: &str, context: &TemplateContext) -> Result<String, AppError>;

    /// Whether a renderable template with this id exists.
    fn contains(&self, template_id: &str) -> bool;

    /// Renderable template ids, sorted.
    fn template_ids(&self) -> Vec<&str>;
}
