//! API Facade for the application.
//!
//! Wires the embedded template engine and the filesystem sink into the
//! command implementations.

use std::path::Path;

use crate::adapters::filesystem::FilesystemArtifactSink;
use crate::adapters::templates::EmbeddedTemplateEngine;
use crate::app::AppContext;
use crate::app::commands;

pub use crate::app::commands::generate::{ArtifactRecord, GenerateOptions, GenerationReport};
pub use crate::app::commands::list::{ArchetypeInfo, HelperInfo, WorkflowTemplateInfo};
pub use crate::app::commands::template::TemplateOutcome;
pub use crate::app::commands::validate::ValidateOutcome;
pub use crate::domain::AppError;

/// Create an `AppContext` writing into `output_dir`.
fn create_context(
    output_dir: &Path,
) -> Result<AppContext<EmbeddedTemplateEngine, FilesystemArtifactSink>, AppError> {
    let renderer = EmbeddedTemplateEngine::new()?;
    let sink = FilesystemArtifactSink::new(output_dir);
    Ok(AppContext::new(renderer, sink))
}

// =============================================================================
// Validate Command API
// =============================================================================

/// Validate a configuration file and return every error and warning.
pub fn validate(config_path: &Path) -> Result<ValidateOutcome, AppError> {
    commands::validate::execute(config_path)
}

// =============================================================================
// Generate Command API
// =============================================================================

/// Generate the deployment bundle for `config_path` into `output_dir`.
pub fn generate(
    config_path: &Path,
    output_dir: &Path,
    options: &GenerateOptions,
) -> Result<GenerationReport, AppError> {
    let ctx = create_context(output_dir)?;
    commands::generate::execute(&ctx, config_path, output_dir, options)
}

// =============================================================================
// Template / List APIs
// =============================================================================

/// Emit an example configuration for a tenant archetype.
pub fn template(
    kind: &str,
    output: Option<&Path>,
    force: bool,
) -> Result<TemplateOutcome, AppError> {
    commands::template::execute(kind, output, force)
}

/// Workflow templates known to the template engine.
pub fn list_workflows() -> Result<Vec<WorkflowTemplateInfo>, AppError> {
    let engine = EmbeddedTemplateEngine::new()?;
    Ok(commands::list::workflows(&engine))
}

/// Template helpers with the table version.
pub fn list_helpers() -> Result<(u32, Vec<HelperInfo>), AppError> {
    commands::list::helpers()
}

/// Archetypes accepted by [`template`].
pub fn list_archetypes() -> Result<Vec<ArchetypeInfo>, AppError> {
    commands::list::archetypes()
}
