use std::fs;
use std::path::{Path, PathBuf};

use crate::adapters::archetypes::{Archetype, find_archetype};
use crate::domain::AppError;

#[derive(Debug, Clone)]
pub struct TemplateOutcome {
    pub archetype: Archetype,
    /// Where the configuration was written; `None` when returned for stdout.
    pub written_to: Option<PathBuf>,
}

/// Emit the example configuration for an archetype, to `output` when given.
pub fn execute(kind: &str, output: Option<&Path>, force: bool) -> Result<TemplateOutcome, AppError> {
    let archetype = find_archetype(kind)?;

    let Some(output) = output else {
        return Ok(TemplateOutcome { archetype, written_to: None });
    };

    if output.exists() && !force {
        return Err(AppError::OutputExists(output.to_path_buf()));
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AppError::write_error(parent, e))?;
    }
    fs::write(output, archetype.content).map_err(|e| AppError::write_error(output, e))?;

    Ok(TemplateOutcome { archetype, written_to: Some(output.to_path_buf()) })
}
