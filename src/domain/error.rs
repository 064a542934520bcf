use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::config::ModuleKind;
use crate::domain::validation::ValidationResult;

/// Exit status for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status when the configuration is unusable or invalid.
pub const EXIT_VALIDATION: i32 = 1;
/// Exit status when a template fails to render.
pub const EXIT_GENERATION: i32 = 2;
/// Exit status when two artifacts claim the same output path.
pub const EXIT_COLLISION: i32 = 3;
/// Exit status when the output tree cannot be written.
pub const EXIT_IO: i32 = 4;

/// Library-wide error type for payergen operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure outside of the commit phase.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Input is not a usable configuration document at all.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Well-formed configuration that violates schema or business rules.
    #[error("Configuration is invalid: {} error(s)", .0.errors.len())]
    ValidationFailed(ValidationResult),

    /// A template could not be resolved against its context.
    #[error(
        "Failed to render template '{template}'{}{}: {details}",
        module.as_ref().map(|m| format!(" for module '{m}'")).unwrap_or_default(),
        variable.as_ref().map(|v| format!(" (variable '{v}')")).unwrap_or_default()
    )]
    TemplateRender {
        template: String,
        module: Option<String>,
        variable: Option<String>,
        details: String,
    },

    /// Template id is not part of the embedded catalog.
    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    /// A generator produced a path outside the output tree.
    #[error("Artifact path '{path}' from {origin} is not a safe relative path")]
    UnsafeArtifactPath { path: String, origin: String },

    /// Two generators produced the same output path.
    #[error("Artifact collision at '{path}': produced by both {first} and {second}")]
    ArtifactCollision { path: String, first: String, second: String },

    /// An artifact would overwrite an existing file and `--force` was not given.
    #[error("Output path already exists: {} (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),

    /// File-system failure while writing the artifact tree.
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Embedded asset or engine setup failure.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Helper registry setup registered the same name twice.
    #[error("Template helper '{0}' is registered more than once")]
    DuplicateHelper(String),

    /// Module key is not one of the known modules.
    #[error("Unknown module '{name}'. Available: {available}")]
    UnknownModule { name: String, available: String },

    /// Archetype name passed to `template` is unknown.
    #[error("Unknown archetype '{name}'. Available: {available}")]
    UnknownArchetype { name: String, available: String },

    /// Tool settings file is malformed.
    #[error("Invalid settings: {0}")]
    Settings(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn write_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AppError::Write { path: path.into(), source }
    }

    /// Attach the module a render failure happened for.
    pub fn with_module(self, kind: ModuleKind) -> Self {
        match self {
            AppError::TemplateRender { template, module: None, variable, details } => {
                AppError::TemplateRender {
                    template,
                    module: Some(kind.key().to_string()),
                    variable,
                    details,
                }
            }
            other => other,
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Configuration(_)
            | AppError::ValidationFailed(_)
            | AppError::UnknownModule { .. }
            | AppError::UnknownArchetype { .. }
            | AppError::Settings(_)
            | AppError::TomlParse(_) => EXIT_VALIDATION,
            AppError::TemplateRender { .. }
            | AppError::TemplateNotFound(_)
            | AppError::UnsafeArtifactPath { .. }
            | AppError::Internal(_)
            | AppError::DuplicateHelper(_) => EXIT_GENERATION,
            AppError::ArtifactCollision { .. } => EXIT_COLLISION,
            AppError::Io(_) | AppError::Write { .. } | AppError::OutputExists(_) => EXIT_IO,
        }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting it.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) | AppError::Write { source: err, .. } => err.kind(),
            AppError::OutputExists(_) | AppError::ArtifactCollision { .. } => {
                io::ErrorKind::AlreadyExists
            }
            AppError::TemplateNotFound(_) => io::ErrorKind::NotFound,
            _ => io::ErrorKind::InvalidInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_failure_class() {
        assert_eq!(AppError::config_error("bad").exit_code(), EXIT_VALIDATION);
        assert_eq!(
            AppError::ValidationFailed(ValidationResult::default()).exit_code(),
            EXIT_VALIDATION
        );
        let render = AppError::TemplateRender {
            template: "docs/TESTING.md".into(),
            module: None,
            variable: Some("payer.id".into()),
            details: "missing".into(),
        };
        assert_eq!(render.exit_code(), EXIT_GENERATION);
        let collision = AppError::ArtifactCollision {
            path: "README.md".into(),
            first: "a".into(),
            second: "b".into(),
        };
        assert_eq!(collision.exit_code(), EXIT_COLLISION);
        let write = AppError::write_error("out/x", io::Error::other("disk full"));
        assert_eq!(write.exit_code(), EXIT_IO);
    }

    #[test]
    fn with_module_fills_render_errors_only() {
        let err = AppError::TemplateRender {
            template: "workflows/ecs/query.json".into(),
            module: None,
            variable: None,
            details: "boom".into(),
        }
        .with_module(ModuleKind::Ecs);
        assert!(matches!(err, AppError::TemplateRender { module: Some(ref m), .. } if m == "ecs"));
        let other = AppError::config_error("x").with_module(ModuleKind::Ecs);
        assert!(matches!(other, AppError::Configuration(_)));
    }

    #[test]
    fn render_error_names_template_module_and_variable() {
        let err = AppError::TemplateRender {
            template: "workflows/ecs/query.json".into(),
            module: Some("ecs".into()),
            variable: Some("module.endpoint".into()),
            details: "required variable is missing".into(),
        };
        let message = err.to_string();
        assert!(message.contains("workflows/ecs/query.json"));
        assert!(message.contains("module 'ecs'"));
        assert!(message.contains("variable 'module.endpoint'"));
    }
}
