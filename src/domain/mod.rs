pub mod artifact;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod identifiers;
pub mod naming;
pub mod settings;
pub mod validation;

pub use artifact::{ArtifactDescriptor, ArtifactKind, ArtifactOrigin, is_safe_relative_path};
pub use catalog::{SCHEMAS, SchemaSpec, WORKFLOWS, WorkflowSpec};
pub use config::{ConfigDocument, ModuleConfig, ModuleKind, ModuleSet, PayerConfiguration};
pub use context::TemplateContext;
pub use error::AppError;
pub use naming::ResourceNames;
pub use settings::{GeneratorSettings, LogFormat};
pub use validation::{Severity, ValidatedConfig, ValidationIssue, ValidationResult, validate};
