//! payergen: validate a payer tenant configuration and generate its
//! deployment bundle (Logic Apps workflows, Bicep infrastructure, guides and
//! JSON Schemas).

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::AppContext;
pub use app::api::{
    GenerateOptions, GenerationReport, TemplateOutcome, ValidateOutcome, generate, template,
    validate,
};
pub use domain::{AppError, ArtifactDescriptor, ArtifactKind, ArtifactOrigin, ValidatedConfig};
