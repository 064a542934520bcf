//! Configuration validation.
//!
//! Two passes over the parsed document:
//! 1. structural: presence and primitive type of fields, enum membership
//! 2. rules: module-specific required fields, endpoint URLs, cross-field
//!    consistency and numeric ranges
//!
//! Both passes record every violation; nothing stops at the first error.

mod diagnostics;
pub mod rules;
pub mod schema;
pub mod structural;

use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::domain::AppError;
use crate::domain::config::{ConfigDocument, PayerConfiguration};

pub use diagnostics::Diagnostics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One finding: field path, message and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
    pub rule: &'static str,
    pub severity: Severity,
}

/// Outcome of validating one configuration.
///
/// Valid if and only if there are no errors; warnings never affect validity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.end()
    }
}

/// Validate a parsed configuration document. Pure over its input.
pub fn validate(document: &ConfigDocument) -> ValidationResult {
    let mut diagnostics = Diagnostics::default();
    structural::structural_checks(document.root(), &mut diagnostics);
    rules::rule_checks(document.root(), &mut diagnostics);
    diagnostics.into_result()
}

/// A configuration that passed validation, with its typed projection.
///
/// Only obtainable through [`ValidatedConfig::load`], so generators can rely on
/// every invariant the validator enforces.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    document: ConfigDocument,
    config: PayerConfiguration,
    warnings: Vec<ValidationIssue>,
}

impl ValidatedConfig {
    /// Validate and, on success, build the typed configuration.
    pub fn load(document: ConfigDocument) -> Result<Self, AppError> {
        let result = validate(&document);
        if !result.is_valid() {
            return Err(AppError::ValidationFailed(result));
        }

        let config = PayerConfiguration::from_document(&document)?;
        Ok(Self { document, config, warnings: result.warnings })
    }

    pub fn config(&self) -> &PayerConfiguration {
        &self.config
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn warnings(&self) -> &[ValidationIssue] {
        &self.warnings
    }

    /// Same configuration with generation limited to the given module kinds.
    pub fn restricted_to(&self, kinds: &[crate::domain::config::ModuleKind]) -> Self {
        let mut restricted = self.clone();
        restricted.config.modules = self.config.modules.restrict(kinds);
        restricted
    }
}
