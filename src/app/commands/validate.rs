use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::app::commands::generate::load_document;
use crate::domain::error::{EXIT_SUCCESS, EXIT_VALIDATION};
use crate::domain::{AppError, ValidationResult, validate};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOutcome {
    pub config_path: PathBuf,
    #[serde(flatten)]
    pub result: ValidationResult,
}

impl ValidateOutcome {
    pub fn exit_code(&self) -> i32 {
        if self.result.is_valid() { EXIT_SUCCESS } else { EXIT_VALIDATION }
    }
}

/// Validate a configuration file. An invalid configuration is an outcome,
/// not an error; only an unreadable or unparseable file fails.
pub fn execute(config_path: &Path) -> Result<ValidateOutcome, AppError> {
    let document = load_document(config_path)?;
    Ok(ValidateOutcome { config_path: config_path.to_path_buf(), result: validate(&document) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_value;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("payer.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn valid_configuration_exits_zero() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, &sample_value().to_string());
        let outcome = execute(&path).unwrap();
        assert!(outcome.result.is_valid());
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn invalid_configuration_is_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        let mut value = sample_value();
        value["monitoring"]["logRetentionDays"] = json!(5);
        let outcome = execute(&write(&dir, &value.to_string())).unwrap();
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(outcome.result.errors[0].path, "monitoring.logRetentionDays");

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["isValid"], false);
    }

    #[test]
    fn unparseable_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = execute(&write(&dir, "{ not json")).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}
