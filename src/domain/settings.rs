//! Tool settings loaded from `payergen.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Default settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "payergen.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSettings {
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    /// Directory the bundle is written to when `--output` is absent.
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
    /// Overwrite existing files without `--force`.
    #[serde(default)]
    pub force: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { directory: default_output_dir(), force: false }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: default_log_level(), format: LogFormat::default() }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl GeneratorSettings {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.output.directory.as_os_str().is_empty() {
            return Err(AppError::Settings("output.directory must not be empty".to_string()));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(AppError::Settings(format!(
                "logging.level '{}' must be one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn parse(content: &str) -> Result<Self, AppError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from an explicit path, or from `payergen.toml` in `dir` when it
    /// exists, or fall back to defaults.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, AppError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = dir.join(SETTINGS_FILE);
                if !candidate.exists() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = fs::read_to_string(&path).map_err(|e| {
            AppError::Settings(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let settings = GeneratorSettings::default();
        assert_eq!(settings.output.directory, PathBuf::from("output"));
        assert!(!settings.output.force);
        assert_eq!(settings.logging.level, "warn");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn parse_partial_file() {
        let settings = GeneratorSettings::parse("[output]\ndirectory = \"dist\"\n").unwrap();
        assert_eq!(settings.output.directory, PathBuf::from("dist"));
        assert_eq!(settings.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        let err = GeneratorSettings::parse("[output]\ndir = \"dist\"\n").unwrap_err();
        assert!(matches!(err, AppError::TomlParse(_)));
    }

    #[test]
    fn validate_rejects_unknown_level() {
        let err = GeneratorSettings::parse("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(matches!(err, AppError::Settings(msg) if msg.contains("loud")));
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = GeneratorSettings::load(None, dir.path()).unwrap();
        assert_eq!(settings.output.directory, PathBuf::from("output"));
    }

    #[test]
    fn load_reads_file_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "[logging]\nformat = \"json\"\n").unwrap();
        let settings = GeneratorSettings::load(None, dir.path()).unwrap();
        assert_eq!(settings.logging.format, LogFormat::Json);
    }
}
