//! Bundle generation pipeline.
//!
//! Load, validate, render, check, then commit. Nothing touches the output
//! directory before the commit step, and the commit writes every artifact or
//! none of them.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::app::AppContext;
use crate::domain::{
    AppError, ArtifactDescriptor, ArtifactKind, ArtifactOrigin, ConfigDocument, ModuleKind,
    TemplateContext, ValidatedConfig, ValidationIssue, is_safe_relative_path,
};
use crate::ports::{ArtifactSink, TemplateRenderer, WritePolicy};

/// Path of the verbatim configuration copy inside the bundle.
pub const CONFIG_COPY_PATH: &str = "config/payer-config.json";
/// Path of the bundle summary.
pub const README_PATH: &str = "README.md";
const README_TEMPLATE: &str = "package/README.md";
const PACKAGER: &str = "packager";

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Module keys to restrict generation to. `None` generates every enabled module.
    pub modules: Option<Vec<String>>,
    /// Compute artifacts and report paths without writing.
    pub dry_run: bool,
    /// Replace existing files at artifact paths.
    pub force: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    pub path: String,
    pub kind: ArtifactKind,
    pub sha256: String,
}

impl From<&ArtifactDescriptor> for ArtifactRecord {
    fn from(artifact: &ArtifactDescriptor) -> Self {
        Self {
            path: artifact.path.clone(),
            kind: artifact.kind,
            sha256: format!("{:x}", Sha256::digest(artifact.content.as_bytes())),
        }
    }
}

/// Summary of one generation run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub payer_id: String,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    /// Modules actually generated.
    pub modules: Vec<&'static str>,
    /// Requested modules that are disabled in the configuration.
    pub skipped_modules: Vec<&'static str>,
    pub counts: BTreeMap<ArtifactKind, usize>,
    pub artifacts: Vec<ArtifactRecord>,
    pub warnings: Vec<ValidationIssue>,
}

impl GenerationReport {
    pub fn total(&self) -> usize {
        self.artifacts.len()
    }
}

pub fn execute<R: TemplateRenderer, S: ArtifactSink>(
    ctx: &AppContext<R, S>,
    config_path: &Path,
    output_dir: &Path,
    options: &GenerateOptions,
) -> Result<GenerationReport, AppError> {
    let document = load_document(config_path)?;
    let validated = ValidatedConfig::load(document)?;
    for warning in validated.warnings() {
        warn!(path = %warning.path, rule = warning.rule, "{}", warning.message);
    }
    info!(payer = %validated.config().payer_id, "configuration is valid");

    let (validated, skipped) = restrict_modules(validated, options.modules.as_deref())?;
    let artifacts = render_bundle(ctx, &validated)?;
    check_paths(&artifacts)?;
    check_collisions(&artifacts)?;

    if options.dry_run {
        info!(artifacts = artifacts.len(), "dry run, nothing written");
    } else {
        let policy = if options.force { WritePolicy::Overwrite } else { WritePolicy::FailIfExists };
        ctx.sink().commit(&artifacts, policy)?;
        info!(artifacts = artifacts.len(), output = %output_dir.display(), "bundle written");
    }

    let mut counts: BTreeMap<ArtifactKind, usize> =
        ArtifactKind::ALL.iter().map(|kind| (*kind, 0)).collect();
    for artifact in &artifacts {
        *counts.entry(artifact.kind).or_default() += 1;
    }

    Ok(GenerationReport {
        payer_id: validated.config().payer_id.clone(),
        output_dir: output_dir.to_path_buf(),
        dry_run: options.dry_run,
        modules: validated.config().modules.kinds().into_iter().map(ModuleKind::key).collect(),
        skipped_modules: skipped.into_iter().map(ModuleKind::key).collect(),
        counts,
        artifacts: artifacts.iter().map(ArtifactRecord::from).collect(),
        warnings: validated.warnings().to_vec(),
    })
}

pub(crate) fn load_document(config_path: &Path) -> Result<ConfigDocument, AppError> {
    let raw = fs::read_to_string(config_path).map_err(|e| {
        AppError::config_error(format!("cannot read {}: {}", config_path.display(), e))
    })?;
    ConfigDocument::parse(raw)
}

/// Narrow generation to the requested module keys.
///
/// Unknown keys are an error. Requested modules that are disabled are
/// skipped and returned so the caller can report them.
fn restrict_modules(
    validated: ValidatedConfig,
    requested: Option<&[String]>,
) -> Result<(ValidatedConfig, Vec<ModuleKind>), AppError> {
    let Some(requested) = requested else {
        return Ok((validated, Vec::new()));
    };

    let mut kinds = Vec::new();
    for key in requested {
        let kind: ModuleKind = key.trim().parse()?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    let modules = &validated.config().modules;
    let (enabled, skipped): (Vec<_>, Vec<_>) =
        kinds.into_iter().partition(|kind| modules.is_enabled(*kind));
    for kind in &skipped {
        warn!(module = kind.key(), "requested module is disabled in the configuration, skipping");
    }

    Ok((validated.restricted_to(&enabled), skipped))
}

fn render_bundle<R: TemplateRenderer, S: ArtifactSink>(
    ctx: &AppContext<R, S>,
    validated: &ValidatedConfig,
) -> Result<Vec<ArtifactDescriptor>, AppError> {
    let mut artifacts = Vec::new();
    for generator in ctx.generators() {
        let produced = generator.generate(validated, ctx.renderer())?;
        info!(generator = generator.name(), artifacts = produced.len(), "generator finished");
        artifacts.extend(produced);
    }
    artifacts.extend(package_artifacts(validated, ctx.renderer())?);
    Ok(artifacts)
}

/// The configuration copy and the bundle README.
fn package_artifacts(
    validated: &ValidatedConfig,
    renderer: &dyn TemplateRenderer,
) -> Result<Vec<ArtifactDescriptor>, AppError> {
    let config_copy = ArtifactDescriptor::new(
        CONFIG_COPY_PATH,
        validated.document().raw(),
        ArtifactKind::Package,
        ArtifactOrigin::new(PACKAGER, None),
    );
    let readme = ArtifactDescriptor::new(
        README_PATH,
        renderer.render(README_TEMPLATE, &TemplateContext::build(validated))?,
        ArtifactKind::Package,
        ArtifactOrigin::new(PACKAGER, Some(README_TEMPLATE)),
    );
    Ok(vec![config_copy, readme])
}

fn check_paths(artifacts: &[ArtifactDescriptor]) -> Result<(), AppError> {
    match artifacts.iter().find(|artifact| !is_safe_relative_path(&artifact.path)) {
        Some(artifact) => Err(AppError::UnsafeArtifactPath {
            path: artifact.path.clone(),
            origin: artifact.origin.to_string(),
        }),
        None => Ok(()),
    }
}

/// Fail on the first path claimed by two artifacts, naming both origins.
fn check_collisions(artifacts: &[ArtifactDescriptor]) -> Result<(), AppError> {
    let mut seen: BTreeMap<&str, &ArtifactOrigin> = BTreeMap::new();
    for artifact in artifacts {
        if let Some(first) = seen.insert(artifact.path.as_str(), &artifact.origin) {
            return Err(AppError::ArtifactCollision {
                path: artifact.path.clone(),
                first: first.to_string(),
                second: artifact.origin.to_string(),
            });
        }
        debug!(path = %artifact.path, origin = %artifact.origin, "planned artifact");
    }
    Ok(())
}
