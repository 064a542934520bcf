//! Library-level contracts: collision handling and the public facade.

mod common;

use common::{TestContext, full_config, sample_config, snapshot};
use payergen::adapters::filesystem::FilesystemArtifactSink;
use payergen::adapters::templates::EmbeddedTemplateEngine;
use payergen::app::commands::generate;
use payergen::app::generators::{InfrastructureGenerator, WorkflowGenerator};
use payergen::ports::{ArtifactGenerator, TemplateRenderer};
use payergen::{
    AppContext, AppError, ArtifactDescriptor, ArtifactKind, ArtifactOrigin, GenerateOptions,
    ValidatedConfig,
};
use std::fs;

/// Emits the attachments ingest workflow path a second time.
struct ShadowWorkflow;

impl ArtifactGenerator for ShadowWorkflow {
    fn name(&self) -> &'static str {
        "shadow"
    }

    fn generate(
        &self,
        _config: &ValidatedConfig,
        _renderer: &dyn TemplateRenderer,
    ) -> Result<Vec<ArtifactDescriptor>, AppError> {
        Ok(vec![ArtifactDescriptor::new(
            "workflows/attachments-ingest/definition.json",
            "{}",
            ArtifactKind::Workflow,
            ArtifactOrigin::new(self.name(), None),
        )])
    }
}

#[test]
fn collision_fails_before_any_file_is_written() {
    let ctx = TestContext::new();
    let config = ctx.write_config("payer.json", &sample_config());
    let out = ctx.output_dir();
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("existing.txt"), "untouched").unwrap();
    let before = snapshot(&out);

    let app = AppContext::with_generators(
        EmbeddedTemplateEngine::new().unwrap(),
        FilesystemArtifactSink::new(&out),
        vec![Box::new(WorkflowGenerator), Box::new(InfrastructureGenerator), Box::new(ShadowWorkflow)],
    );
    let err = generate::execute(&app, &config, &out, &GenerateOptions::default()).unwrap_err();

    match &err {
        AppError::ArtifactCollision { path, first, second } => {
            assert_eq!(path, "workflows/attachments-ingest/definition.json");
            assert!(first.contains("workflow generator"));
            assert!(second.contains("shadow generator"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.exit_code(), 3);
    assert_eq!(snapshot(&out), before);
}

#[test]
fn facade_generates_and_reports_digests() {
    let ctx = TestContext::new();
    let config = ctx.write_config("payer.json", &full_config());
    let out = ctx.output_dir();

    let report = payergen::generate(&config, &out, &GenerateOptions::default()).unwrap();
    assert_eq!(report.modules, vec!["attachments", "authorizations", "appeals", "ecs"]);
    for artifact in &report.artifacts {
        let content = fs::read(out.join(&artifact.path)).unwrap();
        assert!(!content.is_empty(), "{}", artifact.path);
        assert_eq!(artifact.sha256.len(), 64);
    }
    assert_eq!(report.total(), snapshot(&out).len());
}

#[test]
fn facade_validate_reports_without_failing() {
    let ctx = TestContext::new();
    let mut value = sample_config();
    value["infrastructure"]["environment"] = serde_json::json!("staging");
    let config = ctx.write_config("payer.json", &value);

    let outcome = payergen::validate(&config).unwrap();
    assert!(!outcome.result.is_valid());
    assert_eq!(outcome.exit_code(), 1);
}
