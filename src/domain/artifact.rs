//! Generator output units.

use std::fmt;
use std::path::{Component, Path};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Workflow,
    Infrastructure,
    Documentation,
    Schema,
    /// Bundle-level files owned by the packager (config copy, README).
    Package,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::Workflow,
        ArtifactKind::Infrastructure,
        ArtifactKind::Documentation,
        ArtifactKind::Schema,
        ArtifactKind::Package,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::Workflow => "workflow",
            ArtifactKind::Infrastructure => "infrastructure",
            ArtifactKind::Documentation => "documentation",
            ArtifactKind::Schema => "schema",
            ArtifactKind::Package => "package",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which generator and template produced an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactOrigin {
    pub generator: String,
    pub template: Option<String>,
}

impl ArtifactOrigin {
    pub fn new(generator: impl Into<String>, template: Option<&str>) -> Self {
        Self { generator: generator.into(), template: template.map(str::to_owned) }
    }
}

impl fmt::Display for ArtifactOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.template {
            Some(template) => write!(f, "{} generator (template '{}')", self.generator, template),
            None => write!(f, "{} generator", self.generator),
        }
    }
}

/// One generated file: relative path, rendered content and kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    pub path: String,
    pub content: String,
    pub kind: ArtifactKind,
    pub origin: ArtifactOrigin,
    pub executable: bool,
}

impl ArtifactDescriptor {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
        kind: ArtifactKind,
        origin: ArtifactOrigin,
    ) -> Self {
        Self { path: path.into(), content: content.into(), kind, origin, executable: false }
    }

    pub fn executable(mut self) -> Self {
        self.executable = true;
        self
    }
}

/// Relative, `/`-separated, and free of `..`, root or prefix components.
pub fn is_safe_relative_path(path: &str) -> bool {
    if path.is_empty() || path.contains('\\') {
        return false;
    }
    Path::new(path).components().all(|component| matches!(component, Component::Normal(_)))
}
