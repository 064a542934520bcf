use crate::domain::{AppError, ArtifactDescriptor};

/// How existing files at artifact paths are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Any existing file at an artifact path aborts the commit.
    #[default]
    FailIfExists,
    /// Existing files at artifact paths are replaced. Nothing else is removed.
    Overwrite,
}

/// Port for committing a complete artifact set.
///
/// Implementations write all artifacts or none of them.
pub trait ArtifactSink {
    fn commit(&self, artifacts: &[ArtifactDescriptor], policy: WritePolicy) -> Result<(), AppError>;
}
