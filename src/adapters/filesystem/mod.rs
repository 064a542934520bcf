//! Filesystem adapter for the artifact sink port.
//!
//! Writes happen in three phases so a failed run never leaves a partial tree:
//! preflight checks every target, staging writes every file into a sibling
//! temporary directory, and commit renames staged files into place. Files
//! replaced under [`WritePolicy::Overwrite`] are moved aside into the staging
//! directory first and restored if the commit fails.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::domain::{AppError, ArtifactDescriptor, is_safe_relative_path};
use crate::ports::{ArtifactSink, WritePolicy};

/// Staging subdirectory holding the new content.
const STAGED_DIR: &str = "staged";
/// Staging subdirectory holding files displaced by an overwrite.
const BACKUP_DIR: &str = "backup";

/// Artifact sink rooted at an output directory.
#[derive(Debug, Clone)]
pub struct FilesystemArtifactSink {
    root: PathBuf,
}

impl FilesystemArtifactSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn preflight(
        &self,
        artifacts: &[ArtifactDescriptor],
        policy: WritePolicy,
    ) -> Result<(), AppError> {
        for artifact in artifacts {
            if !is_safe_relative_path(&artifact.path) {
                return Err(AppError::UnsafeArtifactPath {
                    path: artifact.path.clone(),
                    origin: artifact.origin.to_string(),
                });
            }
            let target = self.root.join(&artifact.path);
            if target.is_dir() {
                return Err(AppError::write_error(
                    &target,
                    std::io::Error::other("a directory exists at this path"),
                ));
            }
            if policy == WritePolicy::FailIfExists && target.exists() {
                return Err(AppError::OutputExists(target));
            }
        }
        Ok(())
    }

    fn stage(&self, artifacts: &[ArtifactDescriptor]) -> Result<TempDir, AppError> {
        let parent = match self.root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| AppError::write_error(&parent, e))?;

        let staging = tempfile::Builder::new()
            .prefix(".payergen-staging-")
            .tempdir_in(&parent)
            .map_err(|e| AppError::write_error(&parent, e))?;

        for artifact in artifacts {
            let staged = staging.path().join(STAGED_DIR).join(&artifact.path);
            if let Some(dir) = staged.parent() {
                fs::create_dir_all(dir).map_err(|e| AppError::write_error(dir, e))?;
            }
            fs::write(&staged, &artifact.content)
                .map_err(|e| AppError::write_error(self.root.join(&artifact.path), e))?;
            if artifact.executable {
                set_executable(&staged)?;
            }
        }
        Ok(staging)
    }

    fn commit_staged(
        &self,
        staging: &Path,
        artifacts: &[ArtifactDescriptor],
        journal: &mut Journal,
    ) -> Result<(), AppError> {
        for artifact in artifacts {
            let target = self.root.join(&artifact.path);
            if let Some(dir) = target.parent() {
                create_dirs(dir, journal)?;
            }
            if target.exists() {
                let backup = staging.join(BACKUP_DIR).join(&artifact.path);
                if let Some(dir) = backup.parent() {
                    fs::create_dir_all(dir).map_err(|e| AppError::write_error(dir, e))?;
                }
                fs::rename(&target, &backup).map_err(|e| AppError::write_error(&target, e))?;
                journal.replaced.push((target.clone(), backup));
            } else {
                journal.files.push(target.clone());
            }
            fs::rename(staging.join(STAGED_DIR).join(&artifact.path), &target)
                .map_err(|e| AppError::write_error(&target, e))?;
            debug!(path = %artifact.path, kind = %artifact.kind, "wrote artifact");
        }
        Ok(())
    }
}

/// What this run changed, for rollback.
#[derive(Debug, Default)]
struct Journal {
    /// Files that did not exist before the run.
    files: Vec<PathBuf>,
    /// Existing files moved aside, as `(target, backup)`.
    replaced: Vec<(PathBuf, PathBuf)>,
    dirs: Vec<PathBuf>,
}

impl Journal {
    fn rollback(self) {
        for file in self.files.iter().rev() {
            if file.exists()
                && let Err(e) = fs::remove_file(file)
            {
                warn!(path = %file.display(), error = %e, "could not remove file during rollback");
            }
        }
        for (target, backup) in self.replaced.iter().rev() {
            if target.exists() {
                let _ = fs::remove_file(target);
            }
            if let Err(e) = fs::rename(backup, target) {
                warn!(path = %target.display(), error = %e, "could not restore file during rollback");
            }
        }
        for dir in self.dirs.iter().rev() {
            let _ = fs::remove_dir(dir);
        }
    }
}

/// Create `dir` and any missing ancestors, recording the ones created here.
/// An already-existing directory is not an error.
fn create_dirs(dir: &Path, journal: &mut Journal) -> Result<(), AppError> {
    let missing: Vec<&Path> = dir.ancestors().take_while(|ancestor| !ancestor.exists()).collect();
    for ancestor in missing.into_iter().rev() {
        match fs::create_dir(ancestor) {
            Ok(()) => journal.dirs.push(ancestor.to_path_buf()),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(AppError::write_error(ancestor, e)),
        }
    }
    Ok(())
}

fn set_executable(path: &Path) -> Result<(), AppError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms =
            fs::metadata(path).map_err(|e| AppError::write_error(path, e))?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms).map_err(|e| AppError::write_error(path, e))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

impl ArtifactSink for FilesystemArtifactSink {
    fn commit(&self, artifacts: &[ArtifactDescriptor], policy: WritePolicy) -> Result<(), AppError> {
        self.preflight(artifacts, policy)?;
        let staging = self.stage(artifacts)?;

        let mut journal = Journal::default();
        match self.commit_staged(staging.path(), artifacts, &mut journal) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = %e, "commit failed, rolling back");
                journal.rollback();
                Err(e)
            }
        }
    }
}
