use include_dir::{Dir, DirEntry};

use crate::domain::AppError;

const TEMPLATE_SUFFIX: &str = ".j2";

/// One embedded template source.
#[derive(Debug, Clone, Copy)]
pub struct TemplateSource {
    /// Path relative to the templates root, without the `.j2` suffix.
    pub id: &'static str,
    pub content: &'static str,
    /// Partials are imported by other templates and never rendered alone.
    pub partial: bool,
}

impl TemplateSource {
    pub fn new(id: &'static str, content: &'static str) -> Self {
        let file_name = id.rsplit('/').next().unwrap_or(id);
        Self { id, content, partial: file_name.starts_with('_') }
    }
}

pub fn collect_template_sources(dir: &'static Dir<'static>) -> Result<Vec<TemplateSource>, AppError> {
    let mut sources = Vec::new();
    collect_entries(dir, &mut sources)?;
    sources.sort_by(|a, b| a.id.cmp(b.id));
    Ok(sources)
}

fn collect_entries(
    dir: &'static Dir<'static>,
    sources: &mut Vec<TemplateSource>,
) -> Result<(), AppError> {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                let path = file.path().to_str().ok_or_else(|| {
                    AppError::Internal(format!(
                        "Embedded template path is not UTF-8: {}",
                        file.path().to_string_lossy()
                    ))
                })?;
                let Some(id) = path.strip_suffix(TEMPLATE_SUFFIX) else {
                    continue;
                };
                let content = file.contents_utf8().ok_or_else(|| {
                    AppError::Internal(format!("Embedded template is not UTF-8: {path}"))
                })?;
                sources.push(TemplateSource::new(id, content));
            }
            DirEntry::Dir(subdir) => collect_entries(subdir, sources)?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partials_are_detected_by_file_name() {
        assert!(TemplateSource::new("workflows/_macros", "").partial);
        assert!(!TemplateSource::new("workflows/ecs/query.json", "").partial);
        assert!(TemplateSource::new("_root", "").partial);
    }
}
