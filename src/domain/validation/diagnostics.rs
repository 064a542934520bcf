use super::{Severity, ValidationIssue, ValidationResult};

/// Ordered collector for validation findings.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl Diagnostics {
    pub fn push_error(&mut self, path: impl Into<String>, rule: &'static str, message: impl Into<String>) {
        let issue = ValidationIssue {
            path: path.into(),
            message: message.into(),
            rule,
            severity: Severity::Error,
        };
        self.errors.push(issue);
    }

    pub fn push_warning(
        &mut self,
        path: impl Into<String>,
        rule: &'static str,
        message: impl Into<String>,
    ) {
        let issue = ValidationIssue {
            path: path.into(),
            message: message.into(),
            rule,
            severity: Severity::Warning,
        };
        self.warnings.push(issue);
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// True when no error was recorded at `path` or any of its ancestors.
    pub fn is_clean(&self, path: &str) -> bool {
        !self.errors.iter().any(|issue| is_same_or_ancestor(&issue.path, path))
    }

    pub fn into_result(self) -> ValidationResult {
        ValidationResult { errors: self.errors, warnings: self.warnings }
    }
}

fn is_same_or_ancestor(candidate: &str, path: &str) -> bool {
    match path.strip_prefix(candidate) {
        Some("") => true,
        Some(rest) => rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_tracks_ancestors_not_siblings() {
        let mut diagnostics = Diagnostics::default();
        diagnostics.push_error("modules.ecs", "structure.type", "expected object");
        assert!(!diagnostics.is_clean("modules.ecs"));
        assert!(!diagnostics.is_clean("modules.ecs.endpoint"));
        assert!(diagnostics.is_clean("modules.ecsx"));
        assert!(diagnostics.is_clean("modules"));
    }

    #[test]
    fn warnings_do_not_make_paths_dirty() {
        let mut diagnostics = Diagnostics::default();
        diagnostics.push_warning("monitoring", "monitoring.retention", "short retention");
        assert!(diagnostics.is_clean("monitoring.logRetentionDays"));
        assert_eq!(diagnostics.error_count(), 0);
    }
}
