//! Example configurations for common tenant shapes.

use include_dir::{Dir, include_dir};

use crate::domain::AppError;

static ARCHETYPES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/archetypes");

/// An embedded example configuration.
#[derive(Debug, Clone, Copy)]
pub struct Archetype {
    pub name: &'static str,
    pub description: &'static str,
    pub content: &'static str,
}

const DESCRIPTIONS: &[(&str, &str)] = &[
    ("attachments-only", "Claim attachments over SFTP, nothing else"),
    ("commercial", "Commercial plan: attachments, appeals and claim status in prod"),
    ("infrastructure-only", "Shared infrastructure with every module disabled"),
    ("medicaid-mco", "Medicaid managed care plan with every module enabled"),
];

/// All embedded archetypes, sorted by name.
pub fn list_archetypes() -> Result<Vec<Archetype>, AppError> {
    let mut archetypes = Vec::new();
    for file in ARCHETYPES_DIR.files() {
        let path = file.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let name = path.file_stem().and_then(|stem| stem.to_str()).ok_or_else(|| {
            AppError::Internal(format!("Invalid archetype file name: {}", path.display()))
        })?;
        let content = file.contents_utf8().ok_or_else(|| {
            AppError::Internal(format!("Archetype {} is not UTF-8", path.display()))
        })?;
        let description = DESCRIPTIONS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, description)| *description)
            .unwrap_or("");
        archetypes.push(Archetype { name, description, content });
    }
    archetypes.sort_by_key(|archetype| archetype.name);
    Ok(archetypes)
}

/// Look up an archetype by name.
pub fn find_archetype(name: &str) -> Result<Archetype, AppError> {
    let archetypes = list_archetypes()?;
    archetypes.iter().find(|archetype| archetype.name == name).copied().ok_or_else(|| {
        AppError::UnknownArchetype {
            name: name.to_string(),
            available: archetypes.iter().map(|a| a.name).collect::<Vec<_>>().join(", "),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigDocument, validate};

    #[test]
    fn every_archetype_is_valid_without_warnings() {
        let archetypes = list_archetypes().unwrap();
        assert_eq!(archetypes.len(), DESCRIPTIONS.len());
        for archetype in archetypes {
            let document = ConfigDocument::parse(archetype.content).unwrap();
            let result = validate(&document);
            assert!(result.is_valid(), "{}: {:?}", archetype.name, result.errors);
            assert!(result.warnings.is_empty(), "{}: {:?}", archetype.name, result.warnings);
            assert!(!archetype.description.is_empty(), "{}", archetype.name);
        }
    }

    #[test]
    fn unknown_archetype_lists_available_names() {
        let err = find_archetype("hmo").unwrap_err();
        match err {
            AppError::UnknownArchetype { name, available } => {
                assert_eq!(name, "hmo");
                assert!(available.contains("medicaid-mco"));
                assert!(available.contains("infrastructure-only"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn infrastructure_only_disables_every_module() {
        let archetype = find_archetype("infrastructure-only").unwrap();
        let document = ConfigDocument::parse(archetype.content).unwrap();
        let config = crate::domain::PayerConfiguration::from_document(&document).unwrap();
        assert!(config.modules.is_empty());
    }
}
