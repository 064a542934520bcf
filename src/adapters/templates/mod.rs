//! Embedded minijinja template engine.

mod asset_collect;
pub mod helpers;

use include_dir::{Dir, include_dir};
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};

use crate::domain::{AppError, TemplateContext};
use crate::ports::TemplateRenderer;

pub use self::asset_collect::TemplateSource;
use self::asset_collect::collect_template_sources;
use self::helpers::{HelperRegistry, REQUIRED_PREFIX};

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

/// Template engine over the templates compiled into the binary.
///
/// Undefined variables render empty and chain through attribute access, so
/// templates can test optional configuration with `{% if modules.ecs %}`.
/// A template that must have a value wraps it in `required(value, "name")`.
#[derive(Debug)]
pub struct EmbeddedTemplateEngine {
    env: Environment<'static>,
    renderable: Vec<&'static str>,
}

impl EmbeddedTemplateEngine {
    pub fn new() -> Result<Self, AppError> {
        let sources = collect_template_sources(&TEMPLATES_DIR)?;
        if sources.is_empty() {
            return Err(AppError::Internal("No embedded templates found".to_string()));
        }
        Self::from_sources(&sources, &HelperRegistry::builtin()?)
    }

    pub fn from_sources(
        sources: &[TemplateSource],
        helpers: &HelperRegistry,
    ) -> Result<Self, AppError> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_undefined_behavior(UndefinedBehavior::Chainable);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        helpers.install(&mut env);

        for source in sources {
            env.add_template(source.id, source.content)
                .map_err(|e| render_error(source.id, &e))?;
        }

        let renderable = sources.iter().filter(|source| !source.partial).map(|s| s.id).collect();
        Ok(Self { env, renderable })
    }
}

impl TemplateRenderer for EmbeddedTemplateEngine {
    fn render(&self, template_id: &str, context: &TemplateContext) -> Result<String, AppError> {
        if !self.contains(template_id) {
            return Err(AppError::TemplateNotFound(template_id.to_string()));
        }

        let template =
            self.env.get_template(template_id).map_err(|e| render_error(template_id, &e))?;
        let rendered = template.render(context).map_err(|e| render_error(template_id, &e))?;

        if template_id.ends_with(".json") {
            return canonical_json(template_id, &rendered);
        }
        Ok(rendered)
    }

    fn contains(&self, template_id: &str) -> bool {
        self.renderable.contains(&template_id)
    }

    fn template_ids(&self) -> Vec<&str> {
        self.renderable.clone()
    }
}

fn render_error(template_id: &str, error: &minijinja::Error) -> AppError {
    let variable = match error.kind() {
        ErrorKind::UndefinedError => error
            .detail()
            .and_then(|detail| detail.strip_prefix(REQUIRED_PREFIX))
            .and_then(|rest| rest.strip_prefix('\''))
            .and_then(|rest| rest.split('\'').next())
            .map(str::to_string),
        _ => None,
    };

    AppError::TemplateRender {
        template: template_id.to_string(),
        module: None,
        variable,
        details: error.to_string(),
    }
}

/// Re-parse rendered JSON and emit it pretty-printed with a trailing newline.
fn canonical_json(template_id: &str, rendered: &str) -> Result<String, AppError> {
    let parsed: serde_json::Value =
        serde_json::from_str(rendered).map_err(|e| AppError::TemplateRender {
            template: template_id.to_string(),
            module: None,
            variable: None,
            details: format!("rendered output is not valid JSON: {e}"),
        })?;

    let mut pretty = serde_json::to_string_pretty(&parsed).map_err(|e| AppError::TemplateRender {
        template: template_id.to_string(),
        module: None,
        variable: None,
        details: e.to_string(),
    })?;
    pretty.push('\n');
    Ok(pretty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_value, validated};

    fn context() -> TemplateContext {
        TemplateContext::build(&validated(sample_value()))
    }

    fn engine(sources: &[(&'static str, &'static str)]) -> EmbeddedTemplateEngine {
        let sources: Vec<_> = sources.iter().map(|&(id, body)| TemplateSource::new(id, body)).collect();
        EmbeddedTemplateEngine::from_sources(&sources, &HelperRegistry::builtin().unwrap()).unwrap()
    }

    #[test]
    fn embedded_templates_load() {
        let engine = EmbeddedTemplateEngine::new().expect("embedded templates");
        let ids = engine.template_ids();
        assert!(ids.contains(&"workflows/ecs/query.json"));
        assert!(ids.contains(&"infrastructure/deploy.sh"));
        assert!(ids.iter().all(|id| !id.rsplit('/').next().unwrap().starts_with('_')));
    }

    #[test]
    fn missing_variables_render_empty() {
        let engine = engine(&[("t.txt", "[{{ modules.appeals.endpoint }}][{{ payer.id }}]")]);
        assert_eq!(engine.render("t.txt", &context()).unwrap(), "[][MCO001]");
    }

    #[test]
    fn required_variable_names_template_and_variable() {
        let engine = engine(&[("t.txt", "{{ required(payer.missing, 'payer.missing') }}")]);
        let err = engine.render("t.txt", &context()).unwrap_err();
        match err {
            AppError::TemplateRender { template, variable, .. } => {
                assert_eq!(template, "t.txt");
                assert_eq!(variable.as_deref(), Some("payer.missing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn json_output_is_validated_and_normalized() {
        let engine = engine(&[
            ("ok.json", "{\"payer\": {{ to_json(payer.id) }} ,  \"n\":1}"),
            ("bad.json", "{ \"payer\": {{ payer.id }} }"),
        ]);
        assert_eq!(
            engine.render("ok.json", &context()).unwrap(),
            "{\n  \"payer\": \"MCO001\",\n  \"n\": 1\n}\n"
        );
        let err = engine.render("bad.json", &context()).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn partials_are_importable_but_not_renderable() {
        let engine = engine(&[
            ("_lib", "{% macro greet(name) %}hi {{ name }}{% endmacro %}"),
            ("t.txt", "{% import '_lib' as lib %}{{ lib.greet(payer.id) }}"),
        ]);
        assert_eq!(engine.render("t.txt", &context()).unwrap(), "hi MCO001");
        assert!(matches!(engine.render("_lib", &context()), Err(AppError::TemplateNotFound(_))));
    }

    #[test]
    fn syntax_errors_fail_construction() {
        let sources = [TemplateSource::new("broken.txt", "{% if %}")];
        let err = EmbeddedTemplateEngine::from_sources(&sources, &HelperRegistry::builtin().unwrap())
            .unwrap_err();
        assert!(matches!(err, AppError::TemplateRender { template, .. } if template == "broken.txt"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let engine = EmbeddedTemplateEngine::new().unwrap();
        let context = context();
        let first = engine.render("docs/CONFIGURATION.md", &context).unwrap();
        let second = engine.render("docs/CONFIGURATION.md", &context).unwrap();
        assert_eq!(first, second);
    }
}
