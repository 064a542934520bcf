//! Versioned table of template helpers.
//!
//! Helpers are plain functions compiled into the binary. The table is the
//! only way to add one; the engine installs the whole table at construction
//! and nothing registers helpers at render time. Every helper is total over
//! its inputs and maps malformed arguments to an empty string, `false`, `0`
//! or `none`. `required` is the only helper that fails a render.

mod arrays;
mod dates;
mod escape;
mod json;
mod logic;
mod math;
mod naming;
mod strings;
mod types;

use std::collections::BTreeMap;
use std::fmt;

use minijinja::{Environment, Value};

use crate::domain::AppError;

pub use logic::REQUIRED_PREFIX;

/// Bumped whenever a helper is added, removed or changes behavior.
pub const HELPER_TABLE_VERSION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HelperCategory {
    Strings,
    Arrays,
    Logic,
    Json,
    Escape,
    Math,
    Dates,
    Types,
    Naming,
}

impl HelperCategory {
    pub fn label(self) -> &'static str {
        match self {
            HelperCategory::Strings => "strings",
            HelperCategory::Arrays => "arrays",
            HelperCategory::Logic => "logic",
            HelperCategory::Json => "json",
            HelperCategory::Escape => "escape",
            HelperCategory::Math => "math",
            HelperCategory::Dates => "dates",
            HelperCategory::Types => "types",
            HelperCategory::Naming => "naming",
        }
    }
}

impl fmt::Display for HelperCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of the helper table.
pub struct HelperSpec {
    pub name: &'static str,
    pub category: HelperCategory,
    /// Arity and argument types, as shown by `payergen list --helpers`.
    pub signature: &'static str,
    install: fn(&mut Environment<'static>, &'static str),
}

impl HelperSpec {
    fn install(&self, env: &mut Environment<'static>) {
        (self.install)(env, self.name);
    }
}

impl fmt::Debug for HelperSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelperSpec")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("signature", &self.signature)
            .finish()
    }
}

macro_rules! helper {
    ($name:literal, $category:ident, $signature:literal, $func:path) => {
        HelperSpec {
            name: $name,
            category: HelperCategory::$category,
            signature: $signature,
            install: |env, name| env.add_function(name, $func),
        }
    };
}

pub static BUILTIN_HELPERS: &[HelperSpec] = &[
    helper!("upper", Strings, "upper(s)", strings::upper),
    helper!("lower", Strings, "lower(s)", strings::lower),
    helper!("trim", Strings, "trim(s)", strings::trim),
    helper!("camel_case", Strings, "camel_case(s)", strings::camel_case),
    helper!("pascal_case", Strings, "pascal_case(s)", strings::pascal_case),
    helper!("snake_case", Strings, "snake_case(s)", strings::snake_case),
    helper!("kebab_case", Strings, "kebab_case(s)", strings::kebab_case),
    helper!("title_case", Strings, "title_case(s)", strings::title_case),
    helper!("truncate", Strings, "truncate(s, n)", strings::truncate),
    helper!("replace", Strings, "replace(s, from, to)", strings::replace),
    helper!("includes", Arrays, "includes(arr, v)", arrays::includes),
    helper!("join", Arrays, "join(arr, sep?)", arrays::join),
    helper!("count", Arrays, "count(v)", arrays::count),
    helper!("first", Arrays, "first(arr)", arrays::first),
    helper!("last", Arrays, "last(arr)", arrays::last),
    helper!("eq", Logic, "eq(a, b)", logic::eq),
    helper!("ne", Logic, "ne(a, b)", logic::ne),
    helper!("gt", Logic, "gt(a, b)", logic::gt),
    helper!("gte", Logic, "gte(a, b)", logic::gte),
    helper!("lt", Logic, "lt(a, b)", logic::lt),
    helper!("lte", Logic, "lte(a, b)", logic::lte),
    helper!("and", Logic, "and(a, b, ...)", logic::and),
    helper!("or", Logic, "or(a, b, ...)", logic::or),
    helper!("not", Logic, "not(v)", logic::not),
    helper!("coalesce", Logic, "coalesce(a, b, ...)", logic::coalesce),
    helper!("when", Logic, "when(cond, a, b)", logic::when),
    helper!("required", Logic, "required(value, name)", logic::required),
    helper!("to_json", Json, "to_json(v)", json::to_json),
    helper!("to_json_pretty", Json, "to_json_pretty(v)", json::to_json_pretty),
    helper!("json_escape", Json, "json_escape(s)", json::json_escape),
    helper!("json_string", Json, "json_string(s)", json::json_string),
    helper!("shell_quote", Escape, "shell_quote(s)", escape::shell_quote),
    helper!("bicep_string", Escape, "bicep_string(s)", escape::bicep_string),
    helper!("single_line", Escape, "single_line(s)", escape::single_line),
    helper!("add", Math, "add(a, b)", math::add),
    helper!("subtract", Math, "subtract(a, b)", math::subtract),
    helper!("multiply", Math, "multiply(a, b)", math::multiply),
    helper!("divide", Math, "divide(a, b)", math::divide),
    helper!("modulo", Math, "modulo(a, b)", math::modulo),
    helper!("round", Math, "round(x, places?)", math::round),
    helper!("format_date", Dates, "format_date(iso, fmt?)", dates::format_date),
    helper!("iso_duration_minutes", Dates, "iso_duration_minutes(n)", dates::iso_duration_minutes),
    helper!("iso_duration_days", Dates, "iso_duration_days(n)", dates::iso_duration_days),
    helper!("is_array", Types, "is_array(v)", types::is_array),
    helper!("is_object", Types, "is_object(v)", types::is_object),
    helper!("is_string", Types, "is_string(v)", types::is_string),
    helper!("is_number", Types, "is_number(v)", types::is_number),
    helper!("is_bool", Types, "is_bool(v)", types::is_bool),
    helper!("is_defined", Types, "is_defined(v)", types::is_defined),
    helper!("is_empty", Types, "is_empty(v)", types::is_empty),
    helper!("sanitize_name", Naming, "sanitize_name(s, max?)", naming::sanitize_name),
    helper!("resource_name", Naming, "resource_name(prefix, suffix)", naming::resource_name),
    helper!(
        "storage_account_name",
        Naming,
        "storage_account_name(prefix, suffix)",
        naming::storage_account_name
    ),
    helper!("key_vault_name", Naming, "key_vault_name(prefix)", naming::key_vault_name),
    helper!("service_bus_name", Naming, "service_bus_name(prefix)", naming::service_bus_name),
    helper!("logic_app_name", Naming, "logic_app_name(prefix, env)", naming::logic_app_name),
];

/// Name-keyed view over a helper table. Names are unique.
#[derive(Debug, Default)]
pub struct HelperRegistry {
    helpers: BTreeMap<&'static str, &'static HelperSpec>,
}

impl HelperRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding [`BUILTIN_HELPERS`].
    pub fn builtin() -> Result<Self, AppError> {
        let mut registry = Self::new();
        for spec in BUILTIN_HELPERS {
            registry.register(spec)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, spec: &'static HelperSpec) -> Result<(), AppError> {
        if self.helpers.contains_key(spec.name) {
            return Err(AppError::DuplicateHelper(spec.name.to_string()));
        }
        self.helpers.insert(spec.name, spec);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Option<&'static HelperSpec> {
        self.helpers.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Helpers in name order.
    pub fn specs(&self) -> impl Iterator<Item = &'static HelperSpec> + '_ {
        self.helpers.values().copied()
    }

    pub fn install(&self, env: &mut Environment<'static>) {
        for spec in self.helpers.values() {
            spec.install(env);
        }
    }
}

/// Text view of a value: strings as-is, undefined and none as empty.
fn text(value: &Value) -> String {
    if value.is_undefined() || value.is_none() {
        return String::new();
    }
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static DUPLICATE_UPPER: HelperSpec = helper!("upper", Strings, "upper(s)", strings::upper);

    #[test]
    fn builtin_table_has_unique_names() {
        let registry = HelperRegistry::builtin().unwrap();
        assert_eq!(registry.len(), BUILTIN_HELPERS.len());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = HelperRegistry::builtin().unwrap();
        let err = registry.register(&DUPLICATE_UPPER).unwrap_err();
        assert!(matches!(err, AppError::DuplicateHelper(name) if name == "upper"));
    }

    #[test]
    fn resolve_finds_helpers_by_name() {
        let registry = HelperRegistry::builtin().unwrap();
        let spec = registry.resolve("storage_account_name").unwrap();
        assert_eq!(spec.category, HelperCategory::Naming);
        assert!(registry.resolve("now").is_none());
    }

    #[test]
    fn every_category_is_populated() {
        for category in [
            HelperCategory::Strings,
            HelperCategory::Arrays,
            HelperCategory::Logic,
            HelperCategory::Json,
            HelperCategory::Escape,
            HelperCategory::Math,
            HelperCategory::Dates,
            HelperCategory::Types,
            HelperCategory::Naming,
        ] {
            assert!(BUILTIN_HELPERS.iter().any(|spec| spec.category == category), "{category}");
        }
    }

    #[test]
    fn installed_helpers_are_callable() {
        let mut env = Environment::new();
        HelperRegistry::builtin().unwrap().install(&mut env);
        let out = env
            .render_str("{{ upper('mco') }}-{{ add(2, 3) }}-{{ includes(['a'], 'a') }}", minijinja::context! {})
            .unwrap();
        assert_eq!(out, "MCO-5-true");
    }
}
