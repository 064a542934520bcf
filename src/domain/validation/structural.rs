//! Structural pass: presence, primitive types and enum membership.

use serde_json::{Map, Value};

use crate::domain::config::ModuleKind;
use crate::domain::config::document::json_type_name;

use super::diagnostics::Diagnostics;
use super::schema::{
    FieldSpec, FieldType, MODULES_KEY, Presence, TOP_LEVEL, index_path, join_path, module_fields,
};

pub fn structural_checks(root: &Map<String, Value>, diagnostics: &mut Diagnostics) {
    for key in root.keys() {
        if !TOP_LEVEL.iter().any(|spec| spec.name == key) {
            diagnostics.push_warning(
                key.as_str(),
                "structure.unknown-field",
                format!("unknown field '{key}' is ignored"),
            );
        }
    }

    check_object(root, TOP_LEVEL, "", diagnostics);

    if let Some(Value::Object(modules)) = root.get(MODULES_KEY) {
        module_checks(modules, diagnostics);
    }
}

fn module_checks(modules: &Map<String, Value>, diagnostics: &mut Diagnostics) {
    for (key, value) in modules {
        let path = join_path(MODULES_KEY, key);
        let Some(kind) = ModuleKind::from_key(key) else {
            diagnostics.push_error(
                path,
                "modules.unknown-module",
                format!("unknown module '{key}'; expected one of: {}", ModuleKind::available_keys()),
            );
            continue;
        };

        let Value::Object(module) = value else {
            push_type_error(&path, "object", value, diagnostics);
            continue;
        };

        let enabled_path = join_path(&path, "enabled");
        match module.get("enabled") {
            None => diagnostics.push_error(enabled_path, "structure.required", "enabled is required"),
            Some(Value::Bool(true)) => check_object(module, module_fields(kind), &path, diagnostics),
            Some(Value::Bool(false)) => {}
            Some(other) => push_type_error(&enabled_path, "boolean", other, diagnostics),
        }
    }
}

/// Check every field in `specs` against `object`.
///
/// Missing [`Presence::Required`] fields are errors here; missing
/// [`Presence::WhenEnabled`] fields are left to the rule pass.
pub fn check_object(
    object: &Map<String, Value>,
    specs: &[FieldSpec],
    base: &str,
    diagnostics: &mut Diagnostics,
) {
    for spec in specs {
        let path = join_path(base, spec.name);
        match object.get(spec.name) {
            None => {
                if spec.presence == Presence::Required {
                    diagnostics.push_error(
                        path,
                        "structure.required",
                        format!("{} is required", spec.name),
                    );
                }
            }
            Some(value) => check_value(value, spec.ty, &path, diagnostics),
        }
    }
}

fn check_value(value: &Value, ty: FieldType, path: &str, diagnostics: &mut Diagnostics) {
    match ty {
        FieldType::String | FieldType::Url => {
            if !value.is_string() {
                push_type_error(path, ty.expected(), value, diagnostics);
            }
        }
        FieldType::Bool => {
            if !value.is_boolean() {
                push_type_error(path, ty.expected(), value, diagnostics);
            }
        }
        FieldType::Integer => {
            if !(value.is_i64() || value.is_u64()) {
                push_type_error(path, ty.expected(), value, diagnostics);
            }
        }
        FieldType::Number => {
            if !value.is_number() {
                push_type_error(path, ty.expected(), value, diagnostics);
            }
        }
        FieldType::Enum(allowed) => check_enum(value, allowed, path, diagnostics),
        FieldType::EnumArray(allowed) => match value {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    check_enum(item, allowed, &index_path(path, index), diagnostics);
                }
            }
            other => push_type_error(path, ty.expected(), other, diagnostics),
        },
        FieldType::StringArray => match value {
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        push_type_error(&index_path(path, index), "string", item, diagnostics);
                    }
                }
            }
            other => push_type_error(path, ty.expected(), other, diagnostics),
        },
        FieldType::StringMap => match value {
            Value::Object(entries) => {
                for (key, item) in entries {
                    if !item.is_string() {
                        push_type_error(&join_path(path, key), "string", item, diagnostics);
                    }
                }
            }
            other => push_type_error(path, ty.expected(), other, diagnostics),
        },
        FieldType::Object(children) => match value {
            Value::Object(object) => check_object(object, children, path, diagnostics),
            other => push_type_error(path, ty.expected(), other, diagnostics),
        },
    }
}

fn check_enum(value: &Value, allowed: &[&str], path: &str, diagnostics: &mut Diagnostics) {
    match value.as_str() {
        Some(text) if allowed.contains(&text) => {}
        Some(text) => diagnostics.push_error(
            path,
            "structure.enum",
            format!("'{text}' is not one of: {}", allowed.join(", ")),
        ),
        None => push_type_error(path, "string", value, diagnostics),
    }
}

fn push_type_error(path: &str, expected: &str, found: &Value, diagnostics: &mut Diagnostics) {
    diagnostics.push_error(
        path,
        "structure.type",
        format!("expected {expected}, found {}", json_type_name(found)),
    );
}
