//! Terminal and JSON rendering.

use colored::Colorize;
use serde_json::{Map, Value as Json, json};
use shape::Registry;
use shape::binder::{Body, HttpRequestTemplate};
use shape::define::{Collection, FieldDescriptor};
use shape::error::EnumViolations;

/// Output format of listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub fn enum_index(registry: &Registry) -> Vec<String> {
    registry
        .enum_names()
        .filter_map(|name| {
            let set = registry.enum_set(name).ok()?;
            Some(format!(
                "{} {}",
                name.bold(),
                format!("({} values)", set.values().len()).dimmed()
            ))
        })
        .collect()
}

pub fn enums_json(registry: &Registry, name: Option<&str>) -> Result<Json, shape::error::ConfigError> {
    let mut out = Map::new();
    match name {
        Some(name) => {
            out.insert(name.to_string(), json!(registry.values(name)?));
        }
        None => {
            for name in registry.enum_names() {
                out.insert(name.to_string(), json!(registry.values(name)?));
            }
        }
    }
    Ok(Json::Object(out))
}

/// One line per field: name, wire name, type, location and requiredness.
pub fn field_rows<'a>(fields: impl Iterator<Item = &'a FieldDescriptor>) -> Vec<String> {
    fields
        .map(|f| {
            let ty = match f.collection {
                Collection::Scalar => f.field_type.label(),
                Collection::List => format!("[{}]", f.field_type.label()),
                Collection::Map => format!("{{{}}}", f.field_type.label()),
            };
            let required = if f.required {
                "required".yellow()
            } else {
                "optional".dimmed()
            };
            format!(
                "  {:<36} {:<40} {:<40} {:<7} {}",
                f.name.bold(),
                f.wire_name,
                ty.cyan(),
                f.location,
                required
            )
        })
        .collect()
}

pub fn violations(violations: &EnumViolations) -> Vec<String> {
    violations
        .entries()
        .iter()
        .map(|v| format!("{} {v}", "✗".red()))
        .collect()
}

/// JSON rendering of a bound request.
pub fn template_json(template: &HttpRequestTemplate) -> Json {
    let pairs = |pairs: &[(String, String)]| -> Json {
        Json::Array(pairs.iter().map(|(k, v)| json!([k, v])).collect())
    };
    let body = match &template.body {
        Body::Empty => Json::Null,
        Body::Json(_) => template.body.json().unwrap_or(Json::Null),
        Body::Binary(bytes) => json!({ "binary_len": bytes.len() }),
    };
    json!({
        "operation": template.operation,
        "method": template.method.to_string(),
        "path": template.path,
        "path_and_query": template.path_and_query(),
        "query": pairs(&template.query),
        "headers": pairs(&template.headers),
        "body": body,
    })
}
