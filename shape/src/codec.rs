//! JSON codec for records.
//!
//! Marshal walks fields in declaration order. A union variant writes its
//! discriminator key first. Unset optional fields, and enums holding the
//! empty string, are omitted.
//!
//! Unmarshal resolves each field by wire name. Unknown keys are ignored so
//! that additive server changes do not break decoding. An absent required
//! key is [`ShapeError::MissingRequired`]; an explicit `null` for a required
//! key is [`ShapeError::InvalidField`].

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::DateTime;
use serde_json::{Map, Number, Value as Json};
use shape_define::{Collection, FieldType};

use crate::error::ShapeError;
use crate::record::{Record, canonicalize};
use crate::registry::{CompiledField, Registry};
use crate::value::{Value, format_time};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Unset required fields fail.
    Strict,
    /// Unset required fields are skipped.
    Lenient,
}

/// Encodes a record, failing on unset required fields.
pub(crate) fn encode(record: &Record) -> Result<Json, ShapeError> {
    encode_record(record, Mode::Strict)
}

/// Encodes a record for display, skipping unset required fields.
pub(crate) fn encode_lenient(record: &Record) -> Json {
    encode_record(record, Mode::Lenient).unwrap_or(Json::Null)
}

/// Encodes one set field value. Used by the request binder for body fields.
pub(crate) fn encode_field(
    record: &Record,
    field: &CompiledField,
    value: &Value,
) -> Result<Json, ShapeError> {
    encode_value(record, field, value, Mode::Strict)
}

fn encode_record(record: &Record, mode: Mode) -> Result<Json, ShapeError> {
    let mut out = Map::new();

    if let Some(disc) = record.model().discriminator() {
        out.insert(disc.key.clone(), Json::String(disc.tag.clone()));
    }

    for (field, slot) in record.slots() {
        match slot {
            Some(value) if !is_unset_enum(field, value) => {
                let json = encode_value(record, field, value, mode)?;
                out.insert(field.wire_name().to_string(), json);
            }
            _ if field.is_required() && mode == Mode::Strict => {
                return Err(ShapeError::missing_required(record.model_name(), field.name()));
            }
            _ => {}
        }
    }

    Ok(Json::Object(out))
}

fn is_unset_enum(field: &CompiledField, value: &Value) -> bool {
    matches!(field.field_type(), FieldType::Enum(_)) && value.is_empty() && field.descriptor().is_scalar()
}

fn encode_value(
    record: &Record,
    field: &CompiledField,
    value: &Value,
    mode: Mode,
) -> Result<Json, ShapeError> {
    match value {
        Value::List(items) => items
            .iter()
            .map(|item| encode_scalar(record, field, item, mode))
            .collect::<Result<Vec<_>, _>>()
            .map(Json::Array),
        Value::Map(entries) => entries
            .iter()
            .map(|(key, item)| Ok((key.clone(), encode_scalar(record, field, item, mode)?)))
            .collect::<Result<Map<_, _>, ShapeError>>()
            .map(Json::Object),
        scalar => encode_scalar(record, field, scalar, mode),
    }
}

fn encode_scalar(
    record: &Record,
    field: &CompiledField,
    value: &Value,
    mode: Mode,
) -> Result<Json, ShapeError> {
    Ok(match value {
        Value::String(s) | Value::Enum(s) => Json::String(s.clone()),
        Value::Integer(n) => Json::from(*n),
        Value::Float(n) => match Number::from_f64(*n) {
            Some(num) => Json::Number(num),
            None if mode == Mode::Lenient => Json::Null,
            None => {
                return Err(ShapeError::invalid_field(
                    record.model_name(),
                    field.name(),
                    format!("{n} is not representable in JSON"),
                ));
            }
        },
        Value::Boolean(b) => Json::Bool(*b),
        Value::Time(t) => Json::String(format_time(t)),
        Value::Json(j) => j.clone(),
        Value::Record(nested) => encode_record(nested, mode)?,
        Value::List(_) | Value::Map(_) => {
            return Err(ShapeError::invalid_field(
                record.model_name(),
                field.name(),
                "nested collections are not supported",
            ));
        }
    })
}

/// Decodes a JSON value as model or union `name`.
pub(crate) fn decode(registry: &Registry, name: &str, json: &Json) -> Result<Record, ShapeError> {
    if registry.is_union(name) {
        return decode_union(registry, name, json);
    }

    let mut record = registry.new_record(name)?;
    let object = json
        .as_object()
        .ok_or_else(|| ShapeError::invalid_field(name, "", format!("expected object, got {}", json_kind(json))))?;

    let model = Arc::clone(record.model());
    for (idx, field) in model.fields().iter().enumerate() {
        match object.get(field.wire_name()) {
            None if field.is_required() => {
                return Err(ShapeError::missing_required(name, field.name()));
            }
            None => {}
            Some(Json::Null) if field.is_required() => {
                return Err(ShapeError::invalid_field(name, field.name(), "null value for required field"));
            }
            Some(Json::Null) => {}
            Some(raw) => {
                if let Some(value) = decode_value(registry, name, field, raw)? {
                    record.put(idx, value);
                } else if field.is_required() {
                    return Err(ShapeError::missing_required(name, field.name()));
                }
            }
        }
    }

    Ok(record)
}

fn decode_union(registry: &Registry, name: &str, json: &Json) -> Result<Record, ShapeError> {
    let union = registry.union(name)?;
    let tag = match json.get(&union.discriminator) {
        Some(Json::String(tag)) => tag,
        Some(other) => {
            return Err(ShapeError::invalid_field(
                name,
                &union.discriminator,
                format!("expected string, got {}", json_kind(other)),
            ));
        }
        None => return Err(ShapeError::missing_required(name, &union.discriminator)),
    };
    let model = union.model_for(tag).ok_or_else(|| {
        ShapeError::invalid_field(name, &union.discriminator, format!("unknown variant {tag}"))
    })?;
    decode(registry, model, json)
}

/// Decodes one present, non-null value. Returns `None` for an empty enum string.
fn decode_value(
    registry: &Registry,
    model: &str,
    field: &CompiledField,
    raw: &Json,
) -> Result<Option<Value>, ShapeError> {
    match field.descriptor().collection {
        Collection::Scalar => decode_scalar(registry, model, field, raw),
        Collection::List => {
            let items = raw.as_array().ok_or_else(|| mismatch(model, field, "list", raw))?;
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(decode_element(registry, model, field, item)?);
            }
            Ok(Some(Value::List(out)))
        }
        Collection::Map => {
            let entries = raw.as_object().ok_or_else(|| mismatch(model, field, "map", raw))?;
            let mut out = BTreeMap::new();
            for (key, item) in entries {
                out.insert(key.clone(), decode_element(registry, model, field, item)?);
            }
            Ok(Some(Value::Map(out)))
        }
    }
}

fn decode_element(
    registry: &Registry,
    model: &str,
    field: &CompiledField,
    raw: &Json,
) -> Result<Value, ShapeError> {
    // Empty enum strings inside collections are kept as values.
    Ok(decode_scalar(registry, model, field, raw)?.unwrap_or_else(|| Value::Enum(String::new())))
}

fn decode_scalar(
    registry: &Registry,
    model: &str,
    field: &CompiledField,
    raw: &Json,
) -> Result<Option<Value>, ShapeError> {
    let value = match (field.field_type(), raw) {
        (FieldType::String, Json::String(s)) => Value::String(s.clone()),
        (FieldType::Integer, Json::Number(n)) => match n.as_i64() {
            Some(n) => Value::Integer(n),
            None => return Err(mismatch(model, field, "integer", raw)),
        },
        (FieldType::Float, Json::Number(n)) => match n.as_f64() {
            Some(n) => Value::Float(n),
            None => return Err(mismatch(model, field, "float", raw)),
        },
        (FieldType::Boolean, Json::Bool(b)) => Value::Boolean(*b),
        (FieldType::Time, Json::String(s)) => match DateTime::parse_from_rfc3339(s) {
            Ok(t) => Value::Time(t),
            Err(e) => {
                return Err(ShapeError::invalid_field(
                    model,
                    field.name(),
                    format!("invalid RFC 3339 timestamp {s:?}: {e}"),
                ));
            }
        },
        (FieldType::Json, any) => Value::Json(any.clone()),
        (FieldType::Enum(_), Json::String(s)) if s.is_empty() => return Ok(None),
        (FieldType::Enum(_), Json::String(s)) => Value::Enum(canonicalize(field, s.clone())),
        (FieldType::Model(target), any) => Value::Record(decode(registry, target, any)?),
        (FieldType::Binary, _) => {
            return Err(ShapeError::invalid_field(
                model,
                field.name(),
                "binary fields are not carried in JSON",
            ));
        }
        (expected, _) => return Err(mismatch(model, field, &expected.label(), raw)),
    };
    Ok(Some(value))
}

fn mismatch(model: &str, field: &CompiledField, expected: &str, raw: &Json) -> ShapeError {
    ShapeError::invalid_field(
        model,
        field.name(),
        format!("expected {expected}, got {}", json_kind(raw)),
    )
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
