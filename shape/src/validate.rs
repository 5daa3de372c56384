//! The recursive enum validation pass.
//!
//! Every enum-typed field, at any depth, is checked against its enum set.
//! All violations are collected in declaration order rather than failing on
//! the first one. Nested fields are labelled with a dotted path
//! (`MacsecProperties.State`) and list elements with an index
//! (`Items[2].Direction`).

use shape_define::FieldType;

use crate::error::EnumViolations;
use crate::record::Record;
use crate::value::Value;

/// Collects every enum violation in `record`.
pub fn validate_enums(record: &Record) -> EnumViolations {
    let mut violations = EnumViolations::default();
    walk(record, "", &mut violations);
    violations
}

fn walk(record: &Record, prefix: &str, out: &mut EnumViolations) {
    for (field, value) in record.set_fields() {
        let label = format!("{prefix}{}", field.name());
        match field.field_type() {
            FieldType::Enum(_) => {
                let Some(set) = field.enum_set() else { continue };
                visit(value, &label, &mut |label, v| {
                    if let Some(input) = v.as_str() {
                        if let Err(err) = set.validate(label, input) {
                            out.push(err);
                        }
                    }
                });
            }
            FieldType::Model(_) => {
                visit(value, &label, &mut |label, v| {
                    if let Some(nested) = v.as_record() {
                        walk(nested, &format!("{label}."), out);
                    }
                });
            }
            _ => {}
        }
    }
}

/// Calls `f` for a scalar, or for each element of a list or map with an
/// indexed label.
fn visit(value: &Value, label: &str, f: &mut dyn FnMut(&str, &Value)) {
    match value {
        Value::List(items) => {
            for (idx, item) in items.iter().enumerate() {
                f(&format!("{label}[{idx}]"), item);
            }
        }
        Value::Map(entries) => {
            for (key, item) in entries {
                f(&format!("{label}[{key}]"), item);
            }
        }
        scalar => f(label, scalar),
    }
}
