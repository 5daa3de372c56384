//! Records: one value slot per field descriptor.
//!
//! A [`Record`] holds a handle to its compiled model and one
//! `Option<Value>` slot per field. `None` is the "not set" sentinel, which
//! keeps an absent optional field distinguishable from a field set to zero,
//! `false` or the empty string.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use shape_define::{Collection, FieldType};

use crate::codec;
use crate::error::{EnumViolations, ShapeError};
use crate::registry::{CompiledField, CompiledModel};
use crate::validate;
use crate::value::Value;

/// An instance of a model or request.
///
/// Fields are addressed by field name, or by wire name when no field has
/// that name. Values are checked against the descriptor when set: enum
/// input is stored in canonical casing when it matches, and kept verbatim
/// otherwise so validation can report it.
///
/// ## Examples
///
/// ```
/// use shape::Registry;
/// use shape_define::{Catalog, EnumDef, FieldDescriptor, ModelDef};
///
/// let registry = Registry::new(
///     Catalog::new("demo")
///         .with_enum(EnumDef::new("NatGatewayLifecycleState", ["AVAILABLE", "TERMINATED"]))
///         .with_model(
///             ModelDef::new("NatGateway")
///                 .field(FieldDescriptor::string("Id", "id"))
///                 .field(FieldDescriptor::boolean("BlockTraffic", "blockTraffic").optional())
///                 .field(FieldDescriptor::enumeration(
///                     "LifecycleState",
///                     "lifecycleState",
///                     "NatGatewayLifecycleState",
///                 )),
///         ),
/// )
/// .unwrap();
///
/// let gateway = registry
///     .new_record("NatGateway")
///     .unwrap()
///     .with("Id", "ocid1.natgateway")
///     .unwrap()
///     .with("lifecycleState", "available")
///     .unwrap();
///
/// assert_eq!(gateway.get_str("LifecycleState"), Some("AVAILABLE"));
/// assert!(!gateway.is_set("BlockTraffic"));
/// assert_eq!(
///     gateway.to_string(),
///     r#"{"id":"ocid1.natgateway","lifecycleState":"AVAILABLE"}"#
/// );
/// ```
#[derive(Clone)]
pub struct Record {
    model: Arc<CompiledModel>,
    slots: Vec<Option<Value>>,
}

impl Record {
    /// Creates a record with every field unset.
    pub fn new(model: Arc<CompiledModel>) -> Self {
        let slots = vec![None; model.fields().len()];
        Self { model, slots }
    }

    /// Model name.
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// The compiled model.
    pub fn model(&self) -> &Arc<CompiledModel> {
        &self.model
    }

    /// Sets a field.
    ///
    /// ## Errors
    ///
    /// Returns [`ShapeError::InvalidField`] for unknown fields and for values
    /// that do not fit the descriptor.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self, ShapeError> {
        let idx = self.index(name)?;
        let field = &self.model.fields()[idx];
        let value = coerce(field, value.into())
            .map_err(|reason| ShapeError::invalid_field(self.model.name(), field.name(), reason))?;
        self.slots[idx] = Some(value);
        Ok(self)
    }

    /// Sets a field, consuming and returning the record.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self, ShapeError> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Clears a field, returning its previous value.
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        let idx = self.model.index_of(name)?;
        self.slots[idx].take()
    }

    /// The value of a field, if set.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let idx = self.model.index_of(name)?;
        self.slots[idx].as_ref()
    }

    /// Returns true if the field is set.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// String or enum value of a field.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Integer value of a field.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Boolean value of a field.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Timestamp value of a field.
    pub fn get_time(&self, name: &str) -> Option<&DateTime<FixedOffset>> {
        self.get(name).and_then(Value::as_time)
    }

    /// Nested record of a field.
    pub fn get_record(&self, name: &str) -> Option<&Record> {
        self.get(name).and_then(Value::as_record)
    }

    /// List items of a field.
    pub fn get_list(&self, name: &str) -> Option<&[Value]> {
        self.get(name).and_then(Value::as_list)
    }

    /// Set fields with their values, in declaration order.
    pub fn set_fields(&self) -> impl Iterator<Item = (&CompiledField, &Value)> {
        self.model
            .fields()
            .iter()
            .zip(&self.slots)
            .filter_map(|(field, slot)| slot.as_ref().map(|value| (field, value)))
    }

    /// Every field with its slot, in declaration order.
    pub(crate) fn slots(&self) -> impl Iterator<Item = (&CompiledField, Option<&Value>)> {
        self.model
            .fields()
            .iter()
            .zip(&self.slots)
            .map(|(field, slot)| (field, slot.as_ref()))
    }

    /// Stores an already-checked value. Used by the decoder.
    pub(crate) fn put(&mut self, idx: usize, value: Value) {
        self.slots[idx] = Some(value);
    }

    /// Encodes the record as JSON.
    ///
    /// ## Errors
    ///
    /// Returns [`ShapeError::MissingRequired`] if a required field, here or
    /// in a nested record, is unset.
    pub fn to_json(&self) -> Result<serde_json::Value, ShapeError> {
        codec::encode(self)
    }

    /// Runs the recursive enum validation pass.
    pub fn validate_enums(&self) -> EnumViolations {
        validate::validate_enums(self)
    }

    /// Like [`Record::validate_enums`], as a `Result`.
    pub fn check_enums(&self) -> Result<(), ShapeError> {
        Ok(self.validate_enums().into_result()?)
    }

    fn index(&self, name: &str) -> Result<usize, ShapeError> {
        self.model
            .index_of(name)
            .ok_or_else(|| ShapeError::invalid_field(self.model.name(), name, "no such field"))
    }
}

fn coerce(field: &CompiledField, value: Value) -> Result<Value, String> {
    match field.descriptor().collection {
        Collection::Scalar => coerce_scalar(field, value),
        Collection::List => match value {
            Value::List(items) => items
                .into_iter()
                .map(|item| coerce_scalar(field, item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            other => Err(format!("expected list, got {}", other.kind())),
        },
        Collection::Map => match value {
            Value::Map(entries) => entries
                .into_iter()
                .map(|(key, item)| coerce_scalar(field, item).map(|v| (key, v)))
                .collect::<Result<_, _>>()
                .map(Value::Map),
            other => Err(format!("expected map, got {}", other.kind())),
        },
    }
}

fn coerce_scalar(field: &CompiledField, value: Value) -> Result<Value, String> {
    match (field.field_type(), value) {
        (FieldType::String, v @ Value::String(_))
        | (FieldType::Integer, v @ Value::Integer(_))
        | (FieldType::Float, v @ Value::Float(_))
        | (FieldType::Boolean, v @ Value::Boolean(_))
        | (FieldType::Time, v @ Value::Time(_))
        | (FieldType::Json, v @ Value::Json(_)) => Ok(v),
        (FieldType::Float, Value::Integer(n)) => Ok(Value::Float(n as f64)),
        (FieldType::Time, Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .map(Value::Time)
            .map_err(|e| format!("invalid RFC 3339 timestamp {s:?}: {e}")),
        (FieldType::Enum(_), Value::String(s) | Value::Enum(s)) => {
            Ok(Value::Enum(canonicalize(field, s)))
        }
        (FieldType::Model(target), Value::Record(record)) => {
            if record.model().satisfies(target) {
                Ok(Value::Record(record))
            } else {
                Err(format!("expected {target} record, got {}", record.model_name()))
            }
        }
        (FieldType::Binary, _) => {
            Err("binary fields take their bytes from the request body handle".to_string())
        }
        (expected, other) => Err(format!("expected {}, got {}", expected.label(), other.kind())),
    }
}

/// Canonical spelling when the enum knows the value, the input otherwise.
pub(crate) fn canonicalize(field: &CompiledField, input: String) -> String {
    match field.enum_set().and_then(|set| set.lookup(&input)) {
        Some(canonical) => canonical.to_string(),
        None => input,
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.model.name() == other.model.name() && self.slots == other.slots
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.model.name());
        for (field, value) in self.set_fields() {
            out.field(field.name(), value);
        }
        out.finish()
    }
}

/// Renders the record as compact JSON. Unset required fields are skipped.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", codec::encode_lenient(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ModelKind, Registry};
    use shape_define::{Catalog, EnumDef, FieldDescriptor, ModelDef};

    fn registry() -> Registry {
        Registry::new(
            Catalog::new("t")
                .with_enum(EnumDef::new("RouteType", ["STATIC", "DYNAMIC"]))
                .with_model(
                    ModelDef::new("Route")
                        .field(FieldDescriptor::string("Destination", "destination"))
                        .field(FieldDescriptor::enumeration("RouteType", "routeType", "RouteType"))
                        .field(FieldDescriptor::float("Weight", "weight").optional())
                        .field(FieldDescriptor::time("TimeCreated", "timeCreated").optional())
                        .field(FieldDescriptor::string("Tags", "tags").list().optional()),
                ),
        )
        .unwrap()
    }

    #[test]
    fn unknown_field_is_invalid() {
        let mut r = registry().new_record("Route").unwrap();
        let err = r.set("Nope", "x").unwrap_err();
        assert_eq!(err, ShapeError::invalid_field("Route", "Nope", "no such field"));
    }

    #[test]
    fn type_mismatch_is_invalid() {
        let mut r = registry().new_record("Route").unwrap();
        let err = r.set("Destination", 5).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidField { ref reason, .. } if reason == "expected string, got integer"));
    }

    #[test]
    fn enum_input_is_canonicalized_when_known() {
        let mut r = registry().new_record("Route").unwrap();
        r.set("RouteType", "dynamic").unwrap();
        assert_eq!(r.get("RouteType"), Some(&Value::enumeration("DYNAMIC")));
        r.set("RouteType", "Bgp").unwrap();
        assert_eq!(r.get_str("RouteType"), Some("Bgp"));
    }

    #[test]
    fn integers_widen_into_float_fields() {
        let r = registry().new_record("Route").unwrap().with("Weight", 3).unwrap();
        assert_eq!(r.get("Weight"), Some(&Value::Float(3.0)));
    }

    #[test]
    fn time_fields_accept_rfc3339_strings() {
        let mut r = registry().new_record("Route").unwrap();
        r.set("TimeCreated", "2024-01-02T03:04:05.5Z").unwrap();
        assert!(r.get_time("TimeCreated").is_some());
        assert!(r.set("TimeCreated", "yesterday").is_err());
    }

    #[test]
    fn list_elements_are_checked() {
        let mut r = registry().new_record("Route").unwrap();
        r.set("Tags", vec!["a", "b"]).unwrap();
        assert_eq!(r.get_list("Tags").map(<[Value]>::len), Some(2));
        assert!(r.set("Tags", vec![1, 2]).is_err());
        assert!(r.set("Tags", "a").is_err());
    }

    #[test]
    fn unset_restores_sentinel() {
        let mut r = registry().new_record("Route").unwrap().with("Destination", "").unwrap();
        assert!(r.is_set("Destination"));
        assert_eq!(r.unset("Destination"), Some(Value::from("")));
        assert!(!r.is_set("Destination"));
    }

    #[test]
    fn debug_lists_set_fields_only() {
        let r = registry().new_record("Route").unwrap().with("Destination", "0.0.0.0/0").unwrap();
        assert_eq!(format!("{r:?}"), r#"Route { Destination: String("0.0.0.0/0") }"#);
        assert_eq!(r.model().kind(), ModelKind::Model);
    }
}
