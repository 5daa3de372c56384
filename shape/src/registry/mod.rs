//! The Enum Registry and Model Registry.
//!
//! [`Registry::new`] compiles a [`Catalog`] once: list templates are
//! expanded, enum lookup tables are derived, field references are resolved
//! and every cross-definition invariant is checked. After that the registry
//! is read-only and can be shared across threads behind an `Arc`.
//!
//! ## Init-time checks
//!
//! - names are unique per kind (models, unions and requests share one namespace)
//! - enums are non-empty and their values are unique ignoring case
//! - every enum and model reference resolves
//! - union variants and member models agree on union and tag
//! - every operation names a known request and response
//! - path placeholders and `path` fields match one to one

mod enums;
mod model;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use shape_define::{
    Catalog, Collection, FieldDescriptor, FieldType, Operation, ResponseBody, ResponseDef, UnionDef,
    WireLocation,
};
use tracing::debug;

pub use enums::EnumSet;
pub use model::{CompiledField, CompiledModel, Discriminator, ModelKind};

use crate::codec;
use crate::error::{ConfigError, DecodeError, EnumViolations, ShapeError};
use crate::record::Record;

/// Compiled, read-only view of a catalog.
///
/// ## Examples
///
/// ```
/// use shape::Registry;
/// use shape_define::{Catalog, EnumDef, FieldDescriptor, ModelDef};
///
/// let registry = Registry::new(
///     Catalog::new("demo")
///         .with_enum(EnumDef::new("Direction", ["EGRESS", "INGRESS"]))
///         .with_model(
///             ModelDef::new("SecurityRule")
///                 .field(FieldDescriptor::enumeration("Direction", "direction", "Direction")),
///         ),
/// )
/// .unwrap();
///
/// assert_eq!(registry.lookup("Direction", "ingress").unwrap(), Some("INGRESS"));
///
/// let rule = registry.unmarshal("SecurityRule", r#"{"direction":"egress"}"#).unwrap();
/// assert_eq!(rule.get_str("Direction"), Some("EGRESS"));
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    name: String,
    enums: BTreeMap<String, Arc<EnumSet>>,
    models: BTreeMap<String, Arc<CompiledModel>>,
    unions: BTreeMap<String, UnionDef>,
    responses: BTreeMap<String, ResponseDef>,
    operations: BTreeMap<String, Operation>,
}

impl Registry {
    /// Compiles and checks a catalog.
    ///
    /// ## Errors
    ///
    /// Returns the first [`ConfigError`] found by the init-time checks.
    pub fn new(mut catalog: Catalog) -> Result<Self, ConfigError> {
        catalog.expand();

        let mut enums = BTreeMap::new();
        for def in &catalog.enums {
            let set = EnumSet::compile(def)?;
            if enums.insert(def.name.clone(), Arc::new(set)).is_some() {
                return Err(duplicate("enum", &def.name));
            }
        }

        let mut namespace = HashSet::new();
        let names = catalog
            .models
            .iter()
            .map(|m| &m.name)
            .chain(catalog.unions.iter().map(|u| &u.name))
            .chain(catalog.requests.iter().map(|r| &r.name));
        for name in names {
            if !namespace.insert(name.as_str()) {
                return Err(duplicate("model", name));
            }
        }

        let unions: BTreeMap<String, UnionDef> = catalog
            .unions
            .iter()
            .map(|u| (u.name.clone(), u.clone()))
            .collect();
        let record_targets: HashSet<&str> = catalog
            .models
            .iter()
            .map(|m| m.name.as_str())
            .chain(catalog.unions.iter().map(|u| u.name.as_str()))
            .collect();

        check_unions(&catalog, &unions)?;

        let mut models = BTreeMap::new();
        for def in &catalog.models {
            let discriminator = match &def.union {
                Some(member) => {
                    let union = unions.get(&member.union).ok_or_else(|| {
                        ConfigError::unresolved(&def.name, "union", &member.union)
                    })?;
                    Some(Discriminator {
                        union: union.name.clone(),
                        key: union.discriminator.clone(),
                        tag: member.tag.clone(),
                    })
                }
                None => None,
            };
            if let Some(field) = def.fields.iter().find(|f| f.location != WireLocation::Body) {
                return Err(ConfigError::invalid(
                    &def.name,
                    format!("model field {} must live in the body", field.name),
                ));
            }
            let fields = compile_fields(&def.name, &def.fields, &enums, &record_targets)?;
            let compiled = CompiledModel::new(
                def.name.clone(),
                ModelKind::Model,
                def.description.clone(),
                fields,
                discriminator,
            );
            models.insert(def.name.clone(), Arc::new(compiled));
        }

        for def in &catalog.requests {
            let fields = compile_fields(&def.name, &def.fields, &enums, &record_targets)?;
            let compiled = CompiledModel::new(
                def.name.clone(),
                ModelKind::Request,
                def.description.clone(),
                fields,
                None,
            );
            models.insert(def.name.clone(), Arc::new(compiled));
        }

        let mut responses = BTreeMap::new();
        for def in &catalog.responses {
            check_response(def, &models, &record_targets)?;
            if responses.insert(def.name.clone(), def.clone()).is_some() {
                return Err(duplicate("response", &def.name));
            }
        }

        let mut operations = BTreeMap::new();
        for op in &catalog.operations {
            check_operation(op, &models, &responses)?;
            if operations.insert(op.id.clone(), op.clone()).is_some() {
                return Err(duplicate("operation", &op.id));
            }
        }

        debug!(
            catalog = %catalog.name,
            enums = enums.len(),
            models = models.len(),
            operations = operations.len(),
            "compiled registry"
        );

        Ok(Self {
            name: catalog.name,
            enums,
            models,
            unions,
            responses,
            operations,
        })
    }

    /// Catalog name.
    pub fn name(&self) -> &str {
        &self.name
    }

    // ---- Enum Registry ----

    /// The compiled enum set `name`.
    pub fn enum_set(&self, name: &str) -> Result<&EnumSet, ConfigError> {
        self.enums
            .get(name)
            .map(Arc::as_ref)
            .ok_or_else(|| ConfigError::UnknownEnum { name: name.into() })
    }

    /// Canonical values of `name` in declaration order.
    pub fn values(&self, name: &str) -> Result<&[String], ConfigError> {
        Ok(self.enum_set(name)?.values())
    }

    /// Canonical values of `name` as plain string slices.
    pub fn string_values(&self, name: &str) -> Result<Vec<&str>, ConfigError> {
        Ok(self.enum_set(name)?.string_values())
    }

    /// Canonical spelling of `input` in enum `name`, ignoring case.
    pub fn lookup(&self, name: &str, input: &str) -> Result<Option<&str>, ConfigError> {
        Ok(self.enum_set(name)?.lookup(input))
    }

    /// Validates `input` against enum `name`, labelling a violation with `field`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use shape::{Registry, ShapeError};
    /// use shape_define::{Catalog, EnumDef};
    ///
    /// let registry = Registry::new(
    ///     Catalog::new("demo").with_enum(EnumDef::new("RouteType", ["STATIC", "DYNAMIC"])),
    /// )
    /// .unwrap();
    ///
    /// assert!(registry.validate("RouteType", "RouteType", "static").is_ok());
    /// assert!(registry.validate("RouteType", "RouteType", "").is_ok());
    ///
    /// let err = registry.validate("RouteType", "RouteType", "BGP").unwrap_err();
    /// assert!(matches!(err, ShapeError::UnsupportedEnum(_)));
    /// ```
    pub fn validate(&self, name: &str, field: &str, input: &str) -> Result<(), ShapeError> {
        self.enum_set(name)?
            .validate(field, input)
            .map_err(|e| ShapeError::UnsupportedEnum(EnumViolations::from(e)))
    }

    /// Enum names in sorted order.
    pub fn enum_names(&self) -> impl Iterator<Item = &str> {
        self.enums.keys().map(String::as_str)
    }

    // ---- Model Registry ----

    /// The compiled model or request `name`.
    pub fn model(&self, name: &str) -> Result<&Arc<CompiledModel>, ConfigError> {
        self.models
            .get(name)
            .ok_or_else(|| ConfigError::UnknownModel { name: name.into() })
    }

    /// The compiled request `name`.
    pub fn request(&self, name: &str) -> Result<&Arc<CompiledModel>, ConfigError> {
        self.model(name)
            .ok()
            .filter(|m| m.kind() == ModelKind::Request)
            .ok_or_else(|| ConfigError::UnknownModel { name: name.into() })
    }

    /// The union `name`.
    pub fn union(&self, name: &str) -> Result<&UnionDef, ConfigError> {
        self.unions
            .get(name)
            .ok_or_else(|| ConfigError::UnknownModel { name: name.into() })
    }

    /// Returns true if `name` is a union.
    pub fn is_union(&self, name: &str) -> bool {
        self.unions.contains_key(name)
    }

    /// The response `name`.
    pub fn response(&self, name: &str) -> Result<&ResponseDef, ConfigError> {
        self.responses
            .get(name)
            .ok_or_else(|| ConfigError::UnknownResponse { name: name.into() })
    }

    /// The operation `id`.
    pub fn operation(&self, id: &str) -> Result<&Operation, ConfigError> {
        self.operations
            .get(id)
            .ok_or_else(|| ConfigError::UnknownOperation { id: id.into() })
    }

    /// A record of model `name` with every field unset.
    pub fn new_record(&self, name: &str) -> Result<Record, ConfigError> {
        Ok(Record::new(Arc::clone(self.model(name)?)))
    }

    /// Model names (models and requests) in sorted order.
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    /// Union names in sorted order.
    pub fn union_names(&self) -> impl Iterator<Item = &str> {
        self.unions.keys().map(String::as_str)
    }

    /// Operation ids in sorted order.
    pub fn operation_ids(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Operations in id order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.values()
    }

    // ---- JSON codec ----

    /// Decodes a JSON value into a record of model or union `name`.
    ///
    /// ## Errors
    ///
    /// - [`ShapeError::MissingRequired`] when a required key is absent
    /// - [`ShapeError::InvalidField`] when a value has the wrong JSON type,
    ///   a required key is `null`, or a union tag is unknown
    pub fn decode(&self, name: &str, json: &serde_json::Value) -> Result<Record, ShapeError> {
        codec::decode(self, name, json)
    }

    /// Parses and decodes a JSON document into a record of model or union `name`.
    pub fn unmarshal(&self, name: &str, text: &str) -> Result<Record, ShapeError> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|e| DecodeError::json(name, &e))?;
        self.decode(name, &json)
    }

    /// Encodes a record as a JSON document.
    pub fn marshal(&self, record: &Record) -> Result<String, ShapeError> {
        Ok(record.to_json()?.to_string())
    }
}

fn duplicate(kind: &'static str, name: &str) -> ConfigError {
    ConfigError::Duplicate {
        kind,
        name: name.to_string(),
    }
}

fn compile_fields(
    owner: &str,
    fields: &[FieldDescriptor],
    enums: &BTreeMap<String, Arc<EnumSet>>,
    record_targets: &HashSet<&str>,
) -> Result<Vec<CompiledField>, ConfigError> {
    let mut names = HashSet::new();
    let mut wires = HashSet::new();
    let mut compiled = Vec::with_capacity(fields.len());

    for field in fields {
        let label = format!("{owner}.{}", field.wire_name);
        if !names.insert(field.name.as_str()) {
            return Err(ConfigError::invalid(owner, format!("duplicate field {}", field.name)));
        }
        // The same wire name may appear once per location (e.g. a path id and a body id).
        if !wires.insert((field.wire_name.as_str(), field.location)) {
            return Err(ConfigError::invalid(
                owner,
                format!("duplicate wire name {}", field.wire_name),
            ));
        }
        if field.field_type == FieldType::Binary
            && (field.location != WireLocation::Body || field.collection != Collection::Scalar)
        {
            return Err(ConfigError::invalid(
                owner,
                format!("binary field {} must be a scalar body field", field.name),
            ));
        }

        let enum_set = match &field.field_type {
            FieldType::Enum(name) => Some(Arc::clone(
                enums
                    .get(name)
                    .ok_or_else(|| ConfigError::unresolved(&label, "enum", name))?,
            )),
            FieldType::Model(name) => {
                if !record_targets.contains(name.as_str()) {
                    return Err(ConfigError::unresolved(&label, "model", name));
                }
                None
            }
            _ => None,
        };
        compiled.push(CompiledField::new(field.clone(), enum_set));
    }

    Ok(compiled)
}

fn check_unions(catalog: &Catalog, unions: &BTreeMap<String, UnionDef>) -> Result<(), ConfigError> {
    let by_name: HashMap<&str, _> = catalog.models.iter().map(|m| (m.name.as_str(), m)).collect();

    for union in unions.values() {
        let mut tags = HashSet::new();
        for variant in &union.variants {
            if !tags.insert(variant.tag.as_str()) {
                return Err(variant_error(union, &variant.tag, "duplicate tag"));
            }
            let model = by_name
                .get(variant.model.as_str())
                .ok_or_else(|| variant_error(union, &variant.tag, format!("unknown model {}", variant.model)))?;
            match &model.union {
                Some(member) if member.union == union.name && member.tag == variant.tag => {}
                _ => {
                    return Err(variant_error(
                        union,
                        &variant.tag,
                        format!("model {} does not declare membership", variant.model),
                    ));
                }
            }
            if model.find_field(&union.discriminator).is_some() {
                return Err(variant_error(
                    union,
                    &variant.tag,
                    format!("model {} redeclares the discriminator key", variant.model),
                ));
            }
        }
    }

    for model in &catalog.models {
        if let Some(member) = &model.union {
            let union = unions
                .get(&member.union)
                .ok_or_else(|| ConfigError::unresolved(&model.name, "union", &member.union))?;
            if union.model_for(&member.tag) != Some(model.name.as_str()) {
                return Err(variant_error(
                    union,
                    &member.tag,
                    format!("union does not list model {}", model.name),
                ));
            }
        }
    }

    Ok(())
}

fn variant_error(union: &UnionDef, tag: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidVariant {
        union: union.name.clone(),
        tag: tag.to_string(),
        reason: reason.into(),
    }
}

fn check_response(
    def: &ResponseDef,
    models: &BTreeMap<String, Arc<CompiledModel>>,
    record_targets: &HashSet<&str>,
) -> Result<(), ConfigError> {
    let resolve = |target: &str| {
        if record_targets.contains(target) {
            Ok(())
        } else {
            Err(ConfigError::unresolved(&def.name, "model", target))
        }
    };

    match &def.body {
        ResponseBody::Record(model) | ResponseBody::List(model) => resolve(model.as_str())?,
        ResponseBody::Collection {
            model,
            items_field,
            item,
        } => {
            resolve(item.as_str())?;
            let wrapper = models
                .get(model)
                .filter(|m| m.kind() == ModelKind::Model)
                .ok_or_else(|| ConfigError::unresolved(&def.name, "model", model))?;
            let field = wrapper
                .index_of_wire(items_field)
                .and_then(|idx| wrapper.field(idx))
                .ok_or_else(|| ConfigError::unresolved(model, "field", items_field))?;
            let descriptor = field.descriptor();
            if descriptor.collection != Collection::List || descriptor.model_ref() != Some(item.as_str()) {
                return Err(ConfigError::invalid(
                    &def.name,
                    format!("{model}.{items_field} must be a list of {item}"),
                ));
            }
        }
        ResponseBody::Empty => {}
    }

    for header in &def.headers {
        if !matches!(header.field_type, FieldType::String | FieldType::Integer) {
            return Err(ConfigError::invalid(
                &def.name,
                format!("header {} must be a string or integer", header.header),
            ));
        }
    }

    Ok(())
}

fn check_operation(
    op: &Operation,
    models: &BTreeMap<String, Arc<CompiledModel>>,
    responses: &BTreeMap<String, ResponseDef>,
) -> Result<(), ConfigError> {
    let request = models
        .get(&op.request)
        .filter(|m| m.kind() == ModelKind::Request)
        .ok_or_else(|| ConfigError::unresolved(&op.id, "request", &op.request))?;
    if !responses.contains_key(&op.response) {
        return Err(ConfigError::unresolved(&op.id, "response", &op.response));
    }

    let placeholders = op.path_params();
    for param in &placeholders {
        let backed = request
            .fields()
            .iter()
            .any(|f| f.location() == WireLocation::Path && f.wire_name() == *param);
        if !backed {
            return Err(ConfigError::UnboundPathParam {
                operation: op.id.clone(),
                param: param.to_string(),
            });
        }
    }
    for field in request.fields() {
        if field.location() == WireLocation::Path {
            if !placeholders.contains(&field.wire_name()) {
                return Err(ConfigError::UnboundPathParam {
                    operation: op.id.clone(),
                    param: field.wire_name().to_string(),
                });
            }
            if field.descriptor().collection != Collection::Scalar {
                return Err(ConfigError::invalid(
                    &op.request,
                    format!("path field {} must be scalar", field.name()),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_define::{EnumDef, ModelDef, RequestDef, RestMethod};

    fn base() -> Catalog {
        Catalog::new("test")
            .with_enum(EnumDef::new("Direction", ["EGRESS", "INGRESS"]))
            .with_model(
                ModelDef::new("Rule")
                    .field(FieldDescriptor::string("Id", "id"))
                    .field(FieldDescriptor::enumeration("Direction", "direction", "Direction")),
            )
    }

    #[test]
    fn compiles_and_exposes_enums() {
        let registry = Registry::new(base()).unwrap();
        assert_eq!(registry.values("Direction").unwrap(), ["EGRESS", "INGRESS"]);
        assert_eq!(registry.lookup("Direction", "egress").unwrap(), Some("EGRESS"));
        assert_eq!(
            registry.values("Nope").unwrap_err(),
            ConfigError::UnknownEnum { name: "Nope".into() }
        );
    }

    #[test]
    fn rejects_duplicate_enum() {
        let catalog = base().with_enum(EnumDef::new("Direction", ["UP"]));
        assert_eq!(
            Registry::new(catalog).unwrap_err(),
            ConfigError::Duplicate {
                kind: "enum",
                name: "Direction".into()
            }
        );
    }

    #[test]
    fn rejects_unresolved_enum_reference() {
        let catalog = base().with_model(
            ModelDef::new("Other").field(FieldDescriptor::enumeration("S", "s", "Missing")),
        );
        assert!(matches!(
            Registry::new(catalog).unwrap_err(),
            ConfigError::UnresolvedReference { kind: "enum", .. }
        ));
    }

    #[test]
    fn rejects_unresolved_model_reference() {
        let catalog =
            base().with_model(ModelDef::new("Other").field(FieldDescriptor::model("X", "x", "Ghost")));
        assert!(matches!(
            Registry::new(catalog).unwrap_err(),
            ConfigError::UnresolvedReference { kind: "model", .. }
        ));
    }

    #[test]
    fn rejects_model_request_name_clash() {
        let catalog = base().with_request(RequestDef::new("Rule"));
        assert!(matches!(
            Registry::new(catalog).unwrap_err(),
            ConfigError::Duplicate { kind: "model", .. }
        ));
    }

    #[test]
    fn rejects_unbacked_path_placeholder() {
        let catalog = base()
            .with_request(RequestDef::new("GetRuleRequest"))
            .with_response(ResponseDef::new("GetRuleResponse", ResponseBody::Record("Rule".into())))
            .with_operation(Operation::new(
                "GetRule",
                RestMethod::Get,
                "/rules/{ruleId}",
                "GetRuleRequest",
                "GetRuleResponse",
            ));
        assert_eq!(
            Registry::new(catalog).unwrap_err(),
            ConfigError::UnboundPathParam {
                operation: "GetRule".into(),
                param: "ruleId".into()
            }
        );
    }

    #[test]
    fn rejects_union_without_membership() {
        let catalog = base().with_union(UnionDef::new("AnyRule").variant("RULE", "Rule"));
        assert!(matches!(
            Registry::new(catalog).unwrap_err(),
            ConfigError::InvalidVariant { .. }
        ));
    }

    #[test]
    fn rejects_non_body_model_field() {
        let catalog =
            base().with_model(ModelDef::new("Bad").field(FieldDescriptor::string("Q", "q").in_query()));
        assert!(matches!(
            Registry::new(catalog).unwrap_err(),
            ConfigError::InvalidDefinition { .. }
        ));
    }

    #[test]
    fn request_lookup_excludes_plain_models() {
        let registry = Registry::new(base().with_request(RequestDef::new("R"))).unwrap();
        assert!(registry.request("R").is_ok());
        assert!(registry.request("Rule").is_err());
        assert!(registry.model("Rule").is_ok());
    }

    #[test]
    fn new_record_starts_unset() {
        let registry = Registry::new(base()).unwrap();
        let record = registry.new_record("Rule").unwrap();
        assert_eq!(record.set_fields().count(), 0);
    }
}
