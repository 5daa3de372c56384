//! Catalogs: the unit handed to the model registry.
//!
//! A [`Catalog`] bundles every enum, model, union, request, response,
//! operation and list template of one service area. Catalogs can be built
//! in code, merged, and loaded from or written to JSON and YAML documents.
//!
//! YAML documents use the same shape as JSON ones: enum-typed values such as
//! a field's `type` are written as single-key maps (`type: { enum: Color }`)
//! rather than YAML tags.

use serde::{Deserialize, Serialize};
use serde_yaml::with::singleton_map_recursive;

use crate::enums::EnumDef;
use crate::error::DefineError;
use crate::list::ListTemplate;
use crate::model::{ModelDef, UnionDef};
use crate::request::RequestDef;
use crate::response::ResponseDef;
use crate::types::Operation;

/// A named collection of definitions.
///
/// ## Examples
///
/// ```
/// use shape_define::{Catalog, EnumDef, ListTemplate, ModelDef, FieldDescriptor};
///
/// let mut catalog = Catalog::new("networking")
///     .with_enum(EnumDef::new("VcnLifecycleState", ["PROVISIONING", "AVAILABLE"]))
///     .with_model(ModelDef::new("Vcn").field(FieldDescriptor::string("Id", "id")))
///     .with_list(ListTemplate::new("ListVcns", "/vcns", "Vcn").sort_by(["TIMECREATED"]));
///
/// catalog.expand();
/// assert!(catalog.lists.is_empty());
/// assert_eq!(catalog.operations[0].id, "ListVcns");
/// assert_eq!(catalog.enums.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog name, used in diagnostics.
    pub name: String,
    /// Enum sets.
    #[serde(default)]
    pub enums: Vec<EnumDef>,
    /// Record models.
    #[serde(default)]
    pub models: Vec<ModelDef>,
    /// Discriminated unions.
    #[serde(default)]
    pub unions: Vec<UnionDef>,
    /// Request models.
    #[serde(default)]
    pub requests: Vec<RequestDef>,
    /// Response models.
    #[serde(default)]
    pub responses: Vec<ResponseDef>,
    /// Operations.
    #[serde(default)]
    pub operations: Vec<Operation>,
    /// List templates not yet expanded.
    #[serde(default)]
    pub lists: Vec<ListTemplate>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds an enum set.
    pub fn with_enum(mut self, def: EnumDef) -> Self {
        self.enums.push(def);
        self
    }

    /// Adds a model.
    pub fn with_model(mut self, def: ModelDef) -> Self {
        self.models.push(def);
        self
    }

    /// Adds a union.
    pub fn with_union(mut self, def: UnionDef) -> Self {
        self.unions.push(def);
        self
    }

    /// Adds a request.
    pub fn with_request(mut self, def: RequestDef) -> Self {
        self.requests.push(def);
        self
    }

    /// Adds a response.
    pub fn with_response(mut self, def: ResponseDef) -> Self {
        self.responses.push(def);
        self
    }

    /// Adds an operation.
    pub fn with_operation(mut self, def: Operation) -> Self {
        self.operations.push(def);
        self
    }

    /// Adds a list template.
    pub fn with_list(mut self, def: ListTemplate) -> Self {
        self.lists.push(def);
        self
    }

    /// Folds another catalog into this one, keeping this catalog's name.
    pub fn with_catalog(mut self, other: Catalog) -> Self {
        self.merge(other);
        self
    }

    /// Appends every definition of `other`. Duplicates are left for the
    /// registry to reject.
    pub fn merge(&mut self, other: Catalog) {
        self.enums.extend(other.enums);
        self.models.extend(other.models);
        self.unions.extend(other.unions);
        self.requests.extend(other.requests);
        self.responses.extend(other.responses);
        self.operations.extend(other.operations);
        self.lists.extend(other.lists);
    }

    /// Replaces every list template by its generated definitions.
    pub fn expand(&mut self) {
        for template in std::mem::take(&mut self.lists) {
            let expanded = template.expand();
            self.enums.extend(expanded.enums);
            self.requests.push(expanded.request);
            self.responses.push(expanded.response);
            self.operations.push(expanded.operation);
        }
    }

    /// Total number of definitions of every kind.
    pub fn len(&self) -> usize {
        self.enums.len()
            + self.models.len()
            + self.unions.len()
            + self.requests.len()
            + self.responses.len()
            + self.operations.len()
            + self.lists.len()
    }

    /// Returns true when the catalog holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parses a catalog from a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, DefineError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parses a catalog from a YAML document.
    ///
    /// ## Examples
    ///
    /// ```
    /// use shape_define::Catalog;
    ///
    /// let yaml = r#"
    /// name: extra
    /// enums:
    ///   - name: Color
    ///     values: [RED, GREEN]
    /// models:
    ///   - name: Paint
    ///     fields:
    ///       - name: Color
    ///         wire_name: color
    ///         type: { enum: Color }
    /// "#;
    ///
    /// let catalog = Catalog::from_yaml_str(yaml).unwrap();
    /// assert_eq!(catalog.enums[0].values, vec!["RED", "GREEN"]);
    /// assert!(catalog.models[0].fields[0].required);
    /// ```
    pub fn from_yaml_str(s: &str) -> Result<Self, DefineError> {
        let de = serde_yaml::Deserializer::from_str(s);
        Ok(singleton_map_recursive::deserialize(de)?)
    }

    /// Serializes the catalog as YAML, in the same shape [`Catalog::from_yaml_str`] reads.
    pub fn to_yaml_string(&self) -> Result<String, DefineError> {
        let mut out = Vec::new();
        let mut ser = serde_yaml::Serializer::new(&mut out);
        singleton_map_recursive::serialize(self, &mut ser)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
