//! Model and discriminated-union definitions.
//!
//! A [`ModelDef`] is a named record type: an ordered list of
//! [`FieldDescriptor`]s. Declaration order is wire order.
//!
//! Polymorphic bodies are described with a [`UnionDef`]. Each variant is an
//! ordinary model that declares its membership through [`UnionMember`]; on the
//! wire the variant is selected by the union's discriminator key, which is
//! written first.

use serde::{Deserialize, Serialize};

use crate::field::FieldDescriptor;

/// Default JSON key carrying a union's variant tag.
pub const DEFAULT_DISCRIMINATOR: &str = "type";

/// Declares that a model is one variant of a discriminated union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionMember {
    /// Name of the parent union.
    pub union: String,
    /// Discriminator value identifying this variant (e.g. `ROUTES_TO`).
    pub tag: String,
}

/// A named record type.
///
/// ## Examples
///
/// ```
/// use shape_define::{ModelDef, FieldDescriptor};
///
/// let gateway = ModelDef::new("NatGateway")
///     .with_description("A NAT gateway for a VCN")
///     .field(FieldDescriptor::string("Id", "id"))
///     .field(FieldDescriptor::string("DisplayName", "displayName").optional())
///     .field(FieldDescriptor::enumeration(
///         "LifecycleState",
///         "lifecycleState",
///         "NatGatewayLifecycleState",
///     ));
///
/// assert_eq!(gateway.fields.len(), 3);
/// assert!(gateway.find_field("displayName").is_some());
/// ```
///
/// A union variant:
///
/// ```
/// use shape_define::{ModelDef, FieldDescriptor};
///
/// let contains = ModelDef::new("TopologyContainsEntityRelationship")
///     .member_of("TopologyEntityRelationship", "CONTAINS")
///     .field(FieldDescriptor::string("Id1", "id1"))
///     .field(FieldDescriptor::string("Id2", "id2"));
///
/// assert_eq!(contains.union.unwrap().tag, "CONTAINS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDef {
    /// Unique model name.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields in declaration order.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Union membership, for variants of a discriminated union.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub union: Option<UnionMember>,
}

impl ModelDef {
    /// Creates an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: vec![],
            union: None,
        }
    }

    /// Appends a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Appends several fields in order.
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Declares this model as the `tag` variant of `union`.
    pub fn member_of(mut self, union: impl Into<String>, tag: impl Into<String>) -> Self {
        self.union = Some(UnionMember {
            union: union.into(),
            tag: tag.into(),
        });
        self
    }

    /// Adds a description to the model.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Finds a field by its wire name.
    pub fn find_field(&self, wire_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.wire_name == wire_name)
    }
}

/// One variant of a [`UnionDef`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionVariant {
    /// Discriminator value.
    pub tag: String,
    /// Model implementing the variant.
    pub model: String,
}

fn default_discriminator() -> String {
    DEFAULT_DISCRIMINATOR.to_string()
}

/// A discriminated union of models.
///
/// ## Examples
///
/// ```
/// use shape_define::UnionDef;
///
/// let rel = UnionDef::new("TopologyEntityRelationship")
///     .variant("CONTAINS", "TopologyContainsEntityRelationship")
///     .variant("ROUTES_TO", "TopologyRoutesToEntityRelationship");
///
/// assert_eq!(rel.discriminator, "type");
/// assert_eq!(rel.model_for("ROUTES_TO"), Some("TopologyRoutesToEntityRelationship"));
/// assert_eq!(rel.model_for("routes_to"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionDef {
    /// Unique union name, usable wherever a model name is.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON key carrying the variant tag.
    #[serde(default = "default_discriminator")]
    pub discriminator: String,
    /// Variants in declaration order.
    #[serde(default)]
    pub variants: Vec<UnionVariant>,
}

impl UnionDef {
    /// Creates a union with the default `type` discriminator and no variants.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            discriminator: default_discriminator(),
            variants: vec![],
        }
    }

    /// Overrides the discriminator key.
    pub fn with_discriminator(mut self, key: impl Into<String>) -> Self {
        self.discriminator = key.into();
        self
    }

    /// Adds a description to the union.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Appends a variant.
    pub fn variant(mut self, tag: impl Into<String>, model: impl Into<String>) -> Self {
        self.variants.push(UnionVariant {
            tag: tag.into(),
            model: model.into(),
        });
        self
    }

    /// Returns the model implementing `tag`. Tags match exactly.
    pub fn model_for(&self, tag: &str) -> Option<&str> {
        self.variants
            .iter()
            .find(|v| v.tag == tag)
            .map(|v| v.model.as_str())
    }
}
