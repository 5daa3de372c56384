//! Field descriptors.
//!
//! A [`FieldDescriptor`] fixes everything about how one field of a model
//! travels on the wire: its JSON key or URL token, where it is placed in an
//! HTTP request, whether it is required, whether an empty value is dropped,
//! and what it holds.
//!
//! ## Field Types
//!
//! - Primitives: [`FieldType::String`], [`FieldType::Integer`], [`FieldType::Float`],
//!   [`FieldType::Boolean`], [`FieldType::Time`], [`FieldType::Json`], [`FieldType::Binary`]
//! - [`FieldType::Enum`] - reference to a named enum set
//! - [`FieldType::Model`] - reference to a named model or discriminated union
//!
//! Any of them can be wrapped in a [`Collection::List`] or [`Collection::Map`].

use serde::{Deserialize, Serialize};
use strum::Display;

/// Where a field appears in an HTTP request.
///
/// Plain resource models only use [`WireLocation::Body`]; request models
/// partition their fields across all four locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WireLocation {
    /// JSON request or response body.
    #[default]
    Body,
    /// URL query string.
    Query,
    /// Path template placeholder.
    Path,
    /// HTTP header.
    Header,
}

/// The semantic type of a field's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// UTF-8 string.
    String,
    /// 64-bit signed integer.
    Integer,
    /// 64-bit float.
    Float,
    /// Boolean.
    Boolean,
    /// RFC 3339 timestamp.
    Time,
    /// Free-form JSON, passed through untouched.
    Json,
    /// Raw bytes supplied through the request's binary body handle.
    Binary,
    /// Reference to a named enum set.
    Enum(String),
    /// Reference to a named model or discriminated union.
    Model(String),
}

impl FieldType {
    /// Returns the short type label used in listings (`string`, `enum:Foo`, ...).
    pub fn label(&self) -> String {
        match self {
            Self::String => "string".to_string(),
            Self::Integer => "integer".to_string(),
            Self::Float => "float".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Time => "time".to_string(),
            Self::Json => "json".to_string(),
            Self::Binary => "binary".to_string(),
            Self::Enum(name) => format!("enum:{name}"),
            Self::Model(name) => format!("model:{name}"),
        }
    }
}

/// How many values a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    /// A single value.
    #[default]
    Scalar,
    /// An ordered list of values.
    List,
    /// A mapping from string keys to values.
    Map,
}

fn default_required() -> bool {
    true
}

/// Describes a single field of a model.
///
/// Fields are required and body-located unless modified. The builder
/// methods mirror the way definitions are written in the catalog modules.
///
/// ## Examples
///
/// ```
/// use shape_define::{FieldDescriptor, WireLocation, Collection};
///
/// // Optional query parameter backed by an enum, dropped when empty
/// let sort_by = FieldDescriptor::enumeration("SortBy", "sortBy", "ListVcnsSortBy")
///     .optional()
///     .in_query()
///     .omit_empty();
///
/// assert!(!sort_by.required);
/// assert_eq!(sort_by.location, WireLocation::Query);
/// assert_eq!(sort_by.enum_ref(), Some("ListVcnsSortBy"));
///
/// // Required list of strings in the body
/// let cidrs = FieldDescriptor::string("CidrBlocks", "cidrBlocks").list();
/// assert!(cidrs.required);
/// assert_eq!(cidrs.collection, Collection::List);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name used in diagnostics (e.g. `LifecycleState`).
    pub name: String,
    /// JSON key, query key, path placeholder or header name.
    pub wire_name: String,
    /// The semantic type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Scalar, list or map.
    #[serde(default)]
    pub collection: Collection,
    /// Whether the field must be present.
    #[serde(default = "default_required")]
    pub required: bool,
    /// Where the field is placed in an HTTP request.
    #[serde(default)]
    pub location: WireLocation,
    /// Drop the field from query/header serialization when empty.
    #[serde(default)]
    pub omit_empty: bool,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDescriptor {
    /// Creates a required scalar body field.
    pub fn new(name: impl Into<String>, wire_name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            wire_name: wire_name.into(),
            field_type,
            collection: Collection::Scalar,
            required: true,
            location: WireLocation::Body,
            omit_empty: false,
            description: None,
        }
    }

    /// Creates a required string field.
    pub fn string(name: impl Into<String>, wire_name: impl Into<String>) -> Self {
        Self::new(name, wire_name, FieldType::String)
    }

    /// Creates a required integer field.
    pub fn integer(name: impl Into<String>, wire_name: impl Into<String>) -> Self {
        Self::new(name, wire_name, FieldType::Integer)
    }

    /// Creates a required float field.
    pub fn float(name: impl Into<String>, wire_name: impl Into<String>) -> Self {
        Self::new(name, wire_name, FieldType::Float)
    }

    /// Creates a required boolean field.
    pub fn boolean(name: impl Into<String>, wire_name: impl Into<String>) -> Self {
        Self::new(name, wire_name, FieldType::Boolean)
    }

    /// Creates a required RFC 3339 timestamp field.
    pub fn time(name: impl Into<String>, wire_name: impl Into<String>) -> Self {
        Self::new(name, wire_name, FieldType::Time)
    }

    /// Creates a required free-form JSON field.
    pub fn json(name: impl Into<String>, wire_name: impl Into<String>) -> Self {
        Self::new(name, wire_name, FieldType::Json)
    }

    /// Creates a required binary body field.
    pub fn binary(name: impl Into<String>, wire_name: impl Into<String>) -> Self {
        Self::new(name, wire_name, FieldType::Binary)
    }

    /// Creates a required field referencing a named enum set.
    pub fn enumeration(
        name: impl Into<String>,
        wire_name: impl Into<String>,
        enum_name: impl Into<String>,
    ) -> Self {
        Self::new(name, wire_name, FieldType::Enum(enum_name.into()))
    }

    /// Creates a required field referencing a named model or union.
    pub fn model(
        name: impl Into<String>,
        wire_name: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self::new(name, wire_name, FieldType::Model(model_name.into()))
    }

    /// Makes the field optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Wraps the field type in an ordered list.
    pub fn list(mut self) -> Self {
        self.collection = Collection::List;
        self
    }

    /// Wraps the field type in a string-keyed map.
    pub fn map(mut self) -> Self {
        self.collection = Collection::Map;
        self
    }

    /// Places the field in the query string.
    pub fn in_query(mut self) -> Self {
        self.location = WireLocation::Query;
        self
    }

    /// Places the field in the path template.
    pub fn in_path(mut self) -> Self {
        self.location = WireLocation::Path;
        self
    }

    /// Places the field in an HTTP header.
    pub fn in_header(mut self) -> Self {
        self.location = WireLocation::Header;
        self
    }

    /// Drops the field from the wire when its value is empty.
    pub fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    /// Adds a description to the field.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Returns the referenced enum name, if this is an enum field.
    pub fn enum_ref(&self) -> Option<&str> {
        match &self.field_type {
            FieldType::Enum(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the referenced model name, if this is a model field.
    pub fn model_ref(&self) -> Option<&str> {
        match &self.field_type {
            FieldType::Model(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true for fields holding exactly one value.
    pub fn is_scalar(&self) -> bool {
        self.collection == Collection::Scalar
    }
}
