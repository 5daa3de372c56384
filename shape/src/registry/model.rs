//! Compiled models.
//!
//! A [`CompiledModel`] is the static descriptor table of one model or
//! request: fields in declaration order plus name and wire-name indexes, so
//! records address their slots by index instead of searching.

use std::collections::HashMap;
use std::sync::Arc;

use shape_define::{FieldDescriptor, FieldType, WireLocation};

use super::EnumSet;

/// Whether a compiled model is a plain record type or a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Resource or nested model; all fields live in the body.
    Model,
    /// Request model; fields spread across wire locations.
    Request,
}

/// The union variant identity of a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discriminator {
    /// Parent union name.
    pub union: String,
    /// JSON key carrying the tag.
    pub key: String,
    /// This variant's tag.
    pub tag: String,
}

/// A field descriptor with its enum reference resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledField {
    descriptor: FieldDescriptor,
    enum_set: Option<Arc<EnumSet>>,
}

impl CompiledField {
    pub(crate) fn new(descriptor: FieldDescriptor, enum_set: Option<Arc<EnumSet>>) -> Self {
        Self {
            descriptor,
            enum_set,
        }
    }

    /// The underlying descriptor.
    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Wire name.
    pub fn wire_name(&self) -> &str {
        &self.descriptor.wire_name
    }

    /// Semantic type.
    pub fn field_type(&self) -> &FieldType {
        &self.descriptor.field_type
    }

    /// Wire location.
    pub fn location(&self) -> WireLocation {
        self.descriptor.location
    }

    /// Whether the field is required.
    pub fn is_required(&self) -> bool {
        self.descriptor.required
    }

    /// The resolved enum set of an enum field.
    pub fn enum_set(&self) -> Option<&EnumSet> {
        self.enum_set.as_deref()
    }
}

/// The descriptor table of one model or request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledModel {
    name: String,
    kind: ModelKind,
    description: Option<String>,
    fields: Vec<CompiledField>,
    by_name: HashMap<String, usize>,
    by_wire: HashMap<String, usize>,
    discriminator: Option<Discriminator>,
}

impl CompiledModel {
    pub(crate) fn new(
        name: String,
        kind: ModelKind,
        description: Option<String>,
        fields: Vec<CompiledField>,
        discriminator: Option<Discriminator>,
    ) -> Self {
        let by_name = fields
            .iter()
            .enumerate()
            .map(|(idx, f)| (f.name().to_string(), idx))
            .collect();
        let by_wire = fields
            .iter()
            .enumerate()
            .map(|(idx, f)| (f.wire_name().to_string(), idx))
            .collect();
        Self {
            name,
            kind,
            description,
            fields,
            by_name,
            by_wire,
            discriminator,
        }
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model or request.
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Human-readable description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[CompiledField] {
        &self.fields
    }

    /// Union variant identity, for members of a discriminated union.
    pub fn discriminator(&self) -> Option<&Discriminator> {
        self.discriminator.as_ref()
    }

    /// Slot index of a field, by field name first and wire name second.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name
            .get(name)
            .or_else(|| self.by_wire.get(name))
            .copied()
    }

    /// Slot index of a field by wire name only.
    pub fn index_of_wire(&self, wire_name: &str) -> Option<usize> {
        self.by_wire.get(wire_name).copied()
    }

    /// Field at a slot index.
    pub fn field(&self, idx: usize) -> Option<&CompiledField> {
        self.fields.get(idx)
    }

    /// Field by name or wire name.
    pub fn find(&self, name: &str) -> Option<&CompiledField> {
        self.index_of(name).and_then(|idx| self.fields.get(idx))
    }

    /// Returns true if this model is assignable where `target` is expected,
    /// either by name or as a variant of the union `target`.
    pub fn satisfies(&self, target: &str) -> bool {
        self.name == target
            || self
                .discriminator
                .as_ref()
                .is_some_and(|d| d.union == target)
    }
}
