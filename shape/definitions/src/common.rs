//! Fields shared by most resources.

use shape_define::FieldDescriptor;

/// Optional `definedTags` (namespace → key → any JSON value).
pub fn defined_tags() -> FieldDescriptor {
    FieldDescriptor::json("DefinedTags", "definedTags")
        .map()
        .optional()
        .with_description("Predefined tags, scoped to a namespace")
}

/// Optional `freeformTags` (key → string).
pub fn freeform_tags() -> FieldDescriptor {
    FieldDescriptor::string("FreeformTags", "freeformTags")
        .map()
        .optional()
        .with_description("Free-form tags with no predefined name, type, or namespace")
}

/// Required `compartmentId` query scope of a list operation.
pub fn compartment_scope() -> FieldDescriptor {
    FieldDescriptor::string("CompartmentId", "compartmentId").in_query()
}

/// Optional `displayName` query filter.
pub fn display_name_filter() -> FieldDescriptor {
    FieldDescriptor::string("DisplayName", "displayName")
        .optional()
        .in_query()
}

/// Optional `lifecycleState` query filter over `enum_name`.
pub fn lifecycle_filter(enum_name: &str) -> FieldDescriptor {
    FieldDescriptor::enumeration("LifecycleState", "lifecycleState", enum_name)
        .optional()
        .in_query()
        .omit_empty()
}
