//! Compiled enum sets.

use std::collections::HashMap;

use shape_define::EnumDef;

use crate::error::{ConfigError, UnsupportedEnum};

/// A named enum with its case-insensitive lookup table.
///
/// The table maps the lowercase projection of every canonical value to its
/// index, so lookup is total over that projection. Whitespace is never
/// trimmed.
///
/// ## Examples
///
/// ```
/// use shape::registry::EnumSet;
/// use shape_define::EnumDef;
///
/// let set = EnumSet::compile(&EnumDef::new("RouteType", ["STATIC", "DYNAMIC"])).unwrap();
///
/// assert_eq!(set.lookup("dynamic"), Some("DYNAMIC"));
/// assert_eq!(set.lookup("Dynamic"), Some("DYNAMIC"));
/// assert_eq!(set.lookup(" dynamic"), None);
/// assert!(set.validate("RouteType", "").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSet {
    name: String,
    description: Option<String>,
    values: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl EnumSet {
    /// Builds the lookup table, rejecting empty sets and case-insensitive duplicates.
    pub fn compile(def: &EnumDef) -> Result<Self, ConfigError> {
        if def.is_empty() {
            return Err(ConfigError::EmptyEnum {
                name: def.name.clone(),
            });
        }

        let mut lookup = HashMap::with_capacity(def.values.len());
        for (idx, value) in def.values.iter().enumerate() {
            if value.is_empty() {
                return Err(ConfigError::invalid(&def.name, "enum values must not be empty"));
            }
            if lookup.insert(value.to_lowercase(), idx).is_some() {
                return Err(ConfigError::DuplicateEnumValue {
                    name: def.name.clone(),
                    value: value.clone(),
                });
            }
        }

        Ok(Self {
            name: def.name.clone(),
            description: def.description.clone(),
            values: def.values.clone(),
            lookup,
        })
    }

    /// Enum name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Canonical values in declaration order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Canonical values as plain string slices, in declaration order.
    pub fn string_values(&self) -> Vec<&str> {
        self.values.iter().map(String::as_str).collect()
    }

    /// Returns the canonical spelling of `input`, ignoring case.
    pub fn lookup(&self, input: &str) -> Option<&str> {
        self.lookup
            .get(&input.to_lowercase())
            .map(|&idx| self.values[idx].as_str())
    }

    /// Returns true when `input` matches a canonical value, ignoring case.
    pub fn contains(&self, input: &str) -> bool {
        self.lookup(input).is_some()
    }

    /// Accepts empty input and any case-insensitive match; rejects the rest.
    ///
    /// `field` labels the violation; it names the field holding the value,
    /// not the enum.
    pub fn validate(&self, field: &str, input: &str) -> Result<(), UnsupportedEnum> {
        if input.is_empty() || self.contains(input) {
            Ok(())
        } else {
            Err(UnsupportedEnum::new(field, input, self.values.iter().cloned()))
        }
    }
}
