//! String-valued enumeration definitions.
//!
//! An [`EnumDef`] names a set of canonical upper-case wire values. The order
//! of `values` is the declaration order, and it is the order used whenever
//! the set is printed (error messages, CLI output).

use serde::{Deserialize, Serialize};

/// Canonical values for the shared `sortOrder` query parameter.
pub const SORT_ORDER_VALUES: [&str; 2] = ["ASC", "DESC"];

/// A named set of canonical string values.
///
/// ## Examples
///
/// ```
/// use shape_define::EnumDef;
///
/// let state = EnumDef::new(
///     "NatGatewayLifecycleState",
///     ["PROVISIONING", "AVAILABLE", "TERMINATING", "TERMINATED"],
/// );
///
/// assert_eq!(state.values[0], "PROVISIONING");
/// assert_eq!(state.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
    /// Unique name of the set (e.g. `BootVolumeReplicaLifecycleState`).
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Canonical values in declaration order.
    pub values: Vec<String>,
}

impl EnumDef {
    /// Creates an enum definition from its canonical values.
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: None,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates the two-valued `ASC`/`DESC` sort order set.
    ///
    /// ## Examples
    ///
    /// ```
    /// use shape_define::EnumDef;
    ///
    /// let order = EnumDef::sort_order("ListVcnsSortOrder");
    /// assert_eq!(order.values, vec!["ASC", "DESC"]);
    /// ```
    pub fn sort_order(name: impl Into<String>) -> Self {
        Self::new(name, SORT_ORDER_VALUES)
    }

    /// Adds a description to the enum.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Number of canonical values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no values are declared.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_preserves_declaration_order() {
        let def = EnumDef::new("Direction", ["INGRESS", "EGRESS"]);
        assert_eq!(def.values, vec!["INGRESS", "EGRESS"]);
        assert!(def.description.is_none());
    }

    #[test]
    fn description_is_skipped_when_absent() {
        let json = serde_json::to_string(&EnumDef::new("A", ["X"])).unwrap();
        assert_eq!(json, r#"{"name":"A","values":["X"]}"#);
    }

    #[test]
    fn empty_enum_reports_empty() {
        let def = EnumDef::new("Nothing", Vec::<String>::new());
        assert!(def.is_empty());
    }
}
