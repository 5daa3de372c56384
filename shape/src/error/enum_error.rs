//! Enum membership errors.

use std::fmt;

use thiserror::Error;

/// A value outside the canonical set of a named enum.
///
/// ## Examples
///
/// ```
/// use shape::error::UnsupportedEnum;
///
/// let err = UnsupportedEnum::new("Direction", "SIDEWAYS", ["EGRESS", "INGRESS"]);
/// assert_eq!(
///     err.to_string(),
///     "unsupported enum value for Direction: SIDEWAYS. Supported values are: EGRESS,INGRESS"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported enum value for {field}: {given}. Supported values are: {}", .supported.join(","))]
pub struct UnsupportedEnum {
    /// Field label, dotted for nested fields (e.g. `MacsecProperties.State`).
    pub field: String,
    /// The rejected input, verbatim.
    pub given: String,
    /// Canonical values in declaration order.
    pub supported: Vec<String>,
}

impl UnsupportedEnum {
    /// Creates an enum violation.
    pub fn new<I, S>(field: impl Into<String>, given: impl Into<String>, supported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            given: given.into(),
            supported: supported.into_iter().map(Into::into).collect(),
        }
    }
}

/// Every enum violation found in one record, in field declaration order.
///
/// The message joins one line per violation. `had_errors` is a view over
/// the collection's non-emptiness.
///
/// ## Examples
///
/// ```
/// use shape::error::{EnumViolations, UnsupportedEnum};
///
/// let mut violations = EnumViolations::default();
/// assert!(!violations.had_errors());
///
/// violations.push(UnsupportedEnum::new("A", "x", ["Y"]));
/// violations.push(UnsupportedEnum::new("B", "z", ["W"]));
///
/// assert!(violations.had_errors());
/// assert_eq!(violations.to_string().lines().count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumViolations {
    entries: Vec<UnsupportedEnum>,
}

impl EnumViolations {
    /// Records a violation.
    pub fn push(&mut self, violation: UnsupportedEnum) {
        self.entries.push(violation);
    }

    /// Returns true when at least one violation was recorded.
    pub fn had_errors(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Violations in declaration order.
    pub fn entries(&self) -> &[UnsupportedEnum] {
        &self.entries
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no violation was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Converts into `Err(self)` when any violation was recorded.
    pub fn into_result(self) -> Result<(), EnumViolations> {
        if self.had_errors() { Err(self) } else { Ok(()) }
    }
}

impl From<UnsupportedEnum> for EnumViolations {
    fn from(violation: UnsupportedEnum) -> Self {
        Self {
            entries: vec![violation],
        }
    }
}

impl fmt::Display for EnumViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, entry) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EnumViolations {}
