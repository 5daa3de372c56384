//! Catalog and client configuration errors.

use thiserror::Error;

/// Errors in catalogs or client configuration.
///
/// These occur while the registry is being built or a client is being set
/// up, and typically indicate programmer errors in definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Two definitions of the same kind share a name.
    #[error("Duplicate {kind} definition: {name}")]
    Duplicate {
        /// Definition kind (`enum`, `model`, `response`, `operation`).
        kind: &'static str,
        /// The duplicated name.
        name: String,
    },

    /// An enum declares no values.
    #[error("Enum {name} declares no values")]
    EmptyEnum {
        /// Enum name.
        name: String,
    },

    /// An enum declares the same value twice, ignoring case.
    #[error("Enum {name} declares {value} more than once")]
    DuplicateEnumValue {
        /// Enum name.
        name: String,
        /// The duplicated value.
        value: String,
    },

    /// No enum of that name is registered.
    #[error("Unknown enum: {name}")]
    UnknownEnum {
        /// Enum name.
        name: String,
    },

    /// No model, union or request of that name is registered.
    #[error("Unknown model: {name}")]
    UnknownModel {
        /// Model name.
        name: String,
    },

    /// No response of that name is registered.
    #[error("Unknown response: {name}")]
    UnknownResponse {
        /// Response name.
        name: String,
    },

    /// No operation of that id is registered.
    #[error("Unknown operation: {id}")]
    UnknownOperation {
        /// Operation id.
        id: String,
    },

    /// A definition references something that does not exist or has the wrong kind.
    #[error("{owner} references unknown {kind} {target}")]
    UnresolvedReference {
        /// Definition holding the reference (e.g. `Vcn.lifecycleState`).
        owner: String,
        /// Expected kind of the target.
        kind: &'static str,
        /// The missing name.
        target: String,
    },

    /// A union and its variant models disagree.
    #[error("Invalid variant {tag} of union {union}: {reason}")]
    InvalidVariant {
        /// Union name.
        union: String,
        /// Variant tag.
        tag: String,
        /// What is wrong.
        reason: String,
    },

    /// A path placeholder has no path field, or a path field has no placeholder.
    #[error("Operation {operation} path parameter {param} is not backed by a path field")]
    UnboundPathParam {
        /// Operation id.
        operation: String,
        /// Placeholder or field wire name.
        param: String,
    },

    /// A definition is structurally invalid.
    #[error("Invalid definition {name}: {reason}")]
    InvalidDefinition {
        /// Definition name.
        name: String,
        /// What is wrong.
        reason: String,
    },

    /// A record of the wrong model was supplied for an operation.
    #[error("Operation {operation} expects a {expected} request, got {actual}")]
    RequestMismatch {
        /// Operation id.
        operation: String,
        /// Request model of the operation.
        expected: String,
        /// Model of the supplied record.
        actual: String,
    },

    /// Pagination was requested for an operation without list semantics.
    #[error("Operation {operation} is not paginated")]
    NotPaginated {
        /// Operation id.
        operation: String,
    },

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value is not valid HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// A required environment variable is not set.
    #[error("Missing environment variable: {var}")]
    MissingEnv {
        /// Variable name.
        var: &'static str,
    },

    /// An environment variable holds an unusable value.
    #[error("Invalid value for {var}: {value}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl ConfigError {
    /// Creates an unresolved reference error.
    pub fn unresolved(
        owner: impl Into<String>,
        kind: &'static str,
        target: impl Into<String>,
    ) -> Self {
        Self::UnresolvedReference {
            owner: owner.into(),
            kind,
            target: target.into(),
        }
    }

    /// Creates an invalid definition error.
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_display() {
        let err = ConfigError::Duplicate {
            kind: "enum",
            name: "Direction".into(),
        };
        assert_eq!(err.to_string(), "Duplicate enum definition: Direction");
    }

    #[test]
    fn test_unresolved_reference() {
        let err = ConfigError::unresolved("Vcn.lifecycleState", "enum", "VcnState");
        assert_eq!(
            err.to_string(),
            "Vcn.lifecycleState references unknown enum VcnState"
        );
    }

    #[test]
    fn test_invalid_url() {
        let url_err = url::Url::parse("not-a-url").unwrap_err();
        let err: ConfigError = url_err.into();
        assert!(err.to_string().contains("Invalid URL"));
    }
}
