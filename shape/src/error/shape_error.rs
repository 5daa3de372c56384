//! Top-level error type.

use thiserror::Error;

use super::{ConfigError, DecodeError, EnumViolations, ServiceError, TransportError};

/// Top-level error type for all shape operations.
///
/// Validation errors (`UnsupportedEnum`, `MissingRequired`, `InvalidField`)
/// are raised before any transport call is attempted.
///
/// ## Examples
///
/// ```
/// use shape::error::{ShapeError, TransportError};
///
/// fn describe(err: &ShapeError) -> &'static str {
///     match err {
///         ShapeError::UnsupportedEnum(_) => "bad enum value",
///         ShapeError::MissingRequired { .. } | ShapeError::InvalidField { .. } => "bad record",
///         ShapeError::Transport(_) => "network",
///         ShapeError::Decode(_) => "unexpected reply",
///         ShapeError::Service(_) => "service rejected the call",
///         ShapeError::Config(_) => "bad definitions",
///     }
/// }
///
/// let err: ShapeError = TransportError::Cancelled.into();
/// assert_eq!(describe(&err), "network");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// One or more enum fields hold values outside their canonical set.
    #[error(transparent)]
    UnsupportedEnum(#[from] EnumViolations),

    /// A required field was absent on unmarshal or unset on marshal.
    #[error("missing required field {field} on {model}")]
    MissingRequired {
        /// Model name.
        model: String,
        /// Field name.
        field: String,
    },

    /// A field's value violated its descriptor.
    #[error("invalid field {field} on {model}: {reason}")]
    InvalidField {
        /// Model name.
        model: String,
        /// Field name.
        field: String,
        /// What is wrong.
        reason: String,
    },

    /// The transport collaborator failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The service replied with a non-2xx status.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Definitions or client configuration are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ShapeError {
    /// Creates a missing required field error.
    pub fn missing_required(model: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingRequired {
            model: model.into(),
            field: field.into(),
        }
    }

    /// Creates an invalid field error.
    pub fn invalid_field(
        model: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            model: model.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if retrying the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_retryable(),
            Self::Service(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Returns `true` for errors raised before any transport call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedEnum(_) | Self::MissingRequired { .. } | Self::InvalidField { .. }
        )
    }
}
