//! Layered error types for the shape runtime.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ShapeError`] - Top-level error type for every registry, binder and client operation
//! - [`UnsupportedEnum`] / [`EnumViolations`] - Enum membership failures, accumulated per record
//! - [`TransportError`] - Failures of the transport collaborator
//! - [`DecodeError`] - Response bodies or headers that do not fit the declared model
//! - [`ServiceError`] - Non-2xx replies from the service
//! - [`ConfigError`] - Catalog and client configuration errors
//!
//! Every type is `Clone + PartialEq` so a poisoned paginator can hand back
//! the exact error that poisoned it.

mod config_error;
mod decode_error;
mod enum_error;
mod service_error;
mod shape_error;
mod transport_error;

pub use config_error::ConfigError;
pub use decode_error::DecodeError;
pub use enum_error::{EnumViolations, UnsupportedEnum};
pub use service_error::ServiceError;
pub use shape_error::ShapeError;
pub use transport_error::TransportError;
