//! Shape Runtime
//!
//! Compiles [`shape_define`] catalogs into a [`Registry`] and drives the
//! life of a request through it: records are built and validated against
//! their descriptors, bound to an HTTP request template, sent through a
//! [`Transport`](transport::Transport), and the reply is decoded back into
//! records.
//!
//! ## Core Types
//!
//! - [`Registry`] - Enum Registry and Model Registry, compiled once and read-only after
//! - [`Record`] - An instance of a model, one value slot per field descriptor
//! - [`Value`] - The value held by one slot
//! - [`binder::bind_request`] - Places request fields into path, query, headers and body
//! - [`binder::bind_response`] - Decodes a reply and lifts designated headers
//! - [`Client`] - Binds, sends and decodes calls over a transport
//! - [`Paginator`] - Lazy iteration over every page of a list operation
//! - [`ShapeError`] - Top-level error type
//!
//! ## Examples
//!
//! ```
//! use shape::Registry;
//!
//! let registry = Registry::new(shape_definitions::core_catalog()).unwrap();
//!
//! assert_eq!(
//!     registry.string_values("BootVolumeReplicaLifecycleState").unwrap(),
//!     vec!["PROVISIONING", "AVAILABLE", "ACTIVATING", "TERMINATING", "TERMINATED", "FAULTY"]
//! );
//! assert_eq!(
//!     registry.lookup("BootVolumeReplicaLifecycleState", "available").unwrap(),
//!     Some("AVAILABLE")
//! );
//! ```

pub mod binder;
pub mod client;
mod codec;
pub mod error;
pub mod paginator;
pub mod record;
pub mod registry;
pub mod transport;
pub mod validate;
pub mod value;

pub use client::{Client, Request};
pub use error::ShapeError;
pub use paginator::Paginator;
pub use record::Record;
pub use registry::Registry;
pub use value::Value;

/// Re-exported descriptor primitives.
pub use shape_define as define;
