//! Shape Definition Library
//!
//! This crate provides the declarative primitives that describe a cloud
//! SDK's data-transfer models. Definitions are pure data: the `shape`
//! runtime compiles them into a registry that encodes, decodes, validates
//! and binds records to HTTP requests.
//!
//! ## Core Types
//!
//! - [`EnumDef`] - Named set of canonical upper-case string values
//! - [`FieldDescriptor`] - Wire name, type, location and required flag of one field
//! - [`FieldType`] - Primitive kind, enum reference or model reference
//! - [`WireLocation`] - Body, query, path or header placement
//! - [`Collection`] - Scalar, list or string-keyed map
//! - [`ModelDef`] - Named record type made of field descriptors
//! - [`UnionDef`] - Discriminated union over models, keyed by a `type` tag
//! - [`RequestDef`] - Request model whose fields spread across wire locations
//! - [`ResponseDef`] - Body shape plus headers lifted into named fields
//! - [`Operation`] - HTTP verb and path template binding a request to a response
//! - [`ListTemplate`] - One entry generating a whole paginated list operation
//! - [`Catalog`] - Bundle of definitions handed to the registry
//!
//! ## Examples
//!
//! ```
//! use shape_define::{
//!     Catalog, EnumDef, FieldDescriptor, ModelDef, Operation, RequestDef, ResponseBody,
//!     ResponseDef, RestMethod, HeaderField,
//! };
//!
//! let catalog = Catalog::new("nat")
//!     .with_enum(EnumDef::new(
//!         "NatGatewayLifecycleState",
//!         ["PROVISIONING", "AVAILABLE", "TERMINATING", "TERMINATED"],
//!     ))
//!     .with_model(
//!         ModelDef::new("NatGateway")
//!             .field(FieldDescriptor::string("Id", "id"))
//!             .field(FieldDescriptor::enumeration(
//!                 "LifecycleState",
//!                 "lifecycleState",
//!                 "NatGatewayLifecycleState",
//!             )),
//!     )
//!     .with_request(
//!         RequestDef::new("GetNatGatewayRequest")
//!             .field(FieldDescriptor::string("NatGatewayId", "natGatewayId").in_path()),
//!     )
//!     .with_response(
//!         ResponseDef::new("GetNatGatewayResponse", ResponseBody::Record("NatGateway".into()))
//!             .header(HeaderField::etag()),
//!     )
//!     .with_operation(Operation::new(
//!         "GetNatGateway",
//!         RestMethod::Get,
//!         "/natGateways/{natGatewayId}",
//!         "GetNatGatewayRequest",
//!         "GetNatGatewayResponse",
//!     ));
//!
//! assert_eq!(catalog.operations.len(), 1);
//! ```
//!
//! ## Catalog Definitions
//!
//! The concrete resource catalog lives in the separate `shape-definitions`
//! crate, which uses these primitives.

pub mod catalog;
pub mod enums;
pub mod error;
pub mod field;
pub mod list;
pub mod model;
pub mod prelude;
pub mod request;
pub mod response;
pub mod types;

// Re-export main types at crate root
pub use catalog::Catalog;
pub use enums::EnumDef;
pub use error::DefineError;
pub use field::{Collection, FieldDescriptor, FieldType, WireLocation};
pub use list::{ListExpansion, ListTemplate};
pub use model::{ModelDef, UnionDef, UnionMember, UnionVariant};
pub use request::RequestDef;
pub use response::{HeaderField, ResponseBody, ResponseDef};
pub use types::{Operation, RestMethod};
