//! Convenient re-exports for writing catalogs.
//!
//! ## Examples
//!
//! ```
//! use shape_define::prelude::*;
//!
//! let catalog = Catalog::new("compute")
//!     .with_enum(EnumDef::new("ComputeClusterLifecycleState", ["ACTIVE", "DELETED"]))
//!     .with_list(
//!         ListTemplate::new("ListComputeClusters", "/computeClusters", "ComputeClusterSummary")
//!             .in_collection("ComputeClusterCollection"),
//!     );
//!
//! assert_eq!(catalog.lists.len(), 1);
//! ```

pub use crate::catalog::Catalog;
pub use crate::enums::EnumDef;
pub use crate::error::DefineError;
pub use crate::field::{Collection, FieldDescriptor, FieldType, WireLocation};
pub use crate::list::{ListExpansion, ListTemplate};
pub use crate::model::{ModelDef, UnionDef, UnionMember, UnionVariant};
pub use crate::request::RequestDef;
pub use crate::response::{HeaderField, ResponseBody, ResponseDef};
pub use crate::types::{Operation, RestMethod};
