//! Shape Definitions
//!
//! Concrete resource catalogs built from the `shape-define` primitives.
//! Each service area exposes a `catalog()` function; [`core_catalog`]
//! merges them all into the catalog the `shape` runtime and CLI load by
//! default.
//!
//! ## Service Areas
//!
//! - [`blockstorage`] - Boot volume replicas
//! - [`compute`] - Compute clusters, capacity topology hosts, instance pools
//! - [`networking`] - VCNs, security rules, gateways, BYOIP/BYOASN, cross-connect groups
//! - [`topology`] - VCN topology with its relationship union
//!
//! ## Examples
//!
//! ```
//! use shape_definitions::core_catalog;
//!
//! let mut catalog = core_catalog();
//! catalog.expand();
//!
//! let list = catalog
//!     .operations
//!     .iter()
//!     .find(|op| op.id == "ListBootVolumeReplicas")
//!     .unwrap();
//! assert_eq!(list.path, "/bootVolumeReplicas");
//! ```

pub mod blockstorage;
mod common;
pub mod compute;
pub mod networking;
pub mod prelude;
pub mod topology;

use shape_define::Catalog;

/// Merges every bundled service catalog. List templates are left unexpanded.
pub fn core_catalog() -> Catalog {
    Catalog::new("core")
        .with_catalog(blockstorage::catalog())
        .with_catalog(compute::catalog())
        .with_catalog(networking::catalog())
        .with_catalog(topology::catalog())
}
