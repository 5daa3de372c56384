//! Everything needed to build a registry from the bundled catalogs.
//!
//! ## Examples
//!
//! ```
//! use shape_definitions::prelude::*;
//!
//! let catalog = core_catalog();
//! assert!(!catalog.is_empty());
//! ```

pub use crate::{blockstorage, compute, core_catalog, networking, topology};
pub use shape_define::prelude::*;
