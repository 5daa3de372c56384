//! Errors raised while loading catalogs.

use thiserror::Error;

/// Failure to parse or serialize a [`Catalog`](crate::Catalog).
#[derive(Debug, Error)]
pub enum DefineError {
    /// The catalog document is not valid JSON for the catalog schema.
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog document is not valid YAML for the catalog schema.
    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
