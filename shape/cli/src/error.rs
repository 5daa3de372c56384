//! CLI error type.

use shape::ShapeError;
use shape::define::DefineError;
use shape::error::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog {path}: {source}")]
    Catalog {
        path: String,
        #[source]
        source: DefineError,
    },

    #[error("invalid header argument {0:?}, expected NAME:VALUE")]
    HeaderArg(String),

    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}
