//! Response decoding errors.

use thiserror::Error;

use super::ShapeError;

/// A response that could not be parsed into its declared model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The body is not valid JSON.
    #[error("invalid JSON for {context}: {message}")]
    Json {
        /// Operation id or model name being decoded.
        context: String,
        /// Parser message.
        message: String,
    },

    /// The body is JSON but does not fit the declared model.
    #[error("{context} does not match {model}: {source}")]
    Model {
        /// Operation id being decoded.
        context: String,
        /// Declared model.
        model: String,
        /// The codec failure.
        source: Box<ShapeError>,
    },

    /// A lifted header carries a value of the wrong type.
    #[error("invalid {header} header: {value:?}")]
    Header {
        /// Header name.
        header: String,
        /// Raw header value.
        value: String,
    },
}

impl DecodeError {
    /// Creates a JSON syntax error from a serde_json failure.
    pub fn json(context: impl Into<String>, err: &serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            message: err.to_string(),
        }
    }
}
