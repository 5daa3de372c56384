//! Core types for operation definitions.
//!
//! - [`RestMethod`] - HTTP method enumeration
//! - [`Operation`] - A bound API call: verb, path template, request and response models

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// HTTP methods used by SDK operations.
///
/// List and read operations use `GET`, create and action operations use
/// `POST`, updates use `PUT` and deletes use `DELETE`.
///
/// ## Examples
///
/// Parse from string:
///
/// ```
/// use std::str::FromStr;
/// use shape_define::RestMethod;
///
/// let method = RestMethod::from_str("GET").unwrap();
/// assert_eq!(method, RestMethod::Get);
/// ```
///
/// Display as uppercase:
///
/// ```
/// use shape_define::RestMethod;
///
/// assert_eq!(RestMethod::Put.to_string(), "PUT");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - list or read a resource
    Get,
    /// HTTP POST - create a resource or run an action
    Post,
    /// HTTP PUT - update a resource
    Put,
    /// HTTP PATCH - partially update a resource
    Patch,
    /// HTTP DELETE - remove a resource
    Delete,
    /// HTTP HEAD - headers only
    Head,
}

/// A single API operation definition.
///
/// An operation ties an HTTP verb and a path template to the request model
/// that fills it and the response model that decodes the reply.
///
/// ## Path Parameters
///
/// Paths use curly-brace placeholders (`/instancePools/{instancePoolId}`).
/// Each placeholder must be backed by a `path` field of the request model
/// whose wire name matches the placeholder.
///
/// ## Examples
///
/// ```
/// use shape_define::{Operation, RestMethod};
///
/// let op = Operation::new(
///     "GetInstancePool",
///     RestMethod::Get,
///     "/instancePools/{instancePoolId}",
///     "GetInstancePoolRequest",
///     "GetInstancePoolResponse",
/// );
///
/// assert_eq!(op.path_params(), vec!["instancePoolId"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Identifier for this operation (e.g. `ListBootVolumeReplicas`).
    pub id: String,
    /// HTTP method for this operation.
    pub method: RestMethod,
    /// Path template relative to the service base URL.
    pub path: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Name of the request model.
    pub request: String,
    /// Name of the response model.
    pub response: String,
    /// Static headers sent with every call of this operation.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

impl Operation {
    /// Creates an operation with no description and no static headers.
    pub fn new(
        id: impl Into<String>,
        method: RestMethod,
        path: impl Into<String>,
        request: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            method,
            path: path.into(),
            description: String::new(),
            request: request.into(),
            response: response.into(),
            headers: vec![],
        }
    }

    /// Adds a description to the operation.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Adds a static header to the operation.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the placeholder names of the path template in order.
    pub fn path_params(&self) -> Vec<&str> {
        extract_path_params(&self.path)
    }
}

/// Extracts parameter names from a path template.
///
/// ## Examples
///
/// ```
/// use shape_define::types::extract_path_params;
///
/// assert_eq!(extract_path_params("/vcns"), Vec::<&str>::new());
/// assert_eq!(
///     extract_path_params("/ipsecConnections/{ipscId}/tunnels/{tunnelId}/routes"),
///     vec!["ipscId", "tunnelId"]
/// );
/// ```
pub fn extract_path_params(path: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = None;

    for (idx, c) in path.char_indices() {
        if c == '{' {
            start = Some(idx + 1);
        } else if c == '}' {
            if let Some(pos) = start.take() {
                let param = &path[pos..idx];
                if !param.is_empty() {
                    params.push(param);
                }
            }
        }
    }

    params
}
