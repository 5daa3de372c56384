//! Request model definitions.
//!
//! A [`RequestDef`] is a model whose fields are spread across the four wire
//! locations. The binder walks the fields in declaration order, so the order
//! written here is the order of query keys and headers on the wire.

use serde::{Deserialize, Serialize};

use crate::field::{FieldDescriptor, WireLocation};

/// Header carrying the caller's correlation id.
pub const OPC_REQUEST_ID: &str = "opc-request-id";
/// Header carrying an idempotency token for create and action calls.
pub const OPC_RETRY_TOKEN: &str = "opc-retry-token";
/// Header carrying an entity tag for optimistic concurrency.
pub const IF_MATCH: &str = "if-match";

/// Describes the inputs of one operation.
///
/// ## Examples
///
/// ```
/// use shape_define::{RequestDef, FieldDescriptor, WireLocation};
///
/// let req = RequestDef::new("DeleteNatGatewayRequest")
///     .field(FieldDescriptor::string("NatGatewayId", "natGatewayId").in_path())
///     .field(RequestDef::if_match())
///     .field(RequestDef::opc_request_id());
///
/// assert_eq!(req.fields_at(WireLocation::Header).count(), 2);
/// assert!(!req.has_body());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDef {
    /// Unique request model name.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields in declaration order, each carrying its wire location.
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl RequestDef {
    /// Creates a request with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: vec![],
        }
    }

    /// Appends a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds a description to the request.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Iterates the fields placed at `location`, in declaration order.
    pub fn fields_at(&self, location: WireLocation) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(move |f| f.location == location)
    }

    /// Returns true when at least one field is placed in the body.
    pub fn has_body(&self) -> bool {
        self.fields_at(WireLocation::Body).next().is_some()
    }

    /// Optional `opc-request-id` header field.
    pub fn opc_request_id() -> FieldDescriptor {
        FieldDescriptor::string("OpcRequestId", OPC_REQUEST_ID)
            .optional()
            .in_header()
            .omit_empty()
            .with_description("Unique identifier for the request")
    }

    /// Optional `opc-retry-token` header field.
    pub fn opc_retry_token() -> FieldDescriptor {
        FieldDescriptor::string("OpcRetryToken", OPC_RETRY_TOKEN)
            .optional()
            .in_header()
            .omit_empty()
            .with_description("Idempotency token for retried requests")
    }

    /// Optional `if-match` header field.
    pub fn if_match() -> FieldDescriptor {
        FieldDescriptor::string("IfMatch", IF_MATCH)
            .optional()
            .in_header()
            .omit_empty()
            .with_description("Only act when the resource etag matches")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_at_filters_by_location() {
        let req = RequestDef::new("R")
            .field(FieldDescriptor::string("A", "a").in_query())
            .field(FieldDescriptor::string("B", "b"))
            .field(FieldDescriptor::string("C", "c").in_query());

        let query: Vec<_> = req
            .fields_at(WireLocation::Query)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(query, vec!["A", "C"]);
        assert!(req.has_body());
    }

    #[test]
    fn standard_headers_are_optional_and_omitted_when_empty() {
        for field in [
            RequestDef::opc_request_id(),
            RequestDef::opc_retry_token(),
            RequestDef::if_match(),
        ] {
            assert!(!field.required);
            assert!(field.omit_empty);
            assert_eq!(field.location, WireLocation::Header);
        }
    }
}
