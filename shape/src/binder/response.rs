//! The Response Binder.

use std::borrow::Cow;

use bytes::Bytes;
use shape_define::{FieldType, Operation, ResponseBody};
use shape_define::request::OPC_REQUEST_ID;
use shape_define::response::{ETAG, OPC_NEXT_PAGE, OPC_TOTAL_ITEMS};
use tracing::debug;

use crate::error::{DecodeError, ServiceError, ShapeError};
use crate::record::Record;
use crate::registry::Registry;
use crate::value::Value;

/// The reply as the transport received it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in received order.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Creates a response with no headers and no body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Creates a JSON response.
    ///
    /// ## Examples
    ///
    /// ```
    /// use shape::binder::RawResponse;
    /// use serde_json::json;
    ///
    /// let raw = RawResponse::json(200, &json!([{"id": "a"}])).with_header("opc-next-page", "tok1");
    /// assert_eq!(raw.header("OPC-NEXT-PAGE"), Some("tok1"));
    /// assert!(raw.is_success());
    /// ```
    pub fn json(status: u16, body: &serde_json::Value) -> Self {
        Self::new(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
    }

    /// Appends a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replaces the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// First header value, matched ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, lossily decoded.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// A decoded reply.
///
/// Record bodies are exposed through [`Response::record`]; list and
/// collection bodies through [`Response::items`]. The raw reply is kept for
/// callers that need status or transport detail.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    operation: String,
    record: Option<Record>,
    items: Vec<Record>,
    lifted: Vec<LiftedHeader>,
    raw: RawResponse,
}

#[derive(Debug, Clone, PartialEq)]
struct LiftedHeader {
    name: String,
    header: String,
    value: Value,
}

impl Response {
    /// Operation id of the call.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The decoded record body, or the wrapper record of a collection body.
    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    /// Takes the decoded record body.
    pub fn into_record(self) -> Option<Record> {
        self.record
    }

    /// Items of a list or collection body, in received order.
    pub fn items(&self) -> &[Record] {
        &self.items
    }

    /// Takes the items of a list or collection body.
    pub fn into_items(self) -> Vec<Record> {
        self.items
    }

    /// A lifted header by response field name (e.g. `OpcNextPage`).
    pub fn header_field(&self, name: &str) -> Option<&Value> {
        self.lifted
            .iter()
            .find(|h| h.name == name)
            .map(|h| &h.value)
    }

    fn lifted_header(&self, header: &str) -> Option<&Value> {
        self.lifted
            .iter()
            .find(|h| h.header.eq_ignore_ascii_case(header))
            .map(|h| &h.value)
    }

    /// The `opc-next-page` continuation token, if present and non-empty.
    pub fn next_page(&self) -> Option<&str> {
        self.lifted_header(OPC_NEXT_PAGE)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
    }

    /// The `opc-request-id` correlation id.
    pub fn opc_request_id(&self) -> Option<&str> {
        self.lifted_header(OPC_REQUEST_ID).and_then(Value::as_str)
    }

    /// The `opc-total-items` count.
    pub fn total_items(&self) -> Option<i64> {
        self.lifted_header(OPC_TOTAL_ITEMS).and_then(Value::as_i64)
    }

    /// The `etag` entity tag.
    pub fn etag(&self) -> Option<&str> {
        self.lifted_header(ETAG).and_then(Value::as_str)
    }

    /// The raw reply.
    pub fn raw(&self) -> &RawResponse {
        &self.raw
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.raw.status
    }
}

/// Decodes a reply according to the operation's response definition.
///
/// ## Errors
///
/// - [`ShapeError::Service`] for non-2xx statuses, carrying the reply's
///   `opc-request-id`
/// - [`ShapeError::Decode`] when the body or a lifted header does not fit
pub fn bind_response(
    registry: &Registry,
    operation: &Operation,
    raw: RawResponse,
) -> Result<Response, ShapeError> {
    if !raw.is_success() {
        let request_id = raw.header(OPC_REQUEST_ID).map(str::to_string);
        return Err(ServiceError::from_body(&operation.id, raw.status, &raw.body, request_id).into());
    }

    let def = registry.response(&operation.response)?;

    let mut lifted = Vec::new();
    for header in &def.headers {
        let Some(text) = raw.header(&header.header) else {
            continue;
        };
        let value = match header.field_type {
            FieldType::Integer => text.trim().parse::<i64>().map(Value::Integer).map_err(|_| {
                DecodeError::Header {
                    header: header.header.clone(),
                    value: text.to_string(),
                }
            })?,
            _ => Value::String(text.to_string()),
        };
        lifted.push(LiftedHeader {
            name: header.name.clone(),
            header: header.header.clone(),
            value,
        });
    }

    let (record, items) = match &def.body {
        ResponseBody::Empty => (None, Vec::new()),
        ResponseBody::Record(model) => {
            let json = parse_body(operation, &raw)?;
            (Some(decode_as(registry, operation, model, &json)?), Vec::new())
        }
        ResponseBody::List(item) => {
            let json = parse_body(operation, &raw)?;
            let array = json.as_array().ok_or_else(|| DecodeError::Json {
                context: operation.id.clone(),
                message: "expected a JSON array".to_string(),
            })?;
            let items = array
                .iter()
                .map(|element| decode_as(registry, operation, item, element))
                .collect::<Result<Vec<_>, _>>()?;
            (None, items)
        }
        ResponseBody::Collection {
            model, items_field, ..
        } => {
            let json = parse_body(operation, &raw)?;
            let wrapper = decode_as(registry, operation, model, &json)?;
            let items = wrapper
                .get(items_field)
                .and_then(Value::as_list)
                .unwrap_or_default()
                .iter()
                .filter_map(Value::as_record)
                .cloned()
                .collect();
            (Some(wrapper), items)
        }
    };

    debug!(
        operation = %operation.id,
        status = raw.status,
        items = items.len(),
        "decoded response"
    );

    Ok(Response {
        operation: operation.id.clone(),
        record,
        items,
        lifted,
        raw,
    })
}

fn parse_body(operation: &Operation, raw: &RawResponse) -> Result<serde_json::Value, DecodeError> {
    serde_json::from_slice(&raw.body).map_err(|e| DecodeError::json(&operation.id, &e))
}

fn decode_as(
    registry: &Registry,
    operation: &Operation,
    model: &str,
    json: &serde_json::Value,
) -> Result<Record, DecodeError> {
    registry.decode(model, json).map_err(|source| DecodeError::Model {
        context: operation.id.clone(),
        model: model.to_string(),
        source: Box::new(source),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shape_define::{
        Catalog, FieldDescriptor, HeaderField, ModelDef, RequestDef, ResponseDef, RestMethod,
    };

    fn registry() -> Registry {
        Registry::new(
            Catalog::new("t")
                .with_model(ModelDef::new("Pool").field(FieldDescriptor::string("Id", "id")))
                .with_request(RequestDef::new("GetPoolRequest"))
                .with_response(
                    ResponseDef::new("GetPoolResponse", ResponseBody::Record("Pool".into()))
                        .header(HeaderField::etag())
                        .header(HeaderField::request_id())
                        .header(HeaderField::total_items()),
                )
                .with_operation(Operation::new(
                    "GetPool",
                    RestMethod::Get,
                    "/pools",
                    "GetPoolRequest",
                    "GetPoolResponse",
                )),
        )
        .unwrap()
    }

    #[test]
    fn lifts_headers_and_decodes_record() {
        let reg = registry();
        let raw = RawResponse::json(200, &json!({"id": "p1"}))
            .with_header("ETag", "\"abc\"")
            .with_header("opc-request-id", "r-1")
            .with_header("opc-total-items", "12");
        let resp = bind_response(&reg, reg.operation("GetPool").unwrap(), raw).unwrap();

        assert_eq!(resp.record().unwrap().get_str("Id"), Some("p1"));
        assert_eq!(resp.etag(), Some("\"abc\""));
        assert_eq!(resp.opc_request_id(), Some("r-1"));
        assert_eq!(resp.total_items(), Some(12));
        assert_eq!(resp.header_field("Etag"), Some(&Value::from("\"abc\"")));
        assert_eq!(resp.next_page(), None);
    }

    #[test]
    fn missing_headers_are_unset() {
        let reg = registry();
        let raw = RawResponse::json(200, &json!({"id": "p1"}));
        let resp = bind_response(&reg, reg.operation("GetPool").unwrap(), raw).unwrap();
        assert_eq!(resp.etag(), None);
        assert_eq!(resp.header_field("OpcRequestId"), None);
    }

    #[test]
    fn non_numeric_total_is_a_decode_error() {
        let reg = registry();
        let raw = RawResponse::json(200, &json!({"id": "p1"})).with_header("opc-total-items", "lots");
        let err = bind_response(&reg, reg.operation("GetPool").unwrap(), raw).unwrap_err();
        assert!(matches!(err, ShapeError::Decode(DecodeError::Header { .. })));
    }

    #[test]
    fn error_status_becomes_service_error_with_request_id() {
        let reg = registry();
        let raw = RawResponse::json(409, &json!({"code": "Conflict", "message": "etag mismatch"}))
            .with_header("opc-request-id", "r-2");
        let err = bind_response(&reg, reg.operation("GetPool").unwrap(), raw).unwrap_err();
        let ShapeError::Service(service) = err else {
            panic!("expected service error");
        };
        assert_eq!(service.status, 409);
        assert_eq!(service.code, "Conflict");
        assert_eq!(service.opc_request_id.as_deref(), Some("r-2"));
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let reg = registry();
        let raw = RawResponse::new(200).with_body("not json");
        let err = bind_response(&reg, reg.operation("GetPool").unwrap(), raw).unwrap_err();
        assert!(matches!(err, ShapeError::Decode(DecodeError::Json { .. })));
    }

    #[test]
    fn model_mismatch_is_a_decode_error() {
        let reg = registry();
        let raw = RawResponse::json(200, &json!({}));
        let err = bind_response(&reg, reg.operation("GetPool").unwrap(), raw).unwrap_err();
        let ShapeError::Decode(DecodeError::Model { source, .. }) = err else {
            panic!("expected model decode error");
        };
        assert_eq!(*source, ShapeError::missing_required("Pool", "Id"));
    }
}
