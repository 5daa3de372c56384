//! The Request Binder.

use bytes::Bytes;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{HeaderName, HeaderValue};
use shape_define::{FieldType, Operation, RestMethod, WireLocation};
use tracing::debug;
use url::Url;
use url::form_urlencoded;

use crate::client::{Request, RetryPolicy};
use crate::codec;
use crate::error::{ConfigError, ShapeError};
use crate::registry::CompiledField;
use crate::value::Value;

/// Characters left as-is in a path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const CONTENT_TYPE: &str = "content-type";
const APPLICATION_JSON: &str = "application/json";
const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// A request body ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// Serialized JSON.
    Json(Bytes),
    /// Raw bytes from the request's binary body handle.
    Binary(Bytes),
}

impl Body {
    /// Returns true if there is no body.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Body bytes (empty for [`Body::Empty`]).
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Empty => &[],
            Self::Json(bytes) | Self::Binary(bytes) => bytes,
        }
    }

    /// Parses a JSON body back into a value.
    pub fn json(&self) -> Option<serde_json::Value> {
        match self {
            Self::Json(bytes) => serde_json::from_slice(bytes).ok(),
            _ => None,
        }
    }
}

/// Everything a transport needs to perform one call.
///
/// The template is plain data: the path is already substituted, the query
/// is in wire order and headers are merged. The retry-policy handle is
/// carried along untouched.
#[derive(Debug, Clone)]
pub struct HttpRequestTemplate {
    /// Operation id, for diagnostics.
    pub operation: String,
    /// HTTP method.
    pub method: RestMethod,
    /// Path with every placeholder substituted and percent-encoded.
    pub path: String,
    /// Query parameters in wire order; list fields repeat their key.
    pub query: Vec<(String, String)>,
    /// Headers in wire order, names unique ignoring case.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: Body,
    /// Caller-supplied retry-policy handle.
    pub retry_policy: Option<RetryPolicy>,
}

impl HttpRequestTemplate {
    /// Form-encoded query string, without the leading `?`.
    ///
    /// ## Examples
    ///
    /// ```
    /// use shape::binder::{Body, HttpRequestTemplate};
    /// use shape_define::RestMethod;
    ///
    /// let template = HttpRequestTemplate {
    ///     operation: "ListBootVolumeReplicas".into(),
    ///     method: RestMethod::Get,
    ///     path: "/bootVolumeReplicas".into(),
    ///     query: vec![("availabilityDomain".into(), "Uocm:PHX-AD-1".into())],
    ///     headers: vec![],
    ///     body: Body::Empty,
    ///     retry_policy: None,
    /// };
    ///
    /// assert_eq!(template.query_string(), "availabilityDomain=Uocm%3APHX-AD-1");
    /// ```
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.query {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Path followed by `?query` when there are query parameters.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query_string())
        }
    }

    /// First value of a query parameter.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Header value, matched ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Full URL under `base`. The base path is kept as a prefix.
    pub fn url(&self, base: &Url) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!(
            "{}{}",
            base.as_str().trim_end_matches('/'),
            self.path
        ))?;
        if !self.query.is_empty() {
            url.set_query(Some(&self.query_string()));
        }
        Ok(url)
    }
}

/// Binds a request to an operation.
///
/// Steps, in order:
/// 1. enum validation; any violation fails before anything else happens
/// 2. path placeholders are substituted with percent-encoded values
/// 3. set query fields are appended (empty values skipped when `omit_empty`)
/// 4. header fields are written, then caller extra headers, which win
/// 5. the body is serialized from the body fields
/// 6. the retry-policy handle is attached verbatim
///
/// ## Errors
///
/// - [`ShapeError::UnsupportedEnum`] with every enum violation
/// - [`ShapeError::MissingRequired`] for unset required fields
/// - [`ShapeError::InvalidField`] for empty path parameters, collection
///   values in a path, query or header slot, and header names or values
///   that are not valid HTTP (control characters, for instance)
/// - [`ConfigError::RequestMismatch`] when the record is not the operation's request model
pub fn bind_request(
    operation: &Operation,
    request: &Request,
) -> Result<HttpRequestTemplate, ShapeError> {
    let record = request.record();
    if record.model_name() != operation.request {
        return Err(ConfigError::RequestMismatch {
            operation: operation.id.clone(),
            expected: operation.request.clone(),
            actual: record.model_name().to_string(),
        }
        .into());
    }

    record.check_enums()?;

    let model = record.model_name();
    let mut path = operation.path.clone();
    let mut query = Vec::new();
    let mut headers = Vec::new();

    for (name, value) in &operation.headers {
        check_header(model, name, name, value)?;
        merge_header(&mut headers, name, value.clone());
    }

    for (field, slot) in record.slots() {
        match field.location() {
            WireLocation::Path => {
                let value = slot.ok_or_else(|| ShapeError::missing_required(model, field.name()))?;
                let text = wire_string(model, field, value)?;
                if text.is_empty() {
                    return Err(ShapeError::invalid_field(
                        model,
                        field.name(),
                        "path parameter must not be empty",
                    ));
                }
                let placeholder = format!("{{{}}}", field.wire_name());
                let encoded = utf8_percent_encode(&text, PATH_SEGMENT).to_string();
                path = path.replace(&placeholder, &encoded);
            }
            WireLocation::Query => match slot {
                Some(value) if !(field.descriptor().omit_empty && value.is_empty()) => {
                    match value {
                        Value::List(items) => {
                            for item in items {
                                let text = wire_string(model, field, item)?;
                                query.push((field.wire_name().to_string(), text));
                            }
                        }
                        scalar => {
                            let text = wire_string(model, field, scalar)?;
                            query.push((field.wire_name().to_string(), text));
                        }
                    }
                }
                Some(_) => {}
                None if field.is_required() => {
                    return Err(ShapeError::missing_required(model, field.name()));
                }
                None => {}
            },
            WireLocation::Header => match slot {
                Some(value) if !(field.descriptor().omit_empty && value.is_empty()) => {
                    let text = match value {
                        Value::List(items) => items
                            .iter()
                            .map(|item| wire_string(model, field, item))
                            .collect::<Result<Vec<_>, _>>()?
                            .join(","),
                        scalar => wire_string(model, field, scalar)?,
                    };
                    check_header(model, field.name(), field.wire_name(), &text)?;
                    merge_header(&mut headers, field.wire_name(), text);
                }
                Some(_) => {}
                None if field.is_required() => {
                    return Err(ShapeError::missing_required(model, field.name()));
                }
                None => {}
            },
            WireLocation::Body => {}
        }
    }

    let body = bind_body(request)?;
    match &body {
        Body::Json(_) => merge_header(&mut headers, CONTENT_TYPE, APPLICATION_JSON.to_string()),
        Body::Binary(_) if !has_header(&headers, CONTENT_TYPE) => {
            merge_header(&mut headers, CONTENT_TYPE, APPLICATION_OCTET_STREAM.to_string());
        }
        _ => {}
    }

    for (name, value) in &request.metadata().extra_headers {
        check_header(model, name, name, value)?;
        merge_header(&mut headers, name, value.clone());
    }

    debug!(
        operation = %operation.id,
        method = %operation.method,
        path = %path,
        query = query.len(),
        headers = headers.len(),
        body = !body.is_empty(),
        "bound request"
    );

    Ok(HttpRequestTemplate {
        operation: operation.id.clone(),
        method: operation.method,
        path,
        query,
        headers,
        body,
        retry_policy: request.metadata().retry_policy.clone(),
    })
}

fn bind_body(request: &Request) -> Result<Body, ShapeError> {
    let record = request.record();
    let model = record.model_name();
    let body_fields: Vec<(&CompiledField, Option<&Value>)> = record
        .slots()
        .filter(|(field, _)| field.location() == WireLocation::Body)
        .collect();

    match body_fields.as_slice() {
        [] => Ok(Body::Empty),
        [(field, _)] if *field.field_type() == FieldType::Binary => {
            match &request.metadata().binary_body {
                Some(bytes) => Ok(Body::Binary(bytes.clone())),
                None if field.is_required() => Err(ShapeError::missing_required(model, field.name())),
                None => Ok(Body::Empty),
            }
        }
        [(field, slot)] if field.descriptor().model_ref().is_some() && field.descriptor().is_scalar() => {
            match slot {
                Some(value) => {
                    let json = codec::encode_field(record, field, value)?;
                    Ok(Body::Json(Bytes::from(json.to_string())))
                }
                None if field.is_required() => Err(ShapeError::missing_required(model, field.name())),
                None => Ok(Body::Empty),
            }
        }
        fields => {
            let mut object = serde_json::Map::new();
            for (field, slot) in fields {
                match slot {
                    Some(value) if !(field.enum_set().is_some() && value.is_empty()) => {
                        let json = codec::encode_field(record, field, value)?;
                        object.insert(field.wire_name().to_string(), json);
                    }
                    _ if field.is_required() => {
                        return Err(ShapeError::missing_required(model, field.name()));
                    }
                    _ => {}
                }
            }
            Ok(Body::Json(Bytes::from(serde_json::Value::Object(object).to_string())))
        }
    }
}

fn wire_string(model: &str, field: &CompiledField, value: &Value) -> Result<String, ShapeError> {
    value.to_wire_string().ok_or_else(|| {
        ShapeError::invalid_field(
            model,
            field.name(),
            format!("a {} cannot be placed in the {}", value.kind(), field.location()),
        )
    })
}

/// Rejects header names and values reqwest would refuse at send time.
fn check_header(model: &str, label: &str, name: &str, value: &str) -> Result<(), ShapeError> {
    if HeaderName::from_bytes(name.as_bytes()).is_err() {
        return Err(ShapeError::invalid_field(
            model,
            label,
            format!("{name:?} is not a valid HTTP header name"),
        ));
    }
    if HeaderValue::from_str(value).is_err() {
        return Err(ShapeError::invalid_field(
            model,
            label,
            format!("value of header {name} is not a valid HTTP header value"),
        ));
    }
    Ok(())
}

fn has_header(headers: &[(String, String)], name: &str) -> bool {
    headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
}

fn merge_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use pretty_assertions::assert_eq;
    use shape_define::{
        Catalog, EnumDef, FieldDescriptor, ModelDef, RequestDef, ResponseBody, ResponseDef,
    };

    fn registry() -> Registry {
        Registry::new(
            Catalog::new("t")
                .with_enum(EnumDef::new("Color", ["RED", "BLUE"]))
                .with_model(
                    ModelDef::new("PaintDetails")
                        .field(FieldDescriptor::enumeration("Color", "color", "Color"))
                        .field(FieldDescriptor::string("Note", "note").optional()),
                )
                .with_request(
                    RequestDef::new("PaintRequest")
                        .field(FieldDescriptor::string("WallId", "wallId").in_path())
                        .field(FieldDescriptor::string("Tags", "tag").list().optional().in_query())
                        .field(FieldDescriptor::enumeration("Shade", "shade", "Color").optional().in_query().omit_empty())
                        .field(FieldDescriptor::string("Mode", "mode").optional().in_query())
                        .field(RequestDef::if_match())
                        .field(FieldDescriptor::model("PaintDetails", "paintDetails", "PaintDetails")),
                )
                .with_response(ResponseDef::new("PaintResponse", ResponseBody::Empty))
                .with_operation(Operation::new(
                    "Paint",
                    RestMethod::Put,
                    "/walls/{wallId}/paint",
                    "PaintRequest",
                    "PaintResponse",
                )),
        )
        .unwrap()
    }

    fn request(reg: &Registry) -> Request {
        let details = reg.new_record("PaintDetails").unwrap().with("Color", "red").unwrap();
        Request::new(
            reg.new_record("PaintRequest")
                .unwrap()
                .with("WallId", "north wall/1")
                .unwrap()
                .with("PaintDetails", details)
                .unwrap(),
        )
    }

    #[test]
    fn path_values_are_percent_encoded() {
        let reg = registry();
        let t = bind_request(reg.operation("Paint").unwrap(), &request(&reg)).unwrap();
        assert_eq!(t.path, "/walls/north%20wall%2F1/paint");
    }

    #[test]
    fn single_model_body_field_is_the_whole_body() {
        let reg = registry();
        let t = bind_request(reg.operation("Paint").unwrap(), &request(&reg)).unwrap();
        assert_eq!(t.body.json(), Some(serde_json::json!({"color": "RED"})));
        assert_eq!(t.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn list_query_fields_repeat_their_key() {
        let reg = registry();
        let mut req = request(&reg);
        req.set("Tags", vec!["a", "b"]).unwrap();
        let t = bind_request(reg.operation("Paint").unwrap(), &req).unwrap();
        assert_eq!(t.query_string(), "tag=a&tag=b");
    }

    #[test]
    fn empty_values_follow_omit_empty() {
        let reg = registry();
        let mut req = request(&reg);
        req.set("Shade", "").unwrap();
        req.set("Mode", "").unwrap();
        let t = bind_request(reg.operation("Paint").unwrap(), &req).unwrap();
        assert_eq!(t.query, vec![("mode".to_string(), String::new())]);
    }

    #[test]
    fn extra_headers_win() {
        let reg = registry();
        let mut req = request(&reg).with_header("If-Match", "caller");
        req.set("IfMatch", "etag-1").unwrap();
        let t = bind_request(reg.operation("Paint").unwrap(), &req).unwrap();
        assert_eq!(t.header("if-match"), Some("caller"));
        assert_eq!(t.headers.iter().filter(|(k, _)| k.eq_ignore_ascii_case("if-match")).count(), 1);
    }

    #[test]
    fn empty_path_parameter_is_invalid() {
        let reg = registry();
        let mut req = request(&reg);
        req.set("WallId", "").unwrap();
        let err = bind_request(reg.operation("Paint").unwrap(), &req).unwrap_err();
        assert_eq!(
            err,
            ShapeError::invalid_field("PaintRequest", "WallId", "path parameter must not be empty")
        );
    }

    #[test]
    fn missing_required_body_is_reported() {
        let reg = registry();
        let mut req = request(&reg);
        req.record_mut().unset("PaintDetails");
        let err = bind_request(reg.operation("Paint").unwrap(), &req).unwrap_err();
        assert_eq!(err, ShapeError::missing_required("PaintRequest", "PaintDetails"));
    }

    #[test]
    fn nested_enum_violation_blocks_binding() {
        let reg = registry();
        let mut req = request(&reg);
        let bad = reg.new_record("PaintDetails").unwrap().with("Color", "GREEN").unwrap();
        req.set("PaintDetails", bad).unwrap();
        let err = bind_request(reg.operation("Paint").unwrap(), &req).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported enum value for PaintDetails.Color: GREEN. Supported values are: RED,BLUE"
        );
    }

    #[test]
    fn wrong_request_model_is_rejected() {
        let reg = registry();
        let req = Request::new(reg.new_record("PaintDetails").unwrap());
        let err = bind_request(reg.operation("Paint").unwrap(), &req).unwrap_err();
        assert!(matches!(err, ShapeError::Config(ConfigError::RequestMismatch { .. })));
    }

    #[test]
    fn url_keeps_base_path() {
        let reg = registry();
        let t = bind_request(reg.operation("Paint").unwrap(), &request(&reg)).unwrap();
        let base = Url::parse("https://iaas.example.com/20160918/").unwrap();
        assert_eq!(
            t.url(&base).unwrap().as_str(),
            "https://iaas.example.com/20160918/walls/north%20wall%2F1/paint"
        );
    }

    #[test]
    fn control_characters_in_header_fields_are_invalid() {
        let reg = registry();
        let mut req = request(&reg);
        req.set("IfMatch", "etag\r\nx-injected: 1").unwrap();
        let err = bind_request(reg.operation("Paint").unwrap(), &req).unwrap_err();
        assert_eq!(
            err,
            ShapeError::invalid_field(
                "PaintRequest",
                "IfMatch",
                "value of header if-match is not a valid HTTP header value"
            )
        );
    }

    #[test]
    fn malformed_extra_headers_are_invalid() {
        let reg = registry();
        let bad_value = request(&reg).with_header("x-trace", "a\u{7f}b");
        let err = bind_request(reg.operation("Paint").unwrap(), &bad_value).unwrap_err();
        assert!(matches!(err, ShapeError::InvalidField { ref field, .. } if field == "x-trace"));

        let bad_name = request(&reg).with_header("bad header", "v");
        let err = bind_request(reg.operation("Paint").unwrap(), &bad_name).unwrap_err();
        assert_eq!(
            err,
            ShapeError::invalid_field(
                "PaintRequest",
                "bad header",
                "\"bad header\" is not a valid HTTP header name"
            )
        );
    }
}
