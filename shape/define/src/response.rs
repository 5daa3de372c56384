//! Response model definitions.
//!
//! A [`ResponseDef`] says how to decode a reply: the shape of the body
//! ([`ResponseBody`]) and which response headers are lifted into named
//! fields ([`HeaderField`]).

use serde::{Deserialize, Serialize};

use crate::field::FieldType;

/// Header carrying the continuation token of a list operation.
pub const OPC_NEXT_PAGE: &str = "opc-next-page";
/// Header carrying the total number of items of a list operation.
pub const OPC_TOTAL_ITEMS: &str = "opc-total-items";
/// Header carrying the entity tag of a resource.
pub const ETAG: &str = "etag";

/// The shape of a response body.
///
/// ## Examples
///
/// ```
/// use shape_define::ResponseBody;
///
/// let list = ResponseBody::List("Vcn".into());
/// assert_eq!(list.item_model(), Some("Vcn"));
/// assert!(list.is_list());
///
/// let wrapped = ResponseBody::collection("ByoipRangeCollection", "items", "ByoipRangeSummary");
/// assert_eq!(wrapped.item_model(), Some("ByoipRangeSummary"));
/// assert!(wrapped.is_list());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseBody {
    /// A single record of the named model or union.
    Record(String),
    /// A JSON array of the named item model.
    List(String),
    /// A wrapper record whose `items_field` holds the item list.
    Collection {
        /// Model of the wrapper record.
        model: String,
        /// Wire name of the list field inside the wrapper.
        items_field: String,
        /// Model of the items.
        item: String,
    },
    /// No body.
    Empty,
}

impl ResponseBody {
    /// Creates a collection body.
    pub fn collection(
        model: impl Into<String>,
        items_field: impl Into<String>,
        item: impl Into<String>,
    ) -> Self {
        Self::Collection {
            model: model.into(),
            items_field: items_field.into(),
            item: item.into(),
        }
    }

    /// Model of the items of a list-like body.
    pub fn item_model(&self) -> Option<&str> {
        match self {
            Self::List(item) | Self::Collection { item, .. } => Some(item),
            Self::Record(_) | Self::Empty => None,
        }
    }

    /// Returns true for plain and wrapped lists.
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_) | Self::Collection { .. })
    }

    /// Returns true if this is an empty body.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A response header lifted into a named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderField {
    /// Field name on the decoded response (e.g. `OpcNextPage`).
    pub name: String,
    /// Header name, matched case-insensitively.
    pub header: String,
    /// Either [`FieldType::String`] or [`FieldType::Integer`].
    #[serde(rename = "type", default = "default_header_type")]
    pub field_type: FieldType,
}

fn default_header_type() -> FieldType {
    FieldType::String
}

impl HeaderField {
    /// Creates a string-valued header field.
    pub fn new(name: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            header: header.into(),
            field_type: FieldType::String,
        }
    }

    /// The `opc-next-page` continuation token.
    pub fn next_page() -> Self {
        Self::new("OpcNextPage", OPC_NEXT_PAGE)
    }

    /// The `opc-request-id` correlation id.
    pub fn request_id() -> Self {
        Self::new("OpcRequestId", crate::request::OPC_REQUEST_ID)
    }

    /// The `opc-total-items` count.
    pub fn total_items() -> Self {
        Self {
            field_type: FieldType::Integer,
            ..Self::new("OpcTotalItems", OPC_TOTAL_ITEMS)
        }
    }

    /// The `etag` entity tag.
    pub fn etag() -> Self {
        Self::new("Etag", ETAG)
    }
}

/// Describes how to decode the reply of one operation.
///
/// ## Examples
///
/// ```
/// use shape_define::{ResponseDef, ResponseBody, HeaderField};
///
/// let resp = ResponseDef::new("GetInstancePoolResponse", ResponseBody::Record("InstancePool".into()))
///     .header(HeaderField::etag())
///     .header(HeaderField::request_id());
///
/// assert_eq!(resp.headers.len(), 2);
/// assert!(resp.find_header("OpcRequestId").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseDef {
    /// Unique response model name.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Body shape.
    pub body: ResponseBody,
    /// Headers lifted into named fields, in declaration order.
    #[serde(default)]
    pub headers: Vec<HeaderField>,
}

impl ResponseDef {
    /// Creates a response with no lifted headers.
    pub fn new(name: impl Into<String>, body: ResponseBody) -> Self {
        Self {
            name: name.into(),
            description: None,
            body,
            headers: vec![],
        }
    }

    /// Appends a lifted header.
    pub fn header(mut self, header: HeaderField) -> Self {
        self.headers.push(header);
        self
    }

    /// Adds a description to the response.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Finds a lifted header by its field name.
    pub fn find_header(&self, name: &str) -> Option<&HeaderField> {
        self.headers.iter().find(|h| h.name == name)
    }
}
