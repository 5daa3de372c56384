//! Paginated list operation templates.
//!
//! Every list operation shares the same envelope: `limit` and `page` query
//! parameters, an `opc-request-id` header, optional `sortBy`/`sortOrder`
//! parameters, and a response carrying `opc-next-page`. A [`ListTemplate`]
//! writes that envelope once and varies only the item model, the sort keys,
//! the scope parameters and the filters.
//!
//! [`ListTemplate::expand`] turns a template into concrete definitions:
//!
//! | Generated | Name |
//! |---|---|
//! | sort-by enum | `<Id>SortBy` |
//! | sort-order enum | `<Id>SortOrder` (`ASC`, `DESC`) |
//! | request | `<Id>Request` |
//! | response | `<Id>Response` |
//! | operation | `<Id>` (`GET <path>`) |

use serde::{Deserialize, Serialize};

use crate::enums::EnumDef;
use crate::field::FieldDescriptor;
use crate::request::RequestDef;
use crate::response::{HeaderField, ResponseBody, ResponseDef};
use crate::types::{Operation, RestMethod};

/// Wire name of the wrapper field holding items in a collection body.
pub const DEFAULT_ITEMS_FIELD: &str = "items";

/// A single descriptor entry generating a whole list operation.
///
/// The generated request lays out its fields as: scope fields, `limit`,
/// `page`, `opc-request-id`, `sortBy`, `sortOrder`, filters. A template
/// without sort keys generates neither sort field nor sort enums.
///
/// ## Examples
///
/// ```
/// use shape_define::{ListTemplate, FieldDescriptor};
///
/// let template = ListTemplate::new("ListVcns", "/vcns", "Vcn")
///     .sort_by(["TIMECREATED", "DISPLAYNAME"])
///     .scope(FieldDescriptor::string("CompartmentId", "compartmentId").in_query())
///     .filter(FieldDescriptor::string("DisplayName", "displayName").optional().in_query());
///
/// let expanded = template.expand();
/// assert_eq!(expanded.request.name, "ListVcnsRequest");
/// assert_eq!(expanded.enums[0].name, "ListVcnsSortBy");
/// assert_eq!(expanded.enums[1].values, vec!["ASC", "DESC"]);
///
/// let wires: Vec<_> = expanded.request.fields.iter().map(|f| f.wire_name.as_str()).collect();
/// assert_eq!(
///     wires,
///     vec!["compartmentId", "limit", "page", "opc-request-id", "sortBy", "sortOrder", "displayName"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTemplate {
    /// Operation id (e.g. `ListBootVolumeReplicas`).
    pub id: String,
    /// Path template.
    pub path: String,
    /// Item model name.
    pub item: String,
    /// Wrapper model, when the body is a collection object rather than a bare array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    /// Canonical values of the `sortBy` parameter.
    #[serde(default)]
    pub sort_by: Vec<String>,
    /// Path and query fields placed before the paging parameters.
    #[serde(default)]
    pub scope: Vec<FieldDescriptor>,
    /// Query fields placed after the sort parameters.
    #[serde(default)]
    pub filters: Vec<FieldDescriptor>,
    /// Whether the response carries `opc-total-items`.
    #[serde(default)]
    pub total_items: bool,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Concrete definitions generated from a [`ListTemplate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListExpansion {
    /// Sort-by and sort-order enums (empty when the template has no sort keys).
    pub enums: Vec<EnumDef>,
    /// The list request.
    pub request: RequestDef,
    /// The list response.
    pub response: ResponseDef,
    /// The `GET` operation.
    pub operation: Operation,
}

impl ListTemplate {
    /// Creates a template returning a bare JSON array of `item`.
    pub fn new(id: impl Into<String>, path: impl Into<String>, item: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            item: item.into(),
            collection: None,
            sort_by: vec![],
            scope: vec![],
            filters: vec![],
            total_items: false,
            description: String::new(),
        }
    }

    /// Returns items wrapped in the `items` field of `model`.
    pub fn in_collection(mut self, model: impl Into<String>) -> Self {
        self.collection = Some(model.into());
        self
    }

    /// Sets the canonical `sortBy` values.
    pub fn sort_by<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sort_by = values.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a scope field.
    pub fn scope(mut self, field: FieldDescriptor) -> Self {
        self.scope.push(field);
        self
    }

    /// Appends a filter field.
    pub fn filter(mut self, field: FieldDescriptor) -> Self {
        self.filters.push(field);
        self
    }

    /// Lifts `opc-total-items` into the response.
    pub fn with_total_items(mut self) -> Self {
        self.total_items = true;
        self
    }

    /// Adds a description to the generated operation.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Name of the generated sort-by enum.
    pub fn sort_by_enum(&self) -> String {
        format!("{}SortBy", self.id)
    }

    /// Name of the generated sort-order enum.
    pub fn sort_order_enum(&self) -> String {
        format!("{}SortOrder", self.id)
    }

    /// Name of the generated request.
    pub fn request_name(&self) -> String {
        format!("{}Request", self.id)
    }

    /// Name of the generated response.
    pub fn response_name(&self) -> String {
        format!("{}Response", self.id)
    }

    /// Generates the concrete enums, request, response and operation.
    pub fn expand(&self) -> ListExpansion {
        let sorted = !self.sort_by.is_empty();

        let mut enums = Vec::new();
        if sorted {
            enums.push(EnumDef::new(self.sort_by_enum(), self.sort_by.iter().cloned()));
            enums.push(EnumDef::sort_order(self.sort_order_enum()));
        }

        let mut request = RequestDef::new(self.request_name());
        request.fields.extend(self.scope.iter().cloned());
        request.fields.push(
            FieldDescriptor::integer("Limit", "limit")
                .optional()
                .in_query()
                .omit_empty()
                .with_description("Maximum number of items per page"),
        );
        request.fields.push(
            FieldDescriptor::string("Page", "page")
                .optional()
                .in_query()
                .omit_empty()
                .with_description("Continuation token from a previous opc-next-page header"),
        );
        request.fields.push(RequestDef::opc_request_id());
        if sorted {
            request.fields.push(
                FieldDescriptor::enumeration("SortBy", "sortBy", self.sort_by_enum())
                    .optional()
                    .in_query()
                    .omit_empty(),
            );
            request.fields.push(
                FieldDescriptor::enumeration("SortOrder", "sortOrder", self.sort_order_enum())
                    .optional()
                    .in_query()
                    .omit_empty(),
            );
        }
        request.fields.extend(self.filters.iter().cloned());

        let body = match &self.collection {
            Some(model) => ResponseBody::collection(model, DEFAULT_ITEMS_FIELD, &self.item),
            None => ResponseBody::List(self.item.clone()),
        };
        let mut response = ResponseDef::new(self.response_name(), body)
            .header(HeaderField::next_page())
            .header(HeaderField::request_id());
        if self.total_items {
            response = response.header(HeaderField::total_items());
        }

        let operation = Operation::new(
            &self.id,
            RestMethod::Get,
            &self.path,
            self.request_name(),
            self.response_name(),
        )
        .with_description(self.description.clone());

        ListExpansion {
            enums,
            request,
            response,
            operation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::WireLocation;

    #[test]
    fn unsorted_template_has_no_sort_fields() {
        let expanded = ListTemplate::new("ListRoutes", "/routes", "Route").expand();
        assert!(expanded.enums.is_empty());
        assert!(expanded.request.fields.iter().all(|f| f.wire_name != "sortBy"));
    }

    #[test]
    fn collection_template_wraps_items() {
        let expanded = ListTemplate::new("ListByoasns", "/byoasns", "ByoasnSummary")
            .in_collection("ByoasnCollection")
            .expand();
        assert_eq!(
            expanded.response.body,
            ResponseBody::collection("ByoasnCollection", "items", "ByoasnSummary")
        );
    }

    #[test]
    fn total_items_header_is_opt_in() {
        let plain = ListTemplate::new("L", "/l", "I").expand();
        assert!(plain.response.find_header("OpcTotalItems").is_none());

        let counted = ListTemplate::new("L", "/l", "I").with_total_items().expand();
        assert!(counted.response.find_header("OpcTotalItems").is_some());
    }

    #[test]
    fn paging_fields_are_optional_query_fields() {
        let expanded = ListTemplate::new("L", "/l", "I").expand();
        for wire in ["limit", "page"] {
            let field = expanded
                .request
                .fields
                .iter()
                .find(|f| f.wire_name == wire)
                .unwrap();
            assert!(!field.required);
            assert_eq!(field.location, WireLocation::Query);
        }
    }

    #[test]
    fn operation_is_get() {
        let expanded = ListTemplate::new("ListVcns", "/vcns", "Vcn").expand();
        assert_eq!(expanded.operation.method, RestMethod::Get);
        assert_eq!(expanded.operation.request, "ListVcnsRequest");
        assert_eq!(expanded.operation.response, "ListVcnsResponse");
    }
}
