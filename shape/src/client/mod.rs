//! Bound operations.
//!
//! A [`Client`] ties a [`Registry`] to a [`Transport`]: it looks up the
//! operation, binds the request, sends it and binds the reply. List
//! operations are walked with [`Client::paginate`].

mod cancel;
mod executor;
mod request;

use std::sync::Arc;

use shape_define::WireLocation;
use tracing::instrument;

pub use cancel::Cancellation;
pub use executor::{BASE_URL_ENV, ReqwestTransport, ReqwestTransportBuilder, TIMEOUT_ENV};
pub use request::{Request, RequestMetadata, RetryPolicy};

use crate::binder::{Response, bind_request, bind_response};
use crate::error::{ConfigError, ShapeError};
use crate::paginator::Paginator;
use crate::record::Record;
use crate::registry::Registry;
use crate::transport::Transport;

/// Wire name of the continuation-token query parameter.
pub const PAGE_PARAM: &str = "page";

/// Executes operations of a registry over a transport.
///
/// ## Examples
///
/// ```
/// use shape::{Client, Registry};
/// use shape::binder::{HttpRequestTemplate, RawResponse};
/// use shape::transport::FnTransport;
/// use serde_json::json;
///
/// # tokio_test(async {
/// let registry = Registry::new(shape_definitions::core_catalog()).unwrap();
/// let transport = FnTransport::new(|request: HttpRequestTemplate| async move {
///     assert_eq!(request.path, "/natGateways/ng1");
///     Ok(RawResponse::json(200, &json!({
///         "id": "ng1",
///         "compartmentId": "c1",
///         "vcnId": "v1",
///         "lifecycleState": "AVAILABLE",
///         "isBlockTraffic": false,
///         "natIp": "203.0.113.9",
///         "timeCreated": "2024-05-01T10:00:00Z",
///     })).with_header("etag", "e-1"))
/// });
/// let client = Client::new(registry, transport);
///
/// let request = client.request("GetNatGateway").unwrap().with("NatGatewayId", "ng1").unwrap();
/// let response = client.call("GetNatGateway", &request).await.unwrap();
/// assert_eq!(response.etag(), Some("e-1"));
/// assert_eq!(response.record().unwrap().get_str("LifecycleState"), Some("AVAILABLE"));
/// # });
/// # fn tokio_test<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client<T> {
    registry: Arc<Registry>,
    transport: T,
    retry_policy: Option<RetryPolicy>,
}

impl<T: Transport> Client<T> {
    /// Creates a client.
    pub fn new(registry: impl Into<Arc<Registry>>, transport: T) -> Self {
        Self {
            registry: registry.into(),
            transport,
            retry_policy: None,
        }
    }

    /// Sets a client-wide retry-policy handle, used when a request carries none.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// The registry operations are resolved against.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// The transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Creates an empty request for an operation.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnknownOperation`] for unknown ids.
    pub fn request(&self, operation_id: &str) -> Result<Request, ConfigError> {
        let operation = self.registry.operation(operation_id)?;
        let model = self.registry.request(&operation.request)?;
        Ok(Request::new(Record::new(Arc::clone(model))))
    }

    /// Binds a request without sending it.
    pub fn bind(
        &self,
        operation_id: &str,
        request: &Request,
    ) -> Result<crate::binder::HttpRequestTemplate, ShapeError> {
        let operation = self.registry.operation(operation_id)?;
        let mut template = bind_request(operation, request)?;
        if template.retry_policy.is_none() {
            template.retry_policy = self.retry_policy.clone();
        }
        Ok(template)
    }

    /// Validates, binds, sends and decodes one call.
    ///
    /// ## Errors
    ///
    /// Validation errors are returned before the transport is called.
    /// Transport, service and decode errors are returned as they occur.
    #[instrument(name = "shape_call", skip(self, request))]
    pub async fn call(&self, operation_id: &str, request: &Request) -> Result<Response, ShapeError> {
        let template = self.bind(operation_id, request)?;
        let operation = self.registry.operation(operation_id)?;
        let raw = self.transport.send(template).await?;
        bind_response(&self.registry, operation, raw)
    }

    /// Iterates every item of a list operation, page by page.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::NotPaginated`] when the operation's response is
    /// not a list or its request has no `page` query parameter.
    pub fn paginate(&self, operation_id: &str, request: Request) -> Result<Paginator<'_, T>, ShapeError> {
        let operation = self.registry.operation(operation_id)?;
        let response = self.registry.response(&operation.response)?;
        let model = self.registry.request(&operation.request)?;

        let page_field = model
            .index_of_wire(PAGE_PARAM)
            .and_then(|idx| model.field(idx))
            .filter(|field| field.location() == WireLocation::Query);

        match page_field {
            Some(field) if response.body.is_list() => Ok(Paginator::new(
                self,
                operation.id.clone(),
                field.name().to_string(),
                request,
            )),
            _ => Err(ConfigError::NotPaginated {
                operation: operation.id.clone(),
            }
            .into()),
        }
    }

    /// Collects every item of a list operation.
    pub async fn list_all(&self, operation_id: &str, request: Request) -> Result<Vec<Record>, ShapeError> {
        let mut pages = self.paginate(operation_id, request)?;
        let mut items = Vec::new();
        while let Some((_, item)) = pages.next().await? {
            items.push(item);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::{HttpRequestTemplate, RawResponse};
    use crate::error::TransportError;
    use crate::transport::FnTransport;
    use serde_json::json;
    use shape_define::{
        Catalog, FieldDescriptor, ListTemplate, ModelDef, Operation, RequestDef, ResponseBody,
        ResponseDef, RestMethod,
    };
    use std::sync::Mutex;

    fn registry() -> Registry {
        Registry::new(
            Catalog::new("t")
                .with_model(ModelDef::new("Item").field(FieldDescriptor::string("Id", "id")))
                .with_list(ListTemplate::new("ListItems", "/items", "Item"))
                .with_request(RequestDef::new("GetItemRequest").field(
                    FieldDescriptor::string("ItemId", "itemId").in_path(),
                ))
                .with_response(ResponseDef::new(
                    "GetItemResponse",
                    ResponseBody::Record("Item".into()),
                ))
                .with_operation(Operation::new(
                    "GetItem",
                    RestMethod::Get,
                    "/items/{itemId}",
                    "GetItemRequest",
                    "GetItemResponse",
                )),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn validation_errors_skip_the_transport() {
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        let transport = FnTransport::new(move |_: HttpRequestTemplate| {
            *counter.lock().unwrap() += 1;
            async { Ok(RawResponse::json(200, &json!({"id": "x"}))) }
        });
        let client = Client::new(registry(), transport);

        let request = client.request("GetItem").unwrap();
        let err = client.call("GetItem", &request).await.unwrap_err();
        assert_eq!(err, ShapeError::missing_required("GetItemRequest", "ItemId"));
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let transport = FnTransport::new(|_: HttpRequestTemplate| async {
            Err(TransportError::Connection("refused".into()))
        });
        let client = Client::new(registry(), transport);
        let request = client.request("GetItem").unwrap().with("ItemId", "i1").unwrap();
        let err = client.call("GetItem", &request).await.unwrap_err();
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn request_policy_wins_over_client_policy() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let transport = FnTransport::new(move |template: HttpRequestTemplate| {
            let label = template
                .retry_policy
                .as_ref()
                .and_then(|p| p.downcast_ref::<&'static str>())
                .copied();
            *sink.lock().unwrap() = label;
            async { Ok(RawResponse::json(200, &json!({"id": "x"}))) }
        });
        let client = Client::new(registry(), transport).with_retry_policy(RetryPolicy::new("client"));

        let request = client.request("GetItem").unwrap().with("ItemId", "i1").unwrap();
        client.call("GetItem", &request).await.unwrap();
        assert_eq!(*seen.lock().unwrap(), Some("client"));

        let request = request.with_retry_policy(RetryPolicy::new("request"));
        client.call("GetItem", &request).await.unwrap();
        assert_eq!(*seen.lock().unwrap(), Some("request"));
    }

    #[test]
    fn only_list_operations_paginate() {
        let transport = FnTransport::new(|_: HttpRequestTemplate| async {
            Ok(RawResponse::new(200))
        });
        let client = Client::new(registry(), transport);

        let request = client.request("GetItem").unwrap();
        let err = client.paginate("GetItem", request).err().unwrap();
        assert_eq!(
            err,
            ShapeError::Config(ConfigError::NotPaginated {
                operation: "GetItem".into()
            })
        );

        let request = client.request("ListItems").unwrap();
        assert!(client.paginate("ListItems", request).is_ok());
    }

    #[test]
    fn unknown_operation() {
        let transport = FnTransport::new(|_: HttpRequestTemplate| async {
            Ok(RawResponse::new(200))
        });
        let client = Client::new(registry(), transport);
        assert!(matches!(
            client.request("Nope"),
            Err(ConfigError::UnknownOperation { .. })
        ));
    }
}
