//! The transport collaborator.
//!
//! Binding and decoding never touch the network. A [`Transport`] is the one
//! seam where a bound [`HttpRequestTemplate`] becomes a [`RawResponse`]:
//! [`ReqwestTransport`](crate::client::ReqwestTransport) in production,
//! [`FnTransport`] wrapping a closure in tests.

use std::future::Future;
use std::sync::Arc;

use crate::binder::{HttpRequestTemplate, RawResponse};
use crate::error::TransportError;

/// Sends one bound request and returns the raw reply.
///
/// Non-2xx replies are not errors at this level; a transport returns them
/// as-is so the Response Binder can decode the service error.
pub trait Transport: Send + Sync {
    /// Performs the exchange.
    fn send(
        &self,
        request: HttpRequestTemplate,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(
        &self,
        request: HttpRequestTemplate,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

impl<T: Transport> Transport for &T {
    fn send(
        &self,
        request: HttpRequestTemplate,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        (**self).send(request)
    }
}

/// A transport backed by a closure.
///
/// ## Examples
///
/// ```
/// use shape::binder::{HttpRequestTemplate, RawResponse};
/// use shape::error::TransportError;
/// use shape::transport::FnTransport;
/// use serde_json::json;
///
/// let transport = FnTransport::new(|request: HttpRequestTemplate| async move {
///     assert_eq!(request.path, "/vcns");
///     Ok::<_, TransportError>(RawResponse::json(200, &json!([])))
/// });
/// # let _ = transport;
/// ```
#[derive(Debug, Clone)]
pub struct FnTransport<F>(F);

impl<F> FnTransport<F> {
    /// Wraps a closure.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F, Fut> Transport for FnTransport<F>
where
    F: Fn(HttpRequestTemplate) -> Fut + Send + Sync,
    Fut: Future<Output = Result<RawResponse, TransportError>> + Send,
{
    fn send(
        &self,
        request: HttpRequestTemplate,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        (self.0)(request)
    }
}
