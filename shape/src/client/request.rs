//! Request records plus the metadata that travels beside them.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

use crate::error::ShapeError;
use crate::record::Record;
use crate::value::Value;

/// An opaque handle threaded from the caller to the transport.
///
/// The core never inspects the handle; transports recognize the types they
/// support through [`RetryPolicy::downcast_ref`].
///
/// ## Examples
///
/// ```
/// use shape::client::{Cancellation, RetryPolicy};
///
/// let cancel = Cancellation::new();
/// let policy = RetryPolicy::new(cancel.clone());
///
/// cancel.cancel();
/// assert!(policy.downcast_ref::<Cancellation>().unwrap().is_cancelled());
/// assert!(policy.downcast_ref::<String>().is_none());
/// ```
#[derive(Clone)]
pub struct RetryPolicy(Arc<dyn Any + Send + Sync>);

impl RetryPolicy {
    /// Wraps any value as a retry-policy handle.
    pub fn new<P: Any + Send + Sync>(policy: P) -> Self {
        Self(Arc::new(policy))
    }

    /// Borrows the wrapped value if it is a `P`.
    pub fn downcast_ref<P: Any>(&self) -> Option<&P> {
        self.0.downcast_ref::<P>()
    }

    /// Returns true if both handles wrap the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RetryPolicy(..)")
    }
}

/// Per-call data that is not part of the request model.
#[derive(Debug, Clone, Default)]
pub struct RequestMetadata {
    /// Handle passed through to the transport untouched.
    pub retry_policy: Option<RetryPolicy>,
    /// Bytes for a request whose body field is binary.
    pub binary_body: Option<Bytes>,
    /// Headers added after the model's header fields; they win on conflict.
    pub extra_headers: Vec<(String, String)>,
}

/// A request record ready to be bound to its operation.
///
/// ## Examples
///
/// ```
/// use shape::Registry;
/// use shape::client::Request;
///
/// let registry = Registry::new(shape_definitions::core_catalog()).unwrap();
/// let mut request = Request::new(registry.new_record("ListVcnsRequest").unwrap())
///     .with_header("x-trace", "1");
/// request.set("CompartmentId", "ocid1.compartment").unwrap();
///
/// assert_eq!(request.record().get_str("CompartmentId"), Some("ocid1.compartment"));
/// assert_eq!(request.metadata().extra_headers.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    record: Record,
    metadata: RequestMetadata,
}

impl Request {
    /// Wraps a request record with empty metadata.
    pub fn new(record: Record) -> Self {
        Self {
            record,
            metadata: RequestMetadata::default(),
        }
    }

    /// Attaches a retry-policy handle.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.metadata.retry_policy = Some(policy);
        self
    }

    /// Attaches the bytes of a binary body.
    pub fn with_binary_body(mut self, body: impl Into<Bytes>) -> Self {
        self.metadata.binary_body = Some(body.into());
        self
    }

    /// Adds an extra header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.extra_headers.push((name.into(), value.into()));
        self
    }

    /// The request record.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Mutable access to the request record.
    pub fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    /// Takes the request record.
    pub fn into_record(self) -> Record {
        self.record
    }

    /// Per-call metadata.
    pub fn metadata(&self) -> &RequestMetadata {
        &self.metadata
    }

    /// Sets a field of the request record.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self, ShapeError> {
        self.record.set(name, value)?;
        Ok(self)
    }

    /// Sets a field, consuming and returning the request.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self, ShapeError> {
        self.record.set(name, value)?;
        Ok(self)
    }
}

impl From<Record> for Request {
    fn from(record: Record) -> Self {
        Self::new(record)
    }
}
