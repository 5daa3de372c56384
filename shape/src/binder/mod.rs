//! Request and response binders.
//!
//! - [`bind_request`] turns a request record into an [`HttpRequestTemplate`]
//!   without any I/O.
//! - [`bind_response`] turns a [`RawResponse`] into a typed [`Response`].

mod request;
mod response;

pub use request::{Body, HttpRequestTemplate, bind_request};
pub use response::{RawResponse, Response, bind_response};
