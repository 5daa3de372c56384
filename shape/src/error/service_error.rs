//! Errors returned by the service itself.

use serde::Deserialize;
use thiserror::Error;

/// A non-2xx reply, decoded from the service's `{ "code", "message" }` body.
///
/// The `opc-request-id` of the reply is kept even on failure so the call can
/// be traced on the service side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed with HTTP {status} ({code}): {message}{}", request_id_suffix(.opc_request_id))]
pub struct ServiceError {
    /// HTTP status code.
    pub status: u16,
    /// Service error code (e.g. `NotAuthorizedOrNotFound`).
    pub code: String,
    /// Service error message.
    pub message: String,
    /// Operation id of the failed call.
    pub operation: String,
    /// Correlation id from the `opc-request-id` response header.
    pub opc_request_id: Option<String>,
}

fn request_id_suffix(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(" [opc-request-id: {id}]"),
        None => String::new(),
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl ServiceError {
    /// Builds a service error from a raw reply body.
    ///
    /// Bodies that are not the `{ "code", "message" }` shape fall back to the
    /// raw text as message.
    pub fn from_body(
        operation: impl Into<String>,
        status: u16,
        body: &[u8],
        opc_request_id: Option<String>,
    ) -> Self {
        let (code, message) = match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => (parsed.code, parsed.message),
            Err(_) => (String::new(), String::from_utf8_lossy(body).trim().to_string()),
        };
        Self {
            status,
            code,
            message,
            operation: operation.into(),
            opc_request_id,
        }
    }

    /// Returns `true` for rate limiting and server-side failures.
    pub fn is_retryable(&self) -> bool {
        self.status >= 500 || self.status == 429
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_error_body() {
        let err = ServiceError::from_body(
            "GetInstancePool",
            404,
            br#"{"code":"NotAuthorizedOrNotFound","message":"not found"}"#,
            Some("r-9".into()),
        );
        assert_eq!(err.code, "NotAuthorizedOrNotFound");
        assert_eq!(
            err.to_string(),
            "GetInstancePool failed with HTTP 404 (NotAuthorizedOrNotFound): not found [opc-request-id: r-9]"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_non_json_body_falls_back_to_text() {
        let err = ServiceError::from_body("ListVcns", 502, b"Bad Gateway\n", None);
        assert_eq!(err.code, "");
        assert_eq!(err.message, "Bad Gateway");
        assert!(err.is_retryable());
    }
}
