//! HTTP transport over reqwest with tracing instrumentation.
//!
//! [`ReqwestTransport`] turns a bound [`HttpRequestTemplate`] into a real
//! HTTP exchange against a service endpoint. Replies are returned raw,
//! whatever their status, so the Response Binder sees `opc-request-id` on
//! failures too.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use shape_define::RestMethod;
use tracing::{Span, instrument};
use url::Url;

use super::cancel::Cancellation;
use crate::binder::{Body, HttpRequestTemplate, RawResponse};
use crate::error::{ConfigError, TransportError};
use crate::transport::Transport;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the service endpoint.
pub const BASE_URL_ENV: &str = "SHAPE_BASE_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "SHAPE_TIMEOUT_SECS";

/// Builder for configuring a [`ReqwestTransport`].
#[derive(Debug)]
pub struct ReqwestTransportBuilder {
    base_url: Url,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl ReqwestTransportBuilder {
    fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_headers: HeaderMap::new(),
        }
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a header sent on every request.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the name or value is not valid HTTP.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ConfigError> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::InvalidHeader(format!("invalid header value: {e}")))?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Builds the transport.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::Client`] if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ReqwestTransport, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(self.default_headers)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(ReqwestTransport {
            client,
            base_url: self.base_url,
            timeout: self.timeout,
        })
    }
}

/// Async HTTP transport with connection pooling.
///
/// A [`Cancellation`] wrapped in the request's retry-policy handle aborts
/// the exchange with [`TransportError::Cancelled`].
///
/// ## Examples
///
/// ```rust,ignore
/// use shape::{Client, Registry};
/// use shape::client::ReqwestTransport;
///
/// let transport = ReqwestTransport::from_env()?;
/// let client = Client::new(Registry::new(shape_definitions::core_catalog())?, transport);
/// let vcns = client.list_all("ListVcns", request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a new builder.
    pub fn builder(base_url: Url) -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::new(base_url)
    }

    /// Creates a transport with default settings.
    pub fn new(base_url: Url) -> Result<Self, ConfigError> {
        Self::builder(base_url).build()
    }

    /// Creates a transport from `SHAPE_BASE_URL` and `SHAPE_TIMEOUT_SECS`.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::MissingEnv`] when `SHAPE_BASE_URL` is not set
    /// - [`ConfigError::InvalidUrl`] when it does not parse
    /// - [`ConfigError::InvalidEnv`] when the timeout is not a whole number of seconds
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = std::env::var(BASE_URL_ENV).map_err(|_| ConfigError::MissingEnv {
            var: BASE_URL_ENV,
        })?;
        let mut builder = Self::builder(Url::parse(&base)?);

        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                var: TIMEOUT_ENV,
                value: raw.clone(),
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Returns the base URL requests are sent under.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[instrument(
        name = "shape_http",
        skip(self, request),
        fields(
            operation = %request.operation,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    async fn execute(&self, request: HttpRequestTemplate) -> Result<RawResponse, TransportError> {
        Span::current().record("http.method", request.method.to_string().as_str());
        let url = request
            .url(&self.base_url)
            .map_err(|e| TransportError::Request(format!("invalid URL: {e}")))?;
        Span::current().record("http.url", url.as_str());

        let cancel = request
            .retry_policy
            .as_ref()
            .and_then(|policy| policy.downcast_ref::<Cancellation>())
            .cloned();
        if cancel.as_ref().is_some_and(Cancellation::is_cancelled) {
            return Err(TransportError::Cancelled);
        }

        let mut builder = self.client.request(to_reqwest(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.body {
            Body::Empty => builder,
            Body::Json(bytes) | Body::Binary(bytes) => builder.body(bytes.clone()),
        };

        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        let exchange = async {
            let response = builder
                .send()
                .await
                .map_err(|e| TransportError::from_reqwest(&e, timeout_ms))?;

            let status = response.status().as_u16();
            Span::current().record("http.status_code", status);

            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();
            let body = response
                .bytes()
                .await
                .map_err(|e| TransportError::from_reqwest(&e, timeout_ms))?;

            Ok(RawResponse {
                status,
                headers,
                body,
            })
        };

        match cancel {
            Some(cancel) => {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => Err(TransportError::Cancelled),
                    result = exchange => result,
                }
            }
            None => exchange.await,
        }
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: HttpRequestTemplate,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send {
        self.execute(request)
    }
}

fn to_reqwest(method: RestMethod) -> reqwest::Method {
    match method {
        RestMethod::Get => reqwest::Method::GET,
        RestMethod::Post => reqwest::Method::POST,
        RestMethod::Put => reqwest::Method::PUT,
        RestMethod::Patch => reqwest::Method::PATCH,
        RestMethod::Delete => reqwest::Method::DELETE,
        RestMethod::Head => reqwest::Method::HEAD,
    }
}
