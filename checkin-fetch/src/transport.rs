//! Request transport.
//!
//! A [`Transport`] sends exactly one request and reports what happened.
//! Retrying is the job of [`crate::client::HttpClient`], so transports stay
//! trivial to replace in tests.

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::{FetchError, NetworkErrorKind};
use crate::request::{HttpRequest, HttpResponse, Method, RequestBody};

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fallback user agent; site requests carry their own.
const USER_AGENT: &str = concat!("checkin/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Transport Trait
// ============================================================================

/// Sends one request without retrying.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response, whatever its status.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError>;
}

// ============================================================================
// Reqwest Transport
// ============================================================================

/// Transport backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the default timeout.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::InvalidRequest(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { inner: client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, host = %request.origin()))]
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut builder = match request.method {
            Method::Get => self.inner.get(&request.url),
            Method::Post => self.inner.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match &request.body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(pairs) => builder.form(pairs),
        };

        let response = builder.send().await.map_err(into_fetch_error)?;
        let status = response.status().as_u16();
        debug!(status, "Response received");

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.bytes().await.map_err(into_fetch_error)?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

// ============================================================================
// Error Classification
// ============================================================================

/// Converts a reqwest error, dropping the URL it carries.
fn into_fetch_error(err: reqwest::Error) -> FetchError {
    if err.is_builder() {
        return FetchError::InvalidRequest(err.without_url().to_string());
    }
    let kind = classify(&err);
    FetchError::network(kind, err.without_url().to_string())
}

/// Walks the source chain of a reqwest error looking for a known cause.
fn classify(err: &reqwest::Error) -> NetworkErrorKind {
    if err.is_timeout() {
        return NetworkErrorKind::Timeout;
    }

    let mut source: Option<&(dyn std::error::Error + 'static)> = std::error::Error::source(err);
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if let Some(kind) = classify_io_kind(io_err.kind()) {
                return kind;
            }
        }
        if let Some(kind) = classify_message(&cause.to_string()) {
            return kind;
        }
        source = cause.source();
    }

    if err.is_connect() {
        NetworkErrorKind::ConnectionRefused
    } else {
        NetworkErrorKind::Other
    }
}

pub(crate) fn classify_io_kind(kind: io::ErrorKind) -> Option<NetworkErrorKind> {
    match kind {
        io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
            Some(NetworkErrorKind::ConnectionReset)
        }
        io::ErrorKind::ConnectionRefused => Some(NetworkErrorKind::ConnectionRefused),
        io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable => {
            Some(NetworkErrorKind::HostUnreachable)
        }
        io::ErrorKind::BrokenPipe => Some(NetworkErrorKind::BrokenPipe),
        io::ErrorKind::TimedOut => Some(NetworkErrorKind::Timeout),
        _ => None,
    }
}

pub(crate) fn classify_message(message: &str) -> Option<NetworkErrorKind> {
    let message = message.to_lowercase();
    let is_dns = message.contains("dns error") || message.contains("failed to lookup address");
    if !is_dns {
        return None;
    }
    if message.contains("temporary failure") || message.contains("try again") {
        Some(NetworkErrorKind::DnsRetryExhausted)
    } else {
        Some(NetworkErrorKind::DnsFailure)
    }
}

// ============================================================================
// Tests
// ============================================================================
