//! HTTP client with the retry policy applied.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::error::FetchError;
use crate::request::{HttpRequest, HttpResponse};
use crate::retry::RetryPolicy;
use crate::transport::{ReqwestTransport, Transport};

/// HTTP client with retry capabilities.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
    retry_policy: RetryPolicy,
}

impl HttpClient {
    /// Creates a client on the `reqwest` transport with the default policy.
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new()?)))
    }

    /// Creates a client on any transport with the default policy.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            retry_policy: RetryPolicy::default(),
        }
    }

    /// Sets the retry policy for this client.
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Sends `request`, retrying transient failures.
    ///
    /// Responses with status >= 400 are returned as [`FetchError::Status`].
    #[instrument(skip(self, request), fields(method = %request.method, host = %request.origin()))]
    pub async fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut retries = 0;

        loop {
            debug!(attempt = retries + 1, "Sending request");

            let result = self
                .transport
                .send(request)
                .await
                .and_then(|response| response.error_for_status(&request.url));

            match result {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if retries < self.retry_policy.max_retries && self.retry_policy.should_retry(&e)
                    {
                        retries += 1;
                        let delay = self.retry_policy.delay_for_retry(retries);
                        warn!(
                            error = %e,
                            retry = retries,
                            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                            "Request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    if e.is_client_error() {
                        debug!(error = %e, "Client error, not retrying");
                    }
                    return Err(e);
                }
            }
        }
    }

    /// Performs a GET request with the given headers.
    pub async fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, FetchError> {
        self.execute(&HttpRequest::get(url).with_headers(headers))
            .await
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}
