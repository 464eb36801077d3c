//! Fetch error types.

use std::fmt;
use thiserror::Error;

// ============================================================================
// Network Error Kind
// ============================================================================

/// Classification of a request that never produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkErrorKind {
    /// Connection reset or aborted by the peer.
    ConnectionReset,
    /// Host name could not be resolved.
    DnsFailure,
    /// Connect or response timeout.
    Timeout,
    /// Connection refused.
    ConnectionRefused,
    /// Host or network unreachable.
    HostUnreachable,
    /// Broken pipe while writing the request.
    BrokenPipe,
    /// Resolver gave up after temporary failures.
    DnsRetryExhausted,
    /// Anything else (TLS, malformed request, body decoding...).
    Other,
}

impl NetworkErrorKind {
    /// Returns the conventional socket error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConnectionReset => "ECONNRESET",
            Self::DnsFailure => "ENOTFOUND",
            Self::Timeout => "ETIMEDOUT",
            Self::ConnectionRefused => "ECONNREFUSED",
            Self::HostUnreachable => "EHOSTUNREACH",
            Self::BrokenPipe => "EPIPE",
            Self::DnsRetryExhausted => "EAI_AGAIN",
            Self::Other => "EOTHER",
        }
    }

    /// True for faults that may go away on their own.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Fetch Error
// ============================================================================

/// Error type for outbound requests and response handling.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("Network error ({kind}): {message}")]
    Network {
        /// Classified cause.
        kind: NetworkErrorKind,
        /// Underlying error text.
        message: String,
    },

    /// The server answered with an error status.
    #[error("HTTP {status} from {origin}")]
    Status {
        /// Response status code.
        status: u16,
        /// Origin of the requested URL; path and query are dropped.
        origin: String,
    },

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A CSS selector did not parse.
    #[error("Invalid selector `{selector}`: {message}")]
    Selector {
        /// The offending selector.
        selector: String,
        /// Parser message.
        message: String,
    },
}

impl FetchError {
    /// Creates a network error.
    pub fn network(kind: NetworkErrorKind, message: impl Into<String>) -> Self {
        Self::Network {
            kind,
            message: message.into(),
        }
    }

    /// Returns the response status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 4xx responses.
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

}
