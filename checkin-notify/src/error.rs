//! Error types for notification delivery.

use checkin_fetch::FetchError;
use thiserror::Error;

/// Failure delivering to one channel.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The request did not get a successful response.
    #[error("request failed: {0}")]
    Fetch(#[from] FetchError),

    /// The service answered but refused the message.
    #[error("{channel} rejected the message: {detail}")]
    Rejected {
        /// Channel name.
        channel: &'static str,
        /// What the service said.
        detail: String,
    },
}
