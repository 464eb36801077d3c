//! Site-level errors.

use checkin_core::CoreError;
use thiserror::Error;

/// Errors raised while building or loading sites.
///
/// Failures during a site's checkin never surface as errors; they are
/// recorded on the site's result instead.
#[derive(Debug, Error)]
pub enum SiteError {
    /// A profile is unusable.
    #[error("Invalid site profile `{id}`: {reason}")]
    InvalidProfile {
        /// Profile id.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl SiteError {
    pub(crate) fn invalid(id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
