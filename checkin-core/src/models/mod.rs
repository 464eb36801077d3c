//! Domain models for a checkin run.
//!
//! - [`site_result`] - Per-site accumulator ([`SiteResult`])
//! - [`summary`] - Reportable outcomes ([`SiteStatus`], [`SiteReport`], [`RunSummary`])

pub mod site_result;
pub mod summary;

pub use site_result::SiteResult;
pub use summary::{RunSummary, SiteReport, SiteStatus};
