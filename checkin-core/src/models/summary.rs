//! Reportable outcomes of a run.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::site_result::SiteResult;

/// Message used for sites without a credential.
pub const NOT_CONFIGURED_MESSAGE: &str = "Cookie not configured, skipped.";

// ============================================================================
// Site Status
// ============================================================================

/// Outcome of one site in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteStatus {
    /// The site confirmed the checkin.
    Success,
    /// The site was attempted but not confirmed.
    Failure,
    /// No credential, nothing was sent to the site.
    NotConfigured,
}

impl SiteStatus {
    /// Returns the label used in the summary line.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::NotConfigured => "not configured",
        }
    }
}

impl fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Site Report
// ============================================================================

/// Finished view of one site, ready for the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteReport {
    /// Site name.
    pub name: String,
    /// Outcome.
    pub status: SiteStatus,
    /// Joined, never-empty message.
    pub message: String,
}

impl SiteReport {
    /// Builds the report of an attempted site.
    pub fn from_result(result: &SiteResult) -> Self {
        let status = if result.succeeded() {
            SiteStatus::Success
        } else {
            SiteStatus::Failure
        };
        Self {
            name: result.name.clone(),
            status,
            message: result.message(),
        }
    }

    /// Builds the report of a site skipped for lack of a credential.
    pub fn not_configured(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: SiteStatus::NotConfigured,
            message: NOT_CONFIGURED_MESSAGE.to_string(),
        }
    }

    /// `<name>: <status>`
    pub fn status_line(&self) -> String {
        format!("{}: {}", self.name, self.status)
    }

    /// `**<name>**: <message>`
    pub fn detail_block(&self) -> String {
        format!("**{}**: {}", self.name, self.message)
    }
}

// ============================================================================
// Run Summary
// ============================================================================

/// Ordered site reports of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// One report per site, in run order.
    pub reports: Vec<SiteReport>,
}

impl RunSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a site report.
    pub fn push(&mut self, report: SiteReport) {
        self.reports.push(report);
    }

    /// Per-site statuses joined with `"; "`.
    pub fn status_line(&self) -> String {
        self.reports
            .iter()
            .map(SiteReport::status_line)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Per-site detail blocks separated by a blank line.
    pub fn detail_body(&self) -> String {
        self.reports
            .iter()
            .map(SiteReport::detail_block)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Notification title.
    pub fn title(&self) -> String {
        format!("Checkin results: {}", self.status_line())
    }

    /// Number of sites that were actually attempted.
    pub fn attempted(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| r.status != SiteStatus::NotConfigured)
            .count()
    }
}
