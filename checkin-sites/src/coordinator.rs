//! Run coordination.
//!
//! The coordinator walks the enabled sites in registry order, one at a time,
//! and reduces their results into a [`RunSummary`]. Sites without a cookie
//! are reported as not configured and never contacted.

use checkin_core::{Config, RunSummary, SiteReport};
use checkin_fetch::HttpClient;
use tracing::{info, instrument, warn};

use crate::protocol::SiteProtocol;

/// Title of the notification sent when nothing ran.
pub const NOT_EXECUTED_TITLE: &str = "Checkin run not executed";

/// Result of a coordinated run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// At least one site was attempted.
    Completed(RunSummary),
    /// No site could be attempted.
    NotExecuted {
        /// Why nothing ran.
        reason: String,
    },
}

impl RunOutcome {
    /// Notification title and body for this outcome.
    pub fn notification(&self) -> (String, String) {
        match self {
            Self::Completed(summary) => (summary.title(), summary.detail_body()),
            Self::NotExecuted { reason } => (NOT_EXECUTED_TITLE.to_string(), reason.clone()),
        }
    }
}

/// Runs every enabled site sequentially.
pub struct Coordinator {
    client: HttpClient,
    sites: Vec<Box<dyn SiteProtocol>>,
}

impl Coordinator {
    /// Creates a coordinator over `sites`, in the given order.
    pub fn new(client: HttpClient, sites: Vec<Box<dyn SiteProtocol>>) -> Self {
        Self { client, sites }
    }

    /// Executes the run described by `config`.
    #[instrument(skip_all, fields(sites = self.sites.len()))]
    pub async fn run(&self, config: &Config) -> RunOutcome {
        let mut summary = RunSummary::new();
        let mut missing_cookies = Vec::new();

        for site in self.sites.iter().filter(|s| config.is_site_enabled(s.id())) {
            let profile = site.profile();

            let Some(cookie) = config.cookie(&profile.cookie_env) else {
                info!(site = %profile.id, env = %profile.cookie_env, "Cookie not configured, skipping");
                missing_cookies.push(format!("{} ({})", profile.name, profile.cookie_env));
                summary.push(SiteReport::not_configured(&profile.name));
                continue;
            };

            let result = site.run(&self.client, profile.new_result(cookie)).await;
            let report = SiteReport::from_result(&result);
            info!(site = %profile.id, status = %report.status, "Site finished");
            summary.push(report);
        }

        if summary.attempted() == 0 {
            let reason = if missing_cookies.is_empty() {
                "No enabled site, checkin not executed.".to_string()
            } else {
                format!(
                    "Cookie not configured for {}, checkin not executed.",
                    missing_cookies.join(", ")
                )
            };
            warn!(%reason, "Nothing to run");
            return RunOutcome::NotExecuted { reason };
        }

        info!(status = %summary.status_line(), "Run finished");
        RunOutcome::Completed(summary)
    }
}
