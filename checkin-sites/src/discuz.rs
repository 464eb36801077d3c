//! Protocol implementation for Discuz sign-in pages.

use async_trait::async_trait;
use checkin_core::SiteResult;
use checkin_fetch::HttpClient;
use tracing::{debug, error, info, instrument, warn};

use crate::matcher::SuccessMatcher;
use crate::parser::{parse_checkin_message, parse_landing, parse_stats};
use crate::profile::SiteProfile;
use crate::protocol::{SiteProtocol, StepOutcome};

/// Message recorded when the landing page shows no logged-in account.
pub const COOKIE_EXPIRED_MESSAGE: &str =
    "Failed to read account info, the cookie may have expired!";

/// Message recorded when no token could be scraped.
pub const TOKEN_MISSING_MESSAGE: &str = "Could not find the checkin token (formhash).";

/// Message recorded when the checkin response carries no verdict.
pub const NO_VERDICT_MESSAGE: &str = "No clear checkin result in the response.";

/// A Discuz forum driven entirely by its [`SiteProfile`].
///
/// A transport failure while submitting the checkin ends the run for the
/// site; the detail page is only fetched after a submission got a response.
#[derive(Debug, Clone)]
pub struct DiscuzSite {
    profile: SiteProfile,
    matcher: SuccessMatcher,
}

impl DiscuzSite {
    /// Creates a site from its profile.
    pub fn new(profile: SiteProfile) -> Self {
        let matcher = profile.matcher();
        Self { profile, matcher }
    }
}

#[async_trait]
impl SiteProtocol for DiscuzSite {
    fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    #[instrument(skip(self, client, result), fields(site = %self.profile.id))]
    async fn acquire_token(&self, client: &HttpClient, result: &mut SiteResult) -> StepOutcome {
        debug!("Fetching checkin page");

        let url = match self.profile.landing_url() {
            Ok(url) => url,
            Err(e) => {
                result.push_message(format!("Invalid site configuration: {e}"));
                return StepOutcome::Stop;
            }
        };

        let response = match client.get(&url, result.headers()).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Fetching the checkin page failed");
                result.push_message(format!("Failed to fetch the checkin page: {e}"));
                return StepOutcome::Stop;
            }
        };

        let html = response.decode(self.profile.encodings.landing);
        let page = match parse_landing(&html, &self.profile.selectors) {
            Ok(page) => page,
            Err(e) => {
                error!(error = %e, "Reading the checkin page failed");
                result.push_message(format!("Failed to read the checkin page: {e}"));
                return StepOutcome::Stop;
            }
        };

        let Some(account_name) = page.account_name else {
            error!("No account on the checkin page, cookie likely expired");
            result.push_message(COOKIE_EXPIRED_MESSAGE);
            return StepOutcome::Stop;
        };
        result.account_label = Some(account_name);

        let Some(token) = page.token else {
            error!("No token on the checkin page");
            result.push_message(TOKEN_MISSING_MESSAGE);
            return StepOutcome::Stop;
        };
        result.session_token = Some(token);

        StepOutcome::Continue
    }

    #[instrument(skip(self, client, result), fields(site = %self.profile.id))]
    async fn submit_checkin(&self, client: &HttpClient, result: &mut SiteResult) -> StepOutcome {
        let Some(token) = result.session_token.as_deref() else {
            result.push_message(TOKEN_MISSING_MESSAGE);
            return StepOutcome::Stop;
        };

        let url = match self.profile.checkin_url(token) {
            Ok(url) => url,
            Err(e) => {
                result.push_message(format!("Invalid site configuration: {e}"));
                return StepOutcome::Stop;
            }
        };

        let response = match client.get(&url, result.headers()).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Checkin request failed");
                result.push_message(format!("Checkin failed or timed out: {e}"));
                return StepOutcome::Stop;
            }
        };

        let html = response.decode(self.profile.encodings.checkin);
        match parse_checkin_message(&html, &self.profile.selectors) {
            Ok(Some(message)) => {
                info!(message = %message, "Checkin response");
                if let Some(phrase) = self.matcher.find(&message) {
                    debug!(phrase, "Success phrase matched");
                    result.mark_succeeded();
                }
                result.push_message(message);
            }
            Ok(None) => {
                warn!("Checkin response had no result message");
                result.push_message(NO_VERDICT_MESSAGE);
            }
            Err(e) => {
                warn!(error = %e, "Reading the checkin response failed");
                result.push_message(format!("Failed to read the checkin response: {e}"));
            }
        }

        StepOutcome::Continue
    }

    #[instrument(skip(self, client, result), fields(site = %self.profile.id))]
    async fn fetch_details(&self, client: &HttpClient, result: &mut SiteResult) {
        debug!("Fetching checkin details");

        let outcome = match self.profile.landing_url() {
            Ok(url) => client
                .get(&url, result.headers())
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        let stats = outcome.and_then(|response| {
            let html = response.decode(self.profile.encodings.detail);
            parse_stats(&html, &self.profile.selectors.stats).map_err(|e| e.to_string())
        });

        match stats {
            Ok(stats) => {
                let mut parts = Vec::with_capacity(stats.len() + 1);
                if let Some(label) = &result.account_label {
                    parts.push(format!("Account: {label}"));
                }
                parts.extend(stats.iter().map(crate::parser::Stat::render));
                result.push_message(parts.join("; "));
            }
            Err(e) => {
                error!(error = %e, "Fetching checkin details failed");
                result.push_message(format!("(Failed to fetch checkin details: {e})"));
            }
        }
    }
}
