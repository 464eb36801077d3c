//! The three-step checkin protocol.
//!
//! Every site runs the same sequence against a [`SiteResult`]:
//!
//! 1. [`SiteProtocol::acquire_token`] - fetch the landing page, confirm the
//!    session is logged in, scrape the anti-forgery token
//! 2. [`SiteProtocol::submit_checkin`] - submit the token and read the verdict
//! 3. [`SiteProtocol::fetch_details`] - re-fetch the landing page for stats
//!
//! A step that returns [`StepOutcome::Stop`] ends the run for that site.
//! Steps never return errors; failures are written to the result.

use async_trait::async_trait;
use checkin_core::SiteResult;
use checkin_fetch::HttpClient;
use tracing::{info, instrument};

use crate::profile::SiteProfile;

/// Whether the next step should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Proceed to the next step.
    Continue,
    /// Skip the remaining steps.
    Stop,
}

/// A site's checkin protocol.
#[async_trait]
pub trait SiteProtocol: Send + Sync {
    /// Static description of the site.
    fn profile(&self) -> &SiteProfile;

    /// Site id.
    fn id(&self) -> &str {
        &self.profile().id
    }

    /// Display name.
    fn name(&self) -> &str {
        &self.profile().name
    }

    /// Step 1: fetch the landing page and scrape account name and token.
    async fn acquire_token(&self, client: &HttpClient, result: &mut SiteResult) -> StepOutcome;

    /// Step 2: submit the checkin and record the verdict.
    async fn submit_checkin(&self, client: &HttpClient, result: &mut SiteResult) -> StepOutcome;

    /// Step 3: fetch and append account statistics.
    async fn fetch_details(&self, client: &HttpClient, result: &mut SiteResult);

    /// Runs the steps in order, each gated on the previous one.
    #[instrument(skip(self, client, result), fields(site = %self.id()))]
    async fn run(&self, client: &HttpClient, mut result: SiteResult) -> SiteResult {
        info!("Starting checkin");

        if self.acquire_token(client, &mut result).await == StepOutcome::Stop {
            info!(succeeded = result.succeeded(), "Stopped after token step");
            return result;
        }
        if self.submit_checkin(client, &mut result).await == StepOutcome::Stop {
            info!(succeeded = result.succeeded(), "Stopped after checkin step");
            return result;
        }
        self.fetch_details(client, &mut result).await;

        info!(succeeded = result.succeeded(), "Checkin finished");
        result
    }
}
