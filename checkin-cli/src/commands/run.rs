//! Run command - check in on every enabled site, then notify.

use anyhow::Result;
use checkin_core::{env_lookup, Config};
use checkin_fetch::HttpClient;
use checkin_notify::{bark_plain, DispatchReport, Dispatcher};
use checkin_sites::{Coordinator, RunOutcome};
use tracing::{error, info, warn};

use super::load_registry;
use crate::Cli;

/// Title of the notification sent when the run itself fails.
pub const SEVERE_ERROR_TITLE: &str = "Checkin run hit a severe error";

/// Runs the run command.
///
/// Site failures and run errors are reported through notifications, so this
/// only fails if no HTTP client can be built.
pub async fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::from_env();
    if let Some(path) = &cli.sites_file {
        config.sites_file = Some(path.clone());
    }

    let client = match HttpClient::new() {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Could not build the HTTP client");
            return Ok(());
        }
    };

    run_with(config, &client, env_lookup).await;
    info!(
        finished_at = %chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "Checkin finished"
    );
    Ok(())
}

/// Executes the run and sends its notification.
///
/// Any error escaping the run becomes a severe-error notification.
pub(crate) async fn run_with(
    mut config: Config,
    client: &HttpClient,
    lookup: impl Fn(&str) -> Option<String>,
) -> DispatchReport {
    let (title, body) = match checkin(&mut config, client, lookup).await {
        Ok(outcome) => outcome.notification(),
        Err(e) => {
            error!(error = %format!("{e:#}"), "Checkin run failed");
            (SEVERE_ERROR_TITLE.to_string(), severe_error_body(&e))
        }
    };

    println!("\n--- Final result ---");
    println!("{title}");
    println!("{}", bark_plain(&body));
    println!("--------------------");

    Dispatcher::from_config(&config.notify)
        .dispatch(client, &title, &body)
        .await
}

async fn checkin(
    config: &mut Config,
    client: &HttpClient,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<RunOutcome> {
    let registry = load_registry(config)?;

    if let Some(enabled) = &config.enabled_sites {
        for id in registry.unknown_ids(enabled) {
            warn!(site = id, "Enabled site is unknown, ignoring");
        }
    }

    config.load_cookies(registry.cookie_envs(), lookup);

    let coordinator = Coordinator::new(client.clone(), registry.build_sites());
    Ok(coordinator.run(config).await)
}

fn severe_error_body(error: &anyhow::Error) -> String {
    format!("Error: {error:#}\nCheck the logs for details.")
}
