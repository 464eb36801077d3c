//! Sites command - list known sites.

use anyhow::Result;
use checkin_core::{env_lookup, Config};
use checkin_sites::SiteRegistry;
use tracing::info;

use super::load_registry;
use crate::Cli;

/// One listed site.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SiteRow {
    pub id: String,
    pub name: String,
    pub cookie_env: String,
    pub has_cookie: bool,
    pub enabled: bool,
}

/// Runs the sites command.
pub fn run(cli: &Cli) -> Result<()> {
    info!("Listing sites");

    let mut config = Config::from_env();
    if let Some(path) = &cli.sites_file {
        config.sites_file = Some(path.clone());
    }
    let registry = load_registry(&config)?;
    config.load_cookies(registry.cookie_envs(), env_lookup);

    println!("{:<12} {:<20} {:<16} {:<8} ENABLED", "ID", "NAME", "COOKIE", "SET");
    println!("{}", "─".repeat(66));
    for row in site_rows(&registry, &config) {
        println!(
            "{:<12} {:<20} {:<16} {:<8} {}",
            row.id,
            row.name,
            row.cookie_env,
            if row.has_cookie { "✓" } else { "✗" },
            if row.enabled { "yes" } else { "no" },
        );
    }
    println!();
    println!("Total: {} sites", registry.len());

    Ok(())
}

pub(crate) fn site_rows(registry: &SiteRegistry, config: &Config) -> Vec<SiteRow> {
    registry
        .profiles()
        .iter()
        .map(|p| SiteRow {
            id: p.id.clone(),
            name: p.name.clone(),
            cookie_env: p.cookie_env.clone(),
            has_cookie: config.cookie(&p.cookie_env).is_some(),
            enabled: config.is_site_enabled(&p.id),
        })
        .collect()
}
