//! CLI command implementations.

pub mod notify_test;
pub mod run;
pub mod sites;

use std::path::PathBuf;

use anyhow::{Context, Result};
use checkin_core::Config;
use checkin_sites::{default_site_file, SiteRegistry};
use tracing::debug;

/// Site file to load: the configured one, else the default if it exists.
pub(crate) fn site_file_path(config: &Config) -> Option<PathBuf> {
    config
        .sites_file
        .clone()
        .or_else(|| default_site_file().filter(|path| path.is_file()))
}

/// Built-in sites plus those of the site file, if any.
pub(crate) fn load_registry(config: &Config) -> Result<SiteRegistry> {
    let path = site_file_path(config);
    debug!(site_file = ?path, "Loading site registry");
    SiteRegistry::load(path.as_deref()).with_context(|| match &path {
        Some(path) => format!("failed to load site file {}", path.display()),
        None => "failed to load built-in sites".to_string(),
    })
}
