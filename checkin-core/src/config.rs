//! Resolved run configuration.
//!
//! Everything the run needs from the environment is read once into a
//! [`Config`] and passed down explicitly. Lookups go through a closure so
//! tests never touch the process environment.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// Environment Keys
// ============================================================================

/// Comma-separated list of enabled site ids.
pub const ENV_ENABLED_SITES: &str = "CHECKIN_SITES";
/// Path to a YAML file with extra site profiles.
pub const ENV_SITES_FILE: &str = "CHECKIN_SITES_FILE";
/// Server-chan send key.
pub const ENV_SERVERCHAN_KEY: &str = "SCKEY";
/// PushPlus token.
pub const ENV_PUSHPLUS_TOKEN: &str = "PPTOKEN";
/// PushDeer push key.
pub const ENV_PUSHDEER_KEY: &str = "PDKEY";
/// Bark device key.
pub const ENV_BARK_KEY: &str = "BARKKEY";
/// Custom Bark server origin.
pub const ENV_BARK_SERVER: &str = "BARKSERVER";
/// Telegram bot token.
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
/// Telegram chat id.
pub const ENV_TELEGRAM_CHAT: &str = "TELEGRAM_ID";

// ============================================================================
// Notify Config
// ============================================================================

/// Bark credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarkConfig {
    /// Device key.
    pub key: String,
    /// Server origin; the public server is used when absent.
    pub server: Option<String>,
}

/// Telegram credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token.
    pub bot_token: String,
    /// Target chat id.
    pub chat_id: String,
}

/// Notification channel credentials. A channel is enabled iff present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Server-chan send key.
    pub serverchan_key: Option<String>,
    /// PushPlus token.
    pub pushplus_token: Option<String>,
    /// PushDeer push key.
    pub pushdeer_key: Option<String>,
    /// Bark credentials.
    pub bark: Option<BarkConfig>,
    /// Telegram credentials.
    pub telegram: Option<TelegramConfig>,
}

impl NotifyConfig {
    /// Reads channel credentials through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| non_blank(lookup(key));

        let bark = get(ENV_BARK_KEY).map(|key| BarkConfig {
            key,
            server: get(ENV_BARK_SERVER),
        });

        let telegram = match (get(ENV_TELEGRAM_TOKEN), get(ENV_TELEGRAM_CHAT)) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            _ => None,
        };

        Self {
            serverchan_key: get(ENV_SERVERCHAN_KEY),
            pushplus_token: get(ENV_PUSHPLUS_TOKEN),
            pushdeer_key: get(ENV_PUSHDEER_KEY),
            bark,
            telegram,
        }
    }

    /// Number of enabled channels.
    pub fn enabled_count(&self) -> usize {
        [
            self.serverchan_key.is_some(),
            self.pushplus_token.is_some(),
            self.pushdeer_key.is_some(),
            self.bark.is_some(),
            self.telegram.is_some(),
        ]
        .into_iter()
        .filter(|enabled| *enabled)
        .count()
    }
}

// ============================================================================
// Config
// ============================================================================

/// Immutable configuration of one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Raw session cookies keyed by the environment variable that held them.
    pub cookies: BTreeMap<String, String>,
    /// Enabled site ids; `None` enables every known site.
    pub enabled_sites: Option<Vec<String>>,
    /// Extra site profile file.
    pub sites_file: Option<PathBuf>,
    /// Notification credentials.
    pub notify: NotifyConfig,
}

impl Config {
    /// Reads general settings and notification credentials from the process environment.
    ///
    /// Cookies are loaded separately with [`Config::load_cookies`] once the
    /// set of sites (and therefore cookie variables) is known.
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    /// Reads general settings and notification credentials through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled_sites = non_blank(lookup(ENV_ENABLED_SITES)).map(|raw| parse_site_list(&raw));
        let enabled_sites = enabled_sites.filter(|list| !list.is_empty());

        let sites_file = non_blank(lookup(ENV_SITES_FILE)).map(PathBuf::from);

        let config = Self {
            cookies: BTreeMap::new(),
            enabled_sites,
            sites_file,
            notify: NotifyConfig::from_lookup(&lookup),
        };
        debug!(
            enabled_sites = ?config.enabled_sites,
            channels = config.notify.enabled_count(),
            "Resolved configuration"
        );
        config
    }

    /// Loads the cookie held by each of `keys`. Blank values are skipped.
    pub fn load_cookies<'a>(
        &mut self,
        keys: impl IntoIterator<Item = &'a str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) {
        for key in keys {
            if let Some(cookie) = non_blank(lookup(key)) {
                self.cookies.insert(key.to_string(), cookie);
            }
        }
    }

    /// Returns the cookie held by `key`, if configured.
    pub fn cookie(&self, key: &str) -> Option<&str> {
        self.cookies.get(key).map(String::as_str)
    }

    /// Whether the site with `id` takes part in the run.
    pub fn is_site_enabled(&self, id: &str) -> bool {
        match &self.enabled_sites {
            None => true,
            Some(list) => list.iter().any(|s| s.eq_ignore_ascii_case(id)),
        }
    }
}

/// Reads a variable from the process environment.
///
/// The lookup passed to [`Config::load_cookies`] outside of tests.
pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_site_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
