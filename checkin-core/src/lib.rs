// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Checkin Core
//!
//! Core types, models, and configuration shared by every `checkin` crate.
//!
//! ## Key Types
//!
//! ### Run Model
//! - [`SiteResult`] - Per-site accumulator threaded through a site's protocol
//! - [`SiteStatus`] - Outcome label of one site
//! - [`SiteReport`] - Finished, reportable view of one site
//! - [`RunSummary`] - Everything a run hands to notification delivery
//!
//! ### Configuration
//! - [`Config`] - Resolved, immutable run configuration
//! - [`NotifyConfig`] - Credentials of the notification channels
//!
//! ### Utilities
//! - [`cookie`] - Session cookie preprocessing

pub mod config;
pub mod cookie;
pub mod error;
pub mod models;

pub use config::{env_lookup, BarkConfig, Config, NotifyConfig, TelegramConfig};
pub use cookie::{refresh_logout_stamp, refresh_logout_stamp_now, DEFAULT_LOGOUT_PREFIX};
pub use error::CoreError;
pub use models::{RunSummary, SiteReport, SiteResult, SiteStatus};
