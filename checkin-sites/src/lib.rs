// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Checkin Sites
//!
//! Site-specific checkin logic and run coordination.
//!
//! Each forum is described by a [`SiteProfile`] (URLs, selectors, per-step
//! encodings, success phrases). [`DiscuzSite`] runs the three-step
//! [`SiteProtocol`] from a profile, and the [`Coordinator`] runs every
//! enabled site in turn.
//!
//! ## Supported Sites
//!
//! | Site | Id | Cookie |
//! |------|----|--------|
//! | 4K视界 | `4ksj` | `SJCOOKIE` |
//!
//! More sites can be declared in a YAML site file, see [`site_file`].
//!
//! ## Usage
//!
//! ```ignore
//! use checkin_sites::{Coordinator, SiteRegistry};
//!
//! let registry = SiteRegistry::load(config.sites_file.as_deref())?;
//! let coordinator = Coordinator::new(client, registry.build_sites());
//! let outcome = coordinator.run(&config).await;
//! ```

pub mod coordinator;
pub mod discuz;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod profile;
pub mod protocol;
pub mod registry;
pub mod site_file;
pub mod sites;

pub use coordinator::{Coordinator, RunOutcome, NOT_EXECUTED_TITLE};
pub use discuz::DiscuzSite;
pub use error::SiteError;
pub use matcher::SuccessMatcher;
pub use profile::{SiteProfile, SiteSelectors, StatSelector, StepEncodings, TokenSelector};
pub use protocol::{SiteProtocol, StepOutcome};
pub use registry::SiteRegistry;
pub use site_file::{default_site_file, load_site_file};
