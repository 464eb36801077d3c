//! Site registry.
//!
//! Holds the profiles known to a run: the built-in ones, plus any read from
//! a site file. A file profile with the id of a built-in replaces it.

use std::path::Path;

use tracing::{debug, info};

use crate::discuz::DiscuzSite;
use crate::error::SiteError;
use crate::profile::SiteProfile;
use crate::protocol::SiteProtocol;
use crate::site_file::load_site_file;
use crate::sites::builtin_profiles;

/// Ordered set of site profiles, unique by id.
#[derive(Debug, Clone)]
pub struct SiteRegistry {
    profiles: Vec<SiteProfile>,
}

impl SiteRegistry {
    /// Registry with the built-in profiles only.
    pub fn builtin() -> Self {
        Self {
            profiles: builtin_profiles(),
        }
    }

    /// Registry with explicit profiles (no built-ins).
    pub fn from_profiles(profiles: Vec<SiteProfile>) -> Self {
        let mut registry = Self {
            profiles: Vec::new(),
        };
        registry.merge(profiles);
        registry
    }

    /// Built-ins plus the profiles of `site_file`, when given.
    pub fn load(site_file: Option<&Path>) -> Result<Self, SiteError> {
        let mut registry = Self::builtin();
        if let Some(path) = site_file {
            let profiles = load_site_file(path)?;
            info!(path = %path.display(), count = profiles.len(), "Loaded site file");
            registry.merge(profiles);
        }
        Ok(registry)
    }

    /// Adds profiles, replacing any with the same id in place.
    pub fn merge(&mut self, profiles: Vec<SiteProfile>) {
        for profile in profiles {
            match self.profiles.iter_mut().find(|p| p.id == profile.id) {
                Some(existing) => {
                    debug!(site = %profile.id, "Replacing site profile");
                    *existing = profile;
                }
                None => self.profiles.push(profile),
            }
        }
    }

    /// All profiles, in run order.
    pub fn profiles(&self) -> &[SiteProfile] {
        &self.profiles
    }

    /// Looks up a profile by id (case-insensitive).
    pub fn get(&self, id: &str) -> Option<&SiteProfile> {
        self.profiles.iter().find(|p| p.id.eq_ignore_ascii_case(id))
    }

    /// Environment variables holding site cookies.
    pub fn cookie_envs(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.cookie_env.as_str()).collect()
    }

    /// Ids in `requested` that match no profile.
    pub fn unknown_ids<'a>(&self, requested: &'a [String]) -> Vec<&'a str> {
        requested
            .iter()
            .filter(|id| self.get(id).is_none())
            .map(String::as_str)
            .collect()
    }

    /// Builds a protocol for every profile.
    pub fn build_sites(&self) -> Vec<Box<dyn SiteProtocol>> {
        self.profiles
            .iter()
            .cloned()
            .map(|p| Box::new(DiscuzSite::new(p)) as Box<dyn SiteProtocol>)
            .collect()
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// True if there are no profiles.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
