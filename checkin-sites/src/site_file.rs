//! YAML site files.
//!
//! A site file adds forums without rebuilding:
//!
//! ```yaml
//! sites:
//!   - id: other
//!     name: Other Forum
//!     base_url: https://other.example/
//!     cookie_env: OTHERCOOKIE
//!     selectors:
//!       account_name: ".vwmy a"
//!       token:
//!         - selector: "input[name=formhash]"
//!       checkin_message: "#messagetext > p"
//!     success_phrases: ["签到成功"]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use checkin_core::CoreError;
use serde::Deserialize;
use tracing::debug;

use crate::error::SiteError;
use crate::profile::SiteProfile;

#[derive(Debug, Deserialize)]
struct SiteFile {
    #[serde(default)]
    sites: Vec<SiteProfile>,
}

/// Default site file location (`<config dir>/checkin/sites.yaml`).
pub fn default_site_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("checkin").join("sites.yaml"))
}

/// Reads and validates every profile in `path`.
pub fn load_site_file(path: &Path) -> Result<Vec<SiteProfile>, SiteError> {
    debug!(path = %path.display(), "Reading site file");

    let content = std::fs::read_to_string(path).map_err(CoreError::from)?;
    let file: SiteFile = serde_yaml::from_str(&content).map_err(CoreError::from)?;

    let mut seen = HashSet::new();
    for profile in &file.sites {
        profile.validate()?;
        if !seen.insert(profile.id.to_lowercase()) {
            return Err(CoreError::InvalidConfig(format!(
                "duplicate site id `{}` in {}",
                profile.id,
                path.display()
            ))
            .into());
        }
    }

    Ok(file.sites)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SITE: &str = r##"
sites:
  - id: other
    name: Other Forum
    base_url: https://other.example/
    cookie_env: OTHERCOOKIE
    selectors:
      account_name: ".vwmy a"
      token:
        - selector: "input[name=formhash]"
      checkin_message: "#messagetext > p"
    success_phrases: ["签到成功"]
"##;

    fn write(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_site_file() {
        let file = write(SITE);
        let profiles = load_site_file(file.path()).unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].id, "other");
    }

    #[test]
    fn test_missing_file() {
        let err = load_site_file(Path::new("/nonexistent/sites.yaml")).unwrap_err();
        assert!(matches!(err, SiteError::Core(CoreError::Io(_))));
    }

    #[test]
    fn test_bad_yaml() {
        let file = write("sites: [ {id: 1");
        let err = load_site_file(file.path()).unwrap_err();
        assert!(matches!(err, SiteError::Core(CoreError::Yaml(_))));
    }

    #[test]
    fn test_duplicate_ids() {
        let body = SITE.trim_start_matches("\nsites:\n");
        let file = write(&format!("sites:\n{body}{body}"));
        let err = load_site_file(file.path()).unwrap_err();
        assert!(matches!(err, SiteError::Core(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let file = write(&SITE.replace("https://other.example/", "nope"));
        let err = load_site_file(file.path()).unwrap_err();
        assert!(matches!(err, SiteError::InvalidProfile { .. }));
    }

    #[test]
    fn test_default_location() {
        if let Some(path) = default_site_file() {
            assert!(path.ends_with("checkin/sites.yaml"));
        }
    }
}
