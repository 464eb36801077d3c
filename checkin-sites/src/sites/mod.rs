//! Built-in site profiles.

pub mod sj4k;

use crate::profile::SiteProfile;

/// Every built-in profile, in run order.
pub fn builtin_profiles() -> Vec<SiteProfile> {
    vec![sj4k::profile()]
}
