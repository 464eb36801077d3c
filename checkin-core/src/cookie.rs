//! Session cookie preprocessing.
//!
//! Discuz forums store an "auto logout" deadline in the session cookie as
//! `will_timelogout_<uid>=<unix seconds>`. A cookie exported from a browser
//! some days ago carries a deadline in the past, which the site treats as an
//! expired session. Rewriting the stamp to one day ahead keeps an otherwise
//! valid exported cookie usable.

use chrono::Utc;
use regex::Regex;
use tracing::debug;

/// Cookie field prefix used by Discuz for the logout deadline.
pub const DEFAULT_LOGOUT_PREFIX: &str = "will_timelogout_";

/// Seconds added to "now" when rewriting the stamp.
const ONE_DAY_SECS: i64 = 24 * 60 * 60;

/// Rewrites the logout stamp in `raw` to `now_unix + 86400`.
///
/// Only the first `<prefix><digits>=<digits>` occurrence is rewritten. Input
/// that is absent, empty, or lacks the field is returned unchanged.
pub fn refresh_logout_stamp(raw: Option<&str>, prefix: &str, now_unix: i64) -> Option<String> {
    let raw = raw?;
    if raw.is_empty() || prefix.is_empty() {
        return Some(raw.to_string());
    }

    let pattern = format!(r"({}\d+=)\d+", regex::escape(prefix));
    let Ok(re) = Regex::new(&pattern) else {
        return Some(raw.to_string());
    };

    let stamp = now_unix + ONE_DAY_SECS;
    let rewritten = re.replacen(raw, 1, |caps: &regex::Captures<'_>| {
        format!("{}{}", &caps[1], stamp)
    });

    if rewritten != raw {
        debug!(stamp, "Refreshed cookie logout stamp");
    }
    Some(rewritten.into_owned())
}

/// Same as [`refresh_logout_stamp`], reading the current wall clock.
pub fn refresh_logout_stamp_now(raw: Option<&str>, prefix: &str) -> Option<String> {
    refresh_logout_stamp(raw, prefix, Utc::now().timestamp())
}
