//! Site profiles.
//!
//! Everything that differs between two Discuz forums (URLs, selectors,
//! per-step encodings, success phrases) lives in a [`SiteProfile`], so one
//! protocol implementation serves every site.

use checkin_core::{refresh_logout_stamp_now, SiteResult, DEFAULT_LOGOUT_PREFIX};
use checkin_fetch::{HtmlPage, TextEncoding};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SiteError;
use crate::matcher::SuccessMatcher;

// ============================================================================
// Constants
// ============================================================================

/// Desktop browser user agent sent to forums.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36 Edg/129.0.0.0";

/// Accept header of a browser navigation.
const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";

fn default_landing_path() -> String {
    "qiandao.php".to_string()
}

fn default_checkin_param() -> String {
    "sign".to_string()
}

fn default_logout_prefix() -> Option<String> {
    Some(DEFAULT_LOGOUT_PREFIX.to_string())
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_token_attr() -> String {
    "value".to_string()
}

// ============================================================================
// Selectors
// ============================================================================

/// Where to read the anti-forgery token from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSelector {
    /// CSS selector of the element.
    pub selector: String,
    /// Attribute holding the token.
    #[serde(default = "default_token_attr")]
    pub attr: String,
}

impl TokenSelector {
    /// Reads the `value` attribute of `selector`.
    pub fn value(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            attr: default_token_attr(),
        }
    }
}

/// One labeled statistic on the detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSelector {
    /// Label shown in the report.
    pub label: String,
    /// CSS selector of the element holding the value.
    pub selector: String,
}

impl StatSelector {
    /// Creates a stat selector.
    pub fn new(label: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            selector: selector.into(),
        }
    }
}

/// All selectors of a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSelectors {
    /// Account display name on the landing page. Missing means logged out.
    pub account_name: String,
    /// Token candidates, tried in order.
    pub token: Vec<TokenSelector>,
    /// Result message on the checkin response.
    pub checkin_message: String,
    /// Statistics on the detail page.
    #[serde(default)]
    pub stats: Vec<StatSelector>,
}

/// Text encoding of each step's response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepEncodings {
    /// Landing page (token step).
    #[serde(default)]
    pub landing: TextEncoding,
    /// Checkin response.
    #[serde(default)]
    pub checkin: TextEncoding,
    /// Detail page (stats step).
    #[serde(default)]
    pub detail: TextEncoding,
}

// ============================================================================
// Site Profile
// ============================================================================

/// Static description of one forum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteProfile {
    /// Short id used in configuration (e.g. `4ksj`).
    pub id: String,
    /// Display name used in reports.
    pub name: String,
    /// Root URL, with trailing slash.
    pub base_url: String,
    /// Checkin page, relative to `base_url`.
    #[serde(default = "default_landing_path")]
    pub landing_path: String,
    /// Query parameter carrying the token on submission.
    #[serde(default = "default_checkin_param")]
    pub checkin_param: String,
    /// Environment variable holding the session cookie.
    pub cookie_env: String,
    /// Cookie field prefix of the logout stamp, if the site uses one.
    #[serde(default = "default_logout_prefix")]
    pub logout_cookie_prefix: Option<String>,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Selectors.
    pub selectors: SiteSelectors,
    /// Per-step encodings.
    #[serde(default)]
    pub encodings: StepEncodings,
    /// Phrases that confirm a checkin.
    pub success_phrases: Vec<String>,
}

impl SiteProfile {
    /// Checks URLs, selectors and phrases.
    pub fn validate(&self) -> Result<(), SiteError> {
        if self.id.trim().is_empty() {
            return Err(SiteError::invalid(&self.id, "empty id"));
        }
        if self.cookie_env.trim().is_empty() {
            return Err(SiteError::invalid(&self.id, "empty cookie_env"));
        }
        if self.success_phrases.iter().all(|p| p.trim().is_empty()) {
            return Err(SiteError::invalid(&self.id, "no success phrases"));
        }
        if self.selectors.token.is_empty() {
            return Err(SiteError::invalid(&self.id, "no token selector"));
        }

        self.landing_url()?;

        let empty = HtmlPage::parse("");
        let selectors = [
            self.selectors.account_name.as_str(),
            self.selectors.checkin_message.as_str(),
        ]
        .into_iter()
        .chain(self.selectors.token.iter().map(|t| t.selector.as_str()))
        .chain(self.selectors.stats.iter().map(|s| s.selector.as_str()));
        for css in selectors {
            empty
                .text(css)
                .map_err(|e| SiteError::invalid(&self.id, e.to_string()))?;
        }

        Ok(())
    }

    fn base(&self) -> Result<Url, SiteError> {
        Url::parse(&self.base_url)
            .map_err(|e| SiteError::invalid(&self.id, format!("base_url: {e}")))
    }

    /// URL of the checkin landing page.
    pub fn landing_url(&self) -> Result<String, SiteError> {
        let url = self
            .base()?
            .join(&self.landing_path)
            .map_err(|e| SiteError::invalid(&self.id, format!("landing_path: {e}")))?;
        Ok(url.into())
    }

    /// URL submitting the checkin with `token`.
    pub fn checkin_url(&self, token: &str) -> Result<String, SiteError> {
        let mut url = Url::parse(&self.landing_url()?)
            .map_err(|e| SiteError::invalid(&self.id, e.to_string()))?;
        url.query_pairs_mut().append_pair(&self.checkin_param, token);
        Ok(url.into())
    }

    /// Request headers for `cookie`.
    pub fn request_headers(&self, cookie: &str) -> Vec<(String, String)> {
        vec![
            ("cookie".to_string(), cookie.to_string()),
            ("User-Agent".to_string(), self.user_agent.clone()),
            ("accept".to_string(), DEFAULT_ACCEPT.to_string()),
        ]
    }

    /// Builds a fresh result for a run with the raw session cookie.
    ///
    /// The cookie's logout stamp is pushed one day ahead first.
    pub fn new_result(&self, raw_cookie: &str) -> SiteResult {
        let cookie = match &self.logout_cookie_prefix {
            Some(prefix) => refresh_logout_stamp_now(Some(raw_cookie), prefix)
                .unwrap_or_else(|| raw_cookie.to_string()),
            None => raw_cookie.to_string(),
        };
        SiteResult::new(&self.name, &self.base_url, self.request_headers(&cookie))
    }

    /// Matcher over this site's success phrases.
    pub fn matcher(&self) -> SuccessMatcher {
        SuccessMatcher::new(self.success_phrases.iter().cloned())
    }
}

// ============================================================================
// Tests
// ============================================================================
