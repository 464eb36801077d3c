//! Page extraction for each protocol step.
//!
//! Each function parses one decoded page and returns owned data, so no
//! parsed document lives across an await point.

use checkin_fetch::{FetchError, HtmlPage};
use tracing::debug;

use crate::profile::{SiteSelectors, StatSelector};

/// Placeholder for a statistic missing from the page.
pub const NOT_AVAILABLE: &str = "not available";

/// What the landing page yields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandingPage {
    /// Account display name; absent when logged out.
    pub account_name: Option<String>,
    /// Anti-forgery token.
    pub token: Option<String>,
}

/// One statistic read from the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    /// Label from the profile.
    pub label: String,
    /// Scraped text, if found.
    pub value: Option<String>,
}

impl Stat {
    /// `<label>: <value>`, or the raw text when it already starts with the label.
    pub fn render(&self) -> String {
        match &self.value {
            Some(value) if value.starts_with(self.label.as_str()) => value.clone(),
            Some(value) => format!("{}: {}", self.label, value),
            None => format!("{}: {}", self.label, NOT_AVAILABLE),
        }
    }
}

/// Reads the account name and the token (trying each token selector in order).
pub fn parse_landing(html: &str, selectors: &SiteSelectors) -> Result<LandingPage, FetchError> {
    let page = HtmlPage::parse(html);

    let account_name = page.text(&selectors.account_name)?;

    let mut token = None;
    for candidate in &selectors.token {
        token = page.attr(&candidate.selector, &candidate.attr)?;
        if token.is_some() {
            break;
        }
        debug!(selector = %candidate.selector, "Token selector did not match");
    }

    Ok(LandingPage {
        account_name,
        token,
    })
}

/// Reads the result message of a checkin response.
pub fn parse_checkin_message(
    html: &str,
    selectors: &SiteSelectors,
) -> Result<Option<String>, FetchError> {
    HtmlPage::parse(html).text(&selectors.checkin_message)
}

/// Reads every configured statistic. Missing ones have no value.
pub fn parse_stats(html: &str, stats: &[StatSelector]) -> Result<Vec<Stat>, FetchError> {
    let page = HtmlPage::parse(html);
    stats
        .iter()
        .map(|stat| {
            Ok(Stat {
                label: stat.label.clone(),
                value: page.text(&stat.selector)?,
            })
        })
        .collect()
}
