//! Per-site result accumulator.
//!
//! A [`SiteResult`] is created fresh for one site, handed to that site's
//! protocol, and mutated step by step. Message text is collected as ordered
//! fragments and only joined into a sentence when the result is reported.

use serde::Serialize;

/// Placeholder used when no step recorded any message.
pub const NO_RESULT_MESSAGE: &str = "No result recorded.";

/// Characters accepted as the end of a sentence.
const TERMINAL_PUNCTUATION: &[char] = &['.', '!', '?', '。', '！', '？'];

// ============================================================================
// Site Result
// ============================================================================

/// Mutable state of one site's checkin, from token fetch to stats.
#[derive(Debug, Clone, Serialize)]
pub struct SiteResult {
    /// Human-readable site name.
    pub name: String,
    /// Root URL every request of this site is resolved against.
    pub base_url: String,
    /// Anti-forgery token scraped from the landing page.
    pub session_token: Option<String>,
    /// Account display name scraped from the landing page.
    pub account_label: Option<String>,
    headers: Vec<(String, String)>,
    succeeded: bool,
    fragments: Vec<String>,
}

impl SiteResult {
    /// Creates a result with the given request headers.
    ///
    /// Headers are fixed for the lifetime of the result.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        headers: Vec<(String, String)>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            session_token: None,
            account_label: None,
            headers,
            succeeded: false,
            fragments: Vec::new(),
        }
    }

    /// Request headers (cookie, user agent, accept).
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Whether the checkin was confirmed by the site.
    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Records a confirmed checkin. There is no way back to `false`.
    pub fn mark_succeeded(&mut self) {
        self.succeeded = true;
    }

    /// Appends a message fragment. Blank fragments are ignored.
    pub fn push_message(&mut self, fragment: impl Into<String>) {
        let fragment = fragment.into();
        if !fragment.trim().is_empty() {
            self.fragments.push(fragment);
        }
    }

    /// Joins the fragments into one sentence-terminated message.
    ///
    /// Never empty: without fragments the placeholder is returned.
    pub fn message(&self) -> String {
        join_fragments(&self.fragments)
    }
}

// ============================================================================
// Fragment Joining
// ============================================================================

fn ends_with_terminal(text: &str) -> bool {
    text.ends_with(TERMINAL_PUNCTUATION)
}

/// Picks the full stop matching the script of the preceding text.
fn sentence_stop(text: &str) -> char {
    match text.chars().last() {
        Some(c) if !c.is_ascii() => '。',
        _ => '.',
    }
}

fn terminate(text: &mut String) {
    if !ends_with_terminal(text) {
        let stop = sentence_stop(text);
        text.push(stop);
    }
}

fn join_fragments(fragments: &[String]) -> String {
    let mut out = String::new();

    for fragment in fragments {
        let fragment = fragment.trim().trim_end_matches(';').trim_end();
        if fragment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            terminate(&mut out);
            out.push(' ');
        }
        out.push_str(fragment);
    }

    if out.is_empty() {
        return NO_RESULT_MESSAGE.to_string();
    }
    terminate(&mut out);
    out
}

// ============================================================================
// Tests
// ============================================================================
