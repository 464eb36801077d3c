//! Success phrase matching.

/// Decides whether a checkin response confirms the checkin.
///
/// A message matches when it contains any of the site's phrases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuccessMatcher {
    phrases: Vec<String>,
}

impl SuccessMatcher {
    /// Creates a matcher. Blank phrases are dropped so they cannot match everything.
    pub fn new(phrases: impl IntoIterator<Item = String>) -> Self {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Returns the first phrase found in `message`.
    pub fn find(&self, message: &str) -> Option<&str> {
        self.phrases
            .iter()
            .find(|phrase| message.contains(phrase.as_str()))
            .map(String::as_str)
    }

    /// True if `message` contains any phrase.
    pub fn matches(&self, message: &str) -> bool {
        self.find(message).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> SuccessMatcher {
        SuccessMatcher::new(["签到成功", "已签过到", " "].map(String::from))
    }

    #[test]
    fn test_matches_substring() {
        let m = matcher();
        assert!(m.matches("恭喜您，签到成功！获得 3 K币"));
        assert_eq!(m.find("您今天已签过到了"), Some("已签过到"));
    }

    #[test]
    fn test_no_match() {
        let m = matcher();
        assert!(!m.matches("请先登录"));
        assert!(!m.matches(""));
    }

    #[test]
    fn test_empty_matcher_never_matches() {
        assert!(!SuccessMatcher::default().matches("anything"));
    }
}
