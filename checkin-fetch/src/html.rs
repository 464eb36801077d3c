//! Selector-based HTML extraction.
//!
//! [`HtmlPage`] is not `Send`; parse and extract inside one synchronous
//! function and hand back owned strings.

use scraper::{Html, Selector};

use crate::error::FetchError;

/// A parsed HTML document.
pub struct HtmlPage {
    document: Html,
}

impl HtmlPage {
    /// Parses a decoded document. Parsing is tolerant and never fails.
    pub fn parse(text: &str) -> Self {
        Self {
            document: Html::parse_document(text),
        }
    }

    fn selector(css: &str) -> Result<Selector, FetchError> {
        Selector::parse(css).map_err(|e| FetchError::Selector {
            selector: css.to_string(),
            message: e.to_string(),
        })
    }

    /// Text of the first element matching `css`, whitespace collapsed.
    ///
    /// Returns `None` when nothing matches or the text is blank.
    pub fn text(&self, css: &str) -> Result<Option<String>, FetchError> {
        let selector = Self::selector(css)?;
        Ok(self
            .document
            .select(&selector)
            .next()
            .map(|element| collapse_whitespace(&element.text().collect::<String>()))
            .filter(|text| !text.is_empty()))
    }

    /// Attribute `name` of the first element matching `css` that carries a non-blank value.
    pub fn attr(&self, css: &str, name: &str) -> Result<Option<String>, FetchError> {
        let selector = Self::selector(css)?;
        Ok(self
            .document
            .select(&selector)
            .filter_map(|element| element.value().attr(name))
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map(str::to_string))
    }
}

/// Collapses runs of whitespace into single spaces and trims.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="nexmemberintels"><h5>
              alice
              <em>VIP</em>
          </h5></div>
          <form id="scbar_form">
            <input type="hidden" name="mod" value="search">
            <input type="hidden" name="formhash" value="a1b2c3d4">
          </form>
          <div id="messagetext"><p>   </p></div>
        </body></html>
    "#;

    #[test]
    fn test_text_collapses_whitespace() {
        let page = HtmlPage::parse(PAGE);
        assert_eq!(
            page.text(".nexmemberintels > h5").unwrap().as_deref(),
            Some("alice VIP")
        );
    }

    #[test]
    fn test_blank_text_is_none() {
        let page = HtmlPage::parse(PAGE);
        assert_eq!(page.text("#messagetext > p").unwrap(), None);
        assert_eq!(page.text("#missing").unwrap(), None);
    }

    #[test]
    fn test_attr() {
        let page = HtmlPage::parse(PAGE);
        assert_eq!(
            page.attr(r#"#scbar_form input[name="formhash"]"#, "value")
                .unwrap()
                .as_deref(),
            Some("a1b2c3d4")
        );
        assert_eq!(
            page.attr("#scbar_form input:nth-child(2)", "value")
                .unwrap()
                .as_deref(),
            Some("a1b2c3d4")
        );
        assert_eq!(page.attr("#scbar_form", "missing").unwrap(), None);
    }

    #[test]
    fn test_invalid_selector() {
        let page = HtmlPage::parse(PAGE);
        let err = page.text("div[").unwrap_err();
        assert!(matches!(err, FetchError::Selector { .. }));
    }
}
