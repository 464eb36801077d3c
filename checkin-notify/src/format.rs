//! Per-channel body formatting.
//!
//! The report body uses `**name**` for site names. Each service renders
//! markdown differently, so the body is adapted before sending.

/// Characters Telegram reserves in `MarkdownV2`.
const MARKDOWN_V2_RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Server-chan body: every emphasis marker becomes a plain dash.
pub fn serverchan_body(body: &str) -> String {
    body.replace("**", "*").replace('*', "-")
}

/// Bark body: plain text without emphasis markers.
pub fn bark_plain(body: &str) -> String {
    body.replace('*', "")
}

/// Escapes every `MarkdownV2` reserved character with a backslash.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Telegram message text: bold title, blank line, body.
///
/// `**x**` spans stay bold, stray `*` become `-`, and all text is escaped.
pub fn telegram_text(title: &str, body: &str) -> String {
    format!("*{}*\n\n{}", escape_markdown_v2(title), telegram_body(body))
}

fn telegram_body(body: &str) -> String {
    let parts: Vec<&str> = body.split("**").collect();
    // An even count means the last marker has no partner.
    let paired = if parts.len() % 2 == 0 {
        parts.len() - 1
    } else {
        parts.len()
    };

    let mut out = String::with_capacity(body.len() + body.len() / 4);
    for (i, part) in parts[..paired].iter().enumerate() {
        let text = escape_markdown_v2(&part.replace('*', "-"));
        if i % 2 == 1 {
            out.push('*');
            out.push_str(&text);
            out.push('*');
        } else {
            out.push_str(&text);
        }
    }
    if paired < parts.len() {
        let rest = format!("**{}", parts[paired]);
        out.push_str(&escape_markdown_v2(&rest.replace('*', "-")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serverchan_body() {
        assert_eq!(
            serverchan_body("**4K视界**: ok\n\n*note*"),
            "-4K视界-: ok\n\n-note-"
        );
    }

    #[test]
    fn test_bark_plain() {
        assert_eq!(bark_plain("**SiteA**: done *really*"), "SiteA: done really");
    }

    #[test]
    fn test_escape_leaves_unreserved() {
        assert_eq!(escape_markdown_v2("Result: 100%"), "Result: 100%");
        assert_eq!(escape_markdown_v2("v1.2!"), "v1\\.2\\!");
        assert_eq!(escape_markdown_v2("a_b(c)"), "a\\_b\\(c\\)");
    }

    #[test]
    fn test_telegram_text_title() {
        let text = telegram_text("Result: 100%", "done.");
        assert_eq!(text, "*Result: 100%*\n\ndone\\.");
    }

    #[test]
    fn test_telegram_keeps_bold_names() {
        let text = telegram_text("t", "**SiteA**: ok.\n\n**SiteB**: a*b");
        assert_eq!(text, "*t*\n\n*SiteA*: ok\\.\n\n*SiteB*: a\\-b");
    }

    #[test]
    fn test_telegram_unpaired_marker() {
        let text = telegram_text("t", "**x** and ** y");
        assert_eq!(text, "*t*\n\n*x* and \\-\\- y");
    }

    #[test]
    fn test_telegram_empty_body() {
        assert_eq!(telegram_text("t", ""), "*t*\n\n");
    }
}
