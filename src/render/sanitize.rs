//! Raw HTML filtering
//!
//! Markdown may embed raw HTML. Only presentation tags from [`ALLOWED_TAGS`]
//! survive, and never with their attributes. The content of
//! [`STRIPPED_TAGS`] is removed along with the tags. Every other tag is
//! dropped and its text kept.

use std::sync::OnceLock;

use regex_lite::Regex;

/// Tags re-emitted (without attributes) when found in raw HTML
pub const ALLOWED_TAGS: &[&str] = &[
    "abbr", "b", "br", "cite", "del", "div", "em", "hr", "i", "ins", "kbd", "mark", "p", "q",
    "s", "small", "span", "strong", "sub", "sup", "u", "wbr",
];

/// Tags without content or closing tag
pub const VOID_TAGS: &[&str] = &["br", "hr", "img", "wbr"];

/// Tags whose whole content is removed
pub const STRIPPED_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "template", "noscript", "textarea",
];

const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// One piece of a raw HTML fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlToken {
    Open(&'static str),
    Close(&'static str),
    Void(&'static str),
    Text(String),
    /// Opening tag of a [`STRIPPED_TAGS`] element
    EnterStripped(&'static str),
    /// Closing tag of a [`STRIPPED_TAGS`] element
    LeaveStripped(&'static str),
}

fn tag_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9-]*)((?:[^>\x22']|\x22[^\x22]*\x22|'[^']*')*)>")
                .ok()
        })
        .as_ref()
}

fn lookup(list: &[&'static str], name: &str) -> Option<&'static str> {
    list.iter().copied().find(|t| t.eq_ignore_ascii_case(name))
}

/// Split a raw HTML fragment into filtered tokens
pub fn tokenize(fragment: &str) -> Vec<HtmlToken> {
    let mut tokens = Vec::new();
    let Some(pattern) = tag_pattern() else {
        push_text(&mut tokens, fragment);
        return tokens;
    };

    let mut last = 0;
    for cap in pattern.captures_iter(fragment) {
        let Some(whole) = cap.get(0) else { continue };
        push_text(&mut tokens, &fragment[last..whole.start()]);
        last = whole.end();

        // Comments carry no tag name
        let Some(name) = cap.get(2).map(|m| m.as_str()) else {
            continue;
        };
        let closing = cap.get(1).is_some_and(|m| !m.as_str().is_empty());
        let self_closing = cap
            .get(3)
            .is_some_and(|m| m.as_str().trim_end().ends_with('/'));

        if let Some(tag) = lookup(STRIPPED_TAGS, name) {
            tokens.push(if closing {
                HtmlToken::LeaveStripped(tag)
            } else {
                HtmlToken::EnterStripped(tag)
            });
        } else if let Some(tag) = lookup(ALLOWED_TAGS, name) {
            if VOID_TAGS.contains(&tag) {
                if !closing {
                    tokens.push(HtmlToken::Void(tag));
                }
            } else if closing {
                tokens.push(HtmlToken::Close(tag));
            } else {
                tokens.push(HtmlToken::Open(tag));
                if self_closing {
                    tokens.push(HtmlToken::Close(tag));
                }
            }
        }
    }
    push_text(&mut tokens, &fragment[last..]);
    tokens
}

fn push_text(tokens: &mut Vec<HtmlToken>, text: &str) {
    if text.is_empty() {
        return;
    }
    let text = decode_entities(text);
    if let Some(HtmlToken::Text(prev)) = tokens.last_mut() {
        prev.push_str(&text);
    } else {
        tokens.push(HtmlToken::Text(text));
    }
}

/// Decode the basic character entities of raw HTML text
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

/// Whether a link or image URL may be emitted
///
/// Relative URLs, fragments and the `http`, `https` and `mailto` schemes
/// are allowed.
pub fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();

    let scheme_end = cleaned.find(':');
    let path_start = cleaned.find(|c: char| matches!(c, '/' | '?' | '#'));
    match (scheme_end, path_start) {
        (Some(colon), Some(path)) if path < colon => true,
        (Some(colon), _) => {
            let scheme = cleaned[..colon].to_ascii_lowercase();
            SAFE_SCHEMES.contains(&scheme.as_str())
        }
        (None, _) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_tags_lose_attributes() {
        assert_eq!(
            tokenize(r#"<span style="color:red" onclick="x()">rouge</span>"#),
            vec![
                HtmlToken::Open("span"),
                HtmlToken::Text("rouge".to_string()),
                HtmlToken::Close("span"),
            ]
        );
    }

    #[test]
    fn test_script_is_marked_for_stripping() {
        assert_eq!(
            tokenize("<SCRIPT>alert(1)</script>"),
            vec![
                HtmlToken::EnterStripped("script"),
                HtmlToken::Text("alert(1)".to_string()),
                HtmlToken::LeaveStripped("script"),
            ]
        );
    }

    #[test]
    fn test_unknown_tags_are_dropped() {
        assert_eq!(
            tokenize(r#"<a href="javascript:x">lien</a><img src=x onerror="y">"#),
            vec![HtmlToken::Text("lien".to_string())]
        );
    }

    #[test]
    fn test_void_and_self_closing() {
        assert_eq!(
            tokenize("a<br/>b<br>"),
            vec![
                HtmlToken::Text("a".to_string()),
                HtmlToken::Void("br"),
                HtmlToken::Text("b".to_string()),
                HtmlToken::Void("br"),
            ]
        );
    }

    #[test]
    fn test_comments_and_entities() {
        assert_eq!(
            tokenize("<!-- <script> -->x &lt;y&gt; &amp;lt;"),
            vec![HtmlToken::Text("x <y> &lt;".to_string())]
        );
    }

    #[test]
    fn test_attribute_with_angle_bracket() {
        assert_eq!(
            tokenize(r#"<b title="a>b">gras</b>"#),
            vec![
                HtmlToken::Open("b"),
                HtmlToken::Text("gras".to_string()),
                HtmlToken::Close("b"),
            ]
        );
    }

    #[test]
    fn test_safe_urls() {
        assert!(is_safe_url("https://wordpress.org"));
        assert!(is_safe_url("mailto:contact@example.com"));
        assert!(is_safe_url("/article/guide-seo"));
        assert!(is_safe_url("#introduction"));
        assert!(is_safe_url("images/a:b.png"));
        assert!(!is_safe_url("javascript:alert(1)"));
        assert!(!is_safe_url("  JaVa\tScRiPt:alert(1)"));
        assert!(!is_safe_url("data:text/html;base64,AAAA"));
        assert!(!is_safe_url("vbscript:msgbox"));
    }
}
