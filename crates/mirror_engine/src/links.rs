//! Rewriting of legacy c2 wiki URLs into paths relative to the mirror.
//!
//! Mirrored pages live under `wiki/`, so site-wide endpoints are one level up:
//!
//! - Single page:  `/wiki/<page>`
//! - Title search: `/wiki/`
//! - Full search:  `/fullSearch`
//! - Logo:         `/static/wiki.gif`

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use scraper::node::Node;
use scraper::Html;

/// Attributes that carry URLs on any element.
pub const URL_ATTRIBUTES: &[&str] = &["src", "href", "action"];

/// Everything but ASCII letters, digits, `_.-~` and `/` is escaped in the search page name.
const PAGE_QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlPattern {
    Exact(&'static str),
    Prefix(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlAction {
    /// Full-text search scoped to the current page.
    SearchCurrentPage,
    /// Replace the whole URL with a fixed path.
    Fixed(&'static str),
    /// Keep what follows the prefix.
    Remainder,
    /// Keep what follows the prefix, minus a trailing suffix of this many characters.
    RemainderTrimmed(usize),
    /// Keep what follows the prefix, behind a new base path.
    Rebased(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRule {
    pub pattern: UrlPattern,
    pub action: UrlAction,
}

impl RewriteRule {
    const fn new(pattern: UrlPattern, action: UrlAction) -> Self {
        Self { pattern, action }
    }

    /// Returns the rewritten URL if this rule matches.
    pub fn apply(&self, url: &str, page: &str) -> Option<String> {
        let rest = match self.pattern {
            UrlPattern::Exact(literal) => (url == literal).then_some("")?,
            UrlPattern::Prefix(prefix) => url.strip_prefix(prefix)?,
        };
        let rewritten = match self.action {
            UrlAction::SearchCurrentPage => format!("../fullSearch?search={}", escape_query(page)),
            UrlAction::Fixed(path) => path.to_string(),
            UrlAction::Remainder => rest.to_string(),
            UrlAction::RemainderTrimmed(suffix_chars) => {
                trim_trailing_chars(rest, suffix_chars).to_string()
            }
            UrlAction::Rebased(base) => format!("{base}{rest}"),
        };
        Some(rewritten)
    }
}

/// Ordered rewrite table; the first matching rule wins.
pub const REWRITE_RULES: &[RewriteRule] = &[
    RewriteRule::new(
        UrlPattern::Exact("http://c2.com/cgi/fullSearch"),
        UrlAction::SearchCurrentPage,
    ),
    RewriteRule::new(
        UrlPattern::Exact("http://c2.com/sig/wiki.gif"),
        UrlAction::Fixed("../static/wiki.gif"),
    ),
    RewriteRule::new(
        UrlPattern::Exact("http://c2.com/wiki.png"),
        UrlAction::Fixed("../static/wiki.gif"),
    ),
    RewriteRule::new(
        UrlPattern::Exact("http://c2.com/cgi/wiki"),
        UrlAction::Fixed("../wiki"),
    ),
    // Links between dumped pages: `wiki%3FPage.html`.
    RewriteRule::new(
        UrlPattern::Prefix("wiki%3F"),
        UrlAction::RemainderTrimmed(".html".len()),
    ),
    RewriteRule::new(
        UrlPattern::Prefix("http://c2.com/cgi/wiki?edit="),
        UrlAction::Remainder,
    ),
    RewriteRule::new(
        UrlPattern::Prefix("http://c2.com/cgi/quickDiff?"),
        UrlAction::Remainder,
    ),
    RewriteRule::new(
        UrlPattern::Prefix("http://c2.com/cgi/wiki?"),
        UrlAction::Remainder,
    ),
    RewriteRule::new(
        UrlPattern::Prefix("http://c2.com/cgi/fullSearch"),
        UrlAction::Rebased("../fullSearch"),
    ),
];

/// Converts a c2 wiki URL into a URL relative to the mirrored `page`.
/// URLs matching no rule are returned unchanged.
pub fn map_url(url: &str, page: &str) -> String {
    REWRITE_RULES
        .iter()
        .find_map(|rule| rule.apply(url, page))
        .unwrap_or_else(|| url.to_string())
}

/// Applies [`map_url`] to every `src`, `href` and `action` attribute in the document.
/// Returns the number of attribute values that changed.
pub fn rewrite_document_links(doc: &mut Html, page: &str) -> usize {
    let element_ids: Vec<_> = doc
        .tree
        .nodes()
        .filter(|node| node.value().is_element())
        .map(|node| node.id())
        .collect();

    let mut changed = 0;
    for id in element_ids {
        let Some(mut node) = doc.tree.get_mut(id) else {
            continue;
        };
        let Node::Element(element) = node.value() else {
            continue;
        };
        for (name, value) in element.attrs.iter_mut() {
            let attr: &str = &name.local;
            if !URL_ATTRIBUTES.iter().any(|candidate| *candidate == attr) {
                continue;
            }
            let rewritten = map_url(&**value, page);
            if rewritten.as_str() != &**value {
                *value = rewritten.into();
                changed += 1;
            }
        }
    }
    changed
}

fn escape_query(value: &str) -> String {
    utf8_percent_encode(value, PAGE_QUERY).to_string()
}

fn trim_trailing_chars(text: &str, count: usize) -> &str {
    if count == 0 {
        return text;
    }
    match text.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &text[..idx],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::{escape_query, trim_trailing_chars};

    #[test]
    fn query_escaping_keeps_path_safe_characters() {
        assert_eq!(escape_query("Front Page"), "Front%20Page");
        assert_eq!(escape_query("a/b~c_d.e-f"), "a/b~c_d.e-f");
        assert_eq!(escape_query("Q&A=?+#"), "Q%26A%3D%3F%2B%23");
        assert_eq!(escape_query("Caf\u{e9}"), "Caf%C3%A9");
    }

    #[test]
    fn trims_by_characters_not_bytes() {
        assert_eq!(trim_trailing_chars("Caf\u{e9}Page.html", 5), "Caf\u{e9}Page");
        assert_eq!(trim_trailing_chars("ab\u{e9}", 1), "ab");
    }

    #[test]
    fn short_input_trims_to_empty() {
        assert_eq!(trim_trailing_chars(".htm", 5), "");
        assert_eq!(trim_trailing_chars(".html", 5), "");
        assert_eq!(trim_trailing_chars("", 5), "");
    }

    #[test]
    fn zero_count_keeps_text() {
        assert_eq!(trim_trailing_chars("abc", 0), "abc");
    }
}
