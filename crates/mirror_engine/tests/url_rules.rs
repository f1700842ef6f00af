use mirror_engine::{map_url, UrlPattern, REWRITE_RULES};
use pretty_assertions::assert_eq;

#[test]
fn full_search_endpoint_searches_current_page() {
    assert_eq!(
        map_url("http://c2.com/cgi/fullSearch", "CurrentPage"),
        "../fullSearch?search=CurrentPage"
    );
}

#[test]
fn full_search_escapes_page_name() {
    assert_eq!(
        map_url("http://c2.com/cgi/fullSearch", "Current Page&More"),
        "../fullSearch?search=Current%20Page%26More"
    );
}

#[test]
fn both_logo_urls_map_to_static_logo() {
    assert_eq!(map_url("http://c2.com/sig/wiki.gif", "X"), "../static/wiki.gif");
    assert_eq!(map_url("http://c2.com/wiki.png", "X"), "../static/wiki.gif");
}

#[test]
fn wiki_endpoint_maps_to_title_search() {
    assert_eq!(map_url("http://c2.com/cgi/wiki", "X"), "../wiki");
}

#[test]
fn dumped_page_links_lose_marker_and_extension() {
    assert_eq!(map_url("wiki%3FSomePage.html", "X"), "SomePage");
    assert_eq!(map_url("wiki%3F.html", "X"), "");
}

#[test]
fn edit_links_keep_page_name() {
    assert_eq!(
        map_url("http://c2.com/cgi/wiki?edit=SomePage", "CurrentPage"),
        "SomePage"
    );
}

#[test]
fn quick_diff_links_keep_remainder() {
    assert_eq!(map_url("http://c2.com/cgi/quickDiff?SomePage", "X"), "SomePage");
}

#[test]
fn generic_wiki_links_keep_remainder() {
    assert_eq!(map_url("http://c2.com/cgi/wiki?SomePage", "X"), "SomePage");
    assert_eq!(
        map_url("http://c2.com/cgi/wiki?back=SomePage", "X"),
        "back=SomePage"
    );
}

#[test]
fn full_search_with_query_is_rebased() {
    assert_eq!(
        map_url("http://c2.com/cgi/fullSearch?search=Patterns", "X"),
        "../fullSearch?search=Patterns"
    );
}

#[test]
fn edit_rule_wins_over_generic_rule() {
    // The generic rule alone would yield "edit=Page".
    assert_eq!(map_url("http://c2.com/cgi/wiki?edit=Page", "X"), "Page");
}

#[test]
fn unrelated_urls_are_unchanged() {
    assert_eq!(
        map_url("http://example.com/unrelated", "X"),
        "http://example.com/unrelated"
    );
    assert_eq!(map_url("http://c2.com/cgi/wikiX", "X"), "http://c2.com/cgi/wikiX");
    assert_eq!(map_url("", "X"), "");
}

#[test]
fn prefix_lengths_match_stripped_offsets() {
    let lengths: Vec<(&str, usize)> = REWRITE_RULES
        .iter()
        .filter_map(|rule| match rule.pattern {
            UrlPattern::Prefix(prefix) => Some((prefix, prefix.len())),
            UrlPattern::Exact(_) => None,
        })
        .collect();

    assert_eq!(
        lengths,
        vec![
            ("wiki%3F", 7),
            ("http://c2.com/cgi/wiki?edit=", 28),
            ("http://c2.com/cgi/quickDiff?", 28),
            ("http://c2.com/cgi/wiki?", 23),
            ("http://c2.com/cgi/fullSearch", 28),
        ]
    );
}
