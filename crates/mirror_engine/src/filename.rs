use std::path::Path;

/// Marker every dumped page carries in its filename, e.g. `wiki?FrontPage.html`.
pub const DUMP_MARKER: &str = "wiki?";

const HTML_SUFFIX: &str = ".html";

/// Mirror filename for a dumped page: the source name with every `marker` removed.
pub fn mirror_filename(source_name: &str, marker: &str) -> String {
    if marker.is_empty() {
        return source_name.to_string();
    }
    source_name.replace(marker, "")
}

/// Name of the page as used in its own self-referencing URLs:
/// the basename with `marker` and `.html` removed.
pub fn page_name(source_name: &str, marker: &str) -> String {
    let base = Path::new(source_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(source_name);
    mirror_filename(base, marker).replace(HTML_SUFFIX, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_removed_from_output_name() {
        assert_eq!(
            mirror_filename("wiki?SomePage.html", DUMP_MARKER),
            "SomePage.html"
        );
        assert_eq!(mirror_filename("index.html", DUMP_MARKER), "index.html");
    }

    #[test]
    fn page_name_drops_marker_and_extension() {
        assert_eq!(page_name("wiki?SomePage.html", DUMP_MARKER), "SomePage");
        assert_eq!(page_name("dump/wiki?OtherPage.html", DUMP_MARKER), "OtherPage");
        assert_eq!(page_name("NoExtension", DUMP_MARKER), "NoExtension");
    }

    #[test]
    fn empty_marker_keeps_name() {
        assert_eq!(mirror_filename("wiki?A.html", ""), "wiki?A.html");
        assert_eq!(page_name("wiki?A.html", ""), "wiki?A");
    }
}
