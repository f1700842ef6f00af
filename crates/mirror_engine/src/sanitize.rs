use scraper::Html;

/// Detaches every `<script>` element from the document and returns how many were removed.
///
/// The dumped pages only use scripts for analytics; anything dynamic the
/// mirror keeps is driven by plain forms.
pub fn strip_scripts(doc: &mut Html) -> usize {
    let script_ids: Vec<_> = doc
        .tree
        .nodes()
        .filter(|node| {
            node.value()
                .as_element()
                .is_some_and(|element| element.name() == "script")
        })
        .map(|node| node.id())
        .collect();

    let mut removed = 0;
    for id in script_ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
            removed += 1;
        }
    }
    removed
}

/// Removes control characters from serialized output: every code point below
/// 0x20 except `\r` and `\n`, plus 0x7F.
pub fn make_printable(text: &str) -> String {
    text.chars().filter(|&ch| is_printable(ch)).collect()
}

fn is_printable(ch: char) -> bool {
    matches!(ch, '\r' | '\n') || (ch >= ' ' && ch != '\u{7f}')
}
