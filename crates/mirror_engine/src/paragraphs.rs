//! Paragraph regrouping for the wiki article container.
//!
//! The wiki renderer does not wrap paragraphs. It drops an empty `<p>` between
//! runs of content instead:
//!
//! ```text
//! <div id="wiki">
//!  paragraph 1 text text text
//!  <p></p>
//!  paragraph 2 text text text
//!  <p></p>
//!  paragraph 3 text text text
//! </div>
//! ```
//!
//! Regrouping moves each run into a real paragraph. `<hr>` also ends a run but
//! stays in the output as its own sibling.

use std::mem;

use ego_tree::NodeId;
use scraper::node::Node;
use scraper::{Html, Selector};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParagraphError {
    #[error("invalid article selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
    #[error("no element matches the article selector")]
    MissingArticle,
    #[error("could not build a paragraph element")]
    ParagraphTemplate,
}

/// How a direct child of the article container takes part in regrouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    /// A `<p>` marker; ends the pending run and becomes its paragraph.
    Paragraph,
    /// An `<hr>`; ends the pending run and is kept as a sibling.
    Rule,
    /// Text, comments and any other element.
    Loose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<T> {
    /// `marker` is the `<p>` that closed the run, `None` for a synthesized paragraph.
    Paragraph { marker: Option<T>, contents: Vec<T> },
    Rule(T),
}

/// Folds the ordered children of the article into output blocks.
///
/// Every loose child lands in exactly one paragraph, in order. Rules are kept
/// one-for-one. A `<p>` marker with nothing pending is dropped.
pub fn regroup<T, I>(children: I) -> Vec<Block<T>>
where
    I: IntoIterator<Item = (ChildKind, T)>,
{
    let mut blocks = Vec::new();
    let mut pending = Vec::new();

    for (kind, child) in children {
        match kind {
            ChildKind::Loose => pending.push(child),
            ChildKind::Paragraph => {
                if !pending.is_empty() {
                    blocks.push(Block::Paragraph {
                        marker: Some(child),
                        contents: mem::take(&mut pending),
                    });
                }
            }
            ChildKind::Rule => {
                if !pending.is_empty() {
                    blocks.push(Block::Paragraph {
                        marker: None,
                        contents: mem::take(&mut pending),
                    });
                }
                blocks.push(Block::Rule(child));
            }
        }
    }

    if !pending.is_empty() {
        blocks.push(Block::Paragraph {
            marker: None,
            contents: pending,
        });
    }
    blocks
}

pub fn classify(node: &Node) -> ChildKind {
    match node {
        Node::Element(element) if element.name() == "p" => ChildKind::Paragraph,
        Node::Element(element) if element.name() == "hr" => ChildKind::Rule,
        _ => ChildKind::Loose,
    }
}

pub fn article_selector(css: &str) -> Result<Selector, ParagraphError> {
    Selector::parse(css).map_err(|err| ParagraphError::InvalidSelector {
        selector: css.to_string(),
        message: format!("{err:?}"),
    })
}

/// Regroups the direct children of the first element matching `selector`.
/// Returns the number of paragraphs in the rebuilt container.
pub fn regroup_article(doc: &mut Html, selector: &Selector) -> Result<usize, ParagraphError> {
    let article_id = doc
        .select(selector)
        .next()
        .map(|article| article.id())
        .ok_or(ParagraphError::MissingArticle)?;

    let children: Vec<(ChildKind, NodeId)> = match doc.tree.get(article_id) {
        Some(article) => article
            .children()
            .map(|child| (classify(child.value()), child.id()))
            .collect(),
        None => Vec::new(),
    };

    for (_, id) in &children {
        if let Some(mut child) = doc.tree.get_mut(*id) {
            child.detach();
        }
    }

    let template = paragraph_template().ok_or(ParagraphError::ParagraphTemplate)?;
    let mut paragraphs = 0;

    for block in regroup(children) {
        let block_id = match block {
            Block::Rule(id) => id,
            Block::Paragraph { marker, contents } => {
                let paragraph_id = match marker {
                    Some(id) => id,
                    None => doc.tree.orphan(template.clone()).id(),
                };
                if let Some(mut paragraph) = doc.tree.get_mut(paragraph_id) {
                    for child in contents {
                        paragraph.append_id(child);
                    }
                }
                paragraphs += 1;
                paragraph_id
            }
        };
        if let Some(mut article) = doc.tree.get_mut(article_id) {
            article.append_id(block_id);
        }
    }

    Ok(paragraphs)
}

/// A bare `<p>` element node, taken from a parsed fragment so it carries the
/// same namespace and name the parser gives to `<p>` markers.
fn paragraph_template() -> Option<Node> {
    let fragment = Html::parse_fragment("<p></p>");
    let selector = Selector::parse("p").ok()?;
    fragment
        .select(&selector)
        .next()
        .map(|paragraph| Node::Element(paragraph.value().clone()))
}
