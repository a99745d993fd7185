//! Custom markdown-it plugins making up the Glance rendering chain

pub mod abbr;
pub mod anchors;
pub mod container;
pub mod deflist;
pub mod emoji;
pub mod highlight;
pub mod ins;
pub mod math;
pub mod pre_wrapper;
pub mod tasklist;
pub mod toc;

use markdown_it::parser::inline::Text;
use markdown_it::Node;

/// Collect the plain text of a node and its descendants.
pub(crate) fn collect_text(node: &Node) -> String {
    let mut text = String::new();

    if let Some(text_node) = node.cast::<Text>() {
        text.push_str(&text_node.content);
    }

    for child in node.children.iter() {
        text.push_str(&collect_text(child));
    }

    text
}
