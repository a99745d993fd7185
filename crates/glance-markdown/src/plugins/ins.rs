//! Inserted-text plugin for markdown-it (`++text++` → `<ins>`)

use markdown_it::plugins::cmark::block::paragraph::Paragraph;
use markdown_it::parser::inline::{InlineRule, InlineState, Text};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

/// AST node for inserted text; children are the parsed inner markup.
#[derive(Debug, Clone)]
pub struct InsNode;

impl NodeValue for InsNode {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("ins", &[]);
        fmt.contents(&node.children);
        fmt.close("ins");
    }
}

/// Ins scanner - matches ++text++ spans
pub struct InsScanner;

impl InlineRule for InsScanner {
    const MARKER: char = '+';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..];

        if !input.starts_with("++") {
            return None;
        }

        let end = input[2..].find("++").map(|i| i + 2)?;
        let inner = &input[2..end];
        if inner.trim().is_empty() || inner.contains('\n') {
            return None;
        }

        let mut node = Node::new(InsNode);

        // Reparse the span so nested inline markup works; a single paragraph's
        // children are hoisted, anything odder falls back to literal text.
        let mut parsed = state.md.parse(inner);
        if parsed.children.len() == 1 && parsed.children[0].cast::<Paragraph>().is_some() {
            node.children.append(&mut parsed.children[0].children);
        } else {
            node.children.push(Node::new(Text {
                content: inner.to_string(),
            }));
        }

        Some((node, end + 2))
    }
}

/// Add the inserted-text plugin to a markdown-it parser
pub fn add(md: &mut MarkdownIt) {
    md.inline.add_rule::<InsScanner>();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(input: &str) -> String {
        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        add(&mut md);
        md.parse(input).render()
    }

    #[test]
    fn test_simple_ins() {
        let html = render("This is ++inserted++ text");
        assert!(html.contains("<ins>inserted</ins>"));
    }

    #[test]
    fn test_nested_markup() {
        let html = render("++very *important*++");
        assert!(html.contains("<ins>very <em>important</em></ins>"));
    }

    #[test]
    fn test_unterminated() {
        let html = render("Dangling ++ here");
        assert!(!html.contains("<ins>"));
        assert!(html.contains("++"));
    }

    #[test]
    fn test_empty_span() {
        let html = render("Nothing ++++ inside");
        assert!(!html.contains("<ins>"));
    }
}
