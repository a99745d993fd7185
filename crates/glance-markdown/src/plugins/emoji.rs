//! Emoji shortcode plugin for markdown-it (`:smile:` → 😄)
//!
//! Shortcodes are resolved against the `emojis` crate's table (the gemoji
//! set). Unknown shortcodes are left untouched.

use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};
use regex::Regex;
use std::sync::OnceLock;

/// AST node for a resolved emoji shortcode
#[derive(Debug, Clone)]
pub struct EmojiNode {
    pub shortcode: String,
    pub glyph: String,
}

impl NodeValue for EmojiNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.text(&self.glyph);
    }
}

fn shortcode_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^:([a-zA-Z0-9_+\-]+):").expect("valid regex"))
}

/// Emoji scanner - matches :shortcode: patterns
pub struct EmojiScanner;

impl InlineRule for EmojiScanner {
    const MARKER: char = ':';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..];

        let caps = shortcode_regex().captures(input)?;
        let shortcode = caps.get(1)?.as_str();
        let emoji = emojis::get_by_shortcode(shortcode)?;

        let node = Node::new(EmojiNode {
            shortcode: shortcode.to_string(),
            glyph: emoji.as_str().to_string(),
        });

        // Consumed: the shortcode plus both colons
        Some((node, shortcode.len() + 2))
    }
}

/// Add the emoji plugin to a markdown-it parser
pub fn add(md: &mut MarkdownIt) {
    md.inline.add_rule::<EmojiScanner>();
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
    fn test_known_shortcode() {
        let html = render("Hello :smile: world");
        assert!(html.contains("😄"));
        assert!(!html.contains(":smile:"));
    }

    #[test]
    fn test_unknown_shortcode_left_alone() {
        let html = render("A :definitely_not_an_emoji: here");
        assert!(html.contains(":definitely_not_an_emoji:"));
    }

    #[test]
    fn test_plus_variant() {
        let html = render("Nice :+1:");
        assert!(html.contains("👍"));
    }
}
