//! Definition list plugin for markdown-it
//!
//! Implements the markdown-it-deflist syntax:
//! ```text
//! Term
//! : First definition
//! : Second definition
//! ```
//!
//! Terms are inline-parsed; definitions are block-parsed, with a lone
//! paragraph rendered tight (no `<p>` wrapper).

use markdown_it::parser::block::{BlockRule, BlockState};
use markdown_it::parser::inline::InlineRoot;
use markdown_it::plugins::cmark::block::paragraph::Paragraph;
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct DefinitionList;

impl NodeValue for DefinitionList {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        fmt.cr();
        fmt.open("dl", &[]);
        fmt.cr();
        fmt.contents(&node.children);
        fmt.cr();
        fmt.close("dl");
        fmt.cr();
    }
}

#[derive(Debug, Clone)]
pub struct DefinitionTerm;

impl NodeValue for DefinitionTerm {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("dt", &[]);
        fmt.contents(&node.children);
        fmt.close("dt");
        fmt.cr();
    }
}

#[derive(Debug, Clone)]
pub struct DefinitionDescription;

impl NodeValue for DefinitionDescription {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("dd", &[]);
        fmt.contents(&node.children);
        fmt.close("dd");
        fmt.cr();
    }
}

fn definition_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^:[ \t]+(\S.*)$").expect("valid regex"))
}

/// Definition list scanner - a term line followed by `: definition` lines
pub struct DefListScanner;

impl BlockRule for DefListScanner {
    fn check(state: &mut BlockState) -> Option<()> {
        let term = state.get_line(state.line);
        if term.trim().is_empty() || term.starts_with(':') {
            return None;
        }
        if state.line + 1 >= state.line_max {
            return None;
        }
        let next = state.get_line(state.line + 1);
        if definition_regex().is_match(&next) {
            Some(())
        } else {
            None
        }
    }

    fn run(state: &mut BlockState) -> Option<(Node, usize)> {
        let start_line = state.line;
        let mut line_no = start_line;
        let mut items: Vec<(String, Vec<String>)> = Vec::new();

        while line_no < state.line_max {
            let term = state.get_line(line_no).trim().to_string();
            if term.is_empty() || term.starts_with(':') {
                break;
            }
            if line_no + 1 >= state.line_max {
                break;
            }
            if !definition_regex().is_match(&state.get_line(line_no + 1)) {
                break;
            }

            let mut defs: Vec<String> = Vec::new();
            let mut current = line_no + 1;
            while current < state.line_max {
                let line = state.get_line(current);
                if let Some(caps) = definition_regex().captures(&line) {
                    defs.push(caps[1].to_string());
                    current += 1;
                } else if line.starts_with("  ") && !line.trim().is_empty() {
                    // Indented continuation of the previous definition
                    if let Some(last) = defs.last_mut() {
                        last.push('\n');
                        last.push_str(line.trim());
                    }
                    current += 1;
                } else {
                    break;
                }
            }

            items.push((term, defs));
            line_no = current;
        }

        if items.is_empty() {
            return None;
        }

        let mut node = Node::new(DefinitionList);
        for (term, defs) in items {
            let mut dt = Node::new(DefinitionTerm);
            dt.children
                .push(Node::new(InlineRoot::new(term, vec![(0, 0)])));
            node.children.push(dt);

            for def in defs {
                let mut dd = Node::new(DefinitionDescription);
                let mut parsed = state.md.parse(&def);
                if parsed.children.len() == 1
                    && parsed.children[0].cast::<Paragraph>().is_some()
                {
                    // Tight rendering: hoist the lone paragraph's inline content
                    dd.children.append(&mut parsed.children[0].children);
                } else {
                    dd.children.append(&mut parsed.children);
                }
                node.children.push(dd);
            }
        }

        let lines_consumed = line_no - start_line;
        node.srcmap = state.get_map(start_line, line_no - 1);

        Some((node, lines_consumed))
    }
}

/// Add the definition list plugin to a markdown-it parser
pub fn add(md: &mut MarkdownIt) {
    md.block
        .add_rule::<DefListScanner>()
        .before::<markdown_it::plugins::cmark::block::blockquote::BlockquoteScanner>();
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
    fn test_single_definition() {
        let html = render("Term\n: Definition");
        assert!(html.contains("<dl>"));
        assert!(html.contains("<dt>Term</dt>"));
        assert!(html.contains("<dd>Definition</dd>"));
    }

    #[test]
    fn test_multiple_definitions_per_term() {
        let html = render("Term\n: First\n: Second");
        assert_eq!(html.matches("<dd>").count(), 2);
    }

    #[test]
    fn test_multiple_terms() {
        let html = render("Alpha\n: One\nBeta\n: Two");
        assert_eq!(html.matches("<dt>").count(), 2);
        assert_eq!(html.matches("<dl>").count(), 1);
    }

    #[test]
    fn test_inline_markup_in_term() {
        let html = render("*Styled* term\n: Plain definition");
        assert!(html.contains("<dt><em>Styled</em> term</dt>"));
    }

    #[test]
    fn test_plain_paragraph_untouched() {
        let html = render("Just text\n\nMore text");
        assert!(!html.contains("<dl>"));
    }
}
