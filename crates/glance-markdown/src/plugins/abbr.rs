//! Abbreviation plugin for markdown-it
//!
//! Definitions use the markdown-it-abbr syntax:
//! ```text
//! *[HTML]: Hyper Text Markup Language
//!
//! HTML pages everywhere.
//! ```
//!
//! Definition lines are consumed by a block rule and render nothing; a tree
//! pass after inline parsing replaces matching words in text with
//! `<abbr title="...">` elements.

use markdown_it::parser::block::{BlockRule, BlockState};
use markdown_it::parser::core::CoreRule;
use markdown_it::parser::inline::Text;
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// AST node for a definition line. Renders nothing.
#[derive(Debug, Clone)]
pub struct AbbrDefinition {
    pub label: String,
    pub title: String,
}

impl NodeValue for AbbrDefinition {
    fn render(&self, _node: &Node, _fmt: &mut dyn Renderer) {}
}

/// AST node for one substituted occurrence. The label lives in a `Text`
/// child so later tree passes (heading slugs, toc titles) still see the word.
#[derive(Debug, Clone)]
pub struct AbbrNode {
    pub label: String,
    pub title: String,
}

impl NodeValue for AbbrNode {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("abbr", &[("title", self.title.clone())]);
        fmt.contents(&node.children);
        fmt.close("abbr");
    }
}

fn definition_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\*\[([^\]]+)\]:\s*(\S.*)$").expect("valid regex"))
}

/// Abbreviation scanner - matches *[label]: title lines
pub struct AbbrScanner;

impl BlockRule for AbbrScanner {
    fn check(state: &mut BlockState) -> Option<()> {
        let line = state.get_line(state.line);
        if definition_regex().is_match(&line) {
            Some(())
        } else {
            None
        }
    }

    fn run(state: &mut BlockState) -> Option<(Node, usize)> {
        let line = state.get_line(state.line);
        let caps = definition_regex().captures(&line)?;

        let mut node = Node::new(AbbrDefinition {
            label: caps.get(1)?.as_str().to_string(),
            title: caps.get(2)?.as_str().trim().to_string(),
        });
        node.srcmap = state.get_map(state.line, state.line);

        Some((node, 1))
    }
}

/// Tree pass replacing defined labels in text with abbr elements
pub struct AbbrSubstituteRule;

impl CoreRule for AbbrSubstituteRule {
    fn run(root: &mut Node, _md: &MarkdownIt) {
        let mut defs = HashMap::new();
        collect_definitions(root, &mut defs);
        if defs.is_empty() {
            return;
        }

        // Longest label wins when two match at the same position
        let mut labels: Vec<String> = defs.keys().cloned().collect();
        labels.sort_by(|a, b| b.len().cmp(&a.len()));

        substitute(root, &labels, &defs);
    }
}

fn collect_definitions(node: &Node, defs: &mut HashMap<String, String>) {
    if let Some(def) = node.cast::<AbbrDefinition>() {
        defs.insert(def.label.clone(), def.title.clone());
    }
    for child in node.children.iter() {
        collect_definitions(child, defs);
    }
}

fn substitute(node: &mut Node, labels: &[String], defs: &HashMap<String, String>) {
    if node.cast::<AbbrNode>().is_some() {
        // Already substituted (container bodies are parsed with the same rules)
        return;
    }

    for child in node.children.iter_mut() {
        substitute(child, labels, defs);
    }

    if node.children.is_empty() {
        return;
    }

    let old = std::mem::take(&mut node.children);
    let mut new_children = Vec::with_capacity(old.len());
    for child in old {
        let replacement = match child.cast::<Text>() {
            Some(text) => split_text(&text.content, labels, defs),
            None => None,
        };
        match replacement {
            Some(mut nodes) => new_children.append(&mut nodes),
            None => new_children.push(child),
        }
    }
    node.children = new_children;
}

fn is_boundary(ch: Option<char>) -> bool {
    ch.map_or(true, |c| !c.is_alphanumeric())
}

/// Split text around label occurrences. Returns None when nothing matched so
/// the caller can keep the original node.
fn split_text(
    content: &str,
    labels: &[String],
    defs: &HashMap<String, String>,
) -> Option<Vec<Node>> {
    let mut nodes = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;
    let mut matched = false;

    while pos < content.len() {
        if !content.is_char_boundary(pos) {
            pos += 1;
            continue;
        }

        let hit = labels.iter().find(|label| {
            content[pos..].starts_with(label.as_str())
                && is_boundary(content[..pos].chars().next_back())
                && is_boundary(content[pos + label.len()..].chars().next())
        });

        if let Some(label) = hit {
            if plain_start < pos {
                nodes.push(Node::new(Text {
                    content: content[plain_start..pos].to_string(),
                }));
            }
            let mut abbr = Node::new(AbbrNode {
                label: label.clone(),
                title: defs[label.as_str()].clone(),
            });
            abbr.children.push(Node::new(Text {
                content: label.clone(),
            }));
            nodes.push(abbr);
            pos += label.len();
            plain_start = pos;
            matched = true;
        } else {
            pos += 1;
        }
    }

    if !matched {
        return None;
    }

    if plain_start < content.len() {
        nodes.push(Node::new(Text {
            content: content[plain_start..].to_string(),
        }));
    }

    Some(nodes)
}

/// Add the abbreviation plugin to a markdown-it parser
pub fn add(md: &mut MarkdownIt) {
    md.block
        .add_rule::<AbbrScanner>()
        .before::<markdown_it::plugins::cmark::block::blockquote::BlockquoteScanner>();
    md.add_rule::<AbbrSubstituteRule>();
}
