//! Table-of-contents plugin for markdown-it
//!
//! A `[[toc]]` line is replaced by a nested link list over the document's
//! headings. Entries point at the ids assigned by the heading anchor pass,
//! which therefore has to be registered before this plugin.

use markdown_it::parser::block::{BlockRule, BlockState};
use markdown_it::parser::core::CoreRule;
use markdown_it::plugins::cmark::block::heading::ATXHeading;
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

use super::collect_text;

/// One heading reference in the listing
#[derive(Debug, Clone)]
pub struct TocEntry {
    pub level: u8,
    pub title: String,
    pub slug: String,
}

/// AST node for the `[[toc]]` marker; entries are filled in by a tree pass.
#[derive(Debug, Clone, Default)]
pub struct TocBlock {
    pub entries: Vec<TocEntry>,
}

impl NodeValue for TocBlock {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.cr();
        fmt.open("div", &[("class", "table-of-contents".to_string())]);
        // Root the listing at the shallowest level anywhere in the document,
        // not the first entry's, so a deep opening heading cannot hide
        // shallower ones that follow it.
        if let Some(root) = self.entries.iter().map(|e| e.level).min() {
            let mut idx = 0;
            render_level(&self.entries, &mut idx, root, fmt);
        }
        fmt.close("div");
        fmt.cr();
    }
}

fn render_level(entries: &[TocEntry], idx: &mut usize, level: u8, fmt: &mut dyn Renderer) {
    fmt.open("ul", &[]);
    while *idx < entries.len() {
        let entry = &entries[*idx];
        if entry.level < level {
            break;
        }
        if entry.level > level {
            // Skipped levels: nest without an intermediate item
            render_level(entries, idx, entry.level, fmt);
            continue;
        }

        fmt.open("li", &[]);
        fmt.open("a", &[("href", format!("#{}", entry.slug))]);
        fmt.text(&entry.title);
        fmt.close("a");
        *idx += 1;

        if *idx < entries.len() && entries[*idx].level > level {
            render_level(entries, idx, entries[*idx].level, fmt);
        }
        fmt.close("li");
    }
    fmt.close("ul");
}

/// Scanner matching a line consisting of `[[toc]]`
pub struct TocScanner;

impl BlockRule for TocScanner {
    fn check(state: &mut BlockState) -> Option<()> {
        let line = state.get_line(state.line);
        if line.trim().eq_ignore_ascii_case("[[toc]]") {
            Some(())
        } else {
            None
        }
    }

    fn run(state: &mut BlockState) -> Option<(Node, usize)> {
        Self::check(state)?;

        let mut node = Node::new(TocBlock::default());
        node.srcmap = state.get_map(state.line, state.line);
        Some((node, 1))
    }
}

/// Tree pass filling every toc marker with the document's heading entries
pub struct TocPopulateRule;

impl CoreRule for TocPopulateRule {
    fn run(root: &mut Node, _md: &MarkdownIt) {
        let mut entries = Vec::new();
        collect_headings(root, &mut entries);
        populate(root, &entries);
    }
}

fn collect_headings(node: &Node, entries: &mut Vec<TocEntry>) {
    if let Some(heading) = node.cast::<ATXHeading>() {
        let slug = node
            .attrs
            .iter()
            .find(|(name, _)| *name == "id")
            .map(|(_, value)| value.clone());
        if let Some(slug) = slug {
            entries.push(TocEntry {
                level: heading.level,
                title: collect_text(node),
                slug,
            });
        }
    }
    for child in node.children.iter() {
        collect_headings(child, entries);
    }
}

fn populate(node: &mut Node, entries: &[TocEntry]) {
    if node.cast::<TocBlock>().is_some() {
        let mut replacement = Node::new(TocBlock {
            entries: entries.to_vec(),
        });
        replacement.srcmap = node.srcmap.take();
        *node = replacement;
    }
    for child in node.children.iter_mut() {
        populate(child, entries);
    }
}

/// Add the table-of-contents plugin to a markdown-it parser.
///
/// Register after the heading anchor plugin, which supplies the ids the
/// listing links to.
pub fn add(md: &mut MarkdownIt) {
    md.block
        .add_rule::<TocScanner>()
        .before::<markdown_it::plugins::cmark::block::blockquote::BlockquoteScanner>();
    md.add_rule::<TocPopulateRule>();
}
