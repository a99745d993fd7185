//! Custom container plugin for markdown-it (VitePress-style callouts)
//!
//! Implements colon-fenced callout blocks:
//! ```text
//! :::tip Optional *inline* title
//! Body content (full block markdown).
//! :::
//! ```
//!
//! Registered classes: tip, info, warning, danger, details. `details` renders
//! as a collapsible `<details>/<summary>` pair, the rest as a `<div>` with a
//! leading title paragraph. Unregistered class names are not intercepted and
//! fall through to the base parser.

use markdown_it::parser::block::{BlockRule, BlockState};
use markdown_it::parser::inline::InlineRoot;
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};
use regex::Regex;
use std::sync::OnceLock;

/// One registered container class: name, localized default title, and
/// whether it renders as a disclosure element.
#[derive(Debug, Clone, Copy)]
pub struct ContainerSpec {
    pub name: &'static str,
    pub default_title: &'static str,
    pub disclosure: bool,
}

/// The registered container classes. The table is fixed at compile time;
/// every entry handles both the open and close side of its element type.
pub const CONTAINERS: [ContainerSpec; 5] = [
    ContainerSpec { name: "tip", default_title: "TIP", disclosure: false },
    ContainerSpec { name: "info", default_title: "INFO", disclosure: false },
    ContainerSpec { name: "warning", default_title: "WARNING", disclosure: false },
    ContainerSpec { name: "danger", default_title: "DANGER", disclosure: false },
    ContainerSpec { name: "details", default_title: "Details", disclosure: true },
];

fn find_spec(name: &str) -> Option<&'static ContainerSpec> {
    CONTAINERS.iter().find(|spec| spec.name == name)
}

/// AST node for a whole container block. The open/close element type is
/// decided per class and carried on the node, so a `details` block always
/// closes with `</details>` no matter what else is nested around it.
#[derive(Debug, Clone)]
pub struct ContainerBlock {
    pub name: String,
    pub disclosure: bool,
}

impl NodeValue for ContainerBlock {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        let tag = if self.disclosure { "details" } else { "div" };
        fmt.cr();
        fmt.open(tag, &[("class", format!("{} custom-block", self.name))]);
        fmt.cr();
        fmt.contents(&node.children);
        fmt.cr();
        fmt.close(tag);
        fmt.cr();
    }
}

/// AST node for the container title line. Children are the inline-parsed
/// title, so emphasis and reference links inside titles work.
#[derive(Debug, Clone)]
pub struct ContainerTitle {
    pub disclosure: bool,
}

impl NodeValue for ContainerTitle {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        if self.disclosure {
            fmt.open("summary", &[]);
            fmt.contents(&node.children);
            fmt.close("summary");
        } else {
            fmt.open("p", &[("class", "custom-block-title".to_string())]);
            fmt.contents(&node.children);
            fmt.close("p");
        }
        fmt.cr();
    }
}

fn open_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Match: :::name optional title
        Regex::new(r"^\s{0,3}(:{3,})\s*([a-zA-Z][a-zA-Z0-9_-]*)(.*)$").expect("valid regex")
    })
}

fn is_closing_fence(line: &str, marker_len: usize) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= marker_len && trimmed.chars().all(|c| c == ':')
}

/// Container scanner - matches :::name fenced blocks for registered classes
pub struct ContainerScanner;

impl BlockRule for ContainerScanner {
    fn check(state: &mut BlockState) -> Option<()> {
        let line = state.get_line(state.line);
        let caps = open_regex().captures(&line)?;
        find_spec(caps.get(2)?.as_str()).map(|_| ())
    }

    fn run(state: &mut BlockState) -> Option<(Node, usize)> {
        let start_line = state.line;
        let first_line = state.get_line(start_line);

        let caps = open_regex().captures(&first_line)?;
        let marker_len = caps.get(1)?.as_str().len();
        let spec = find_spec(caps.get(2)?.as_str())?;
        let title_src = caps.get(3).map(|m| m.as_str().trim()).unwrap_or("");

        // Find the closing fence: first line of >= marker_len colons.
        // An unterminated container closes implicitly at end of input.
        let mut closing_line = None;
        let mut current_line = start_line + 1;
        while current_line < state.line_max {
            let line = state.get_line(current_line);
            if is_closing_fence(&line, marker_len) {
                closing_line = Some(current_line);
                break;
            }
            current_line += 1;
        }

        let (body_end, lines_consumed) = match closing_line {
            Some(line) => (line, line + 1 - start_line),
            None => (state.line_max, state.line_max - start_line),
        };

        // The body is full block markdown; parse it as its own document and
        // adopt the resulting blocks. An empty body yields no children but
        // still renders a valid open/close pair.
        let mut body = String::new();
        for line in (start_line + 1)..body_end {
            body.push_str(&state.get_line(line));
            body.push('\n');
        }
        let mut inner = state.md.parse(&body);

        // Title falls back to the class default; it is attached as inline
        // content of the enclosing document, so reference definitions from
        // the surrounding text resolve inside it.
        let title = if title_src.is_empty() {
            spec.default_title.to_string()
        } else {
            title_src.to_string()
        };
        let mut title_node = Node::new(ContainerTitle {
            disclosure: spec.disclosure,
        });
        title_node
            .children
            .push(Node::new(InlineRoot::new(title, vec![(0, 0)])));

        let mut node = Node::new(ContainerBlock {
            name: spec.name.to_string(),
            disclosure: spec.disclosure,
        });
        node.children.push(title_node);
        node.children.append(&mut inner.children);

        let end_line = start_line + lines_consumed - 1;
        node.srcmap = state.get_map(start_line, end_line);

        Some((node, lines_consumed))
    }
}

/// Add the container plugin to a markdown-it parser.
///
/// Must be registered before the cmark blockquote rule so container fences
/// are claimed ahead of the paragraph fallback.
pub fn add(md: &mut MarkdownIt) {
    md.block
        .add_rule::<ContainerScanner>()
        .before::<markdown_it::plugins::cmark::block::blockquote::BlockquoteScanner>();
}
