//! Code-block wrapper plugin for markdown-it
//!
//! Wraps every fenced code block in a container carrying a copy-to-clipboard
//! control and a language tag. The fence itself stays a child node, so
//! whichever fence renderer is registered last (notably the syntax
//! highlighter) supplies the actual code markup inside the wrapper.

use markdown_it::parser::core::CoreRule;
use markdown_it::parser::extset::MarkdownItExt;
use markdown_it::plugins::cmark::block::fence::CodeFence;
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

/// Wrapper options, fixed at pipeline construction.
#[derive(Debug, Clone)]
pub struct PreWrapperConfig {
    /// Localized label on the copy control.
    pub copy_button_title: String,
    /// Suppress per-theme class variants when only one visual theme exists.
    pub has_single_theme: bool,
}

impl Default for PreWrapperConfig {
    fn default() -> Self {
        Self {
            copy_button_title: "Copy Code".to_string(),
            has_single_theme: false,
        }
    }
}

impl MarkdownItExt for PreWrapperConfig {}

/// AST node wrapping a fenced code block
#[derive(Debug, Clone)]
pub struct CodeBlockWrapper {
    pub lang: String,
    pub copy_title: String,
    pub single_theme: bool,
}

impl NodeValue for CodeBlockWrapper {
    fn render(&self, node: &Node, fmt: &mut dyn Renderer) {
        let class = if self.single_theme {
            format!("language-{}", self.lang)
        } else {
            format!("language-{} theme-adaptive", self.lang)
        };

        fmt.cr();
        fmt.open("div", &[("class", class)]);
        fmt.open(
            "button",
            &[
                ("class", "copy".to_string()),
                ("title", self.copy_title.clone()),
            ],
        );
        fmt.close("button");
        fmt.open("span", &[("class", "lang".to_string())]);
        fmt.text(&self.lang);
        fmt.close("span");
        fmt.cr();
        fmt.contents(&node.children);
        fmt.cr();
        fmt.close("div");
        fmt.cr();
    }
}

/// Tree pass wrapping fence nodes
pub struct PreWrapperRule;

impl CoreRule for PreWrapperRule {
    fn run(root: &mut Node, md: &MarkdownIt) {
        let config = md
            .ext
            .get::<PreWrapperConfig>()
            .cloned()
            .unwrap_or_default();
        wrap(root, &config);
    }
}

fn wrap(node: &mut Node, config: &PreWrapperConfig) {
    if node.cast::<CodeBlockWrapper>().is_some() {
        // Already wrapped (container bodies are parsed with the same rules)
        return;
    }

    for child in node.children.iter_mut() {
        wrap(child, config);
    }

    if node.children.is_empty() {
        return;
    }

    let children = std::mem::take(&mut node.children);
    node.children = children
        .into_iter()
        .map(|child| {
            let lang = match child.cast::<CodeFence>() {
                Some(fence) => {
                    let token = fence.info.split_whitespace().next().unwrap_or("");
                    Some(if token.is_empty() {
                        "text".to_string()
                    } else {
                        token.to_string()
                    })
                }
                None => None,
            };

            match lang {
                Some(lang) => {
                    let mut wrapper = Node::new(CodeBlockWrapper {
                        lang,
                        copy_title: config.copy_button_title.clone(),
                        single_theme: config.has_single_theme,
                    });
                    wrapper.children.push(child);
                    wrapper
                }
                None => child,
            }
        })
        .collect();
}

/// Add the code-block wrapper plugin to a markdown-it parser
pub fn add(md: &mut MarkdownIt, config: PreWrapperConfig) {
    md.ext.insert(config);
    md.add_rule::<PreWrapperRule>();
}
