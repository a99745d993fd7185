//! Syntax highlighting plugin for markdown-it, backed by syntect
//!
//! The highlighter's syntax and theme data is loaded up front (and
//! asynchronously) at pipeline construction; a load failure fails the whole
//! pipeline. Registered last in the chain so its fence output lands inside
//! the wrapper staged by the pre-wrapper plugin.
//!
//! Theme `"none"` emits class-annotated spans with no fixed colors, leaving
//! color resolution to the viewer's stylesheet. Named themes resolve against
//! syntect's default theme set.

use markdown_it::parser::core::CoreRule;
use markdown_it::parser::extset::MarkdownItExt;
use markdown_it::plugins::cmark::block::fence::CodeFence;
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};
use std::fmt;
use std::sync::Arc;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{highlighted_html_for_string, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use tracing::{debug, warn};

use crate::error::{RenderError, RenderResult};
use crate::options::THEME_NONE;

enum ThemeMode {
    /// Scope classes only; colors come from the surrounding stylesheet.
    Css,
    /// A fixed syntect theme with inline colors.
    Themed(Theme),
}

/// Loaded highlighter data, immutable and shared by all rendering calls.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    mode: ThemeMode,
}

impl fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            ThemeMode::Css => "css",
            ThemeMode::Themed(_) => "themed",
        };
        f.debug_struct("Highlighter")
            .field("mode", &mode)
            .finish_non_exhaustive()
    }
}

impl Highlighter {
    /// Load syntax definitions and the requested theme off the async runtime.
    pub async fn load(theme: &str) -> RenderResult<Self> {
        let theme = theme.to_string();
        tokio::task::spawn_blocking(move || Self::load_sync(&theme))
            .await
            .map_err(|e| RenderError::HighlighterInit(e.to_string()))?
    }

    fn load_sync(theme: &str) -> RenderResult<Self> {
        debug!("loading highlighter data for theme {}", theme);
        let syntaxes = SyntaxSet::load_defaults_newlines();

        let mode = if theme == THEME_NONE {
            ThemeMode::Css
        } else {
            let mut themes = ThemeSet::load_defaults();
            let theme_data = themes
                .themes
                .remove(theme)
                .ok_or_else(|| RenderError::UnknownTheme(theme.to_string()))?;
            ThemeMode::Themed(theme_data)
        };

        Ok(Self { syntaxes, mode })
    }

    /// Whether [`highlight`](Self::highlight) output carries its own `<pre>`.
    fn wraps_pre(&self) -> bool {
        matches!(self.mode, ThemeMode::Themed(_))
    }

    fn highlight(&self, code: &str, lang: &str) -> Result<String, syntect::Error> {
        let syntax = if lang.is_empty() {
            self.syntaxes.find_syntax_plain_text()
        } else {
            self.syntaxes
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
        };

        match &self.mode {
            ThemeMode::Css => {
                let mut generator = ClassedHTMLGenerator::new_with_class_style(
                    syntax,
                    &self.syntaxes,
                    ClassStyle::Spaced,
                );
                for line in LinesWithEndings::from(code) {
                    generator.parse_html_for_line_which_includes_newline(line)?;
                }
                Ok(generator.finalize())
            }
            ThemeMode::Themed(theme) => {
                highlighted_html_for_string(code, &self.syntaxes, syntax, theme)
            }
        }
    }
}

#[derive(Debug, Clone)]
struct HighlightConfig(Arc<Highlighter>);

impl MarkdownItExt for HighlightConfig {}

/// AST node replacing a code fence with highlighted markup. Keeps the raw
/// code around so a highlighting failure degrades to plain text instead of
/// failing the render.
#[derive(Debug, Clone)]
pub struct HighlightedCode {
    pub lang: String,
    pub code: String,
    pub html: Option<String>,
    pub pre_wrapped: bool,
}

impl NodeValue for HighlightedCode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        if self.pre_wrapped {
            if let Some(html) = &self.html {
                fmt.cr();
                fmt.text_raw(html);
                fmt.cr();
                return;
            }
        }

        let mut attrs = Vec::new();
        if !self.lang.is_empty() {
            attrs.push(("class", format!("language-{}", self.lang)));
        }

        fmt.cr();
        fmt.open("pre", &[]);
        fmt.open("code", &attrs);
        match &self.html {
            Some(html) => fmt.text_raw(html),
            None => fmt.text(&self.code),
        }
        fmt.close("code");
        fmt.close("pre");
        fmt.cr();
    }
}

/// Tree pass swapping fence nodes for highlighted markup
pub struct SyntaxHighlightRule;

impl CoreRule for SyntaxHighlightRule {
    fn run(root: &mut Node, md: &MarkdownIt) {
        let Some(config) = md.ext.get::<HighlightConfig>() else {
            return;
        };
        apply(root, &config.0);
    }
}

fn apply(node: &mut Node, highlighter: &Highlighter) {
    for child in node.children.iter_mut() {
        apply(child, highlighter);
    }

    if node.children.is_empty() {
        return;
    }

    let children = std::mem::take(&mut node.children);
    node.children = children
        .into_iter()
        .map(|child| {
            let replacement = match child.cast::<CodeFence>() {
                Some(fence) => {
                    let lang = fence
                        .info
                        .split_whitespace()
                        .next()
                        .unwrap_or("")
                        .to_string();
                    let code = fence.content.clone();
                    let html = match highlighter.highlight(&code, &lang) {
                        Ok(html) => Some(html),
                        Err(e) => {
                            warn!("syntax highlighting failed for lang {:?}: {}", lang, e);
                            None
                        }
                    };
                    Some(Node::new(HighlightedCode {
                        lang,
                        code,
                        html,
                        pre_wrapped: highlighter.wraps_pre(),
                    }))
                }
                None => None,
            };
            match replacement {
                Some(mut new_node) => {
                    new_node.srcmap = child.srcmap;
                    new_node
                }
                None => child,
            }
        })
        .collect();
}

/// Add the syntax highlighting plugin to a markdown-it parser.
///
/// Must be registered after the code-block wrapper so it supplies the fence
/// content inside the wrapper rather than being discarded by it.
pub fn add(md: &mut MarkdownIt, highlighter: Arc<Highlighter>) {
    md.ext.insert(HighlightConfig(highlighter));
    md.add_rule::<SyntaxHighlightRule>();
}
