//! Math notation plugin for markdown-it ($...$ and $$...$$)
//!
//! Implements TeX math delimiters:
//! - `$...$` - Inline math
//! - `$$...$$` - Block math (display mode)
//!
//! Expressions are emitted as classed elements carrying the raw TeX source;
//! typesetting is left to the viewer's stylesheet/front-end. Includes
//! validation for balanced braces and file-system commands.

use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

/// AST node for a TeX math expression
#[derive(Debug, Clone)]
pub struct MathNode {
    pub expression: String,
    pub is_block: bool,
    pub offset: usize,
}

impl NodeValue for MathNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        if self.is_block {
            fmt.open("div", &[("class", "math math-block".to_string())]);
            fmt.text(&format!("$${}$$", self.expression));
            fmt.close("div");
        } else {
            fmt.open("span", &[("class", "math math-inline".to_string())]);
            fmt.text(&format!("${}$", self.expression));
            fmt.close("span");
        }
    }
}

/// Math scanner - matches $...$ and $$...$$ patterns
pub struct MathScanner;

impl InlineRule for MathScanner {
    const MARKER: char = '$';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..];

        if !input.starts_with('$') {
            return None;
        }

        let is_block = input.starts_with("$$");
        let delimiter = if is_block { "$$" } else { "$" };
        let start = delimiter.len();

        let end_pos = if is_block {
            input[start..].find("$$")?
        } else {
            // Single $, skipping escapes and $$ pairs. Byte-wise scanning is
            // safe here: the delimiters are ASCII and UTF-8 continuation
            // bytes never match them.
            let bytes = input.as_bytes();
            let mut pos = start;

            loop {
                if pos >= bytes.len() {
                    return None;
                }

                match bytes[pos] {
                    b'$' => {
                        if pos + 1 < bytes.len() && bytes[pos + 1] == b'$' {
                            pos += 2;
                            continue;
                        }
                        break;
                    }
                    b'\\' if pos + 1 < bytes.len() => pos += 2,
                    _ => pos += 1,
                }
            }
            pos - start
        };

        let expression = &input[start..start + end_pos];

        if !is_valid_tex(expression) {
            return None;
        }

        let total_length = start + end_pos + delimiter.len();

        let math = MathNode {
            expression: expression.to_string(),
            is_block,
            offset: state.pos,
        };

        let node = Node::new(math);
        Some((node, total_length))
    }
}

fn is_valid_tex(expr: &str) -> bool {
    if expr.trim().is_empty() {
        return false;
    }

    if !has_balanced_braces(expr) {
        return false;
    }

    if has_file_commands(expr) {
        return false;
    }

    true
}

fn has_balanced_braces(expr: &str) -> bool {
    let mut depth = 0;
    let mut chars = expr.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                // Skip escaped character
                chars.next();
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }

    depth == 0
}

/// Commands that would touch the file system or redefine macros; a preview
/// surface never typesets these.
fn has_file_commands(expr: &str) -> bool {
    const BLOCKED: &[&str] = &[
        "\\input",
        "\\include",
        "\\write",
        "\\openout",
        "\\closeout",
        "\\def",
        "\\newcommand",
        "\\renewcommand",
        "\\catcode",
    ];

    BLOCKED.iter().any(|cmd| expr.contains(cmd))
}

/// Add the math plugin to a markdown-it parser
pub fn add(md: &mut MarkdownIt) {
    md.inline.add_rule::<MathScanner>();
}
