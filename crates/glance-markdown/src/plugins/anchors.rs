//! Heading anchor plugin for markdown-it
//!
//! A tree pass assigning slugified, de-duplicated `id` attributes to ATX
//! headings so table-of-contents entries and deep links can target them.

use markdown_it::parser::core::CoreRule;
use markdown_it::plugins::cmark::block::heading::ATXHeading;
use markdown_it::{MarkdownIt, Node};
use std::collections::HashMap;

use super::collect_text;

/// Slugify heading text: lowercase, alphanumerics kept, runs of anything
/// else collapsed to single hyphens.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Tree pass assigning anchor ids to headings
pub struct HeadingAnchorsRule;

impl CoreRule for HeadingAnchorsRule {
    fn run(root: &mut Node, _md: &MarkdownIt) {
        let mut seen: HashMap<String, usize> = HashMap::new();
        assign(root, &mut seen);
    }
}

fn assign(node: &mut Node, seen: &mut HashMap<String, usize>) {
    if node.cast::<ATXHeading>().is_some() {
        let existing = node.attrs.iter().position(|(name, _)| *name == "id");
        if let Some(idx) = existing {
            // Anchored during a nested parse (container bodies run the full
            // rule set with a fresh map). Record the id so later headings
            // dedupe against it, and re-suffix on collision with an earlier
            // one.
            let base = node.attrs[idx].1.clone();
            let count = seen.entry(base.clone()).or_insert(0);
            if *count > 0 {
                node.attrs[idx].1 = format!("{}-{}", base, count);
            }
            *count += 1;
        } else {
            let base = slugify(&collect_text(node));
            let base = if base.is_empty() {
                "section".to_string()
            } else {
                base
            };

            let count = seen.entry(base.clone()).or_insert(0);
            let slug = if *count == 0 {
                base.clone()
            } else {
                format!("{}-{}", base, count)
            };
            *count += 1;

            node.attrs.push(("id", slug));
        }
    }

    for child in node.children.iter_mut() {
        assign(child, seen);
    }
}

/// Add the heading anchor plugin to a markdown-it parser
pub fn add(md: &mut MarkdownIt) {
    md.add_rule::<HeadingAnchorsRule>();
}
