//! Task list plugin for markdown-it (`- [ ]` / `- [x]` checkboxes)
//!
//! A tree pass after inline parsing rewrites list items whose text starts
//! with a checkbox marker into disabled checkbox inputs, mirroring
//! markdown-it-task-lists output.

use markdown_it::parser::core::CoreRule;
use markdown_it::parser::inline::Text;
use markdown_it::plugins::cmark::block::list::{BulletList, ListItem, OrderedList};
use markdown_it::plugins::cmark::block::paragraph::Paragraph;
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

/// AST node for the checkbox control of a task item
#[derive(Debug, Clone)]
pub struct TaskCheckbox {
    pub checked: bool,
}

impl NodeValue for TaskCheckbox {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        if self.checked {
            fmt.text_raw(
                r#"<input class="task-list-item-checkbox" checked="" disabled="" type="checkbox"> "#,
            );
        } else {
            fmt.text_raw(
                r#"<input class="task-list-item-checkbox" disabled="" type="checkbox"> "#,
            );
        }
    }
}

/// Tree pass converting `[ ]`/`[x]` list item prefixes into checkboxes
pub struct TaskListRule;

impl CoreRule for TaskListRule {
    fn run(root: &mut Node, _md: &MarkdownIt) {
        transform(root);
    }
}

fn transform(node: &mut Node) {
    for child in node.children.iter_mut() {
        transform(child);
    }

    if node.cast::<ListItem>().is_some() {
        convert_item(node);
    } else if node.cast::<BulletList>().is_some() || node.cast::<OrderedList>().is_some() {
        let has_task = node.children.iter().any(|li| {
            li.attrs
                .iter()
                .any(|(name, value)| *name == "class" && value == "task-list-item")
        });
        if has_task {
            node.attrs.push(("class", "contains-task-list".to_string()));
        }
    }
}

fn convert_item(item: &mut Node) {
    // Loose items carry a leading paragraph, tight items may hold inline
    // content directly.
    let use_para = item
        .children
        .first()
        .map(|child| child.cast::<Paragraph>().is_some())
        .unwrap_or(false);

    let converted = {
        let container = if use_para {
            &mut item.children[0].children
        } else {
            &mut item.children
        };

        convert_marker(container)
    };

    if converted {
        item.attrs.push(("class", "task-list-item".to_string()));
    }
}

fn convert_marker(children: &mut Vec<Node>) -> bool {
    let Some(first) = children.first_mut() else {
        return false;
    };

    let (checked, rest) = match first.cast::<Text>() {
        Some(text) if text.content.starts_with("[ ] ") => {
            (false, text.content[4..].to_string())
        }
        Some(text)
            if text.content.starts_with("[x] ") || text.content.starts_with("[X] ") =>
        {
            (true, text.content[4..].to_string())
        }
        _ => return false,
    };

    *first = Node::new(Text { content: rest });
    children.insert(0, Node::new(TaskCheckbox { checked }));
    true
}

/// Add the task list plugin to a markdown-it parser
pub fn add(md: &mut MarkdownIt) {
    md.add_rule::<TaskListRule>();
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
    fn test_unchecked_item() {
        let html = render("- [ ] write tests");
        assert!(html.contains(r#"class="task-list-item""#));
        assert!(html.contains(r#"type="checkbox""#));
        assert!(!html.contains(r#"checked"#));
        assert!(html.contains("write tests"));
        assert!(!html.contains("[ ]"));
    }

    #[test]
    fn test_checked_item() {
        let html = render("- [x] done");
        assert!(html.contains(r#"checked="""#));
    }

    #[test]
    fn test_list_gains_container_class() {
        let html = render("- [ ] one\n- [x] two");
        assert!(html.contains(r#"<ul class="contains-task-list">"#));
    }

    #[test]
    fn test_regular_items_untouched() {
        let html = render("- plain item");
        assert!(!html.contains("checkbox"));
        assert!(html.contains("plain item"));
    }
}
