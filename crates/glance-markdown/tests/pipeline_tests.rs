//! End-to-end tests for the assembled rendering pipeline
//!
//! These exercise the full plugin chain the way the previewer uses it: build
//! once, render many times, assert on the emitted markup.

use glance_markdown::{MarkdownPipeline, PipelineOptions, RenderError};

async fn default_pipeline() -> MarkdownPipeline {
    MarkdownPipeline::with_defaults()
        .await
        .expect("default pipeline should build")
}

#[tokio::test]
async fn every_container_class_renders_its_default_title_once() {
    let pipeline = default_pipeline().await;

    for (class, title) in [
        ("tip", "TIP"),
        ("info", "INFO"),
        ("warning", "WARNING"),
        ("danger", "DANGER"),
        ("details", "Details"),
    ] {
        let html = pipeline.render(&format!(":::{}\nBody\n:::", class));
        assert_eq!(
            html.matches(title).count(),
            1,
            "class {} should render default title {} exactly once:\n{}",
            class,
            title,
            html
        );
        assert!(html.contains(&format!(r#"class="{} custom-block""#, class)));
    }
}

#[tokio::test]
async fn explicit_titles_replace_defaults() {
    let pipeline = default_pipeline().await;

    for (class, default) in [
        ("tip", "TIP"),
        ("info", "INFO"),
        ("warning", "WARNING"),
        ("danger", "DANGER"),
        ("details", "Details"),
    ] {
        let html = pipeline.render(&format!(":::{} My Own Title\nBody\n:::", class));
        assert!(html.contains("My Own Title"), "class {}:\n{}", class, html);
        assert!(
            !html.contains(default),
            "class {} should not render default title:\n{}",
            class,
            html
        );
    }
}

#[tokio::test]
async fn container_example_from_contract() {
    let pipeline = default_pipeline().await;
    let html = pipeline.render(":::tip\nHello\n:::");

    assert!(html.contains(r#"class="tip custom-block""#));
    assert!(html.contains(r#"<p class="custom-block-title">TIP</p>"#));
    assert!(html.contains("<p>Hello</p>"));
}

#[tokio::test]
async fn details_example_from_contract() {
    let pipeline = default_pipeline().await;
    let html = pipeline.render(":::details Custom Title\nBody\n:::");

    assert!(html.contains("<details"));
    assert!(html.contains("<summary>Custom Title</summary>"));
    assert!(html.contains("Body"));
    assert!(html.contains("</details>"));
}

#[tokio::test]
async fn nested_containers_close_their_own_element_types() {
    let pipeline = default_pipeline().await;
    let html = pipeline.render("::::details Outer\n:::tip\nInner\n:::\n::::");

    let details_open = html.find("<details").expect("details should open");
    let tip_open = html
        .find(r#"<div class="tip custom-block">"#)
        .expect("tip should open");
    let tip_close = html.find("</div>").expect("tip should close");
    let details_close = html.find("</details>").expect("details should close");

    assert!(details_open < tip_open, "{}", html);
    assert!(tip_open < tip_close, "{}", html);
    assert!(tip_close < details_close, "{}", html);
}

#[tokio::test]
async fn rendering_is_deterministic_and_stateless() {
    let pipeline = default_pipeline().await;
    let input = "\
[[toc]]

# Heading

*[API]: Application Programming Interface

The API is ++great++ :smile:

- [ ] open task
- [x] done task

:::warning
Careful with $x^2$ here.
:::

```rust
fn main() {}
```
";

    let first = pipeline.render(input);
    let second = pipeline.render(input);
    assert_eq!(first, second);

    // A render of different content in between must not leak state
    let _ = pipeline.render("# Unrelated\n\n:::tip\nOther\n:::");
    let third = pipeline.render(input);
    assert_eq!(first, third);
}

#[tokio::test]
async fn unknown_theme_rejects_construction() {
    let result =
        MarkdownPipeline::new(PipelineOptions::default().with_theme("no-such-theme")).await;
    assert!(matches!(result, Err(RenderError::UnknownTheme(_))));
}

#[tokio::test]
async fn unknown_container_class_falls_through() {
    let pipeline = default_pipeline().await;
    let html = pipeline.render(":::mystery\nBody\n:::");
    assert!(!html.contains("custom-block"));
}

#[tokio::test]
async fn empty_container_emits_valid_markup() {
    let pipeline = default_pipeline().await;
    let html = pipeline.render(":::info\n:::");
    assert!(html.contains(r#"class="info custom-block""#));
    assert!(html.contains("</div>"));
}

#[tokio::test]
async fn code_blocks_get_wrapper_and_highlighting() {
    let pipeline = MarkdownPipeline::new(
        PipelineOptions::default()
            .with_copy_button_title("复制")
            .with_single_theme(true),
    )
    .await
    .unwrap();

    let html = pipeline.render("```rust\nfn main() {}\n```");
    assert!(html.contains(r#"class="language-rust""#));
    assert!(html.contains(r#"<button class="copy" title="复制"></button>"#));
    assert!(html.contains(r#"<span class="lang">rust</span>"#));
    assert!(html.contains(r#"<code class="language-rust">"#));
    assert!(html.contains("<span class="));
    // Single-theme mode suppresses the variant class
    assert!(!html.contains("theme-adaptive"));
}

#[tokio::test]
async fn unterminated_constructs_recover_at_document_end() {
    let pipeline = default_pipeline().await;

    let html = pipeline.render(":::tip\nnever closed");
    assert!(html.contains(r#"class="tip custom-block""#));
    assert!(html.contains("never closed"));
    assert!(html.contains("</div>"));

    let html = pipeline.render("```rust\nfn unterminated()");
    assert!(html.contains("unterminated"));
}

#[tokio::test]
async fn full_plugin_chain_is_active() {
    let pipeline = default_pipeline().await;
    let html = pipeline.render(
        "*[SQL]: Structured Query Language\n\n\
         [[toc]]\n\n\
         # One Heading\n\n\
         Term\n: A definition\n\n\
         SQL is ++useful++ :smile: and $a+b$\n\n\
         - [ ] task\n",
    );

    assert!(html.contains(r#"<abbr title="Structured Query Language">SQL</abbr>"#));
    assert!(html.contains(r#"class="table-of-contents""#));
    assert!(html.contains(r##"href="#one-heading""##));
    assert!(html.contains(r#"id="one-heading""#));
    assert!(html.contains("<dt>Term</dt>"));
    assert!(html.contains("<dd>A definition</dd>"));
    assert!(html.contains("<ins>useful</ins>"));
    assert!(html.contains("😄"));
    assert!(html.contains(r#"class="math math-inline""#));
    assert!(html.contains(r#"class="task-list-item""#));
}

#[tokio::test]
async fn toc_lists_headings_shallower_than_the_first() {
    let pipeline = default_pipeline().await;
    let html = pipeline.render("[[toc]]\n\n## First\n\n# Top Level");
    assert!(html.contains(r##"<a href="#first">First</a>"##), "{}", html);
    assert!(
        html.contains(r##"<a href="#top-level">Top Level</a>"##),
        "{}",
        html
    );
}

#[tokio::test]
async fn heading_ids_stay_unique_across_container_boundaries() {
    let pipeline = default_pipeline().await;
    let html = pipeline.render(":::tip\n# Setup\n:::\n\n# Setup");
    assert_eq!(html.matches(r#"id="setup""#).count(), 1, "{}", html);
    assert!(html.contains(r#"id="setup-1""#), "{}", html);
}

#[tokio::test]
async fn abbreviated_term_stays_in_heading_slug() {
    let pipeline = default_pipeline().await;
    let html = pipeline.render("*[HTML]: Hyper Text Markup Language\n\n# HTML Basics");
    assert!(html.contains(r#"id="html-basics""#), "{}", html);
    assert!(html.contains(r#"<abbr title="Hyper Text Markup Language">HTML</abbr>"#));
}

#[tokio::test]
async fn container_title_honors_reference_definitions() {
    let pipeline = default_pipeline().await;
    let html = pipeline.render("[docs]: https://example.com\n\n:::tip See [docs]\nBody\n:::");
    assert!(
        html.contains(r#"<a href="https://example.com">docs</a>"#),
        "{}",
        html
    );
}
