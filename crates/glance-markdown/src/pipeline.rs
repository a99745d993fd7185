//! Pipeline assembly: one configured markdown-it instance per pipeline
//!
//! Construction is asynchronous (highlighter data loads first) and either
//! fully succeeds or fails; rendering never runs against a partially
//! configured parser. After construction the parser is immutable, so the
//! pipeline is safe to share read-only across any number of rendering calls.

use markdown_it::MarkdownIt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::options::PipelineOptions;
use crate::plugins;
use crate::plugins::highlight::Highlighter;
use crate::plugins::pre_wrapper::PreWrapperConfig;

/// The configured markdown rendering pipeline.
pub struct MarkdownPipeline {
    md: MarkdownIt,
    options: PipelineOptions,
}

impl MarkdownPipeline {
    /// Build a pipeline with the given options.
    ///
    /// Fails if the highlighter theme cannot be loaded; the plugin order
    /// below is a correctness contract, not a style choice — later
    /// registrations may override rendering established by earlier ones for
    /// the same token type. In particular the syntax highlighter must come
    /// after the code-block wrapper, or its fence output would be discarded.
    pub async fn new(options: PipelineOptions) -> RenderResult<Self> {
        let highlighter = Arc::new(Highlighter::load(&options.theme).await?);

        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        markdown_it::plugins::extra::tables::add(&mut md);
        markdown_it::plugins::extra::strikethrough::add(&mut md);

        plugins::abbr::add(&mut md);
        plugins::deflist::add(&mut md);
        plugins::emoji::add(&mut md);
        plugins::ins::add(&mut md);
        plugins::tasklist::add(&mut md);
        plugins::anchors::add(&mut md);
        plugins::container::add(&mut md);
        plugins::pre_wrapper::add(
            &mut md,
            PreWrapperConfig {
                copy_button_title: options.code_copy_button_title.clone(),
                has_single_theme: options.has_single_theme,
            },
        );
        plugins::math::add(&mut md);
        plugins::toc::add(&mut md);
        plugins::highlight::add(&mut md, highlighter);

        debug!("markdown pipeline assembled (theme {})", options.theme);

        Ok(Self { md, options })
    }

    /// Build a pipeline with default options.
    pub async fn with_defaults() -> RenderResult<Self> {
        Self::new(PipelineOptions::default()).await
    }

    /// Render markdown text to an HTML fragment.
    ///
    /// Pure function of the configured rule set and the input: identical
    /// input yields byte-identical output, and malformed input is recovered
    /// by the parser rather than reported.
    pub fn render(&self, src: &str) -> String {
        self.md.parse(src).render()
    }

    /// Render a markdown file, enforcing the configured size limit.
    pub async fn render_file(&self, path: &Path) -> RenderResult<String> {
        let content = tokio::fs::read_to_string(path).await?;

        if let Some(max) = self.options.max_input_size {
            if content.len() > max {
                return Err(RenderError::InputTooLarge {
                    size: content.len(),
                    max,
                });
            }
        }

        Ok(self.render(&content))
    }

    /// The options this pipeline was built with.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }
}
