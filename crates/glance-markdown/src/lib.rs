//! Glance Markdown Pipeline
//!
//! The renderer-side markdown pipeline of the Glance file previewer.
//! This crate provides:
//! - A `markdown-it` parser instance assembled from a fixed, ordered plugin chain
//! - Custom callout containers (tip/info/warning/danger/details)
//! - Code-block wrapping with a copy affordance and syntax highlighting
//! - A pure text-to-HTML `render` call with no retained state between calls

pub mod error;
pub mod options;
pub mod pipeline;
pub mod plugins;

// Re-export main types for convenience
pub use error::{RenderError, RenderResult};
pub use options::PipelineOptions;
pub use pipeline::MarkdownPipeline;
