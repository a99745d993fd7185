//! Command-line surface

use clap::Parser;
use std::path::PathBuf;

/// Render a markdown file to an HTML fragment with the Glance pipeline.
#[derive(Parser, Debug)]
#[command(name = "glance-md", version, about)]
pub struct Cli {
    /// Markdown file to render
    pub input: PathBuf,

    /// Write HTML here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Highlight theme ("none" emits class-annotated spans for
    /// stylesheet-driven colors)
    #[arg(long, default_value = "none")]
    pub theme: String,

    /// Localized label for the code copy button
    #[arg(long, default_value = "Copy Code")]
    pub copy_label: String,

    /// The host application ships a single visual theme; omit per-theme
    /// class variants
    #[arg(long)]
    pub single_theme: bool,

    /// Maximum input size in bytes (0 disables the limit)
    #[arg(long, default_value_t = 10 * 1024 * 1024)]
    pub max_size: usize,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
