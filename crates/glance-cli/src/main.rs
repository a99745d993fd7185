use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use glance_markdown::{MarkdownPipeline, PipelineOptions};

mod cli;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter = format!("glance_cli={},glance_markdown={}", log_level, log_level);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .init();

    let options = PipelineOptions::default()
        .with_theme(cli.theme)
        .with_copy_button_title(cli.copy_label)
        .with_single_theme(cli.single_theme)
        .with_max_input_size(if cli.max_size == 0 {
            None
        } else {
            Some(cli.max_size)
        });

    let pipeline = MarkdownPipeline::new(options)
        .await
        .context("failed to build the rendering pipeline")?;

    debug!("rendering {}", cli.input.display());
    let html = pipeline
        .render_file(&cli.input)
        .await
        .with_context(|| format!("failed to render {}", cli.input.display()))?;

    match cli.output {
        Some(path) => tokio::fs::write(&path, html)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", html),
    }

    Ok(())
}
