//! Error types for pipeline construction and rendering

use std::io;
use thiserror::Error;

/// Errors surfaced by pipeline construction and file rendering.
///
/// Plain-text rendering itself is infallible: malformed input is handled by
/// the parser's recovery rules and never produces an error.
#[derive(Error, Debug)]
pub enum RenderError {
    /// IO error reading input
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Requested highlight theme does not exist
    #[error("Unknown highlight theme: {0}")]
    UnknownTheme(String),

    /// Highlighter syntax/theme data failed to load
    #[error("Highlighter initialization failed: {0}")]
    HighlighterInit(String),

    /// Input exceeds the configured size limit
    #[error("Input too large: {size} bytes (max {max} bytes)")]
    InputTooLarge {
        /// Actual input size
        size: usize,
        /// Maximum allowed size
        max: usize,
    },
}

/// Result type for pipeline operations
pub type RenderResult<T> = Result<T, RenderError>;
