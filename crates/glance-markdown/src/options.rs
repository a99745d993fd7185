//! Construction-time configuration for the pipeline

use serde::{Deserialize, Serialize};

/// Theme name that selects class-annotated output instead of a color theme.
///
/// With this theme the highlighter emits scope classes only and leaves color
/// resolution to the surrounding stylesheet.
pub const THEME_NONE: &str = "none";

/// Default input size limit for [`render_file`](crate::MarkdownPipeline::render_file).
pub const DEFAULT_MAX_INPUT_SIZE: usize = 10 * 1024 * 1024;

/// Construction-time options for [`MarkdownPipeline`](crate::MarkdownPipeline).
///
/// All fields are fixed once the pipeline is built; rendering calls cannot
/// change them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Highlight theme identifier. `"none"` emits class-annotated spans with
    /// no fixed color scheme; any other value must name a theme in syntect's
    /// default theme set or construction fails.
    pub theme: String,

    /// Label text on the copy control of wrapped code blocks.
    pub code_copy_button_title: String,

    /// When true, the code-block wrapper omits per-theme class variants
    /// since only one visual theme is supported.
    pub has_single_theme: bool,

    /// Size limit applied when rendering from a file. `None` disables the check.
    pub max_input_size: Option<usize>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            theme: THEME_NONE.to_string(),
            code_copy_button_title: "Copy Code".to_string(),
            has_single_theme: false,
            max_input_size: Some(DEFAULT_MAX_INPUT_SIZE),
        }
    }
}

impl PipelineOptions {
    /// Override the copy-button label (localized by the host application).
    pub fn with_copy_button_title(mut self, title: impl Into<String>) -> Self {
        self.code_copy_button_title = title.into();
        self
    }

    /// Override the highlight theme.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Mark the host application as single-themed.
    pub fn with_single_theme(mut self, single: bool) -> Self {
        self.has_single_theme = single;
        self
    }

    /// Override the file-size limit.
    pub fn with_max_input_size(mut self, max: Option<usize>) -> Self {
        self.max_input_size = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let options: PipelineOptions =
            serde_json::from_str(r#"{"theme": "InspiredGitHub"}"#).unwrap();
        assert_eq!(options.theme, "InspiredGitHub");
        assert_eq!(options.code_copy_button_title, "Copy Code");
        assert!(!options.has_single_theme);
        assert_eq!(options.max_input_size, Some(DEFAULT_MAX_INPUT_SIZE));
    }

    #[test]
    fn test_round_trip() {
        let options = PipelineOptions::default()
            .with_theme("none")
            .with_copy_button_title("复制")
            .with_single_theme(true);
        let json = serde_json::to_string(&options).unwrap();
        let back: PipelineOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back.code_copy_button_title, "复制");
        assert!(back.has_single_theme);
    }
}
