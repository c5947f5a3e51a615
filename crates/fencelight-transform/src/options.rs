//! Caller-facing transform options.

use fencelight_directives::{HighlightDirectiveSet, LineNumbering};

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "github-light";

/// Global defaults applied to every block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Theme identifier passed to the renderer.
    pub theme: String,
    /// Default numbering; `None` leaves numbering to per-block meta.
    pub line_numbers: Option<LineNumbering>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_owned(),
            line_numbers: None,
        }
    }
}

impl TransformOptions {
    #[must_use]
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    #[must_use]
    pub fn line_numbers(mut self, line_numbers: Option<LineNumbering>) -> Self {
        self.line_numbers = line_numbers;
        self
    }

    /// Defaults as a directive set, for merging under per-block directives.
    #[must_use]
    pub fn defaults(&self) -> HighlightDirectiveSet {
        HighlightDirectiveSet {
            line_numbering: self.line_numbers,
            ..HighlightDirectiveSet::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = TransformOptions::default();
        assert_eq!(options.theme, "github-light");
        assert!(options.defaults().is_empty());
    }

    #[test]
    fn test_defaults_carry_line_numbers() {
        let options = TransformOptions::default().line_numbers(Some(LineNumbering::StartAt(3)));
        assert_eq!(
            options.defaults().line_numbering,
            Some(LineNumbering::StartAt(3))
        );
    }
}
