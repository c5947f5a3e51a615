//! Error types for the external collaborators.
//!
//! None of these escape [`HighlightTransform::transform`](crate::HighlightTransform::transform):
//! each one is logged and recovered locally.

/// Grammar fetch or registration failed for one language.
#[derive(Debug, thiserror::Error)]
#[error("failed to load grammar for '{language}': {message}")]
pub struct GrammarError {
    pub language: String,
    pub message: String,
}

impl GrammarError {
    pub fn new(language: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            message: message.into(),
        }
    }
}

/// Render collaborator failed for one block.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),

    #[error("render failed: {0}")]
    Failed(String),
}

/// Custom-language hook failed.
#[derive(Debug, thiserror::Error)]
#[error("custom language hook failed: {0}")]
pub struct HookError(pub String);
