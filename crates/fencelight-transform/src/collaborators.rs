//! Traits for the external render and grammar-supply collaborators.

use std::future::Future;

use fencelight_ast::ReplacementBundle;
use fencelight_directives::HighlightDirectiveSet;

use crate::error::{GrammarError, RenderError};

/// Result of asking a [`GrammarSource`] for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Grammar resolved and registered with the renderer.
    Registered,
    /// Language is not part of the bundled set. Not a failure.
    NotFound,
}

/// Supplies language grammars keyed by language identifier.
pub trait GrammarSource {
    /// Resolve and register the grammar for `language`.
    ///
    /// Unknown languages return `Ok(LoadOutcome::NotFound)`; `Err` is reserved
    /// for fetch or registration failures.
    fn load(&self, language: &str) -> impl Future<Output = Result<LoadOutcome, GrammarError>> + Send;
}

/// Input for one render call.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub source: &'a str,
    pub language: &'a str,
    pub theme: &'a str,
    /// Unique label; must appear in all three outputs.
    pub label: &'a str,
    pub directives: &'a HighlightDirectiveSet,
}

/// Turns one code block into markup, style and script payloads.
///
/// Implementations must be deterministic for identical requests and must
/// ignore directives they do not support.
pub trait Renderer {
    fn render(
        &self,
        request: RenderRequest<'_>,
    ) -> impl Future<Output = Result<ReplacementBundle, RenderError>> + Send;
}
