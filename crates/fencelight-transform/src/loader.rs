//! Language loading pass.

use std::collections::BTreeSet;

use crate::collaborators::{GrammarSource, LoadOutcome};
use crate::context::LanguageCache;

/// Ensures each language is registered with the renderer at most once per
/// [`LanguageCache`].
pub struct LanguageLoader<'a, G> {
    cache: &'a LanguageCache,
    source: &'a G,
}

impl<'a, G: GrammarSource> LanguageLoader<'a, G> {
    pub fn new(cache: &'a LanguageCache, source: &'a G) -> Self {
        Self { cache, source }
    }

    /// Load every language in `languages` that is not cached yet.
    ///
    /// Unknown languages are skipped silently and failures are logged; neither
    /// is cached, so a later pass may retry them. Returns the number of newly
    /// registered languages.
    pub async fn load_all(&self, languages: &BTreeSet<String>) -> usize {
        let mut loaded = self.cache.lock().await;
        let mut registered = 0;

        for language in languages {
            if loaded.contains(language) {
                tracing::debug!(language = %language, "Grammar already loaded");
                continue;
            }
            match self.source.load(language).await {
                Ok(LoadOutcome::Registered) => {
                    tracing::debug!(language = %language, "Grammar loaded");
                    loaded.insert(language.clone());
                    registered += 1;
                }
                Ok(LoadOutcome::NotFound) => {
                    tracing::debug!(language = %language, "No bundled grammar, skipping");
                }
                Err(e) => {
                    tracing::warn!(language = %language, error = %e, "Failed to load grammar");
                }
            }
        }

        registered
    }
}
