//! Grammar supply and the registry shared with the renderer.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use fencelight_transform::{GrammarError, GrammarSource, LoadOutcome};
use syntect::parsing::{SyntaxDefinition, SyntaxSet};

use crate::grammar::{DEFAULT_SYNTAXES, Grammar};

type GrammarMap = HashMap<String, Arc<Grammar>>;

/// Grammars registered for rendering, keyed by the identifier that loaded them.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct GrammarRegistry {
    grammars: Arc<RwLock<GrammarMap>>,
}

impl GrammarRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, language: &str) -> Option<Arc<Grammar>> {
        self.grammars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(language)
            .cloned()
    }

    pub fn contains(&self, language: &str) -> bool {
        self.get(language).is_some()
    }

    fn insert(&self, language: &str, grammar: Grammar) {
        self.grammars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(language.to_owned(), Arc::new(grammar));
    }
}

/// [`GrammarSource`] backed by the syntaxes bundled with `syntect`.
///
/// Loading a language resolves it against the current syntax set and copies
/// the result into [`Self::registry`], where
/// [`HtmlRenderer`](crate::HtmlRenderer) looks it up. Syntaxes added with
/// [`Self::register`] become loadable the same way. Clones share both the
/// syntax set and the registry.
#[derive(Clone)]
pub struct BundledGrammars {
    syntaxes: Arc<RwLock<Arc<SyntaxSet>>>,
    registry: GrammarRegistry,
}

impl Default for BundledGrammars {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BundledGrammars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundledGrammars")
            .field("syntaxes", &self.current().syntaxes().len())
            .field("registry", &self.registry)
            .finish()
    }
}

impl BundledGrammars {
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntaxes: Arc::new(RwLock::new(Arc::clone(&DEFAULT_SYNTAXES))),
            registry: GrammarRegistry::new(),
        }
    }

    fn current(&self) -> Arc<SyntaxSet> {
        Arc::clone(&self.syntaxes.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Add a syntax definition, making it loadable by name and extension.
    ///
    /// Grammars already loaded keep the syntax set they were resolved from.
    pub fn register(&self, definition: SyntaxDefinition) {
        let mut syntaxes = self.syntaxes.write().unwrap_or_else(PoisonError::into_inner);
        let mut builder = SyntaxSet::clone(&syntaxes).into_builder();
        builder.add(definition);
        *syntaxes = Arc::new(builder.build());
    }

    /// Parse a `.sublime-syntax` document and [`register`](Self::register) it.
    ///
    /// Returns the syntax name.
    pub fn register_sublime_syntax(&self, source: &str) -> Result<String, GrammarError> {
        let definition = SyntaxDefinition::load_from_str(source, true, None)
            .map_err(|e| GrammarError::new("custom syntax", e.to_string()))?;
        let name = definition.name.clone();
        self.register(definition);
        tracing::debug!(syntax = %name, "Registered custom syntax");
        Ok(name)
    }

    /// Whether `language` can be loaded.
    pub fn knows(&self, language: &str) -> bool {
        Grammar::resolve(&self.current(), language).is_some()
    }

    /// Registry to hand to the renderer.
    #[must_use]
    pub fn registry(&self) -> GrammarRegistry {
        self.registry.clone()
    }
}

impl GrammarSource for BundledGrammars {
    async fn load(&self, language: &str) -> Result<LoadOutcome, GrammarError> {
        if language.is_empty() {
            return Err(GrammarError::new(language, "empty language identifier"));
        }
        match Grammar::resolve(&self.current(), language) {
            Some(grammar) => {
                tracing::debug!(language, syntax = grammar.name(), "Registered grammar");
                self.registry.insert(language, grammar);
                Ok(LoadOutcome::Registered)
            }
            None => Ok(LoadOutcome::NotFound),
        }
    }
}
