//! Grammars resolved from a `syntect` syntax set.

use std::fmt;
use std::sync::{Arc, LazyLock};

use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Sublime syntaxes bundled with `syntect`, compiled for newline-terminated lines.
pub(crate) static DEFAULT_SYNTAXES: LazyLock<Arc<SyntaxSet>> =
    LazyLock::new(|| Arc::new(SyntaxSet::load_defaults_newlines()));

/// Fence identifiers that `syntect` does not resolve on its own, mapped to a
/// token it does.
const ALIASES: &[(&str, &str)] = &[
    ("plaintext", "txt"),
    ("plain", "txt"),
    ("text", "txt"),
    ("shell", "sh"),
    ("console", "sh"),
    ("javascript", "js"),
    ("python", "py"),
    ("markdown", "md"),
];

/// A syntax from a specific syntax set, ready for tokenizing.
///
/// Holds the set it was resolved from, so registering more syntaxes later
/// never invalidates it.
#[derive(Clone)]
pub struct Grammar {
    syntaxes: Arc<SyntaxSet>,
    name: String,
}

impl Grammar {
    /// Resolve a fence language identifier against `syntaxes`.
    ///
    /// Matches file extensions and syntax names case-insensitively, then a
    /// small alias table.
    pub(crate) fn resolve(syntaxes: &Arc<SyntaxSet>, language: &str) -> Option<Self> {
        let syntax = syntaxes.find_syntax_by_token(language).or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| alias.eq_ignore_ascii_case(language))
                .and_then(|(_, token)| syntaxes.find_syntax_by_token(token))
        })?;
        Some(Self {
            syntaxes: Arc::clone(syntaxes),
            name: syntax.name.clone(),
        })
    }

    /// Syntax name, e.g. `Rust` or `Plain Text`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn syntaxes(&self) -> &SyntaxSet {
        &self.syntaxes
    }

    pub(crate) fn syntax(&self) -> &SyntaxReference {
        self.syntaxes
            .find_syntax_by_name(&self.name)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(language: &str) -> Option<String> {
        Grammar::resolve(&DEFAULT_SYNTAXES, language).map(|g| g.name().to_owned())
    }

    #[test]
    fn test_resolve_by_name_and_extension() {
        assert_eq!(name("rust").as_deref(), Some("Rust"));
        assert_eq!(name("rs").as_deref(), Some("Rust"));
        assert_eq!(name("Python").as_deref(), Some("Python"));
        assert_eq!(name("js").as_deref(), Some("JavaScript"));
    }

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(name("plaintext").as_deref(), Some("Plain Text"));
        assert_eq!(name("text").as_deref(), Some("Plain Text"));
        assert_eq!(name("javascript").as_deref(), Some("JavaScript"));
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(name("cobol-2077"), None);
    }

    #[test]
    fn test_syntax_matches_name() {
        let grammar = Grammar::resolve(&DEFAULT_SYNTAXES, "py").unwrap();
        assert_eq!(grammar.syntax().name, "Python");
    }
}
