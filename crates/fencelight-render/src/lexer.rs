//! Line tokenizer on top of `syntect` scope parsing.
//!
//! Parse state carries across lines, so block comments and multi-line
//! strings are classified correctly. Only tokens that get a color are
//! emitted. Offsets are UTF-16 code units because the browser Range API
//! counts in them.

use std::sync::LazyLock;

use fencelight_transform::RenderError;
use syntect::easy::ScopeRangeIterator;
use syntect::parsing::{ParseState, Scope, ScopeStack};

use crate::grammar::Grammar;

/// Token category, doubling as the highlight name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    Keyword,
    String,
    Comment,
    Number,
    Function,
    Type,
}

impl TokenKind {
    pub const ALL: [Self; 6] = [
        Self::Keyword,
        Self::String,
        Self::Comment,
        Self::Number,
        Self::Function,
        Self::Type,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::String => "string",
            Self::Comment => "comment",
            Self::Number => "number",
            Self::Function => "function",
            Self::Type => "type",
        }
    }
}

/// Scope prefixes in priority order. `None` stops the search, so operators
/// are not colored as keywords.
static SCOPE_KINDS: LazyLock<Vec<(Scope, Option<TokenKind>)>> = LazyLock::new(|| {
    [
        ("comment", Some(TokenKind::Comment)),
        ("string", Some(TokenKind::String)),
        ("constant.numeric", Some(TokenKind::Number)),
        ("keyword.operator", None),
        ("keyword", Some(TokenKind::Keyword)),
        ("storage", Some(TokenKind::Keyword)),
        ("constant.language", Some(TokenKind::Keyword)),
        ("entity.name.function", Some(TokenKind::Function)),
        ("support.function", Some(TokenKind::Function)),
        ("entity.name", Some(TokenKind::Type)),
        ("support.type", Some(TokenKind::Type)),
        ("support.class", Some(TokenKind::Type)),
    ]
    .into_iter()
    .map(|(prefix, kind)| (Scope::new(prefix).unwrap(), kind))
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Start offset in UTF-16 units.
    pub start: usize,
    /// End offset (exclusive) in UTF-16 units.
    pub end: usize,
}

/// Tokenizes the lines of one block in order.
pub(crate) struct Tokenizer<'g> {
    grammar: &'g Grammar,
    state: ParseState,
    stack: ScopeStack,
    buffer: String,
}

impl<'g> Tokenizer<'g> {
    pub(crate) fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            state: ParseState::new(grammar.syntax()),
            stack: ScopeStack::new(),
            buffer: String::new(),
        }
    }

    /// Tokens of the next line. `text` must not contain a line terminator.
    pub(crate) fn line(&mut self, text: &str) -> Result<Vec<Token>, RenderError> {
        self.buffer.clear();
        self.buffer.push_str(text);
        self.buffer.push('\n');

        let ops = self
            .state
            .parse_line(&self.buffer, self.grammar.syntaxes())
            .map_err(|e| RenderError::Failed(e.to_string()))?;

        let mut tokens: Vec<Token> = Vec::new();
        for (range, op) in ScopeRangeIterator::new(&ops, &self.buffer) {
            self.stack
                .apply(op)
                .map_err(|e| RenderError::Failed(e.to_string()))?;
            let start = range.start.min(text.len());
            let end = range.end.min(text.len());
            if start >= end {
                continue;
            }
            let Some(kind) = classify(&self.stack) else {
                continue;
            };
            let (start, end) = (utf16_offset(text, start), utf16_offset(text, end));
            match tokens.last_mut() {
                Some(last) if last.kind == kind && last.end == start => last.end = end,
                _ => tokens.push(Token { kind, start, end }),
            }
        }
        Ok(tokens)
    }
}

/// Kind of the innermost scope that maps to one.
fn classify(stack: &ScopeStack) -> Option<TokenKind> {
    stack.as_slice().iter().rev().find_map(|&scope| {
        SCOPE_KINDS
            .iter()
            .find(|(prefix, _)| prefix.is_prefix_of(scope))
            .map(|&(_, kind)| kind)
    })
    .flatten()
}

fn utf16_offset(text: &str, byte: usize) -> usize {
    text.char_indices()
        .take_while(|&(i, _)| i < byte)
        .map(|(_, c)| c.len_utf16())
        .sum()
}
