//! Reference render and grammar collaborators for fencelight.
//!
//! [`HtmlRenderer`] produces the three payloads of a block without wrapping
//! individual tokens in elements:
//!
//! - markup: escaped source, one `<span class="line">` per line
//! - style: theme colors scoped to the block label, including
//!   `::highlight()` rules for each token kind
//! - script: registers token ranges with the CSS Custom Highlight API
//!
//! Token ranges come from `syntect` scope parsing. [`BundledGrammars`]
//! supplies the default Sublime syntaxes shipped with `syntect` and accepts
//! custom ones through [`BundledGrammars::register_sublime_syntax`], typically
//! from a custom-language hook.
//!
//! # Example
//!
//! ```ignore
//! use fencelight_ast::Node;
//! use fencelight_render::{BundledGrammars, HtmlRenderer};
//! use fencelight_transform::HighlightTransform;
//!
//! let grammars = BundledGrammars::new();
//! let renderer = HtmlRenderer::new(grammars.registry());
//! let transform = HighlightTransform::new(renderer, grammars);
//!
//! let mut tree = Node::from_markdown("```rust {1}\nfn main() {}\n```");
//! transform.transform(&mut tree).await;
//! ```

mod grammar;
mod lexer;
mod registry;
mod renderer;
mod theme;

pub use grammar::Grammar;
pub use lexer::TokenKind;
pub use registry::{BundledGrammars, GrammarRegistry};
pub use renderer::HtmlRenderer;
pub use theme::Theme;
