//! Batch rewrite of code fences for fencelight.
//!
//! [`HighlightTransform`] walks a document tree once and replaces every code
//! fence with three opaque nodes (markup, style, script) produced by a
//! [`Renderer`]. The pass runs in strictly separated phases:
//!
//! 1. the optional custom-language hook runs once
//! 2. discovery collects every fence without mutating the tree
//! 3. the [`LanguageLoader`] loads each distinct language at most once per
//!    [`HighlightContext`]
//! 4. fences are sorted into reverse document order
//! 5. each fence is parsed, rendered and spliced in place
//!
//! Reverse order keeps every recorded position valid: expanding a fence only
//! shifts siblings that come after it, and those were already processed.
//!
//! A failing grammar load or render never aborts the pass. The affected block
//! is left as an unconverted fence and the failure is logged.
//!
//! # Example
//!
//! ```ignore
//! use fencelight_ast::Node;
//! use fencelight_transform::HighlightTransform;
//!
//! let mut tree = Node::from_markdown("```rust {1}\nfn main() {}\n```");
//! let transform = HighlightTransform::new(renderer, grammars);
//! let report = transform.transform(&mut tree).await;
//! assert_eq!(report.converted, 1);
//! ```

mod collaborators;
mod context;
mod error;
mod loader;
mod options;
mod transform;

pub use collaborators::{GrammarSource, LoadOutcome, RenderRequest, Renderer};
pub use context::{HighlightContext, LanguageCache};
pub use error::{GrammarError, HookError, RenderError};
pub use loader::LanguageLoader;
pub use options::{DEFAULT_THEME, TransformOptions};
pub use transform::{HighlightTransform, HookFuture, LanguageHook, TransformReport};
