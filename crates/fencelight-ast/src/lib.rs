//! Document tree for fencelight.
//!
//! A small block-level tree that carries code fences as first-class nodes:
//!
//! - [`Node`]: tree node (containers, text, code fences, opaque HTML)
//! - [`CodeBlock`]: language, meta string and literal body of one fence
//! - [`LocatedCodeBlock`]: a fence plus the path to its parent collection,
//!   produced by the read-only [`Node::code_blocks`] walk
//! - [`ReplacementBundle`]: the markup/style/script triple that replaces a fence
//!
//! Trees are usually built with [`Node::from_markdown`].
//!
//! # Example
//!
//! ```
//! use fencelight_ast::Node;
//!
//! let tree = Node::from_markdown("# Title\n\n```rust {1}\nfn main() {}\n```\n");
//! let blocks = tree.code_blocks();
//! assert_eq!(blocks.len(), 1);
//! assert_eq!(blocks[0].block.language.as_deref(), Some("rust"));
//! assert_eq!(blocks[0].block.meta.as_deref(), Some("{1}"));
//! ```

mod discover;
mod markdown;
mod node;
mod util;

pub use discover::LocatedCodeBlock;
pub use node::{CodeBlock, ElementKind, Node, PLAIN_TEXT, ReplacementBundle};
