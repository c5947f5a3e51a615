//! Code fence meta annotation parsing.
//!
//! The meta string is everything after the language tag on a fence's opening
//! line. It carries rendering directives for the block:
//!
//! ~~~text
//! ```rust {1,3-4} showLineNumbers:10 +5,6 -7 focus{2-4}
//! ~~~
//!
//! [`parse`] decodes it into a [`HighlightDirectiveSet`]. Each directive type is
//! matched independently, so a malformed directive never suppresses a
//! well-formed one, and parsing never fails.
//!
//! # Example
//!
//! ```
//! use fencelight_directives::{LineNumbering, parse};
//!
//! let directives = parse(Some("{1,3} showLineNumbers:10"));
//! let highlighted = directives.highlighted_lines.as_ref().unwrap();
//! assert!(highlighted.contains(1));
//! assert!(!highlighted.contains(2));
//! assert_eq!(directives.line_numbering, Some(LineNumbering::StartAt(10)));
//! ```

mod directives;
mod parser;
mod selector;

pub use directives::{DiffMarks, HighlightDirectiveSet, LineClass, LineNumbering};
pub use parser::parse;
pub use selector::{LineRange, LineSelector};
