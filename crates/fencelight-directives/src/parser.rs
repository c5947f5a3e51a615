//! Meta string parser.
//!
//! Each directive type is an independent `pattern -> Option<value>` lookup over
//! the whole string. The string is never tokenized as a whole, so directives
//! may appear in any order, adjacent or separated by arbitrary text.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::directives::{DiffMarks, HighlightDirectiveSet, LineNumbering};
use crate::selector::LineSelector;

/// Brace group with the word directly before it, if any. A group whose
/// prefix ends in `focus` belongs to the focus directive.
static BRACE_GROUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w*)\{([^{}]*)\}").unwrap());

/// Numbering flag, optionally followed by `:N` with no whitespace.
static LINE_NUMBERS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:showLineNumbers|lineNumbers)(?::(\d+)|\b)").unwrap()
});

static ADDED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\+(\d+(?:,\d+)*)").unwrap());

/// A `-` right after a digit is a range separator, not a removal.
static REMOVED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\d])-(\d+(?:,\d+)*)").unwrap());

const FOCUS: &str = "focus";

/// Parse a code fence meta string into a directive set.
///
/// Never fails. Absent or unparsable input yields an empty set; text that
/// matches no directive is ignored.
#[must_use]
pub fn parse(meta: Option<&str>) -> HighlightDirectiveSet {
    let Some(meta) = meta else {
        return HighlightDirectiveSet::default();
    };

    // Diff lists are scanned with brace groups blanked, so `{1-3}` never
    // reads as a removal while `{1,3}+2` still yields an added line.
    let outside_braces = BRACE_GROUP_RE.replace_all(meta, "$1 ");

    HighlightDirectiveSet {
        highlighted_lines: first_selector(meta, |prefix| !prefix.ends_with(FOCUS)),
        line_numbering: line_numbering(meta),
        diff: DiffMarks {
            added: first_number_list(&ADDED_RE, &outside_braces),
            removed: first_number_list(&REMOVED_RE, &outside_braces),
        },
        focused_lines: first_selector(meta, |prefix| prefix.ends_with(FOCUS)),
    }
}

/// First brace group whose prefix passes `accept` wins; if its content is
/// invalid the field stays absent.
fn first_selector(meta: &str, accept: impl Fn(&str) -> bool) -> Option<LineSelector> {
    let caps = BRACE_GROUP_RE
        .captures_iter(meta)
        .find(|caps| caps.get(1).is_some_and(|prefix| accept(prefix.as_str())))?;
    LineSelector::parse(caps.get(2)?.as_str())
}

fn line_numbering(meta: &str) -> Option<LineNumbering> {
    let mut enabled = false;
    for caps in LINE_NUMBERS_RE.captures_iter(meta) {
        enabled = true;
        if let Some(start) = caps.get(1).and_then(|m| m.as_str().parse().ok()) {
            return Some(LineNumbering::StartAt(start));
        }
    }
    enabled.then_some(LineNumbering::Enabled)
}

fn first_number_list(re: &Regex, meta: &str) -> Option<BTreeSet<u32>> {
    let caps = re.captures(meta)?;
    let lines: BTreeSet<u32> = caps
        .get(1)?
        .as_str()
        .split(',')
        .filter_map(|n| n.parse().ok())
        .collect();
    (!lines.is_empty()).then_some(lines)
}
