//! Parsed rendering directives for one code block.

use std::collections::BTreeSet;

use crate::selector::LineSelector;

/// Line numbering mode. Absence (`None` where used) means numbering is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineNumbering {
    /// Numbering starts at 1.
    Enabled,
    /// Numbering starts at the given value.
    StartAt(u32),
}

impl LineNumbering {
    /// Number displayed for the first body line.
    #[must_use]
    pub fn start(self) -> u32 {
        match self {
            Self::Enabled => 1,
            Self::StartAt(start) => start,
        }
    }
}

/// Lines marked as added or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffMarks {
    pub added: Option<BTreeSet<u32>>,
    pub removed: Option<BTreeSet<u32>>,
}

impl DiffMarks {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_none() && self.removed.is_none()
    }

    #[must_use]
    pub fn is_added(&self, line: u32) -> bool {
        self.added.as_ref().is_some_and(|lines| lines.contains(&line))
    }

    #[must_use]
    pub fn is_removed(&self, line: u32) -> bool {
        self.removed.as_ref().is_some_and(|lines| lines.contains(&line))
    }
}

/// Visual class applied to a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Highlighted,
    DiffAdd,
    DiffRemove,
    /// Outside the focused lines.
    Blurred,
}

impl LineClass {
    /// CSS class name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Highlighted => "highlighted",
            Self::DiffAdd => "diff-add",
            Self::DiffRemove => "diff-remove",
            Self::Blurred => "blurred",
        }
    }
}

/// Canonical directive set parsed from a meta string.
///
/// Every field is optional. Directives never conflict: one line may be
/// highlighted, diffed and blurred at the same time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightDirectiveSet {
    pub highlighted_lines: Option<LineSelector>,
    pub line_numbering: Option<LineNumbering>,
    pub diff: DiffMarks,
    /// `None` means no focus restriction, not "focus nothing".
    pub focused_lines: Option<LineSelector>,
}

impl HighlightDirectiveSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.highlighted_lines.is_none()
            && self.line_numbering.is_none()
            && self.diff.is_empty()
            && self.focused_lines.is_none()
    }

    /// Fill absent fields from `defaults`.
    ///
    /// Fields present on `self` always win. A default that is itself absent
    /// leaves the field absent.
    #[must_use]
    pub fn with_defaults(self, defaults: &Self) -> Self {
        Self {
            highlighted_lines: self
                .highlighted_lines
                .or_else(|| defaults.highlighted_lines.clone()),
            line_numbering: self.line_numbering.or(defaults.line_numbering),
            diff: DiffMarks {
                added: self.diff.added.or_else(|| defaults.diff.added.clone()),
                removed: self.diff.removed.or_else(|| defaults.diff.removed.clone()),
            },
            focused_lines: self
                .focused_lines
                .or_else(|| defaults.focused_lines.clone()),
        }
    }

    /// All classes that apply to the 1-indexed `line`, in a stable order.
    #[must_use]
    pub fn line_classes(&self, line: u32) -> Vec<LineClass> {
        let mut classes = Vec::new();
        if self
            .highlighted_lines
            .as_ref()
            .is_some_and(|selector| selector.contains(line))
        {
            classes.push(LineClass::Highlighted);
        }
        if self.diff.is_added(line) {
            classes.push(LineClass::DiffAdd);
        }
        if self.diff.is_removed(line) {
            classes.push(LineClass::DiffRemove);
        }
        if self
            .focused_lines
            .as_ref()
            .is_some_and(|selector| !selector.contains(line))
        {
            classes.push(LineClass::Blurred);
        }
        classes
    }

    /// Displayed number for the 1-indexed `line`, if numbering is enabled.
    #[must_use]
    pub fn line_number(&self, line: u32) -> Option<u32> {
        self.line_numbering
            .map(|numbering| numbering.start().saturating_add(line.saturating_sub(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn selector(s: &str) -> Option<LineSelector> {
        LineSelector::parse(s)
    }

    #[test]
    fn test_default_is_empty() {
        assert!(HighlightDirectiveSet::default().is_empty());
    }

    #[test]
    fn test_with_defaults_block_wins() {
        let block = HighlightDirectiveSet {
            line_numbering: Some(LineNumbering::StartAt(5)),
            ..Default::default()
        };
        let defaults = HighlightDirectiveSet {
            line_numbering: Some(LineNumbering::Enabled),
            ..Default::default()
        };

        let merged = block.with_defaults(&defaults);

        assert_eq!(merged.line_numbering, Some(LineNumbering::StartAt(5)));
    }

    #[test]
    fn test_with_defaults_falls_through() {
        let block = HighlightDirectiveSet {
            highlighted_lines: selector("2"),
            ..Default::default()
        };
        let defaults = HighlightDirectiveSet {
            line_numbering: Some(LineNumbering::Enabled),
            ..Default::default()
        };

        let merged = block.with_defaults(&defaults);

        assert_eq!(merged.line_numbering, Some(LineNumbering::Enabled));
        assert_eq!(merged.highlighted_lines, selector("2"));
    }

    #[test]
    fn test_with_defaults_absent_default_stays_absent() {
        let merged =
            HighlightDirectiveSet::default().with_defaults(&HighlightDirectiveSet::default());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_line_classes_compose() {
        let directives = HighlightDirectiveSet {
            highlighted_lines: selector("1"),
            diff: DiffMarks {
                added: Some(BTreeSet::from([1])),
                removed: None,
            },
            focused_lines: selector("2"),
            ..Default::default()
        };

        assert_eq!(
            directives.line_classes(1),
            vec![LineClass::Highlighted, LineClass::DiffAdd, LineClass::Blurred]
        );
        assert!(directives.line_classes(2).is_empty());
    }

    #[test]
    fn test_no_focus_means_nothing_blurred() {
        let directives = HighlightDirectiveSet::default();
        assert!(directives.line_classes(1).is_empty());
    }

    #[test]
    fn test_line_number() {
        let directives = HighlightDirectiveSet {
            line_numbering: Some(LineNumbering::StartAt(10)),
            ..Default::default()
        };
        assert_eq!(directives.line_number(1), Some(10));
        assert_eq!(directives.line_number(2), Some(11));
        assert_eq!(HighlightDirectiveSet::default().line_number(1), None);
    }

    #[test]
    fn test_line_number_saturates() {
        let directives = HighlightDirectiveSet {
            line_numbering: Some(LineNumbering::StartAt(u32::MAX)),
            ..Default::default()
        };
        assert_eq!(directives.line_number(3), Some(u32::MAX));
    }
}
