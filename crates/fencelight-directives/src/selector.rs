//! Line selectors: comma-separated lists of single lines and hyphen ranges.

use std::fmt;

/// Inclusive range of 1-indexed lines.
///
/// Ranges written high-to-low (`3-1`) are normalized so that `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    fn new(a: u32, b: u32) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    #[must_use]
    pub fn contains(self, line: u32) -> bool {
        (self.start..=self.end).contains(&line)
    }
}

/// Parsed line selector such as `1,3-5`.
///
/// Values are not checked against the length of any body: out-of-range lines
/// simply never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSelector {
    ranges: Vec<LineRange>,
}

impl LineSelector {
    /// Parse selector content (without braces).
    ///
    /// Returns `None` when the content is empty or contains anything other than
    /// decimal numbers, hyphen ranges, commas and whitespace.
    #[must_use]
    pub fn parse(content: &str) -> Option<Self> {
        let mut ranges = Vec::new();
        for part in content.split(',') {
            let part = part.trim();
            let range = match part.split_once('-') {
                Some((from, to)) => LineRange::new(parse_line(from)?, parse_line(to)?),
                None => {
                    let line = parse_line(part)?;
                    LineRange::new(line, line)
                }
            };
            ranges.push(range);
        }
        Some(Self { ranges })
    }

    /// Whether the 1-indexed `line` is selected.
    #[must_use]
    pub fn contains(&self, line: u32) -> bool {
        self.ranges.iter().any(|range| range.contains(line))
    }

    /// Ranges in the order they were written.
    #[must_use]
    pub fn ranges(&self) -> &[LineRange] {
        &self.ranges
    }

    /// Ranges sorted by start, with overlapping and touching ranges joined.
    #[must_use]
    pub fn merged_ranges(&self) -> Vec<LineRange> {
        let mut sorted = self.ranges.clone();
        sorted.sort_unstable_by_key(|range| range.start);
        let mut merged: Vec<LineRange> = Vec::with_capacity(sorted.len());
        for range in sorted {
            match merged.last_mut() {
                Some(last) if range.start <= last.end.saturating_add(1) => {
                    last.end = last.end.max(range.end);
                }
                _ => merged.push(range),
            }
        }
        merged
    }

    /// Every selected line, ascending and without duplicates.
    ///
    /// Lazy: a selector like `1-4294967295` yields lines on demand.
    pub fn lines(&self) -> impl Iterator<Item = u32> {
        self.merged_ranges()
            .into_iter()
            .flat_map(|range| range.start..=range.end)
    }
}

/// Encoded form, e.g. `1,3-5`.
impl fmt::Display for LineSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if range.start == range.end {
                write!(f, "{}", range.start)?;
            } else {
                write!(f, "{}-{}", range.start, range.end)?;
            }
        }
        Ok(())
    }
}

fn parse_line(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_singles_and_ranges() {
        let selector = LineSelector::parse("1,3-5").unwrap();
        assert_eq!(selector.lines().collect::<Vec<_>>(), vec![1, 3, 4, 5]);
        assert!(selector.contains(4));
        assert!(!selector.contains(2));
    }

    #[test]
    fn test_parse_allows_whitespace() {
        let selector = LineSelector::parse(" 2 , 4 - 5 ").unwrap();
        assert_eq!(selector.to_string(), "2,4-5");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(LineSelector::parse("").is_none());
        assert!(LineSelector::parse("  ").is_none());
        assert!(LineSelector::parse("1,,2").is_none());
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(LineSelector::parse("a").is_none());
        assert!(LineSelector::parse("1,x").is_none());
        assert!(LineSelector::parse("1-").is_none());
        assert!(LineSelector::parse("-2").is_none());
        assert!(LineSelector::parse("1-2-3").is_none());
        assert!(LineSelector::parse("+1").is_none());
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert!(LineSelector::parse("99999999999999999999").is_none());
    }

    #[test]
    fn test_reversed_range_normalized() {
        let selector = LineSelector::parse("3-1").unwrap();
        assert_eq!(selector.ranges(), &[LineRange { start: 1, end: 3 }]);
        assert_eq!(selector.lines().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(selector.to_string(), "1-3");
    }

    #[test]
    fn test_lines_deduplicated() {
        let selector = LineSelector::parse("2-4,3,1-2").unwrap();
        assert_eq!(selector.lines().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_display_preserves_written_order() {
        let selector = LineSelector::parse("7,2-3").unwrap();
        assert_eq!(selector.to_string(), "7,2-3");
    }

    #[test]
    fn test_lines_huge_range_is_lazy() {
        let selector = LineSelector::parse("4294967290-4294967295,1").unwrap();
        let first: Vec<u32> = selector.lines().take(3).collect();
        assert_eq!(first, vec![1, 4_294_967_290, 4_294_967_291]);
        assert_eq!(selector.lines().last(), Some(u32::MAX));
        assert_eq!(selector.lines().count(), 7);
    }

    #[test]
    fn test_merged_ranges() {
        let selector = LineSelector::parse("5-6,1-2,3,9").unwrap();
        assert_eq!(
            selector.merged_ranges(),
            vec![LineRange { start: 1, end: 6 }, LineRange { start: 9, end: 9 }]
        );
    }
}
