//! Normalizes a highlight request into a half-open line range.

use std::ops::Range;

/// Lines the host asked to highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Highlight {
    /// A single line. `0` means nothing is highlighted.
    Line(usize),
    /// `[line]` or `[start, end]` with `end` inclusive. Elements past the
    /// second are ignored.
    Lines(Vec<usize>),
}

/// Converts `highlight` into `from..to`. The inclusive end of a `[start, end]`
/// pair becomes exclusive. Inputs are not validated, so `start > end` gives a
/// reversed (empty) range.
pub fn resolve_highlight_range(highlight: Option<&Highlight>) -> Range<usize> {
    match highlight {
        None | Some(Highlight::Line(0)) => 0..0,
        Some(Highlight::Line(line)) => *line..line.saturating_add(1),
        Some(Highlight::Lines(lines)) => match lines.as_slice() {
            [] => 0..0,
            [line] => *line..line.saturating_add(1),
            [start, end, ..] => *start..end.saturating_add(1),
        },
    }
}
