//! FFI layer for the log line engine. Exports for JS: a `LogStream` class (one per
//! log source), offset indexing for fully loaded logs, and the scroll/highlight
//! resolvers used by the viewer.

use wasm_bindgen::prelude::*;

pub mod indexer;
pub mod stream;
pub mod view;

pub use indexer::joiner::{concat, join};
pub use indexer::scanner::line_end_offsets;
pub use indexer::splitter::{split_final, split_lines, split_lines_from, Line, Split};
pub use indexer::terminator::{is_terminator_start, Terminator};
pub use stream::engine::{EngineOptions, LogEngine, Retention};
pub use stream::error::StreamError;
pub use stream::session::{LineSplitter, LogLine};
pub use stream::static_log::StaticLog;
pub use view::highlight::{resolve_highlight_range, Highlight};
pub use view::scroll::{clamp_scroll_index, resolve_scroll_index, ScrollState};
pub use view::ViewOptions;

/// Sentinel returned to JS when no programmatic scroll should happen.
const NO_SCROLL: f64 = -1.0;

/// One log stream. Each source gets its own instance so their pending tails
/// never mix.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct LogStream {
    engine: LogEngine,
}

#[wasm_bindgen]
impl LogStream {
    /// Creates a stream. With `offsets_only`, line content is dropped after
    /// indexing and JS reads lines back through `line_byte_ranges`.
    #[wasm_bindgen(constructor)]
    pub fn new(offsets_only: bool) -> LogStream {
        let retention = if offsets_only {
            Retention::OffsetsOnly
        } else {
            Retention::Lines
        };
        LogStream {
            engine: LogEngine::with_options(EngineOptions { retention }),
        }
    }

    /// Splits the next chunk, joined with the tail of earlier chunks. Returns the
    /// number of completed lines. Fails once `finish` has been called.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Result<usize, JsError> {
        Ok(self.engine.ingest(chunk)?)
    }

    /// Ends the stream, flushing any unterminated tail as the last line.
    pub fn finish(&mut self) -> bool {
        self.engine.finish()
    }

    pub fn line_count(&self) -> usize {
        self.engine.line_count()
    }

    pub fn pending_bytes(&self) -> usize {
        self.engine.pending_bytes()
    }

    /// Raw bytes of line `index`, terminator excluded. Decoding is left to JS.
    pub fn line(&self, index: usize) -> Option<Vec<u8>> {
        self.engine.line(index).map(|line| line.content.to_vec())
    }

    /// Returns `[start, end]` stream byte ranges for lines [start, end).
    pub fn line_byte_ranges(&self, start: usize, end: usize) -> JsValue {
        self.engine
            .get_line_ranges(start, end)
            .into_iter()
            .map(|(s, e)| JsValue::from(js_pair(s as f64, e as f64)))
            .collect::<js_sys::Array>()
            .into()
    }

    /// Scroll target for the current counts, or -1 for no scroll.
    pub fn scroll_index(&self, follow: bool, scroll_to_line: usize, offset: usize) -> f64 {
        let view = ViewOptions {
            follow,
            scroll_to_line,
            offset,
            highlight: None,
        };
        self.engine
            .scroll_index(&view)
            .map_or(NO_SCROLL, |index| index as f64)
    }

    /// Clears lines, index and pending tail. Call between sessions to free memory.
    pub fn clear(&mut self) {
        self.engine.clear();
    }
}

/// Line end offsets for a fully loaded log, one per terminator.
#[wasm_bindgen(js_name = line_end_offsets)]
pub fn line_end_offsets_js(buffer: &[u8]) -> Vec<u32> {
    line_end_offsets(buffer)
        .into_iter()
        .map(|end| end as u32)
        .collect()
}

/// Zero-based line to scroll to, or -1 for no scroll. See [`resolve_scroll_index`].
#[wasm_bindgen]
pub fn scroll_index(
    follow: bool,
    scroll_to_line: usize,
    previous_count: usize,
    count: usize,
    offset: usize,
) -> f64 {
    resolve_scroll_index(&ScrollState {
        follow,
        scroll_to_line,
        previous_count,
        count,
        offset,
    })
    .map_or(NO_SCROLL, |index| index as f64)
}

/// Returns `[from, to]` for a highlight prop: falsy, a line number, or an
/// array of one or two line numbers. Line numbers are read as `usize`:
/// negative numbers, `NaN` and non-numeric array entries become 0, and
/// fractions are truncated.
#[wasm_bindgen]
pub fn highlight_range(value: &JsValue) -> JsValue {
    let highlight = HighlightProp::from_js(value).map(HighlightProp::into_highlight);
    let range = resolve_highlight_range(highlight.as_ref());
    js_pair(range.start as f64, range.end as f64).into()
}

fn js_pair(first: f64, second: f64) -> js_sys::Array {
    js_sys::Array::of2(&JsValue::from(first), &JsValue::from(second))
}

/// A truthy highlight prop as read from JS.
#[derive(Debug, Clone, PartialEq)]
enum HighlightProp {
    Number(f64),
    /// Array entries; `None` for entries that are not numbers.
    Array(Vec<Option<f64>>),
}

impl HighlightProp {
    /// `None` for falsy values and for anything that is neither a number nor
    /// an array.
    fn from_js(value: &JsValue) -> Option<Self> {
        if value.is_falsy() {
            return None;
        }
        if let Some(line) = value.as_f64() {
            return Some(Self::Number(line));
        }
        if js_sys::Array::is_array(value) {
            let entries = js_sys::Array::from(value)
                .iter()
                .map(|entry| entry.as_f64())
                .collect();
            return Some(Self::Array(entries));
        }
        None
    }

    fn into_highlight(self) -> Highlight {
        match self {
            Self::Number(line) => Highlight::Line(line_number(line)),
            Self::Array(entries) => Highlight::Lines(
                entries
                    .into_iter()
                    .map(|entry| entry.map_or(0, line_number))
                    .collect(),
            ),
        }
    }
}

/// Saturating float-to-int conversion: negatives and `NaN` give 0.
fn line_number(value: f64) -> usize {
    value as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn range_of(prop: HighlightProp) -> std::ops::Range<usize> {
        resolve_highlight_range(Some(&prop.into_highlight()))
    }

    #[rstest]
    #[case::zero_scalar(HighlightProp::Number(0.0), 0..0)]
    #[case::scalar(HighlightProp::Number(4.0), 4..5)]
    #[case::one_element(HighlightProp::Array(vec![Some(4.0)]), 4..5)]
    #[case::two_elements(HighlightProp::Array(vec![Some(4.0), Some(6.0)]), 4..7)]
    #[case::three_elements(HighlightProp::Array(vec![Some(2.0), Some(5.0), Some(9.0)]), 2..6)]
    #[case::empty_array(HighlightProp::Array(vec![]), 0..0)]
    #[case::negative_clamps(HighlightProp::Number(-1.0), 0..0)]
    #[case::negative_in_array(HighlightProp::Array(vec![Some(-1.0), Some(3.0)]), 0..4)]
    #[case::fraction_truncates(HighlightProp::Number(4.7), 4..5)]
    #[case::non_numeric_entry(HighlightProp::Array(vec![None, Some(2.0)]), 0..3)]
    #[case::nan(HighlightProp::Number(f64::NAN), 0..0)]
    fn highlight_props(#[case] prop: HighlightProp, #[case] expected: std::ops::Range<usize>) {
        assert_eq!(range_of(prop), expected);
    }

    #[test]
    fn line_numbers_saturate() {
        assert_eq!(line_number(f64::INFINITY), usize::MAX);
        assert_eq!(line_number(f64::NEG_INFINITY), 0);
        assert_eq!(line_number(12.0), 12);
    }
}
