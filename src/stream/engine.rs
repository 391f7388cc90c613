//! Log streaming engine: per-stream line store and offset index.
//!
//! Chunks go through a [`LineSplitter`], completed lines are appended to the
//! store, and the offset just past each line (terminator included) is recorded
//! in stream space, cumulative across chunks.

use std::ops::Range;
use tracing::debug;

use crate::stream::error::StreamError;
use crate::stream::session::{LineSplitter, LogLine};
use crate::view::highlight::resolve_highlight_range;
use crate::view::scroll::{resolve_scroll_index, ScrollState};
use crate::view::ViewOptions;

/// What the engine keeps after a chunk has been indexed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Retention {
    /// Line contents and offsets.
    #[default]
    Lines,
    /// Offsets only. Content is dropped once indexed; hosts re-read byte
    /// ranges from their own copy of the log.
    OffsetsOnly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineOptions {
    pub retention: Retention,
}

/// Line store for one log stream.
#[derive(Debug, Default)]
pub struct LogEngine {
    options: EngineOptions,
    splitter: LineSplitter,
    /// Completed lines, append-only. Empty under [`Retention::OffsetsOnly`].
    lines: Vec<LogLine>,
    /// Stream offset just past each line. Line `i` spans
    /// `offsets[i - 1]..offsets[i]` (from 0 for the first line).
    offsets: Vec<u64>,
    /// Total bytes received, including the pending tail.
    total_bytes_indexed: u64,
    /// Line count before the most recent ingest.
    previous_count: usize,
    finished: bool,
}

impl LogEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Splits `chunk` (joined with the tail of earlier chunks) and appends the
    /// completed lines. Returns how many lines were added.
    ///
    /// # Errors
    /// [`StreamError::Finished`] if [`finish`](Self::finish) was already called.
    pub fn ingest(&mut self, chunk: &[u8]) -> Result<usize, StreamError> {
        if self.finished {
            return Err(StreamError::Finished {
                chunk_len: chunk.len(),
            });
        }
        self.previous_count = self.line_count();
        let lines = self.splitter.push(chunk);
        let added = lines.len();
        self.total_bytes_indexed += chunk.len() as u64;
        self.append_lines(lines);
        debug!(
            chunk_len = chunk.len(),
            added,
            line_count = self.line_count(),
            pending = self.pending_bytes(),
            "ingested chunk"
        );
        Ok(added)
    }

    /// Marks the end of the stream and flushes the pending tail as a final
    /// line. Returns true if a line was flushed. Later calls do nothing.
    pub fn finish(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;
        self.previous_count = self.line_count();
        let flushed = self.splitter.finish();
        let has_tail = flushed.is_some();
        self.append_lines(flushed);
        debug!(
            line_count = self.line_count(),
            total_bytes = self.total_bytes_indexed,
            flushed = has_tail,
            "finished stream"
        );
        has_tail
    }

    fn append_lines(&mut self, lines: impl IntoIterator<Item = LogLine>) {
        let mut end = self.offsets.last().copied().unwrap_or(0);
        for line in lines {
            end += line.len_with_terminator() as u64;
            self.offsets.push(end);
            if self.options.retention == Retention::Lines {
                self.lines.push(line);
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of lines indexed so far.
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }

    pub fn previous_count(&self) -> usize {
        self.previous_count
    }

    pub fn total_bytes_indexed(&self) -> u64 {
        self.total_bytes_indexed
    }

    /// Length of the unterminated tail waiting for more input.
    pub fn pending_bytes(&self) -> usize {
        self.splitter.pending().len()
    }

    /// Immutable view of line end offsets.
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// Line `index`, or `None` if out of range or content is not retained.
    pub fn line(&self, index: usize) -> Option<&LogLine> {
        self.lines.get(index)
    }

    /// Retained lines in `[start, end)`, clamped to what is available.
    pub fn lines(&self, start: usize, end: usize) -> &[LogLine] {
        let end = end.min(self.lines.len());
        let start = start.min(end);
        &self.lines[start..end]
    }

    /// (start, end) stream byte ranges for lines in [start, end), terminators
    /// included. Out-of-range bounds are clamped.
    pub fn get_line_ranges(&self, start: usize, end: usize) -> Vec<(u64, u64)> {
        let offsets = self.offsets();
        let end = end.min(offsets.len());
        let start = start.min(end);
        if start >= end {
            return Vec::new();
        }
        let mut ranges = Vec::with_capacity(end - start);
        let mut line_start = start.checked_sub(1).map_or(0, |prev| offsets[prev]);
        for &line_end in &offsets[start..end] {
            ranges.push((line_start, line_end));
            line_start = line_end;
        }
        ranges
    }

    /// Scroll target for the current line counts under `view`.
    pub fn scroll_index(&self, view: &ViewOptions) -> Option<i64> {
        resolve_scroll_index(&ScrollState {
            follow: view.follow,
            scroll_to_line: view.scroll_to_line,
            previous_count: self.previous_count,
            count: self.line_count(),
            offset: view.offset,
        })
    }

    pub fn highlight_range(&self, view: &ViewOptions) -> Range<usize> {
        resolve_highlight_range(view.highlight.as_ref())
    }

    /// Clears the index, lines and pending tail, and reopens the stream. Call
    /// between sessions to free memory.
    pub fn clear(&mut self) {
        debug!(line_count = self.line_count(), "clearing engine");
        *self = Self::with_options(self.options);
    }
}
