//! A fully received log with random access to its lines.
//!
//! Lines are sliced out of the buffer through the offset index instead of
//! being copied out by a splitter.

use crate::indexer::joiner::concat;
use crate::indexer::scanner::line_end_offsets;
use crate::indexer::terminator::{CR, LF};

#[derive(Debug, Clone, Default)]
pub struct StaticLog {
    buffer: Vec<u8>,
    line_ends: Vec<usize>,
}

impl StaticLog {
    pub fn new(buffer: Vec<u8>) -> Self {
        let line_ends = line_end_offsets(&buffer);
        Self { buffer, line_ends }
    }

    /// Builds the log from parts fetched separately, in order.
    pub fn from_parts<B: AsRef<[u8]>>(parts: &[B]) -> Self {
        Self::new(concat(parts))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Offset just past each terminator.
    pub fn line_ends(&self) -> &[usize] {
        &self.line_ends
    }

    /// Bytes after the last terminator, if any.
    pub fn tail(&self) -> Option<&[u8]> {
        let start = self.line_ends.last().copied().unwrap_or(0);
        (start < self.buffer.len()).then(|| &self.buffer[start..])
    }

    /// Terminated lines plus the tail, if there is one.
    pub fn line_count(&self) -> usize {
        self.line_ends.len() + usize::from(self.tail().is_some())
    }

    /// Content of line `index` without its terminator.
    pub fn line(&self, index: usize) -> Option<&[u8]> {
        let Some(&end) = self.line_ends.get(index) else {
            return (index == self.line_ends.len()).then(|| self.tail()).flatten();
        };
        let start = index.checked_sub(1).map_or(0, |prev| self.line_ends[prev]);
        Some(strip_terminator(&self.buffer[start..end]))
    }

    pub fn lines(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.line_count()).filter_map(move |index| self.line(index))
    }
}

/// Removes the single terminator ending `line`. Line content never contains
/// CR or LF, so a CR before the final LF belongs to a CRLF.
fn strip_terminator(line: &[u8]) -> &[u8] {
    match line {
        [content @ .., CR, LF] | [content @ .., LF] | [content @ .., CR] => content,
        _ => line,
    }
}
