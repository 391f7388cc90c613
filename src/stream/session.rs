//! Per-stream splitting session. Owns the unterminated tail carried between
//! chunks, so each log source needs its own `LineSplitter`.

use bstr::ByteSlice;
use std::{fmt, mem};
use tracing::trace;

use crate::indexer::splitter::{split_final, split_lines_from, Line};
use crate::indexer::terminator::{Terminator, CR};

/// An owned line taken out of the stream.
#[derive(Clone, PartialEq, Eq)]
pub struct LogLine {
    pub content: Box<[u8]>,
    /// `None` for a final line that ended with the stream instead of a terminator.
    pub terminator: Option<Terminator>,
}

impl LogLine {
    /// Bytes this line occupied in the stream.
    pub fn len_with_terminator(&self) -> usize {
        self.content.len() + self.terminator.map_or(0, Terminator::width)
    }
}

impl From<Line<'_>> for LogLine {
    fn from(line: Line<'_>) -> Self {
        Self {
            content: line.content.into(),
            terminator: line.terminator,
        }
    }
}

impl fmt::Debug for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogLine")
            .field("content", &self.content.as_bstr())
            .field("terminator", &self.terminator)
            .finish()
    }
}

/// Splits a chunked byte stream into lines, carrying the unterminated tail of
/// each chunk into the next call.
///
/// Chunks are appended to the carried tail and only the new bytes are scanned,
/// so a long line arriving in many chunks costs time linear in its length.
#[derive(Debug, Default)]
pub struct LineSplitter {
    /// Bytes since the last completed terminator. Holds no terminator except
    /// a trailing CR that may still be followed by LF.
    pending: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// First byte of `pending` not yet known to be line content.
    fn scan_start(&self) -> usize {
        self.pending.len() - usize::from(self.pending.last() == Some(&CR))
    }

    /// Feeds the next chunk and returns the lines it completed, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<LogLine> {
        let resume = self.scan_start();
        self.pending.extend_from_slice(chunk);
        let (lines, consumed) = {
            let split = split_lines_from(&self.pending, resume);
            let lines: Vec<LogLine> = split.lines.iter().copied().map(LogLine::from).collect();
            (lines, split.consumed())
        };
        self.pending.drain(..consumed);
        trace!(
            chunk_len = chunk.len(),
            resume,
            lines = lines.len(),
            pending = self.pending.len(),
            "split chunk"
        );
        lines
    }

    /// Ends the stream and returns the carried tail as a final line, if any.
    pub fn finish(&mut self) -> Option<LogLine> {
        let tail = mem::take(&mut self.pending);
        split_final(&tail).lines.pop().map(LogLine::from)
    }

    /// Bytes received since the last completed terminator.
    pub fn pending(&self) -> &[u8] {
        &self.pending
    }

    /// Drops the carried tail.
    pub fn reset(&mut self) {
        self.pending = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(lines: &[LogLine]) -> Vec<&[u8]> {
        lines.iter().map(|line| &*line.content).collect()
    }

    #[test]
    fn carries_partial_line() {
        let mut splitter = LineSplitter::new();
        assert!(splitter.push(b"hel").is_empty());
        assert_eq!(splitter.pending(), b"hel");
        let lines = splitter.push(b"lo\nwor");
        assert_eq!(contents(&lines), [&b"hello"[..]]);
        assert_eq!(splitter.pending(), b"wor");
        let last = splitter.finish().expect("tail");
        assert_eq!(&*last.content, b"wor");
        assert!(splitter.finish().is_none());
    }

    #[test]
    fn crlf_split_between_chunks_is_one_terminator() {
        let mut splitter = LineSplitter::new();
        assert!(splitter.push(b"a\r").is_empty());
        let lines = splitter.push(b"\nb");
        assert_eq!(contents(&lines), [&b"a"[..]]);
        assert_eq!(lines[0].terminator, Some(Terminator::CrLf));
        assert_eq!(lines[0].len_with_terminator(), 3);
        let last = splitter.finish().expect("tail");
        assert_eq!(&*last.content, b"b");
        assert_eq!(last.terminator, None);
    }

    #[test]
    fn trailing_cr_completes_on_finish() {
        let mut splitter = LineSplitter::new();
        assert!(splitter.push(b"progress 50%\r").is_empty());
        let last = splitter.finish().expect("tail");
        assert_eq!(&*last.content, b"progress 50%");
        assert_eq!(last.terminator, Some(Terminator::Cr));
    }

    #[test]
    fn chunk_ending_on_terminator_carries_nothing() {
        let mut splitter = LineSplitter::new();
        let lines = splitter.push(b"one\ntwo\n");
        assert_eq!(contents(&lines), [&b"one"[..], b"two"]);
        assert!(splitter.pending().is_empty());
        assert!(splitter.finish().is_none());
    }

    #[test]
    fn empty_chunks_are_harmless() {
        let mut splitter = LineSplitter::new();
        assert!(splitter.push(b"").is_empty());
        assert!(splitter.push(b"x").is_empty());
        assert!(splitter.push(b"").is_empty());
        assert_eq!(splitter.pending(), b"x");
    }

    #[test]
    fn long_line_only_scans_new_bytes() {
        let mut splitter = LineSplitter::new();
        let chunk = [b'x'; 64];
        for _ in 0..1_000 {
            assert_eq!(splitter.scan_start(), splitter.pending().len());
            assert!(splitter.push(&chunk).is_empty());
        }
        assert_eq!(splitter.pending().len(), 64_000);
        let lines = splitter.push(b"\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].content.len(), 64_000);
        assert!(splitter.pending().is_empty());
    }

    #[test]
    fn held_back_cr_is_rescanned() {
        let mut splitter = LineSplitter::new();
        splitter.push(b"abc\r");
        assert_eq!(splitter.scan_start(), 3);
        let lines = splitter.push(b"\ndef");
        assert_eq!(contents(&lines), [&b"abc"[..]]);
        assert_eq!(lines[0].terminator, Some(Terminator::CrLf));
        assert_eq!(splitter.scan_start(), 3);
        assert_eq!(splitter.pending(), b"def");
    }

    #[test]
    fn reset_drops_tail() {
        let mut splitter = LineSplitter::new();
        splitter.push(b"half");
        splitter.reset();
        assert!(splitter.finish().is_none());
    }
}
