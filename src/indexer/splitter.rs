//! Incremental byte-to-lines splitter.
//!
//! `split_lines` is the per-chunk step: it emits every completed line and
//! returns the unterminated tail, which the caller joins with the next chunk
//! (see [`crate::indexer::joiner::join`]). A CR in the last byte position is
//! held back in that tail because the LF completing a CRLF may arrive in the
//! next chunk. `split_final` is used once the stream has ended.

use bstr::ByteSlice;
use std::fmt;

use crate::indexer::terminator::{Terminator, Terminators, CR};

/// One line of a split buffer. `content` never includes the terminator.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub content: &'a [u8],
    /// `None` only for the final, unterminated line returned by `split_final`.
    pub terminator: Option<Terminator>,
}

impl fmt::Debug for Line<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Line")
            .field("content", &self.content.as_bstr())
            .field("terminator", &self.terminator)
            .finish()
    }
}

/// Result of splitting one buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Split<'a> {
    pub lines: Vec<Line<'a>>,
    /// Bytes after the last completed terminator. `None` when the buffer ended
    /// exactly on a terminator (or was empty).
    pub remainder: Option<&'a [u8]>,
}

impl<'a> Split<'a> {
    /// Line contents in order, terminators excluded.
    pub fn contents(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        self.lines.iter().map(|line| line.content)
    }

    /// Bytes consumed by completed lines, terminators included.
    pub fn consumed(&self) -> usize {
        self.lines
            .iter()
            .map(|line| line.content.len() + line.terminator.map_or(0, Terminator::width))
            .sum()
    }
}

/// Splits `buffer` into completed lines plus the unterminated remainder.
///
/// Runs in one pass. Empty lines between consecutive terminators are kept. A
/// buffer with no terminator yields no lines and is returned whole as the
/// remainder.
pub fn split_lines(buffer: &[u8]) -> Split<'_> {
    split_lines_from(buffer, 0)
}

/// Like [`split_lines`], but the terminator scan starts at `resume`. The first
/// line still starts at 0, so `buffer[..resume]` must hold no terminator; this
/// lets a session that appends chunks to its tail skip bytes it already scanned.
pub fn split_lines_from(buffer: &[u8], resume: usize) -> Split<'_> {
    let mut lines = Vec::new();
    let mut line_start = 0;

    for found in Terminators::starting_at(buffer, resume) {
        // Lone CR in the last position: may be the first half of a CRLF.
        if found.kind == Terminator::Cr && found.end() == buffer.len() {
            break;
        }
        lines.push(Line {
            content: &buffer[line_start..found.start],
            terminator: Some(found.kind),
        });
        line_start = found.end();
    }

    let remainder = (line_start != buffer.len()).then(|| &buffer[line_start..]);
    Split { lines, remainder }
}

/// Splits the last buffer of a stream. Nothing can follow it, so a trailing CR
/// completes its line and any unterminated tail becomes a final line without a
/// terminator. The remainder is always `None`.
pub fn split_final(buffer: &[u8]) -> Split<'_> {
    let mut split = split_lines(buffer);
    if let Some(tail) = split.remainder.take() {
        let line = match tail.strip_suffix(&[CR]) {
            Some(content) => Line {
                content,
                terminator: Some(Terminator::Cr),
            },
            None => Line {
                content: tail,
                terminator: None,
            },
        };
        split.lines.push(line);
    }
    split
}
