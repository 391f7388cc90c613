//! Line terminator classification. Recognises LF, CR and CR+LF on raw bytes.
//!
//! Candidate bytes are located with `memchr2`, so scanning stays a single pass
//! regardless of which terminator style the log uses.

use memchr::memchr2;

pub const LF: u8 = b'\n';
pub const CR: u8 = b'\r';

/// Returns true if `byte` can start a line terminator (LF or CR).
#[inline(always)]
pub fn is_terminator_start(byte: u8) -> bool {
    byte == LF || byte == CR
}

/// A completed line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminator {
    /// Lone `\n`.
    Lf,
    /// Lone `\r` (classic Mac line endings, or progress-bar style output).
    Cr,
    /// `\r\n`.
    CrLf,
}

impl Terminator {
    /// Classifies the terminator starting at `current`. `next` is the byte that
    /// follows it, or `None` at the end of the buffer; a CR without a following
    /// LF is a 1-byte terminator.
    #[inline(always)]
    pub fn classify(current: u8, next: Option<u8>) -> Option<Self> {
        match (current, next) {
            (LF, _) => Some(Self::Lf),
            (CR, Some(LF)) => Some(Self::CrLf),
            (CR, _) => Some(Self::Cr),
            _ => None,
        }
    }

    /// Number of bytes the terminator occupies.
    #[inline(always)]
    pub fn width(self) -> usize {
        match self {
            Self::Lf | Self::Cr => 1,
            Self::CrLf => 2,
        }
    }

    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Lf => b"\n",
            Self::Cr => b"\r",
            Self::CrLf => b"\r\n",
        }
    }
}

/// A terminator found at `start` in the scanned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminatorMatch {
    pub start: usize,
    pub kind: Terminator,
}

impl TerminatorMatch {
    /// Offset just past the terminator, i.e. where the next line starts.
    #[inline(always)]
    pub fn end(self) -> usize {
        self.start + self.kind.width()
    }
}

/// Iterator over every terminator in a buffer, left to right. A CR at the very
/// end of the buffer is reported as [`Terminator::Cr`]; streaming callers that
/// may still receive the matching LF check for that themselves.
#[derive(Debug, Clone)]
pub struct Terminators<'a> {
    haystack: &'a [u8],
    pos: usize,
}

impl<'a> Terminators<'a> {
    pub fn new(haystack: &'a [u8]) -> Self {
        Self::starting_at(haystack, 0)
    }

    /// Starts scanning at `pos`. Bytes before it are not inspected.
    pub fn starting_at(haystack: &'a [u8], pos: usize) -> Self {
        Self { haystack, pos }
    }
}

impl Iterator for Terminators<'_> {
    type Item = TerminatorMatch;

    fn next(&mut self) -> Option<TerminatorMatch> {
        let rest = self.haystack.get(self.pos..)?;
        let start = self.pos + memchr2(LF, CR, rest)?;
        let next = self.haystack.get(start + 1).copied();
        let kind = Terminator::classify(self.haystack[start], next)?;
        let found = TerminatorMatch { start, kind };
        self.pos = found.end();
        Some(found)
    }
}
