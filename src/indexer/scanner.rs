//! Line-end offset scanner. Finds line boundaries in raw bytes for indexing.
//!
//! Uses `memchr2` for fast \n and \r detection and classifies \r\n as a single
//! boundary. Offsets point just past each terminator, so they double as the
//! start offset of the following line.

use crate::indexer::terminator::Terminators;

/// Returns the offset just past every terminator in `buffer`, in increasing
/// order. `buffer` is treated as complete: a trailing \r ends a line, and an
/// unterminated tail gets no entry.
pub fn line_end_offsets(buffer: &[u8]) -> Vec<usize> {
    Terminators::new(buffer).map(|found| found.end()).collect()
}
