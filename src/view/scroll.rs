//! Resolves which line the viewport should be scrolled to.

/// Inputs for [`resolve_scroll_index`], taken from the current view state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Keep the newest line in view.
    pub follow: bool,
    /// 1-based line requested by the host; `0` means no request.
    pub scroll_to_line: usize,
    /// Line count at the previous render.
    pub previous_count: usize,
    /// Current line count.
    pub count: usize,
    /// Lines of lead-in kept above the target.
    pub offset: usize,
}

/// Returns the zero-based line index to scroll to, or `None` when no
/// programmatic scroll should happen.
///
/// Follow mode wins over an explicit target. A target that was already below
/// the previous line count has been reached and is not scrolled to again. The
/// result is not clamped and can be negative when `count` or `scroll_to_line`
/// is smaller than the lead-in `offset`.
///
/// Counts beyond `i64::MAX` saturate instead of wrapping.
pub fn resolve_scroll_index(state: &ScrollState) -> Option<i64> {
    let lead_in = to_i64(state.offset);
    if state.follow {
        return Some(to_i64(state.count).saturating_sub(1).saturating_sub(lead_in));
    }
    match state.scroll_to_line {
        0 => None,
        line if state.previous_count > line => None,
        line => Some(to_i64(line).saturating_sub(1).saturating_sub(lead_in)),
    }
}

#[inline(always)]
fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Clamps a resolved index into `0..count`. Returns `None` for an empty log.
pub fn clamp_scroll_index(index: i64, count: usize) -> Option<usize> {
    let last = count.checked_sub(1)?;
    Some(usize::try_from(index).map_or(0, |index| index.min(last)))
}
