//! Viewport hints derived from host state: where to scroll and which lines to
//! highlight. Both are pure functions of their inputs.

pub mod highlight;
pub mod scroll;

use highlight::Highlight;

/// View settings a host passes alongside a log stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ViewOptions {
    /// Keep the newest line in view as lines arrive.
    pub follow: bool,
    /// 1-based line to bring into view; `0` leaves scrolling to the user.
    pub scroll_to_line: usize,
    /// Lines of lead-in kept above a scroll target.
    pub offset: usize,
    pub highlight: Option<Highlight>,
}
