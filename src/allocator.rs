//! Nearest-spot selection.
//!
//! Candidates are ranked by Manhattan distance from a reference cell
//! (typically an entry gate). Manhattan distance is a proxy for true
//! route length and can disagree with the router when obstacles
//! intervene; that approximation is accepted and documented here rather
//! than corrected.

use crate::core::GridCoord;

/// Select the nearest free spot to `from`.
///
/// Ties are resolved in row-major coordinate order, independent of the
/// order of `free`: the same inputs always select the same spot.
/// Returns `None` when the free set is empty (no spot available).
pub fn nearest_spot(free: &[GridCoord], from: GridCoord) -> Option<GridCoord> {
    free.iter()
        .copied()
        .min_by_key(|spot| (from.manhattan_distance(spot), *spot))
}
