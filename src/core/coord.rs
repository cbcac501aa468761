//! Grid coordinate type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell position in the lot grid.
///
/// Rows grow downward and columns grow rightward; (0, 0) is the top-left
/// cell of the layout. `Ord` is derived, so coordinates sort in row-major
/// order, the fixed enumeration order used wherever a deterministic
/// tie-break is needed.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridCoord {
    /// Row index (0 = top)
    pub row: i32,
    /// Column index (0 = left)
    pub col: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// The 4 cardinal neighbors, in up, down, left, right order.
    ///
    /// The order is fixed: it is the discovery order the router's
    /// tie-breaking depends on.
    #[inline]
    pub fn neighbors_4(&self) -> [GridCoord; 4] {
        [
            GridCoord::new(self.row - 1, self.col), // Up
            GridCoord::new(self.row + 1, self.col), // Down
            GridCoord::new(self.row, self.col - 1), // Left
            GridCoord::new(self.row, self.col + 1), // Right
        ]
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
