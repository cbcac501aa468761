//! Cell classification for the lot grid.

use serde::{Deserialize, Serialize};

/// What a layout cell is. Exactly one kind per coordinate, fixed for the
/// process lifetime once the grid is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Entry/exit gate, identified by letter. Gates are bidirectional:
    /// usable both as entry and as exit.
    Gate(char),

    /// Non-traversable cell (wall, pillar, marked-off area).
    Obstacle,

    /// Drivable cell that can hold one vehicle. The label is the cell's
    /// layout marker, kept for display only; occupancy lives in the
    /// ledger, not here.
    Spot {
        /// Display label from the layout (e.g. "11")
        label: String,
    },
}

impl CellKind {
    /// Is this a parking spot?
    #[inline]
    pub fn is_spot(&self) -> bool {
        matches!(self, CellKind::Spot { .. })
    }

    /// Is this a gate?
    #[inline]
    pub fn is_gate(&self) -> bool {
        matches!(self, CellKind::Gate(_))
    }

    /// Is this an obstacle?
    #[inline]
    pub fn is_obstacle(&self) -> bool {
        matches!(self, CellKind::Obstacle)
    }

    /// Single character representation for debugging and ASCII rendering
    pub fn as_char(&self) -> char {
        match self {
            CellKind::Gate(id) => *id,
            CellKind::Obstacle => '#',
            CellKind::Spot { .. } => '.',
        }
    }
}
