//! Grid storage: classification, adjacency, and the gate registry.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::core::{CellKind, GridCoord};
use crate::grid::config::{ConfigError, LotConfig, OBSTACLE_MARKER};

/// A named entry/exit point bound to one grid cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// Gate letter (e.g. 'A')
    pub id: char,
    /// The cell the gate occupies
    pub cell: GridCoord,
}

/// The static lot grid: a rectangular row-major arrangement of classified
/// cells plus the gate registry and the spot roster.
///
/// Built once from a [`LotConfig`] and immutable afterwards. Every
/// coordinate maps to exactly one [`CellKind`]; out-of-bounds coordinates
/// classify as `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct LotGrid {
    /// Cell classifications, row-major
    kinds: Vec<CellKind>,
    /// Grid width in cells
    width: usize,
    /// Grid height in cells
    height: usize,
    /// Registered gates, ordered by id. Non-empty by construction.
    gates: Vec<Gate>,
    /// All spot coordinates in row-major order
    spots: Vec<GridCoord>,
}

impl LotGrid {
    /// Build and validate a grid from a lot configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the layout is empty or not rectangular,
    /// a gate letter is duplicated, a gate marker and the registry
    /// disagree, a registered id is invalid, or the lot has no gates or
    /// no spots.
    pub fn from_config(config: &LotConfig) -> Result<Self, ConfigError> {
        // Registry ids are checked up front so a bad id reports as itself
        // rather than as a mismatch on some cell.
        for &id in config.gates.keys() {
            if !id.is_ascii_uppercase() || id == OBSTACLE_MARKER {
                return Err(ConfigError::InvalidGateId(id));
            }
        }

        let rows: Vec<Vec<&str>> = config
            .layout
            .iter()
            .map(|row| row.split_whitespace().collect())
            .collect();
        if rows.is_empty() || rows[0].is_empty() {
            return Err(ConfigError::EmptyLayout);
        }
        let width = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(ConfigError::NotRectangular {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
        }
        let height = rows.len();

        let mut kinds = Vec::with_capacity(width * height);
        let mut spots = Vec::new();
        let mut seen_gates: BTreeMap<char, GridCoord> = BTreeMap::new();
        for (r, row) in rows.iter().enumerate() {
            for (c, &marker) in row.iter().enumerate() {
                let cell = GridCoord::new(r as i32, c as i32);
                let kind = classify_marker(marker, cell, config, &mut seen_gates)?;
                if kind.is_spot() {
                    spots.push(cell);
                }
                kinds.push(kind);
            }
        }

        // Every registry entry must have been matched by a layout marker.
        for (&id, &(row, col)) in &config.gates {
            if !seen_gates.contains_key(&id) {
                return Err(ConfigError::GateMismatch {
                    id,
                    registered: GridCoord::new(row, col),
                });
            }
        }
        if seen_gates.is_empty() {
            return Err(ConfigError::NoGates);
        }
        if spots.is_empty() {
            return Err(ConfigError::NoSpots);
        }

        let gates = seen_gates
            .into_iter()
            .map(|(id, cell)| Gate { id, cell })
            .collect();
        Ok(Self {
            kinds,
            width,
            height,
            gates,
            spots,
        })
    }

    /// Grid width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Is the coordinate inside the grid?
    #[inline]
    pub fn in_bounds(&self, cell: GridCoord) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.height
            && (cell.col as usize) < self.width
    }

    /// Classification of a cell. `None` is the out-of-bounds answer.
    #[inline]
    pub fn kind(&self, cell: GridCoord) -> Option<&CellKind> {
        if self.in_bounds(cell) {
            Some(&self.kinds[self.index(cell)])
        } else {
            None
        }
    }

    /// The up-to-4 cardinal neighbors of a cell, excluding only
    /// out-of-bounds cells. Classification filtering is the router's job,
    /// not the grid's.
    pub fn neighbors(&self, cell: GridCoord) -> Vec<GridCoord> {
        cell.neighbors_4()
            .into_iter()
            .filter(|n| self.in_bounds(*n))
            .collect()
    }

    /// Iterate every cell with its classification, row-major
    pub fn cells(&self) -> impl Iterator<Item = (GridCoord, &CellKind)> + '_ {
        self.kinds.iter().enumerate().map(move |(i, kind)| {
            let coord = GridCoord::new((i / self.width) as i32, (i % self.width) as i32);
            (coord, kind)
        })
    }

    /// All registered gates, ordered by id
    #[inline]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Look up a gate by letter
    pub fn gate(&self, id: char) -> Option<&Gate> {
        self.gates.iter().find(|g| g.id == id)
    }

    /// The nearest gate by Manhattan distance, ties broken by gate id.
    pub fn nearest_gate(&self, from: GridCoord) -> &Gate {
        // gates is non-empty by construction (ConfigError::NoGates otherwise)
        let mut best = &self.gates[0];
        let mut best_distance = from.manhattan_distance(&best.cell);
        for gate in &self.gates[1..] {
            let distance = from.manhattan_distance(&gate.cell);
            if distance < best_distance {
                best = gate;
                best_distance = distance;
            }
        }
        best
    }

    /// All spot coordinates in row-major order
    #[inline]
    pub fn spots(&self) -> &[GridCoord] {
        &self.spots
    }

    /// Display label of a spot cell, if the cell is a spot
    pub fn spot_label(&self, cell: GridCoord) -> Option<&str> {
        match self.kind(cell) {
            Some(CellKind::Spot { label }) => Some(label.as_str()),
            _ => None,
        }
    }

    /// ASCII snapshot of the lot: gate letters, `#` obstacles, `.` free
    /// spots, `*` occupied spots. One line per row.
    pub fn to_ascii(&self, occupied: &HashMap<GridCoord, String>) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = GridCoord::new(row as i32, col as i32);
                if occupied.contains_key(&cell) {
                    out.push('*');
                } else {
                    out.push(self.kinds[self.index(cell)].as_char());
                }
            }
            out.push('\n');
        }
        out
    }

    #[inline]
    fn index(&self, cell: GridCoord) -> usize {
        cell.row as usize * self.width + cell.col as usize
    }
}

/// Classify one layout marker, recording gate sightings in `seen`.
fn classify_marker(
    marker: &str,
    cell: GridCoord,
    config: &LotConfig,
    seen: &mut BTreeMap<char, GridCoord>,
) -> Result<CellKind, ConfigError> {
    let single = {
        let mut chars = marker.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(ch),
            _ => None,
        }
    };
    match single {
        Some(ch) if ch == OBSTACLE_MARKER => Ok(CellKind::Obstacle),
        Some(ch) if ch.is_ascii_uppercase() => {
            if seen.contains_key(&ch) {
                return Err(ConfigError::DuplicateGate(ch));
            }
            match config.gates.get(&ch) {
                Some(&(row, col)) if GridCoord::new(row, col) == cell => {
                    seen.insert(ch, cell);
                    Ok(CellKind::Gate(ch))
                }
                Some(&(row, col)) => Err(ConfigError::GateMismatch {
                    id: ch,
                    registered: GridCoord::new(row, col),
                }),
                None => Err(ConfigError::UnregisteredGate { id: ch, cell }),
            }
        }
        _ => Ok(CellKind::Spot {
            label: marker.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_config() -> LotConfig {
        LotConfig::from_yaml_str(
            r#"
layout:
  - "A 1 2 3 X 5 B"
  - "7 X 9 X 11 X 13"
  - "C 15 X 17 X 19 D"
gates:
  A: [0, 0]
  B: [0, 6]
  C: [2, 0]
  D: [2, 6]
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_classification() {
        let grid = LotGrid::from_config(&reference_config()).unwrap();
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 3);

        assert_eq!(grid.kind(GridCoord::new(0, 0)), Some(&CellKind::Gate('A')));
        assert_eq!(grid.kind(GridCoord::new(0, 4)), Some(&CellKind::Obstacle));
        assert!(grid.kind(GridCoord::new(1, 4)).unwrap().is_spot());
        assert_eq!(grid.spot_label(GridCoord::new(1, 4)), Some("11"));
        assert_eq!(grid.spot_label(GridCoord::new(0, 0)), None);

        // Out of bounds classifies as None on all four sides.
        assert_eq!(grid.kind(GridCoord::new(-1, 0)), None);
        assert_eq!(grid.kind(GridCoord::new(0, -1)), None);
        assert_eq!(grid.kind(GridCoord::new(3, 0)), None);
        assert_eq!(grid.kind(GridCoord::new(0, 7)), None);
    }

    #[test]
    fn test_neighbors_exclude_out_of_bounds_only() {
        let grid = LotGrid::from_config(&reference_config()).unwrap();
        // Corner cell has two neighbors; obstacles are not filtered here.
        assert_eq!(
            grid.neighbors(GridCoord::new(0, 0)),
            vec![GridCoord::new(1, 0), GridCoord::new(0, 1)]
        );
        let middle = grid.neighbors(GridCoord::new(1, 3));
        assert_eq!(middle.len(), 4);
        assert!(middle.contains(&GridCoord::new(0, 3)));
    }

    #[test]
    fn test_spot_roster_row_major() {
        let grid = LotGrid::from_config(&reference_config()).unwrap();
        assert_eq!(grid.spots().len(), 11);
        assert_eq!(grid.spots()[0], GridCoord::new(0, 1));
        assert_eq!(grid.spots()[3], GridCoord::new(0, 5));
        assert_eq!(grid.spots()[4], GridCoord::new(1, 0));
        // Roster is strictly increasing in row-major order.
        assert!(grid.spots().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_gate_lookup_and_nearest() {
        let grid = LotGrid::from_config(&reference_config()).unwrap();
        assert_eq!(grid.gates().len(), 4);
        assert_eq!(grid.gate('C').unwrap().cell, GridCoord::new(2, 0));
        assert!(grid.gate('Z').is_none());

        assert_eq!(grid.nearest_gate(GridCoord::new(0, 1)).id, 'A');
        assert_eq!(grid.nearest_gate(GridCoord::new(2, 5)).id, 'D');
        // Equidistant from A and C: tie resolves to the smaller id.
        assert_eq!(grid.nearest_gate(GridCoord::new(1, 0)).id, 'A');
    }

    #[test]
    fn test_not_rectangular() {
        let config = LotConfig::from_yaml_str(
            r#"
layout:
  - "A 1 2"
  - "3 4"
gates:
  A: [0, 0]
"#,
        )
        .unwrap();
        assert_eq!(
            LotGrid::from_config(&config),
            Err(ConfigError::NotRectangular {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_duplicate_gate() {
        let config = LotConfig::from_yaml_str(
            r#"
layout:
  - "A 1 A"
gates:
  A: [0, 0]
"#,
        )
        .unwrap();
        // The second 'A' marker is the duplicate; registry matching of the
        // first one already consumed the letter.
        assert_eq!(
            LotGrid::from_config(&config),
            Err(ConfigError::DuplicateGate('A'))
        );
    }

    #[test]
    fn test_unregistered_gate_marker() {
        let config = LotConfig::from_yaml_str(
            r#"
layout:
  - "A 1 B"
gates:
  A: [0, 0]
"#,
        )
        .unwrap();
        assert_eq!(
            LotGrid::from_config(&config),
            Err(ConfigError::UnregisteredGate {
                id: 'B',
                cell: GridCoord::new(0, 2)
            })
        );
    }

    #[test]
    fn test_registry_mismatch() {
        let config = LotConfig::from_yaml_str(
            r#"
layout:
  - "A 1 2"
gates:
  A: [0, 1]
"#,
        )
        .unwrap();
        assert_eq!(
            LotGrid::from_config(&config),
            Err(ConfigError::GateMismatch {
                id: 'A',
                registered: GridCoord::new(0, 1)
            })
        );
    }

    #[test]
    fn test_registry_entry_without_marker() {
        let config = LotConfig::from_yaml_str(
            r#"
layout:
  - "A 1 2"
gates:
  A: [0, 0]
  B: [5, 5]
"#,
        )
        .unwrap();
        assert_eq!(
            LotGrid::from_config(&config),
            Err(ConfigError::GateMismatch {
                id: 'B',
                registered: GridCoord::new(5, 5)
            })
        );
    }

    #[test]
    fn test_invalid_gate_id() {
        let config = LotConfig::from_yaml_str(
            r#"
layout:
  - "A 1 2"
gates:
  A: [0, 0]
  X: [0, 1]
"#,
        )
        .unwrap();
        assert_eq!(
            LotGrid::from_config(&config),
            Err(ConfigError::InvalidGateId('X'))
        );
    }

    #[test]
    fn test_no_gates() {
        let config = LotConfig::from_yaml_str(
            r#"
layout:
  - "1 2 3"
gates: {}
"#,
        )
        .unwrap();
        assert_eq!(LotGrid::from_config(&config), Err(ConfigError::NoGates));
    }

    #[test]
    fn test_no_spots() {
        let config = LotConfig::from_yaml_str(
            r#"
layout:
  - "A X B"
gates:
  A: [0, 0]
  B: [0, 2]
"#,
        )
        .unwrap();
        assert_eq!(LotGrid::from_config(&config), Err(ConfigError::NoSpots));
    }

    #[test]
    fn test_empty_layout() {
        let config = LotConfig::from_yaml_str("layout: []\ngates: {}\n").unwrap();
        assert_eq!(LotGrid::from_config(&config), Err(ConfigError::EmptyLayout));
    }

    #[test]
    fn test_ascii_snapshot() {
        let grid = LotGrid::from_config(&reference_config()).unwrap();
        let mut occupied = HashMap::new();
        occupied.insert(GridCoord::new(0, 1), "V1".to_string());
        let ascii = grid.to_ascii(&occupied);
        assert_eq!(ascii, "A*..#.B\n.#.#.#.\nC.#.#.D\n");
    }
}
