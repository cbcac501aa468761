//! Deterministic A* routing.
//!
//! Search is 4-connected with unit step cost and a Manhattan distance
//! heuristic (admissible and consistent for this movement model). Every
//! cell other than the two endpoints is traversable only if it is a spot:
//! gates and obstacles block transit and are valid only as endpoints.
//!
//! # Determinism
//!
//! Equal-cost routes are resolved identically on every run:
//!
//! - The frontier is ordered by `f = g + h`, ties broken by insertion
//!   order (first discovered, first expanded) via a monotone sequence
//!   number.
//! - A cell's `g` score is replaced only by a strictly better path, so
//!   the first route found among equals survives.
//!
//! The search terminates when the goal is popped; an exhausted frontier
//! means no route exists, reported as `None`. That is an expected,
//! recoverable outcome, not a failure of the search.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::fmt;

use log::{debug, trace};

use crate::core::GridCoord;
use crate::grid::LotGrid;

/// A computed route between two cells.
///
/// Cells run from start to goal inclusive; consecutive cells are
/// 4-adjacent and every interior cell is a spot. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// Cells visited, start first
    pub cells: Vec<GridCoord>,
}

impl Route {
    /// Route cost: the number of cells visited, both endpoints included.
    ///
    /// This is path length, not edge count: a route from a cell to
    /// itself costs 1.
    #[inline]
    pub fn cost(&self) -> usize {
        self.cells.len()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, "->")?;
            }
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}

/// Frontier entry. Ordered as a min-heap on (f, seq) under
/// `BinaryHeap`'s max-heap semantics.
struct OpenNode {
    f: i32,
    seq: u64,
    cell: GridCoord,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: the heap pops the lowest f, then the earliest insertion.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a minimum-length route from `start` to `goal`.
///
/// Returns `None` when no route exists or either endpoint is out of
/// bounds. `start == goal` yields the single-cell route of cost 1.
pub fn find_route(grid: &LotGrid, start: GridCoord, goal: GridCoord) -> Option<Route> {
    trace!("[Route] search start={} goal={}", start, goal);

    if grid.kind(start).is_none() || grid.kind(goal).is_none() {
        debug!("[Route] endpoint out of bounds: start={} goal={}", start, goal);
        return None;
    }
    if start == goal {
        return Some(Route { cells: vec![start] });
    }

    let mut open = BinaryHeap::new();
    let mut closed: HashSet<GridCoord> = HashSet::new();
    let mut came_from: HashMap<GridCoord, GridCoord> = HashMap::new();
    let mut g_scores: HashMap<GridCoord, i32> = HashMap::new();
    let mut seq: u64 = 0;

    g_scores.insert(start, 0);
    open.push(OpenNode {
        f: start.manhattan_distance(&goal),
        seq,
        cell: start,
    });

    while let Some(node) = open.pop() {
        let current = node.cell;
        if current == goal {
            let route = reconstruct(&came_from, goal);
            trace!("[Route] found: {} ({} cells)", route, route.cost());
            return Some(route);
        }
        if !closed.insert(current) {
            continue; // stale frontier entry
        }

        let g = g_scores[&current];
        for neighbor in current.neighbors_4() {
            if closed.contains(&neighbor) {
                continue;
            }
            // Interior cells must be spots; only the goal is exempt.
            let traversable =
                neighbor == goal || grid.kind(neighbor).is_some_and(|k| k.is_spot());
            if !traversable {
                continue;
            }

            let tentative = g + 1;
            let known = g_scores.get(&neighbor).copied().unwrap_or(i32::MAX);
            if tentative < known {
                came_from.insert(neighbor, current);
                g_scores.insert(neighbor, tentative);
                seq += 1;
                open.push(OpenNode {
                    f: tentative + neighbor.manhattan_distance(&goal),
                    seq,
                    cell: neighbor,
                });
            }
        }
    }

    debug!("[Route] no route start={} goal={}", start, goal);
    None
}

/// Check whether a route exists (same search, route discarded)
pub fn route_exists(grid: &LotGrid, start: GridCoord, goal: GridCoord) -> bool {
    find_route(grid, start, goal).is_some()
}

/// Walk the back-links from the goal to the start, then reverse.
fn reconstruct(came_from: &HashMap<GridCoord, GridCoord>, goal: GridCoord) -> Route {
    let mut cells = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        cells.push(prev);
        current = prev;
    }
    cells.reverse();
    Route { cells }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::LotConfig;

    fn reference_grid() -> LotGrid {
        let config = LotConfig::from_yaml_str(
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
        .unwrap();
        LotGrid::from_config(&config).unwrap()
    }

    #[test]
    fn test_adjacent_route() {
        let grid = reference_grid();
        let route = find_route(&grid, GridCoord::new(0, 0), GridCoord::new(0, 1)).unwrap();
        assert_eq!(route.cells, vec![GridCoord::new(0, 0), GridCoord::new(0, 1)]);
        assert_eq!(route.cost(), 2);
    }

    #[test]
    fn test_route_skirts_obstacles() {
        let grid = reference_grid();
        // (0,3) to (0,5): the direct row is blocked by the obstacle at
        // (0,4) and the detour through row 1 is blocked at (1,3)/(1,5),
        // so no route exists between them.
        assert!(find_route(&grid, GridCoord::new(0, 3), GridCoord::new(0, 5)).is_none());

        // (0,1) to (1,2) goes around the obstacle at (1,1).
        let route = find_route(&grid, GridCoord::new(0, 1), GridCoord::new(1, 2)).unwrap();
        assert_eq!(route.cost(), 3);
        assert_eq!(
            route.cells,
            vec![
                GridCoord::new(0, 1),
                GridCoord::new(0, 2),
                GridCoord::new(1, 2)
            ]
        );
    }

    #[test]
    fn test_gates_block_transit() {
        let config = LotConfig::from_yaml_str(
            r#"
layout:
  - "1 A 2"
gates:
  A: [0, 1]
"#,
        )
        .unwrap();
        let grid = LotGrid::from_config(&config).unwrap();
        // The only way from (0,0) to (0,2) runs through gate A, which is
        // traversable only as an endpoint.
        assert!(find_route(&grid, GridCoord::new(0, 0), GridCoord::new(0, 2)).is_none());
        // The gate itself is reachable as a goal.
        assert!(find_route(&grid, GridCoord::new(0, 0), GridCoord::new(0, 1)).is_some());
    }

    #[test]
    fn test_no_route_is_none() {
        let config = LotConfig::from_yaml_str(
            r#"
layout:
  - "A X 1"
gates:
  A: [0, 0]
"#,
        )
        .unwrap();
        let grid = LotGrid::from_config(&config).unwrap();
        assert!(find_route(&grid, GridCoord::new(0, 0), GridCoord::new(0, 2)).is_none());
        assert!(!route_exists(&grid, GridCoord::new(0, 0), GridCoord::new(0, 2)));
    }

    #[test]
    fn test_start_equals_goal() {
        let grid = reference_grid();
        let route = find_route(&grid, GridCoord::new(1, 0), GridCoord::new(1, 0)).unwrap();
        assert_eq!(route.cells, vec![GridCoord::new(1, 0)]);
        assert_eq!(route.cost(), 1);
    }

    #[test]
    fn test_out_of_bounds_endpoints() {
        let grid = reference_grid();
        assert!(find_route(&grid, GridCoord::new(-1, 0), GridCoord::new(0, 1)).is_none());
        assert!(find_route(&grid, GridCoord::new(0, 1), GridCoord::new(9, 9)).is_none());
    }

    #[test]
    fn test_equal_cost_tie_is_stable() {
        let config = LotConfig::from_yaml_str(
            r#"
layout:
  - "A 1 2"
  - "3 4 5"
gates:
  A: [0, 0]
"#,
        )
        .unwrap();
        let grid = LotGrid::from_config(&config).unwrap();
        // Two cost-3 routes exist to (1,1); expansion order (up, down,
        // left, right) discovers the one through (1,0) first.
        let expected = vec![
            GridCoord::new(0, 0),
            GridCoord::new(1, 0),
            GridCoord::new(1, 1),
        ];
        for _ in 0..20 {
            let route =
                find_route(&grid, GridCoord::new(0, 0), GridCoord::new(1, 1)).unwrap();
            assert_eq!(route.cells, expected);
        }
    }

    #[test]
    fn test_route_display() {
        let route = Route {
            cells: vec![GridCoord::new(0, 0), GridCoord::new(0, 1)],
        };
        assert_eq!(route.to_string(), "(0,0)->(0,1)");
    }
}
