//! Route planning over the lot grid.
//!
//! A* search between two cells, 4-connected with unit step cost:
//!
//! ```rust,ignore
//! use vahana_park::pathfinding::find_route;
//!
//! if let Some(route) = find_route(&grid, gate.cell, spot) {
//!     println!("route found, {} cells", route.cost());
//! }
//! ```

pub mod astar;

pub use astar::{find_route, route_exists, Route};
