//! Static lot model: configuration, classification, adjacency.
//!
//! This module provides the immutable description of the lot:
//!
//! - [`LotConfig`]: YAML lot description (layout rows + gate registry)
//! - [`LotGrid`]: validated rectangular grid with per-cell classification,
//!   adjacency queries, the gate registry, and the spot roster
//!
//! The grid is built once at startup and never mutated; occupancy lives in
//! the [ledger](crate::ledger), not here.

mod config;
mod storage;

pub use config::{ConfigError, LotConfig, OBSTACLE_MARKER};
pub use storage::{Gate, LotGrid};
