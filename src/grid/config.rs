//! Lot configuration: layout rows and the gate registry.
//!
//! A lot is described by a rectangular table of cell markers plus a
//! registry binding each gate letter to its coordinate. Example YAML:
//!
//! ```yaml
//! layout:
//!   - "A 1 2 3 X 5 B"
//!   - "7 X 9 X 11 X 13"
//!   - "C 15 X 17 X 19 D"
//! gates:
//!   A: [0, 0]
//!   B: [0, 6]
//!   C: [2, 0]
//!   D: [2, 6]
//! ```
//!
//! Each row is a whitespace-separated list of markers. `X` is the reserved
//! obstacle marker, a registered uppercase letter is a gate, and any other
//! marker is a spot with that marker as its display label.
//!
//! Loading only parses; structural validation happens when the grid is
//! built with [`LotGrid::from_config`](crate::grid::LotGrid::from_config).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::GridCoord;

/// Layout marker reserved for obstacles.
pub const OBSTACLE_MARKER: char = 'X';

/// Lot description supplied once at startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LotConfig {
    /// Layout rows, one string of whitespace-separated markers per row
    pub layout: Vec<String>,

    /// Gate registry: gate letter to (row, column). Must be consistent
    /// with the layout's gate markers.
    pub gates: BTreeMap<char, (i32, i32)>,
}

impl LotConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_yaml_str(&contents)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize to a YAML string
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = self.to_yaml_string()?;
        std::fs::write(path, yaml).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// Registered coordinate of a gate, if any
    pub fn gate_cell(&self, id: char) -> Option<GridCoord> {
        self.gates.get(&id).map(|&(row, col)| GridCoord::new(row, col))
    }
}

/// Configuration error. Fatal at initialization: a lot with a bad
/// description is never constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// File I/O error
    Io(String),
    /// YAML parsing error
    Parse(String),
    /// The layout has no rows, or its first row has no markers
    EmptyLayout,
    /// A row's marker count differs from the first row's
    NotRectangular {
        /// Offending row index
        row: usize,
        /// Marker count of the first row
        expected: usize,
        /// Marker count of the offending row
        found: usize,
    },
    /// A registered gate id is not an ASCII uppercase letter, or collides
    /// with the obstacle marker
    InvalidGateId(char),
    /// The same gate letter appears on more than one layout cell
    DuplicateGate(char),
    /// A gate marker in the layout has no registry entry
    UnregisteredGate {
        /// The unregistered gate letter
        id: char,
        /// The layout cell carrying the marker
        cell: GridCoord,
    },
    /// A registry entry does not point at its gate marker
    GateMismatch {
        /// The gate letter
        id: char,
        /// The coordinate the registry claims
        registered: GridCoord,
    },
    /// The layout contains no gates
    NoGates,
    /// The layout contains no parking spots
    NoSpots,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "parse error: {}", msg),
            ConfigError::EmptyLayout => write!(f, "layout is empty"),
            ConfigError::NotRectangular {
                row,
                expected,
                found,
            } => write!(
                f,
                "layout is not rectangular: row {} has {} markers, expected {}",
                row, found, expected
            ),
            ConfigError::InvalidGateId(id) => {
                write!(f, "invalid gate id {:?}: must be an uppercase letter other than the obstacle marker", id)
            }
            ConfigError::DuplicateGate(id) => {
                write!(f, "gate {:?} appears on more than one cell", id)
            }
            ConfigError::UnregisteredGate { id, cell } => {
                write!(f, "gate marker {:?} at {} is not in the gate registry", id, cell)
            }
            ConfigError::GateMismatch { id, registered } => {
                write!(
                    f,
                    "gate {:?} is registered at {} but the layout disagrees",
                    id, registered
                )
            }
            ConfigError::NoGates => write!(f, "layout has no gates"),
            ConfigError::NoSpots => write!(f, "layout has no parking spots"),
        }
    }
}

impl std::error::Error for ConfigError {}
