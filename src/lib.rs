//! # Vahana-Park: Grid-Based Parking Lot Simulation
//!
//! A small parking lot simulator: vehicles enter through lettered gates,
//! are assigned the nearest free spot via grid pathfinding, and are later
//! routed back to the nearest exit gate. The crate is the core of such a
//! system: a rendering or logging front end drives it through a plain
//! request/response API and redraws from read-only snapshots.
//!
//! ## Quick Start
//!
//! ```rust
//! use vahana_park::{LotConfig, ParkingService};
//!
//! let yaml = r#"
//! layout:
//!   - "A 1 2"
//!   - "3 4 5"
//! gates:
//!   A: [0, 0]
//! "#;
//! let config = LotConfig::from_yaml_str(yaml).unwrap();
//! let mut lot = ParkingService::from_config(&config).unwrap();
//!
//! let tx = lot.park("KA-01-1234", 'A').unwrap();
//! assert_eq!(tx.cost(), 2); // gate cell plus the assigned spot
//!
//! let tx = lot.unpark("KA-01-1234").unwrap();
//! assert_eq!(tx.gate, 'A'); // nearest exit gate
//! ```
//!
//! ## Architecture
//!
//! The library is organized into modules, leaves first:
//!
//! - [`core`]: fundamental types ([`GridCoord`], [`CellKind`])
//! - [`grid`]: lot configuration and the immutable classified grid
//! - [`pathfinding`]: deterministic A* routing between cells
//! - [`allocator`]: nearest-free-spot selection
//! - [`ledger`]: the authoritative spot → vehicle occupancy mapping
//! - [`service`]: the park/unpark orchestration
//! - [`io`]: transaction record sinks (file log, in-memory)
//!
//! ## Data Flow
//!
//! ```text
//!   ┌─────────────┐   park / unpark    ┌──────────────────┐
//!   │  GUI / CLI  │───────────────────►│  ParkingService  │
//!   │ collaborator│◄───────────────────│                  │
//!   └──────┬──────┘    Transaction     └───┬────┬────┬────┘
//!          │                               │    │    │
//!          │ re-query snapshots            ▼    ▼    ▼
//!          │                        ┌─────────┐ ┌──────────┐ ┌─────────┐
//!          └───────────────────────►│ LotGrid │ │allocator │ │ Ledger  │
//!                                   │ (static)│ │+ router  │ │(mutable)│
//!                                   └─────────┘ └──────────┘ └─────────┘
//!                                          │
//!                                          ▼
//!                                   ┌──────────────┐
//!                                   │TransactionSink│──► append-only log
//!                                   └──────────────┘
//! ```
//!
//! ## Determinism
//!
//! Every selection in the crate is reproducible:
//!
//! - the router breaks equal-cost ties by discovery order
//! - the allocator breaks equal-distance ties in row-major order
//! - the exit-gate choice breaks ties by gate id
//!
//! Identical request sequences always produce identical assignments and
//! routes.
//!
//! ## Concurrency
//!
//! Single-threaded and synchronous by design: each operation runs to
//! completion before the next is accepted, and the service owns the
//! ledger exclusively. Multi-client use would need a mutex or actor
//! boundary around the service.

pub mod allocator;
pub mod core;
pub mod grid;
pub mod io;
pub mod ledger;
pub mod pathfinding;
pub mod service;

// Re-export main types at crate root
pub use crate::core::{CellKind, GridCoord};
pub use grid::{ConfigError, Gate, LotConfig, LotGrid, OBSTACLE_MARKER};
pub use io::{MemorySink, TransactionLog, TransactionSink};
pub use ledger::{LedgerError, OccupancyLedger};
pub use pathfinding::{find_route, route_exists, Route};
pub use service::{ParkingError, ParkingService, Transaction, TransactionKind};
