//! Parking service: the two user-facing operations.
//!
//! Orchestrates the grid, allocator, router, and ledger into
//! [`park`](ParkingService::park) and [`unpark`](ParkingService::unpark).
//! Per vehicle the state machine is Absent → Parked → Absent; each
//! transition is atomic from the caller's perspective. An operation
//! either commits fully and returns a [`Transaction`], or fails with a
//! [`ParkingError`] and mutates nothing.
//!
//! The service is single-threaded by design: it owns the ledger
//! exclusively and serializes access by construction. A multi-client
//! rework would need a mutex or actor boundary here.

use std::fmt;

use log::{debug, info, warn};

use crate::allocator;
use crate::core::GridCoord;
use crate::grid::{ConfigError, Gate, LotConfig, LotGrid};
use crate::io::TransactionSink;
use crate::ledger::{LedgerError, OccupancyLedger};
use crate::pathfinding::{find_route, Route};

/// Operation error. All variants are ordinary recoverable outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParkingError {
    /// The gate id is not registered
    UnknownGate(char),
    /// The vehicle is already parked
    DuplicateVehicle(String),
    /// Every spot is occupied
    LotFull,
    /// No route exists between the two cells
    NoPathFound {
        /// Route start
        from: GridCoord,
        /// Route goal
        to: GridCoord,
    },
    /// No spot holds this vehicle
    VehicleNotFound(String),
    /// The target spot already holds a vehicle
    AlreadyOccupied(GridCoord),
}

impl fmt::Display for ParkingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParkingError::UnknownGate(id) => write!(f, "unknown gate {:?}", id),
            ParkingError::DuplicateVehicle(vehicle) => {
                write!(f, "vehicle {:?} is already parked", vehicle)
            }
            ParkingError::LotFull => write!(f, "lot is full"),
            ParkingError::NoPathFound { from, to } => {
                write!(f, "no route from {} to {}", from, to)
            }
            ParkingError::VehicleNotFound(vehicle) => {
                write!(f, "vehicle {:?} is not parked", vehicle)
            }
            ParkingError::AlreadyOccupied(spot) => {
                write!(f, "spot {} is already occupied", spot)
            }
        }
    }
}

impl std::error::Error for ParkingError {}

impl From<LedgerError> for ParkingError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::AlreadyOccupied(spot) => ParkingError::AlreadyOccupied(spot),
            LedgerError::DuplicateVehicle(vehicle) => ParkingError::DuplicateVehicle(vehicle),
            LedgerError::VehicleNotFound(vehicle) => ParkingError::VehicleNotFound(vehicle),
        }
    }
}

/// Which operation a transaction records
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    /// A vehicle entered and was assigned a spot
    Park,
    /// A vehicle left its spot toward an exit gate
    Unpark,
}

/// The structured result of one park or unpark operation, handed to the
/// logging/rendering collaborator. The core retains no history beyond
/// current occupancy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    /// Operation kind
    pub kind: TransactionKind,
    /// Vehicle identifier
    pub vehicle: String,
    /// Entry gate for park, exit gate for unpark
    pub gate: char,
    /// Assigned spot for park, freed spot for unpark
    pub spot: GridCoord,
    /// Route taken. `None` only for an unpark whose exit route could not
    /// be found (see [`ParkingService::unpark`]).
    pub route: Option<Route>,
}

impl Transaction {
    /// Route cost in cells visited; 0 when no route was recorded
    pub fn cost(&self) -> usize {
        self.route.as_ref().map(Route::cost).unwrap_or(0)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            TransactionKind::Park => "park",
            TransactionKind::Unpark => "unpark",
        };
        write!(
            f,
            "{} {} gate={} spot={} cost={}",
            verb,
            self.vehicle,
            self.gate,
            self.spot,
            self.cost()
        )?;
        match &self.route {
            Some(route) => write!(f, " route={}", route),
            None => write!(f, " route=none"),
        }
    }
}

/// The lot: static grid, occupancy ledger, optional transaction sink.
pub struct ParkingService {
    grid: LotGrid,
    ledger: OccupancyLedger,
    sink: Option<Box<dyn TransactionSink>>,
}

impl ParkingService {
    /// Create a service over a validated grid with an empty lot
    pub fn new(grid: LotGrid) -> Self {
        let ledger = OccupancyLedger::new(grid.spots().to_vec());
        Self {
            grid,
            ledger,
            sink: None,
        }
    }

    /// Build the grid from a configuration and create the service
    pub fn from_config(config: &LotConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(LotGrid::from_config(config)?))
    }

    /// Attach a transaction sink. Sink write failures are logged and
    /// never fail an operation.
    pub fn with_sink(mut self, sink: Box<dyn TransactionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Park a vehicle entering at `gate_id`.
    ///
    /// Assigns the nearest free spot (Manhattan distance from the gate,
    /// row-major tie-break) and routes the vehicle to it. Nothing is
    /// mutated on any failure.
    pub fn park(&mut self, vehicle: &str, gate_id: char) -> Result<Transaction, ParkingError> {
        let gate_cell = match self.grid.gate(gate_id) {
            Some(gate) => gate.cell,
            None => {
                debug!("[Lot] park {:?} rejected: unknown gate {:?}", vehicle, gate_id);
                return Err(ParkingError::UnknownGate(gate_id));
            }
        };
        if self.ledger.is_parked(vehicle) {
            debug!("[Lot] park {:?} rejected: already parked", vehicle);
            return Err(ParkingError::DuplicateVehicle(vehicle.to_string()));
        }
        let free = self.ledger.free_spots();
        if free.is_empty() {
            debug!("[Lot] park {:?} rejected: lot full", vehicle);
            return Err(ParkingError::LotFull);
        }
        // Non-empty free set, so the allocator always selects.
        let spot = allocator::nearest_spot(&free, gate_cell).ok_or(ParkingError::LotFull)?;
        let route = find_route(&self.grid, gate_cell, spot).ok_or(ParkingError::NoPathFound {
            from: gate_cell,
            to: spot,
        })?;

        self.ledger.assign(spot, vehicle)?;
        let transaction = Transaction {
            kind: TransactionKind::Park,
            vehicle: vehicle.to_string(),
            gate: gate_id,
            spot,
            route: Some(route),
        };
        info!(
            "[Lot] parked {:?} at {} via gate {} (cost {})",
            vehicle,
            spot,
            gate_id,
            transaction.cost()
        );
        self.emit(&transaction);
        Ok(transaction)
    }

    /// Unpark a vehicle and route it to the nearest exit gate.
    ///
    /// The exit gate is the nearest registered gate by Manhattan distance
    /// from the vehicle's spot; gates serve as both entries and exits. A
    /// missing exit route does NOT block the release: the spot is freed
    /// regardless and the transaction records `route: None`. That policy
    /// carries a known risk (a vehicle recorded as having left with no
    /// recorded route), so it is logged as a warning rather than passed
    /// over silently.
    pub fn unpark(&mut self, vehicle: &str) -> Result<Transaction, ParkingError> {
        let spot = match self.ledger.spot_of(vehicle) {
            Some(spot) => spot,
            None => {
                debug!("[Lot] unpark {:?} rejected: not parked", vehicle);
                return Err(ParkingError::VehicleNotFound(vehicle.to_string()));
            }
        };
        let exit = self.grid.nearest_gate(spot);
        let (exit_id, exit_cell) = (exit.id, exit.cell);
        let route = find_route(&self.grid, spot, exit_cell);
        if route.is_none() {
            warn!(
                "[Lot] no exit route from {} to gate {}; releasing the spot anyway",
                spot, exit_id
            );
        }

        let freed = self.ledger.release(vehicle)?;
        let transaction = Transaction {
            kind: TransactionKind::Unpark,
            vehicle: vehicle.to_string(),
            gate: exit_id,
            spot: freed,
            route,
        };
        info!(
            "[Lot] unparked {:?} from {} toward gate {} (cost {})",
            vehicle,
            freed,
            exit_id,
            transaction.cost()
        );
        self.emit(&transaction);
        Ok(transaction)
    }

    /// The static grid, for rendering collaborators. The caller
    /// re-queries after each successful operation; nothing is pushed.
    #[inline]
    pub fn grid(&self) -> &LotGrid {
        &self.grid
    }

    /// The occupancy ledger (read-only)
    #[inline]
    pub fn ledger(&self) -> &OccupancyLedger {
        &self.ledger
    }

    /// The registered gates, ordered by id
    #[inline]
    pub fn gates(&self) -> &[Gate] {
        self.grid.gates()
    }

    fn emit(&mut self, transaction: &Transaction) {
        if let Some(sink) = self.sink.as_mut() {
            if let Err(err) = sink.record(transaction) {
                warn!("[Lot] transaction sink write failed: {}", err);
            }
        }
    }
}
