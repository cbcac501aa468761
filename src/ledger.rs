//! Occupancy ledger: the authoritative spot → vehicle mapping.
//!
//! The ledger owns the mutable occupancy state. Invariants:
//!
//! - a vehicle id appears at most once (no vehicle occupies two spots)
//! - a coordinate appears as a key only while that spot is occupied
//!
//! Entries are created by a successful [`assign`](OccupancyLedger::assign)
//! and destroyed by a successful [`release`](OccupancyLedger::release);
//! failed operations leave the ledger untouched.

use std::collections::HashMap;

use crate::core::GridCoord;

/// Ledger operation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The target spot already holds a vehicle
    AlreadyOccupied(GridCoord),
    /// The vehicle is already parked elsewhere
    DuplicateVehicle(String),
    /// No spot holds this vehicle
    VehicleNotFound(String),
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::AlreadyOccupied(spot) => {
                write!(f, "spot {} is already occupied", spot)
            }
            LedgerError::DuplicateVehicle(vehicle) => {
                write!(f, "vehicle {:?} is already parked", vehicle)
            }
            LedgerError::VehicleNotFound(vehicle) => {
                write!(f, "vehicle {:?} is not parked", vehicle)
            }
        }
    }
}

impl std::error::Error for LedgerError {}

/// Spot occupancy state over an immutable spot roster.
#[derive(Clone, Debug)]
pub struct OccupancyLedger {
    /// All spot coordinates, row-major. Fixed at construction.
    spots: Vec<GridCoord>,
    /// Currently occupied spots
    occupied: HashMap<GridCoord, String>,
}

impl OccupancyLedger {
    /// Create an empty ledger over the given spot roster
    pub fn new(spots: Vec<GridCoord>) -> Self {
        Self {
            spots,
            occupied: HashMap::new(),
        }
    }

    /// Total number of spots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.spots.len()
    }

    /// Number of occupied spots
    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }

    /// Is every spot occupied?
    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupied.len() == self.spots.len()
    }

    /// Is this vehicle currently parked anywhere?
    pub fn is_parked(&self, vehicle: &str) -> bool {
        self.occupied.values().any(|v| v == vehicle)
    }

    /// The spot holding this vehicle, if any
    pub fn spot_of(&self, vehicle: &str) -> Option<GridCoord> {
        self.occupied
            .iter()
            .find(|(_, v)| v.as_str() == vehicle)
            .map(|(&spot, _)| spot)
    }

    /// Record a vehicle in a spot.
    ///
    /// # Errors
    ///
    /// `AlreadyOccupied` if the spot holds a vehicle, `DuplicateVehicle`
    /// if this vehicle is parked elsewhere. Nothing is mutated on error.
    pub fn assign(&mut self, spot: GridCoord, vehicle: &str) -> Result<(), LedgerError> {
        if self.occupied.contains_key(&spot) {
            return Err(LedgerError::AlreadyOccupied(spot));
        }
        if self.is_parked(vehicle) {
            return Err(LedgerError::DuplicateVehicle(vehicle.to_string()));
        }
        self.occupied.insert(spot, vehicle.to_string());
        Ok(())
    }

    /// Remove a vehicle and return its freed spot.
    ///
    /// # Errors
    ///
    /// `VehicleNotFound` if no spot holds this vehicle.
    pub fn release(&mut self, vehicle: &str) -> Result<GridCoord, LedgerError> {
        let spot = self
            .spot_of(vehicle)
            .ok_or_else(|| LedgerError::VehicleNotFound(vehicle.to_string()))?;
        self.occupied.remove(&spot);
        Ok(spot)
    }

    /// Spots not currently occupied, in roster (row-major) order.
    ///
    /// The order is load-bearing: it is the fixed enumeration order the
    /// allocator's tie-break relies on.
    pub fn free_spots(&self) -> Vec<GridCoord> {
        self.spots
            .iter()
            .copied()
            .filter(|spot| !self.occupied.contains_key(spot))
            .collect()
    }

    /// Read-only view of the occupancy mapping
    #[inline]
    pub fn occupied(&self) -> &HashMap<GridCoord, String> {
        &self.occupied
    }
}
