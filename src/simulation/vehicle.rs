//! Vehicles and the arena that owns them
//!
//! Lights and streets only ever store `VehicleId` handles. The `Fleet` owns
//! the vehicles themselves and records which queue currently holds each one.

use std::collections::HashMap;
use std::fmt;

use super::error::{TrafficError, TrafficResult};
use super::types::{Direction, Position, SimId, VehicleId};

/// A vehicle travelling through the grid
#[derive(Debug, Clone)]
pub struct Vehicle {
    id: VehicleId,
    name: String,
    destination: Position,
    /// Priority vehicles jump to the head of light queues
    priority: bool,
    /// Crossroads visited so far, oldest first
    route: Vec<Position>,
    /// Minutes spent travelling on streets
    travel_minutes: u32,
}

impl Vehicle {
    pub fn new(id: VehicleId, name: impl Into<String>, destination: Position, priority: bool) -> Self {
        Self {
            id,
            name: name.into(),
            destination,
            priority,
            route: Vec::new(),
            travel_minutes: 0,
        }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn destination(&self) -> Position {
        self.destination
    }

    pub fn priority(&self) -> bool {
        self.priority
    }

    pub fn route(&self) -> &[Position] {
        &self.route
    }

    pub fn travel_minutes(&self) -> u32 {
        self.travel_minutes
    }

    /// Record a crossroad the vehicle passed through
    pub fn add_hop(&mut self, crossroad: Position) {
        self.route.push(crossroad);
    }

    /// Last recorded crossroad
    pub fn current_position(&self) -> Option<Position> {
        self.route.last().copied()
    }

    pub fn has_arrived(&self, position: Position) -> bool {
        self.destination == position
    }

    /// Count one travelled minute
    pub fn tick(&mut self) {
        self.travel_minutes += 1;
    }
}

impl fmt::Display for Vehicle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.priority {
            write!(f, "[PRIORITY] ")?;
        }
        write!(f, "{} -> {}", self.name, self.destination)
    }
}

/// The queue currently holding a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Holder {
    /// Waiting at the light of `at` that gates departures towards `direction`
    Light { at: Position, direction: Direction },
    /// Travelling on the street leaving `at` towards `direction`
    Street { at: Position, direction: Direction },
}

impl fmt::Display for Holder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Holder::Light { at, direction } => write!(f, "light {:?} at {}", direction, at),
            Holder::Street { at, direction } => write!(f, "street {:?} from {}", direction, at),
        }
    }
}

/// Arena of vehicles addressed by handle
#[derive(Debug, Default)]
pub struct Fleet {
    vehicles: HashMap<VehicleId, Vehicle>,
    holders: HashMap<VehicleId, Holder>,
    next_id: usize,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_vehicle_id(&mut self) -> VehicleId {
        let id = VehicleId(SimId(self.next_id));
        self.next_id += 1;
        id
    }

    /// Create a vehicle and return its handle
    pub fn spawn(&mut self, name: impl Into<String>, destination: Position, priority: bool) -> VehicleId {
        let id = self.next_vehicle_id();
        self.vehicles
            .insert(id, Vehicle::new(id, name, destination, priority));
        id
    }

    /// Remove a vehicle together with its placement
    pub fn remove(&mut self, id: VehicleId) -> Option<Vehicle> {
        self.holders.remove(&id);
        self.vehicles.remove(&id)
    }

    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    pub fn holder(&self, id: VehicleId) -> Option<Holder> {
        self.holders.get(&id).copied()
    }

    /// Record that `holder` now holds the vehicle.
    /// Fails if the vehicle is unknown or still held elsewhere.
    pub fn place(&mut self, id: VehicleId, holder: Holder) -> TrafficResult<()> {
        if !self.vehicles.contains_key(&id) {
            return Err(TrafficError::UnknownVehicle(id));
        }
        if let Some(current) = self.holders.get(&id) {
            return Err(TrafficError::VehicleAlreadyPlaced {
                vehicle: id,
                holder: *current,
            });
        }
        self.holders.insert(id, holder);
        Ok(())
    }

    /// Clear the vehicle's placement, returning where it was
    pub fn unplace(&mut self, id: VehicleId) -> Option<Holder> {
        self.holders.remove(&id)
    }
}
