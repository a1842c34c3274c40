//! Errors raised by the traffic core

use thiserror::Error;

use super::types::{LightPhase, VehicleId};
use super::vehicle::Holder;

/// Configuration and lookup faults.
///
/// Full queues and unreachable routes are not errors: admission reports
/// `false` and routing reports an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrafficError {
    #[error("Grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Coordinate ({x},{y}) is outside the {width}x{height} grid")]
    InvalidCoordinate {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("{phase} phase duration must be positive, got {minutes}")]
    InvalidDuration { phase: LightPhase, minutes: u32 },

    #[error("Capacity {capacity} is below the {load} vehicles already held")]
    CapacityBelowLoad { capacity: usize, load: usize },

    #[error("Vehicle {0} is not in the fleet")]
    UnknownVehicle(VehicleId),

    #[error("Vehicle {vehicle} is already held by {holder}")]
    VehicleAlreadyPlaced { vehicle: VehicleId, holder: Holder },
}

pub type TrafficResult<T> = std::result::Result<T, TrafficError>;
