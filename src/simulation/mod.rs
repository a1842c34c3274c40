//! Manhattan grid traffic simulation
//!
//! A lattice of crossroads joined by streets. Each crossroad gates its four
//! outgoing streets with timed traffic lights; streets delay vehicles by a
//! fixed travel time; routes are shortest paths over the lattice. Nothing in
//! here does I/O or keeps wall-clock time: the caller advances minutes.

mod config;
mod crossroad;
mod error;
mod grid;
mod router;
mod stats;
mod street;
mod traffic_light;
mod types;
mod vehicle;
mod world;

pub use config::{
    SimConfig, DEFAULT_FLOW_PER_MINUTE, DEFAULT_GREEN_MINUTES, DEFAULT_LIGHT_CAPACITY,
    DEFAULT_RED_MINUTES, DEFAULT_STREET_CAPACITY, DEFAULT_TRAVEL_TIME, DEFAULT_YELLOW_MINUTES,
};
pub use crossroad::Crossroad;
pub use error::{TrafficError, TrafficResult};
pub use grid::Grid;
pub use router::{Router, HOP_COST};
pub use stats::SimulationStats;
pub use street::Street;
pub use traffic_light::TrafficLight;
pub use types::{Direction, LightPhase, PerDirection, PhaseDurations, Position, SimId, VehicleId};
pub use vehicle::{Fleet, Holder, Vehicle};
pub use world::{Admission, SimWorld};
