//! Tunables for lights, streets and crossroads

use super::error::{TrafficError, TrafficResult};
use super::types::{LightPhase, PhaseDurations};

/// Default minutes spent in Green
pub const DEFAULT_GREEN_MINUTES: u32 = 3;
/// Default minutes spent in Yellow
pub const DEFAULT_YELLOW_MINUTES: u32 = 1;
/// Default minutes spent in Red
pub const DEFAULT_RED_MINUTES: u32 = 5;

/// Vehicles a light may release during one Green minute
pub const DEFAULT_FLOW_PER_MINUTE: usize = 2;

/// Vehicles that may wait at one light
pub const DEFAULT_LIGHT_CAPACITY: usize = 50;

/// Minutes to cross one street
pub const DEFAULT_TRAVEL_TIME: u32 = 1;

/// Vehicles that may be on one street at once
pub const DEFAULT_STREET_CAPACITY: usize = 100;

/// Configuration applied to every light and street of a crossroad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub durations: PhaseDurations,
    pub initial_phase: LightPhase,
    pub flow_per_minute: usize,
    pub light_capacity: usize,
    pub travel_time: u32,
    pub street_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            durations: PhaseDurations::new(
                DEFAULT_GREEN_MINUTES,
                DEFAULT_YELLOW_MINUTES,
                DEFAULT_RED_MINUTES,
            ),
            initial_phase: LightPhase::Green,
            flow_per_minute: DEFAULT_FLOW_PER_MINUTE,
            light_capacity: DEFAULT_LIGHT_CAPACITY,
            travel_time: DEFAULT_TRAVEL_TIME,
            street_capacity: DEFAULT_STREET_CAPACITY,
        }
    }
}

impl SimConfig {
    /// Reject configurations containing a zero-length phase
    pub fn validate(&self) -> TrafficResult<()> {
        for phase in LightPhase::ALL {
            let minutes = self.durations.get(phase);
            if minutes == 0 {
                return Err(TrafficError::InvalidDuration { phase, minutes });
            }
        }
        Ok(())
    }
}
