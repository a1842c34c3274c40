//! Traffic light logic for the traffic simulation
//!
//! A light cycles through its phases on a per-minute countdown and holds a
//! bounded admission queue of vehicle handles. Priority vehicles are placed
//! at the head of the queue; everyone else waits in arrival order.

use std::collections::VecDeque;

use log::{debug, trace};

use super::config::{SimConfig, DEFAULT_FLOW_PER_MINUTE, DEFAULT_LIGHT_CAPACITY};
use super::error::{TrafficError, TrafficResult};
use super::types::{LightPhase, PhaseDurations, VehicleId};
use super::vehicle::Vehicle;

/// A timed traffic light gating one direction of a crossroad
#[derive(Debug, Clone)]
pub struct TrafficLight {
    phase: LightPhase,
    durations: PhaseDurations,
    /// Minutes left in the current phase
    remaining: u32,
    flow_per_minute: usize,
    capacity: usize,
    queue: VecDeque<VehicleId>,
}

impl Default for TrafficLight {
    fn default() -> Self {
        Self::new(LightPhase::Red)
    }
}

impl TrafficLight {
    /// Create a light with the default durations, flow and capacity
    pub fn new(initial_phase: LightPhase) -> Self {
        let durations = SimConfig::default().durations;
        Self {
            phase: initial_phase,
            durations,
            remaining: durations.get(initial_phase),
            flow_per_minute: DEFAULT_FLOW_PER_MINUTE,
            capacity: DEFAULT_LIGHT_CAPACITY,
            queue: VecDeque::new(),
        }
    }

    /// Create a light from an explicit configuration
    pub fn with_config(config: &SimConfig) -> TrafficResult<Self> {
        config.validate()?;
        Ok(Self {
            phase: config.initial_phase,
            durations: config.durations,
            remaining: config.durations.get(config.initial_phase),
            flow_per_minute: config.flow_per_minute,
            capacity: config.light_capacity,
            queue: VecDeque::new(),
        })
    }

    pub fn phase(&self) -> LightPhase {
        self.phase
    }

    /// Minutes left before the next transition
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn phase_duration(&self, phase: LightPhase) -> u32 {
        self.durations.get(phase)
    }

    /// Configure how long a phase lasts.
    /// Applies the next time the phase is entered; the running countdown is untouched.
    pub fn set_phase_duration(&mut self, phase: LightPhase, minutes: u32) -> TrafficResult<()> {
        if minutes == 0 {
            return Err(TrafficError::InvalidDuration { phase, minutes });
        }
        self.durations.set(phase, minutes);
        Ok(())
    }

    pub fn flow_per_minute(&self) -> usize {
        self.flow_per_minute
    }

    pub fn set_flow_per_minute(&mut self, flow: usize) {
        self.flow_per_minute = flow;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the queue bound. Fails without change if more vehicles are
    /// already queued than the new bound allows.
    pub fn set_capacity(&mut self, capacity: usize) -> TrafficResult<()> {
        if capacity < self.queue.len() {
            return Err(TrafficError::CapacityBelowLoad {
                capacity,
                load: self.queue.len(),
            });
        }
        self.capacity = capacity;
        Ok(())
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_full(&self) -> bool {
        self.queue.len() >= self.capacity
    }

    /// Queued vehicles, head first
    pub fn queued(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.queue.iter().copied()
    }

    /// Try to add a vehicle to the queue.
    /// Priority vehicles go to the head, ahead of earlier priority arrivals;
    /// everyone else joins the tail. Returns false without touching the queue
    /// when the light is at capacity.
    pub fn enqueue(&mut self, vehicle: &Vehicle) -> bool {
        if self.is_full() {
            debug!(
                "Light queue full ({}/{}), rejecting {}",
                self.queue.len(),
                self.capacity,
                vehicle
            );
            return false;
        }

        if vehicle.priority() {
            self.queue.push_front(vehicle.id());
        } else {
            self.queue.push_back(vehicle.id());
        }
        true
    }

    /// Put a released vehicle back at the head of the queue, e.g. when the
    /// street it was released onto refused it. Subject to capacity.
    pub fn return_to_head(&mut self, vehicle: VehicleId) -> bool {
        if self.is_full() {
            return false;
        }
        self.queue.push_front(vehicle);
        true
    }

    /// Number of vehicles the current phase lets through this minute
    pub fn allowed_this_minute(&self) -> usize {
        match self.phase {
            LightPhase::Green => self.flow_per_minute,
            LightPhase::Yellow => (self.flow_per_minute / 2).max(1),
            LightPhase::Red => 0,
        }
    }

    /// Remove and return up to the allowed number of vehicles, head first.
    ///
    /// The returned vehicles are gone from the queue: calling this again in
    /// the same minute continues with whoever is left.
    pub fn release_this_minute(&mut self) -> Vec<VehicleId> {
        let count = self.allowed_this_minute().min(self.queue.len());
        self.queue.drain(..count).collect()
    }

    /// Advance the light by one minute
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return;
        }

        let previous = self.phase;
        self.phase = previous.next();
        self.remaining = self.durations.get(self.phase);
        trace!(
            "Light {} -> {} for {} min",
            previous,
            self.phase,
            self.remaining
        );
    }
}
