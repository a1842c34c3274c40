//! Street logic for the traffic simulation
//!
//! A street is one directed grid edge. Vehicles admitted to it spend a fixed
//! number of minutes travelling before they come out at the far end.

use std::collections::VecDeque;

use log::{debug, trace, warn};

use super::config::{SimConfig, DEFAULT_STREET_CAPACITY};
use super::error::{TrafficError, TrafficResult};
use super::types::VehicleId;
use super::vehicle::Fleet;

/// A bounded delay queue with a fixed travel time
#[derive(Debug, Clone)]
pub struct Street {
    closed: bool,
    travel_time: u32,
    capacity: usize,
    /// Vehicles in admission order with their remaining minutes
    moving: VecDeque<(VehicleId, u32)>,
}

impl Street {
    /// Create an open street with the default capacity
    pub fn new(travel_time: u32) -> Self {
        Self {
            closed: false,
            travel_time,
            capacity: DEFAULT_STREET_CAPACITY,
            moving: VecDeque::new(),
        }
    }

    pub fn with_config(config: &SimConfig) -> Self {
        Self {
            capacity: config.street_capacity,
            ..Self::new(config.travel_time)
        }
    }

    pub fn travel_time(&self) -> u32 {
        self.travel_time
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the occupant bound. Fails without change if more vehicles are
    /// already on the street than the new bound allows.
    pub fn set_capacity(&mut self, capacity: usize) -> TrafficResult<()> {
        if capacity < self.moving.len() {
            return Err(TrafficError::CapacityBelowLoad {
                capacity,
                load: self.moving.len(),
            });
        }
        self.capacity = capacity;
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Close or reopen the street. Vehicles already on it keep moving.
    pub fn set_closed(&mut self, closed: bool) {
        self.closed = closed;
    }

    /// Number of vehicles currently on the street
    pub fn load(&self) -> usize {
        self.moving.len()
    }

    /// Vehicles on the street with their remaining minutes, oldest first
    pub fn occupants(&self) -> impl Iterator<Item = (VehicleId, u32)> + '_ {
        self.moving.iter().copied()
    }

    /// Admit a vehicle unless the street is closed or full
    pub fn try_enter(&mut self, vehicle: VehicleId) -> bool {
        if self.closed || self.moving.len() >= self.capacity {
            debug!(
                "Street refused {} (closed={}, load={}/{})",
                vehicle,
                self.closed,
                self.moving.len(),
                self.capacity
            );
            return false;
        }
        self.moving.push_back((vehicle, self.travel_time));
        true
    }

    /// Advance every vehicle by one minute and return those that reached the end.
    ///
    /// Each vehicle on the street gets one travelled minute. Vehicles still
    /// travelling keep their relative order.
    pub fn tick(&mut self, fleet: &mut Fleet) -> Vec<VehicleId> {
        let mut exited = Vec::new();

        for _ in 0..self.moving.len() {
            let Some((vehicle, remaining)) = self.moving.pop_front() else {
                break;
            };

            match fleet.get_mut(vehicle) {
                Some(v) => v.tick(),
                None => warn!("Street holds {} which is not in the fleet", vehicle),
            }

            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                trace!("{} leaves the street", vehicle);
                exited.push(vehicle);
            } else {
                self.moving.push_back((vehicle, remaining));
            }
        }

        exited
    }
}
