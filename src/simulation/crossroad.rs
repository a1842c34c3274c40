//! Crossroad logic for the traffic simulation
//!
//! Every crossroad has one traffic light and one outgoing street per
//! direction. The light for a direction gates departures onto the street
//! leaving in that direction.

use std::fmt;

use super::config::SimConfig;
use super::error::TrafficResult;
use super::street::Street;
use super::traffic_light::TrafficLight;
use super::types::{Direction, PerDirection, Position};

/// A grid node with four lights and four outgoing streets
#[derive(Debug, Clone)]
pub struct Crossroad {
    position: Position,
    lights: PerDirection<TrafficLight>,
    streets_out: PerDirection<Street>,
}

impl Crossroad {
    /// Create a crossroad with default lights (all Green) and 1-minute streets
    pub fn new(position: Position) -> Self {
        let config = SimConfig::default();
        Self {
            position,
            lights: PerDirection::from_fn(|_| TrafficLight::new(config.initial_phase)),
            streets_out: PerDirection::from_fn(|_| Street::with_config(&config)),
        }
    }

    pub fn with_config(position: Position, config: &SimConfig) -> TrafficResult<Self> {
        let light = TrafficLight::with_config(config)?;
        Ok(Self {
            position,
            lights: PerDirection::from_fn(|_| light.clone()),
            streets_out: PerDirection::from_fn(|_| Street::with_config(config)),
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn light(&self, direction: Direction) -> &TrafficLight {
        &self.lights[direction]
    }

    pub fn light_mut(&mut self, direction: Direction) -> &mut TrafficLight {
        &mut self.lights[direction]
    }

    pub fn street_out(&self, direction: Direction) -> &Street {
        &self.streets_out[direction]
    }

    pub fn street_out_mut(&mut self, direction: Direction) -> &mut Street {
        &mut self.streets_out[direction]
    }

    pub fn lights(&self) -> impl Iterator<Item = (Direction, &TrafficLight)> {
        self.lights.iter()
    }

    pub fn streets(&self) -> impl Iterator<Item = (Direction, &Street)> {
        self.streets_out.iter()
    }

    /// Vehicles waiting at all four lights
    pub fn waiting(&self) -> usize {
        self.lights.values().map(TrafficLight::queue_len).sum()
    }

    /// Advance every light by one minute. Streets are ticked separately.
    pub fn tick(&mut self) {
        for light in self.lights.values_mut() {
            light.tick();
        }
    }
}

impl fmt::Display for Crossroad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cross({},{})", self.position.x, self.position.y)
    }
}
