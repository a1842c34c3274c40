//! Manhattan Traffic Simulation Library
//!
//! Traffic lights, streets and shortest-path routing on a grid of crossroads,
//! driven one simulated minute at a time.

pub mod simulation;
