//! Main simulation world that ties everything together
//!
//! The world drives the core one simulated minute at a time: streets move
//! vehicles, lights release them onto streets, then every light advances.
//! It also owns vehicle creation and removal, which the core leaves to the
//! caller.

use anyhow::{Context, Result};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::config::SimConfig;
use super::crossroad::Crossroad;
use super::grid::Grid;
use super::router::Router;
use super::stats::SimulationStats;
use super::types::{Direction, Position, VehicleId};
use super::vehicle::{Fleet, Holder};

/// Outcome of trying to queue a vehicle for its next hop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Waiting at the light towards the next hop
    Queued(Direction),
    /// That light is full
    LightFull,
    /// Already at the destination
    Arrived,
    /// No open route to the destination remains
    NoRoute,
}

/// The main simulation world
pub struct SimWorld {
    /// The crossroad lattice
    pub grid: Grid,

    /// All vehicles currently in the simulation
    pub fleet: Fleet,

    /// Vehicles standing at a crossroad without a light slot yet
    parked: Vec<(VehicleId, Position)>,

    /// Simulated minutes elapsed
    pub minute: u32,

    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,

    pub stats: SimulationStats,
}

impl SimWorld {
    fn new_internal(grid: Grid, rng: Option<StdRng>) -> Self {
        Self {
            grid,
            fleet: Fleet::new(),
            parked: Vec::new(),
            minute: 0,
            rng,
            stats: SimulationStats::default(),
        }
    }

    pub fn new(width: i32, height: i32) -> Result<Self> {
        let grid = Grid::new(width, height).context("Failed to build grid")?;
        Ok(Self::new_internal(grid, None))
    }

    /// Create a new SimWorld with a seeded RNG for reproducible simulations
    pub fn new_with_seed(width: i32, height: i32, seed: u64) -> Result<Self> {
        let grid = Grid::new(width, height).context("Failed to build grid")?;
        Ok(Self::new_internal(grid, Some(StdRng::seed_from_u64(seed))))
    }

    /// Create a world whose crossroads use `config`, optionally seeded
    pub fn with_config(width: i32, height: i32, config: &SimConfig, seed: Option<u64>) -> Result<Self> {
        let grid = Grid::with_config(width, height, config).context("Failed to build grid")?;
        Ok(Self::new_internal(grid, seed.map(StdRng::seed_from_u64)))
    }

    /// Get a random value in the given range, using seeded RNG if available
    fn random_range(&mut self, range: std::ops::Range<i32>) -> i32 {
        match &mut self.rng {
            Some(rng) => rng.random_range(range),
            None => rand::rng().random_range(range),
        }
    }

    fn random_bool(&mut self, probability: f64) -> bool {
        let probability = probability.clamp(0.0, 1.0);
        match &mut self.rng {
            Some(rng) => rng.random_bool(probability),
            None => rand::rng().random_bool(probability),
        }
    }

    fn random_position(&mut self) -> Position {
        let x = self.random_range(0..self.grid.width());
        let y = self.random_range(0..self.grid.height());
        Position::new(x, y)
    }

    /// Vehicles parked at crossroads waiting for a light slot
    pub fn parked(&self) -> usize {
        self.parked.len()
    }

    pub fn is_idle(&self) -> bool {
        self.fleet.is_empty()
    }

    /// Queue a vehicle standing at `at` behind the light towards its next hop
    fn admit(&mut self, vehicle_id: VehicleId, at: Position) -> Result<Admission> {
        let destination = self
            .fleet
            .get(vehicle_id)
            .context("Vehicle not found")?
            .destination();

        if destination == at {
            return Ok(Admission::Arrived);
        }

        let path = Router::shortest_path(&self.grid, at, destination)?;
        let Some(next) = path.get(1) else {
            return Ok(Admission::NoRoute);
        };
        let direction = at
            .direction_to(next)
            .context("Route hop is not adjacent")?;

        let vehicle = self.fleet.get(vehicle_id).context("Vehicle not found")?;
        let light = self.grid.get_mut(at)?.light_mut(direction);
        if !light.enqueue(vehicle) {
            return Ok(Admission::LightFull);
        }

        self.fleet.place(vehicle_id, Holder::Light { at, direction })?;
        Ok(Admission::Queued(direction))
    }

    fn complete(&mut self, vehicle_id: VehicleId) {
        if let Some(vehicle) = self.fleet.remove(vehicle_id) {
            debug!(
                "{} arrived after {} min via {} crossroads",
                vehicle,
                vehicle.travel_minutes(),
                vehicle.route().len()
            );
            self.stats.record_completion(vehicle.travel_minutes());
        }
    }

    fn strand(&mut self, vehicle_id: VehicleId, at: Position) {
        if let Some(vehicle) = self.fleet.remove(vehicle_id) {
            warn!("{} is stranded at {}: no open route remains", vehicle, at);
            self.stats.total_vehicles_stranded += 1;
        }
    }

    /// Spawn a vehicle at `origin` heading for `destination`.
    ///
    /// Returns `Ok(None)` when the origin light towards the first hop is full.
    /// Fails for out-of-grid coordinates or an unreachable destination.
    pub fn spawn_vehicle(
        &mut self,
        name: &str,
        origin: Position,
        destination: Position,
        priority: bool,
    ) -> Result<Option<VehicleId>> {
        self.grid.get(origin).context("Origin is outside the grid")?;
        self.grid
            .get(destination)
            .context("Destination is outside the grid")?;

        let path = Router::shortest_path(&self.grid, origin, destination)?;
        if path.is_empty() {
            self.stats.total_spawns_rejected += 1;
            anyhow::bail!("No route from {} to {}", origin, destination);
        }

        let id = self.fleet.spawn(name, destination, priority);
        if let Some(vehicle) = self.fleet.get_mut(id) {
            vehicle.add_hop(origin);
        }

        match self.admit(id, origin)? {
            Admission::Queued(direction) => {
                self.stats.total_vehicles_spawned += 1;
                debug!("Spawned {} at {} heading {:?}", id, origin, direction);
            }
            Admission::Arrived => {
                self.stats.total_vehicles_spawned += 1;
                self.complete(id);
            }
            Admission::LightFull | Admission::NoRoute => {
                self.fleet.remove(id);
                self.stats.total_spawns_rejected += 1;
                return Ok(None);
            }
        }

        self.stats.active_vehicles = self.fleet.len() as u32;
        Ok(Some(id))
    }

    /// Spawn `count` vehicles between random crossroads.
    /// Returns how many were admitted.
    pub fn spawn_random(&mut self, count: usize, priority_share: f64) -> usize {
        let mut spawned = 0;

        for index in 0..count {
            let origin = self.random_position();
            let mut destination = self.random_position();
            while destination == origin && self.grid.len() > 1 {
                destination = self.random_position();
            }

            let priority = self.random_bool(priority_share);
            let name = if priority {
                format!("ambulance-{}", index)
            } else {
                format!("car-{}", index)
            };

            match self.spawn_vehicle(&name, origin, destination, priority) {
                Ok(Some(_)) => spawned += 1,
                Ok(None) => debug!("{} could not join the queue at {}", name, origin),
                Err(e) => warn!("Failed to spawn {}: {:#}", name, e),
            }
        }

        spawned
    }

    /// Advance the world by one simulated minute
    pub fn tick(&mut self) -> Result<()> {
        self.minute += 1;
        self.stats.elapsed_minutes = self.minute;

        self.move_streets()?;
        self.admit_parked()?;
        self.release_lights()?;

        for crossroad in self.grid.crossroads_mut() {
            crossroad.tick();
        }

        self.stats.active_vehicles = self.fleet.len() as u32;
        Ok(())
    }

    /// Tick every street once and park the vehicles that reached its far end
    fn move_streets(&mut self) -> Result<()> {
        let positions: Vec<Position> = self.grid.positions().collect();

        for at in positions {
            for direction in Direction::ALL {
                let exited = self
                    .grid
                    .get_mut(at)?
                    .street_out_mut(direction)
                    .tick(&mut self.fleet);

                let next = at.step(direction);
                for vehicle_id in exited {
                    self.fleet.unplace(vehicle_id);
                    let Some(next) = next else {
                        self.strand(vehicle_id, at);
                        continue;
                    };
                    match self.fleet.get_mut(vehicle_id) {
                        Some(vehicle) => vehicle.add_hop(next),
                        None => continue,
                    }
                    self.parked.push((vehicle_id, next));
                }
            }
        }

        Ok(())
    }

    /// Queue parked vehicles at their next light, keeping those that still do not fit
    fn admit_parked(&mut self) -> Result<()> {
        let parked = std::mem::take(&mut self.parked);

        for (vehicle_id, at) in parked {
            match self.admit(vehicle_id, at)? {
                Admission::Queued(_) => {}
                Admission::Arrived => self.complete(vehicle_id),
                Admission::NoRoute => self.strand(vehicle_id, at),
                Admission::LightFull => self.parked.push((vehicle_id, at)),
            }
        }

        Ok(())
    }

    /// Move vehicles from every light onto the street in the same direction
    fn release_lights(&mut self) -> Result<()> {
        let positions: Vec<Position> = self.grid.positions().collect();

        for at in positions {
            let crossroad = self.grid.get_mut(at)?;
            for direction in Direction::ALL {
                let released =
                    release_onto_street(crossroad, direction, &mut self.fleet, &mut self.parked)?;
                self.stats.total_released += released as u64;
            }
        }

        Ok(())
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Traffic Simulation Summary ===");
        println!("Minute: {}", self.minute);
        println!(
            "Grid: {}x{} ({} crossroads)",
            self.grid.width(),
            self.grid.height(),
            self.grid.len()
        );
        println!("Vehicles: {}", self.fleet.len());
        println!("Parked: {}", self.parked.len());

        let waiting: usize = self.grid.crossroads().map(Crossroad::waiting).sum();
        let travelling: usize = self
            .grid
            .crossroads()
            .flat_map(|c| c.streets().map(|(_, street)| street.load()))
            .sum();
        println!("Waiting at lights: {}, on streets: {}", waiting, travelling);
        println!(
            "Completed: {}/{} ({:.1}%)",
            self.stats.total_vehicles_completed,
            self.stats.total_vehicles_spawned,
            self.stats.success_rate()
        );

        if !self.fleet.is_empty() {
            println!("--- Active Vehicles ---");
            let mut vehicles: Vec<_> = self.fleet.iter().collect();
            vehicles.sort_by_key(|v| v.id());
            for vehicle in vehicles {
                let holder = self
                    .fleet
                    .holder(vehicle.id())
                    .map(|h| h.to_string())
                    .unwrap_or_else(|| "parked".to_string());
                println!(
                    "  {}: {} min, hops={}, {}",
                    vehicle,
                    vehicle.travel_minutes(),
                    vehicle.route().len(),
                    holder
                );
            }
        }
    }

    /// Draw the grid in the terminal.
    /// Crossroads show the vehicles waiting at their lights, streets show
    /// the vehicles travelling along them in both directions.
    pub fn draw_map(&self) {
        let digit = |count: usize| match count {
            0 => '.',
            1..=9 => char::from(b'0' + count as u8),
            _ => '+',
        };

        println!("\n=== World Map (minute {}) ===", self.minute);
        println!("Legend: [n]=vehicles waiting at crossroad, -n-/|n|=vehicles on street");
        println!();

        for y in 0..self.grid.height() {
            let mut row = String::new();
            let mut below = String::new();

            for x in 0..self.grid.width() {
                let Ok(crossroad) = self.grid.at(x, y) else {
                    continue;
                };

                row.push('[');
                row.push(digit(crossroad.waiting()));
                row.push(']');

                if let Ok(east) = self.grid.at(x + 1, y) {
                    let load = crossroad.street_out(Direction::East).load()
                        + east.street_out(Direction::West).load();
                    row.push('-');
                    row.push(digit(load));
                    row.push('-');
                }

                if let Ok(south) = self.grid.at(x, y + 1) {
                    let load = crossroad.street_out(Direction::South).load()
                        + south.street_out(Direction::North).load();
                    below.push(' ');
                    below.push(digit(load));
                    below.push(' ');
                    below.push_str("   ");
                }
            }

            println!("{}", row);
            if !below.trim().is_empty() {
                println!("{}", below.trim_end());
            }
        }
        println!();
    }
}

/// Release one light's vehicles onto its street. Vehicles a full street
/// refuses go back to the head of the light in their original order, or are
/// parked at the crossroad if the light has no room for them. Vehicles a
/// closed street refuses are parked so they get routed around it.
fn release_onto_street(
    crossroad: &mut Crossroad,
    direction: Direction,
    fleet: &mut Fleet,
    parked: &mut Vec<(VehicleId, Position)>,
) -> Result<usize> {
    let at = crossroad.position();
    let released = crossroad.light_mut(direction).release_this_minute();
    let mut refused = Vec::new();
    let mut moved = 0;

    for vehicle_id in released {
        fleet.unplace(vehicle_id);
        let street = crossroad.street_out_mut(direction);
        if street.try_enter(vehicle_id) {
            fleet.place(vehicle_id, Holder::Street { at, direction })?;
            moved += 1;
        } else if street.is_closed() {
            parked.push((vehicle_id, at));
        } else {
            refused.push(vehicle_id);
        }
    }

    for vehicle_id in refused.into_iter().rev() {
        if crossroad.light_mut(direction).return_to_head(vehicle_id) {
            fleet.place(vehicle_id, Holder::Light { at, direction })?;
        } else {
            parked.push((vehicle_id, at));
        }
    }

    Ok(moved)
}
