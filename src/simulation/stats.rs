//! Run statistics for the driver

use log::info;

/// Counters collected while the world runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationStats {
    pub total_vehicles_spawned: u32,
    pub total_vehicles_completed: u32,
    /// Spawns refused because the first light was full or no route existed
    pub total_spawns_rejected: u32,
    /// Vehicles dropped mid-trip after their remaining route was cut off
    pub total_vehicles_stranded: u32,
    pub total_released: u64,
    /// Street minutes accumulated by completed vehicles
    pub completed_travel_minutes: u64,
    pub active_vehicles: u32,
    pub elapsed_minutes: u32,
}

impl SimulationStats {
    pub fn record_completion(&mut self, travel_minutes: u32) {
        self.total_vehicles_completed += 1;
        self.completed_travel_minutes += u64::from(travel_minutes);
    }

    pub fn average_travel_minutes(&self) -> f32 {
        if self.total_vehicles_completed == 0 {
            return 0.0;
        }
        self.completed_travel_minutes as f32 / self.total_vehicles_completed as f32
    }

    pub fn success_rate(&self) -> f32 {
        if self.total_vehicles_spawned == 0 {
            return 0.0;
        }
        (self.total_vehicles_completed as f32 / self.total_vehicles_spawned as f32) * 100.0
    }

    pub fn log_summary(&self) {
        info!("=== SIMULATION COMPLETE ===");
        info!("Elapsed minutes: {}", self.elapsed_minutes);
        info!("Total vehicles spawned: {}", self.total_vehicles_spawned);
        info!("Total vehicles completed: {}", self.total_vehicles_completed);
        info!("Rejected spawns: {}", self.total_spawns_rejected);
        info!("Stranded vehicles: {}", self.total_vehicles_stranded);
        info!("Active vehicles: {}", self.active_vehicles);
        info!("Vehicles released by lights: {}", self.total_released);
        info!(
            "Average travel time: {:.1} min",
            self.average_travel_minutes()
        );
        info!("Success rate: {:.1}%", self.success_rate());
    }
}
