mod repl;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use manhattan_traffic::simulation::{
    Grid, PhaseDurations, Position, Router, SimConfig, SimWorld, DEFAULT_FLOW_PER_MINUTE,
    DEFAULT_GREEN_MINUTES, DEFAULT_LIGHT_CAPACITY, DEFAULT_RED_MINUTES, DEFAULT_STREET_CAPACITY,
    DEFAULT_TRAVEL_TIME, DEFAULT_YELLOW_MINUTES,
};

#[derive(Parser)]
#[command(name = "manhattan_traffic")]
#[command(about = "Traffic lights, streets and routing on a Manhattan grid")]
struct Cli {
    #[command(flatten)]
    grid: GridArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GridArgs {
    /// Number of crossroads west to east
    #[arg(long, default_value = "3", global = true)]
    width: i32,

    /// Number of crossroads north to south
    #[arg(long, default_value = "3", global = true)]
    height: i32,

    /// Minutes each light stays green
    #[arg(long, default_value_t = DEFAULT_GREEN_MINUTES, global = true)]
    green: u32,

    /// Minutes each light stays yellow
    #[arg(long, default_value_t = DEFAULT_YELLOW_MINUTES, global = true)]
    yellow: u32,

    /// Minutes each light stays red
    #[arg(long, default_value_t = DEFAULT_RED_MINUTES, global = true)]
    red: u32,

    /// Vehicles a green light releases per minute
    #[arg(long, default_value_t = DEFAULT_FLOW_PER_MINUTE, global = true)]
    flow: usize,

    /// Vehicles that may wait at one light
    #[arg(long, default_value_t = DEFAULT_LIGHT_CAPACITY, global = true)]
    light_capacity: usize,

    /// Minutes to cross one street
    #[arg(long, default_value_t = DEFAULT_TRAVEL_TIME, global = true)]
    travel_time: u32,

    /// Vehicles that may be on one street at once
    #[arg(long, default_value_t = DEFAULT_STREET_CAPACITY, global = true)]
    street_capacity: usize,
}

impl GridArgs {
    fn config(&self) -> SimConfig {
        SimConfig {
            durations: PhaseDurations::new(self.green, self.yellow, self.red),
            flow_per_minute: self.flow,
            light_capacity: self.light_capacity,
            travel_time: self.travel_time,
            street_capacity: self.street_capacity,
            ..SimConfig::default()
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation headless
    Run {
        /// Simulated minutes to run
        #[arg(long, default_value = "60")]
        minutes: u32,

        /// Vehicles spawned at the start
        #[arg(long, default_value = "20")]
        vehicles: usize,

        /// Share of spawned vehicles with priority (0.0 - 1.0)
        #[arg(long, default_value = "0.1")]
        priority_share: f64,

        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Print the map every this many minutes
        #[arg(long, default_value = "10")]
        report_every: u32,
    },
    /// Print the shortest path between two crossroads
    Path { x1: i32, y1: i32, x2: i32, y2: i32 },
    /// Read `path x1 y1 x2 y2` commands from stdin
    Repl,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,manhattan_traffic=info"),
    )
    .init();

    let cli = Cli::parse();
    let config = cli.grid.config();

    match cli.command {
        Command::Run {
            minutes,
            vehicles,
            priority_share,
            seed,
            report_every,
        } => run_headless(&cli.grid, &config, minutes, vehicles, priority_share, seed, report_every),
        Command::Path { x1, y1, x2, y2 } => {
            let grid = Grid::with_config(cli.grid.width, cli.grid.height, &config)?;
            let path = Router::shortest_path(&grid, Position::new(x1, y1), Position::new(x2, y2))?;
            println!("{}", Router::format_path(&path));
            Ok(())
        }
        Command::Repl => {
            let grid = Grid::with_config(cli.grid.width, cli.grid.height, &config)?;
            repl::run(&grid)
        }
    }
}

/// Run the simulation in headless mode (no interaction)
fn run_headless(
    grid: &GridArgs,
    config: &SimConfig,
    minutes: u32,
    vehicles: usize,
    priority_share: f64,
    seed: Option<u64>,
    report_every: u32,
) -> Result<()> {
    println!("Running Manhattan traffic simulation in headless mode...");
    println!(
        "Grid: {}x{}, minutes: {}, vehicles: {}",
        grid.width, grid.height, minutes, vehicles
    );
    println!();

    let mut world = SimWorld::with_config(grid.width, grid.height, config, seed)
        .context("Failed to create world")?;

    let spawned = world.spawn_random(vehicles, priority_share);
    info!("SPAWNING VEHICLES: {} of {} admitted", spawned, vehicles);

    println!("Initial state:");
    world.print_summary();
    world.draw_map();

    let report_every = report_every.max(1);
    for _ in 0..minutes {
        world.tick()?;

        if world.minute % report_every == 0 {
            println!("--- After minute {} ---", world.minute);
            world.print_summary();
            world.draw_map();
        }

        if world.is_idle() {
            info!("All vehicles arrived after {} minutes", world.minute);
            break;
        }
    }

    println!("=== Final State ===");
    world.print_summary();
    world.draw_map();
    world.stats.log_summary();

    Ok(())
}
