//! Line-based command loop for route queries

use std::io::{self, BufRead, Write};

use anyhow::Result;

use manhattan_traffic::simulation::{Grid, Position, Router};

const USAGE: &str = "Usage: path x1 y1 x2 y2";

/// Answer one command line. Returns `None` when the user asked to exit.
fn execute(grid: &Grid, line: &str) -> Option<String> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts.as_slice() {
        [] => Some(String::new()),
        ["exit"] | ["quit"] => None,
        ["path", coords @ ..] => {
            let parsed: Result<Vec<i32>, _> = coords.iter().map(|c| c.parse::<i32>()).collect();
            let reply = match parsed.as_deref() {
                Ok([x1, y1, x2, y2]) => {
                    match Router::shortest_path(grid, Position::new(*x1, *y1), Position::new(*x2, *y2)) {
                        Ok(path) => Router::format_path(&path),
                        Err(e) => format!("Error: {}", e),
                    }
                }
                _ => USAGE.to_string(),
            };
            Some(reply)
        }
        _ => Some("Unknown command".to_string()),
    }
}

pub fn run(grid: &Grid) -> Result<()> {
    println!("=== Manhattan Traffic Simulation ===");
    println!(
        "{}x{} grid. Commands: path x1 y1 x2 y2, exit",
        grid.width(),
        grid.height()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        match execute(grid, &line) {
            Some(reply) if reply.is_empty() => {}
            Some(reply) => println!("{}", reply),
            None => return Ok(()),
        }
    }
}
