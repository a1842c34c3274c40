//! Shortest-path routing over the grid
//!
//! The grid's adjacency is loaded into a petgraph directed graph keyed by
//! position and searched with A* under a null heuristic, which is Dijkstra.
//! Every open street costs one hop; closed streets are left out of the graph.

use std::collections::HashMap;

use log::debug;
use petgraph::algo::{astar, dijkstra};
use petgraph::graphmap::DiGraphMap;
use petgraph::visit::EdgeRef;

use super::error::{TrafficError, TrafficResult};
use super::grid::Grid;
use super::types::Position;

/// Cost of crossing one open street
pub const HOP_COST: u32 = 1;

/// Stateless route planner
pub struct Router;

impl Router {
    /// Build the routing graph: one node per crossroad, one edge per open street
    fn build_graph(grid: &Grid) -> DiGraphMap<Position, u32> {
        let mut graph = DiGraphMap::with_capacity(grid.len(), grid.len() * 4);

        for crossroad in grid.crossroads() {
            graph.add_node(crossroad.position());
        }

        for crossroad in grid.crossroads() {
            let from = crossroad.position();
            for (to, direction) in grid.neighbors(from) {
                if crossroad.street_out(direction).is_closed() {
                    continue;
                }
                graph.add_edge(from, to, HOP_COST);
            }
        }

        graph
    }

    fn check_bounds(grid: &Grid, position: Position) -> TrafficResult<()> {
        if grid.contains(position) {
            Ok(())
        } else {
            Err(TrafficError::InvalidCoordinate {
                x: position.x,
                y: position.y,
                width: grid.width(),
                height: grid.height(),
            })
        }
    }

    /// Minimum-hop path from `start` to `goal`, both ends included.
    ///
    /// `start == goal` yields `[start]`. An unreachable goal yields an empty path.
    pub fn shortest_path(grid: &Grid, start: Position, goal: Position) -> TrafficResult<Vec<Position>> {
        Self::check_bounds(grid, start)?;
        Self::check_bounds(grid, goal)?;

        if start == goal {
            return Ok(vec![start]);
        }

        let graph = Self::build_graph(grid);
        let path = astar(
            &graph,
            start,
            |node| node == goal,
            |edge| *edge.weight(),
            |_| 0,
        )
        .map(|(_, path)| path)
        .unwrap_or_default();

        if path.is_empty() {
            debug!("No route from {} to {}", start, goal);
        } else {
            debug!("Route {} -> {}: {} hops", start, goal, path.len() - 1);
        }

        Ok(path)
    }

    /// Hop distance from `start` to every reachable crossroad
    pub fn distances(grid: &Grid, start: Position) -> TrafficResult<HashMap<Position, u32>> {
        Self::check_bounds(grid, start)?;

        let graph = Self::build_graph(grid);
        Ok(dijkstra(&graph, start, None, |edge| *edge.weight())
            .into_iter()
            .collect())
    }

    /// Render a path as `(0,0) -> (1,0) -> ...`, or `No path` when empty
    pub fn format_path(path: &[Position]) -> String {
        if path.is_empty() {
            return "No path".to_string();
        }
        path.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
