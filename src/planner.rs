use log::{debug, info};

use crate::dijkstra::Termination;
use crate::engine::ShortestPathEngine;
use crate::graph::Adjacency;
use crate::obstacle_grid::ObstacleGrid;
use crate::path::path_cost;
use crate::Cell;

/// Result of planning a route.
#[derive(Clone, Debug, PartialEq)]
pub enum Plan {
    /// The cells to visit, start and target included, and the total cost.
    Path { cells: Vec<Cell>, cost: f64 },
    NoPath,
}

impl Plan {
    pub fn cells(&self) -> Option<&[Cell]> {
        match self {
            Plan::Path { cells, .. } => Some(cells),
            Plan::NoPath => None,
        }
    }

    pub fn cost(&self) -> Option<f64> {
        match self {
            Plan::Path { cost, .. } => Some(*cost),
            Plan::NoPath => None,
        }
    }
}

/// [Planner] owns an obstacle layout together with the adjacency built from it and answers
/// route queries on it. Components of the grid are checked first so an unreachable target is
/// reported without searching.
#[derive(Clone, Debug)]
pub struct Planner {
    grid: ObstacleGrid,
    adjacency: Adjacency,
    termination: Termination,
}

impl Planner {
    pub fn new(mut grid: ObstacleGrid) -> Planner {
        grid.update();
        let adjacency = Adjacency::build(&grid);
        Planner {
            grid,
            adjacency,
            termination: Termination::default(),
        }
    }

    pub fn with_termination(mut self, termination: Termination) -> Planner {
        self.termination = termination;
        self
    }

    pub fn grid(&self) -> &ObstacleGrid {
        &self.grid
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn engine(&self) -> ShortestPathEngine<'_> {
        ShortestPathEngine::new(&self.adjacency).with_termination(self.termination)
    }

    /// Computes a route from `start` to `target`, or [Plan::NoPath] if there is none, including
    /// when either end is blocked.
    pub fn plan(&self, start: Cell, target: Cell) -> Plan {
        if start != target && self.grid.unreachable(&start, &target) {
            info!("{} is not reachable from {}", target, start);
            return Plan::NoPath;
        }
        let result = self.engine().search(start, target);
        if !result.found() {
            info!("No path from {} to {}", start, target);
            return Plan::NoPath;
        }
        let cells = result.path().unwrap_or_else(|| {
            panic!(
                "search reached {} but the predecessor chain does not lead back to {}",
                target, start
            )
        });
        let cost = result.cost();
        debug_assert_eq!(path_cost(&cells), cost);
        info!("Reached target {} in {} steps at cost {}", target, cells.len() - 1, cost);
        debug!("Path: {:?}", cells);
        Plan::Path { cells, cost }
    }
}
