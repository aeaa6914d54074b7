//! # robot_pathfinding
//!
//! Shortest paths for a robot on a small square grid. The grid is
//! 8-connected: orthogonal steps cost `1` and diagonal steps cost `√2`.
//! Paths are computed with Dijkstra's algorithm over an adjacency list that
//! is built once from the obstacle layout, and reconstructed from a single
//! predecessor per cell. [Connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! are pre-computed so that an unreachable target is reported without
//! flood-filling the grid.
//!
//! The binary loads obstacles from a CSV file, plans from [START] to
//! [TARGET] and animates the result in the terminal.
pub mod config;
pub mod dijkstra;
pub mod engine;
pub mod error;
pub mod graph;
pub mod obstacle_grid;
pub mod obstacles;
pub mod path;
pub mod planner;
pub mod render;

pub use grid_util::point::Point;

pub use crate::config::PlannerConfig;
pub use crate::dijkstra::{SearchState, Termination};
pub use crate::engine::{SearchResult, ShortestPathEngine};
pub use crate::error::ObstacleError;
pub use crate::graph::{Adjacency, Edge};
pub use crate::obstacle_grid::ObstacleGrid;
pub use crate::obstacles::{load_obstacles, read_obstacles};
pub use crate::path::{extract_path, path_cost};
pub use crate::planner::{Plan, Planner};
pub use crate::render::TerminalRenderer;

/// A grid position. Equality is by coordinates.
pub type Cell = Point;

/// Side length of the square grid.
pub const GRID_SIZE: usize = 10;
/// Where the robot starts.
pub const START: Cell = Point { x: 0, y: 0 };
/// Where the robot wants to go.
pub const TARGET: Cell = Point { x: 9, y: 9 };

/// Cost of a horizontal or vertical step.
pub const ORTHOGONAL_COST: f64 = 1.0;
/// Cost of a diagonal step. Kept unrounded; costs are compared exactly.
pub const DIAGONAL_COST: f64 = std::f64::consts::SQRT_2;

/// Inline capacity for per-cell edge lists, one slot per Moore neighbour.
pub const N_SMALLVEC_SIZE: usize = 8;
