//! Adjacency lists for the 8-connected grid.
//!
//! Every free cell gets the list of free neighbours it can step to, with the step cost. The
//! neighbour order is fixed (see [NEIGHBOUR_OFFSETS]) and decides which of several equally
//! short routes a search reports, so it must not change.
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use log::debug;
use smallvec::SmallVec;

use crate::obstacle_grid::ObstacleGrid;
use crate::{Cell, DIAGONAL_COST, N_SMALLVEC_SIZE, ORTHOGONAL_COST};

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Candidate neighbour offsets `(dx, dy, cost)` in emission order: counter-clockwise starting
/// from the lower-left diagonal.
pub const NEIGHBOUR_OFFSETS: [(i32, i32, f64); 8] = [
    (-1, -1, DIAGONAL_COST),
    (-1, 0, ORTHOGONAL_COST),
    (-1, 1, DIAGONAL_COST),
    (0, 1, ORTHOGONAL_COST),
    (1, 1, DIAGONAL_COST),
    (1, 0, ORTHOGONAL_COST),
    (1, -1, DIAGONAL_COST),
    (0, -1, ORTHOGONAL_COST),
];

/// A directed step to a neighbouring cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub to: Cell,
    pub cost: f64,
}

pub type Edges = SmallVec<[Edge; N_SMALLVEC_SIZE]>;

/// Maps every free cell to its outgoing edges. Cells are kept in row-major insertion order.
#[derive(Clone, Debug, Default)]
pub struct Adjacency {
    edges: FxIndexMap<Cell, Edges>,
}

impl Adjacency {
    /// Builds the adjacency of every in-bounds, unblocked cell. Diagonal steps are allowed even
    /// if one or both of the corner cells next to them are blocked.
    pub fn build(grid: &ObstacleGrid) -> Adjacency {
        let mut edges = FxIndexMap::default();
        for cell in grid.cells().filter(|&c| grid.can_move_to(c)) {
            let neighbours = NEIGHBOUR_OFFSETS
                .iter()
                .map(|&(dx, dy, cost)| Edge {
                    to: Cell::new(cell.x + dx, cell.y + dy),
                    cost,
                })
                .filter(|edge| grid.can_move_to(edge.to))
                .collect::<Edges>();
            edges.insert(cell, neighbours);
        }
        let adjacency = Adjacency { edges };
        debug!(
            "Built adjacency with {} cells and {} edges",
            adjacency.len(),
            adjacency.edge_count()
        );
        adjacency
    }

    /// Outgoing edges of `cell`, empty if the cell is blocked or off the grid.
    pub fn neighbours(&self, cell: &Cell) -> &[Edge] {
        self.edges
            .get(cell)
            .map(|edges| edges.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.edges.contains_key(cell)
    }

    /// Free cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.edges.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Cell, &[Edge])> {
        self.edges.iter().map(|(cell, edges)| (cell, edges.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(|edges| edges.len()).sum()
    }
}
