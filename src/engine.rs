use log::{debug, info};

use crate::dijkstra::{SearchContext, SearchState, SearchStats, ShortestPathTree, Termination};
use crate::graph::Adjacency;
use crate::path::extract_path;
use crate::Cell;

/// Dijkstra over a prebuilt [Adjacency]. The engine holds no search state of its own; every
/// call to [search](Self::search) owns its queue and maps and hands them back in the result.
#[derive(Clone, Copy, Debug)]
pub struct ShortestPathEngine<'a> {
    adjacency: &'a Adjacency,
    termination: Termination,
}

impl<'a> ShortestPathEngine<'a> {
    pub fn new(adjacency: &'a Adjacency) -> ShortestPathEngine<'a> {
        ShortestPathEngine {
            adjacency,
            termination: Termination::default(),
        }
    }

    pub fn with_termination(mut self, termination: Termination) -> ShortestPathEngine<'a> {
        self.termination = termination;
        self
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Computes the cheapest route from `start` to `target`. A blocked or off-grid endpoint
    /// gives an unsuccessful result without searching.
    pub fn search(&self, start: Cell, target: Cell) -> SearchResult {
        if !self.adjacency.contains(&start) || !self.adjacency.contains(&target) {
            info!("{} or {} is not a free cell, no path", start, target);
            return SearchResult {
                start,
                target,
                tree: None,
            };
        }
        let tree = SearchContext::new(self.termination).run(
            &start,
            |cell| {
                self.adjacency
                    .neighbours(cell)
                    .iter()
                    .map(|edge| (edge.to, edge.cost))
            },
            |cell| *cell == target,
        );
        if let Some((_, cost)) = tree.goal() {
            debug!("Reached {} from {} at cost {}", target, start, cost);
        }
        SearchResult {
            start,
            target,
            tree: Some(tree),
        }
    }
}

/// Distances and predecessors of one search. Cells the search never reached have an infinite
/// distance and no predecessor.
#[derive(Clone, Debug)]
pub struct SearchResult {
    start: Cell,
    target: Cell,
    tree: Option<ShortestPathTree<Cell, f64>>,
}

impl SearchResult {
    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn target(&self) -> Cell {
        self.target
    }

    pub fn found(&self) -> bool {
        self.tree.as_ref().is_some_and(|tree| tree.found())
    }

    pub fn state(&self) -> SearchState {
        self.tree
            .as_ref()
            .map_or(SearchState::Exhausted, |tree| tree.state())
    }

    /// Cost of the route to the target, infinite if there is none.
    pub fn cost(&self) -> f64 {
        self.tree
            .as_ref()
            .and_then(|tree| tree.goal())
            .map_or(f64::INFINITY, |(_, cost)| cost)
    }

    pub fn distance(&self, cell: &Cell) -> f64 {
        self.tree
            .as_ref()
            .and_then(|tree| tree.distance(cell))
            .unwrap_or(f64::INFINITY)
    }

    pub fn predecessor(&self, cell: &Cell) -> Option<Cell> {
        self.tree
            .as_ref()
            .and_then(|tree| tree.predecessor(cell))
            .copied()
    }

    /// Cells reached by the search with their best known distance.
    pub fn reached(&self) -> impl Iterator<Item = (Cell, f64)> + '_ {
        self.tree
            .iter()
            .flat_map(|tree| tree.iter().map(|(&cell, cost)| (cell, cost)))
    }

    pub fn stats(&self) -> SearchStats {
        self.tree
            .as_ref()
            .map(|tree| tree.stats())
            .unwrap_or_default()
    }

    /// The route from start to target, both included, if one was found.
    pub fn path(&self) -> Option<Vec<Cell>> {
        if !self.found() {
            return None;
        }
        extract_path(self, self.start, self.target)
    }
}
