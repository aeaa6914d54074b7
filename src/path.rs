use itertools::Itertools;

use crate::engine::SearchResult;
use crate::{Cell, DIAGONAL_COST, ORTHOGONAL_COST};

/// Rebuilds the route from `start` to `target` by following predecessors back from the target.
/// Returns [None] if the target was never reached, unless it is the start itself.
pub fn extract_path(result: &SearchResult, start: Cell, target: Cell) -> Option<Vec<Cell>> {
    if target == start {
        return Some(vec![start]);
    }
    result.predecessor(&target)?;
    let mut path: Vec<Cell> =
        std::iter::successors(Some(target), |cell| result.predecessor(cell)).collect();
    path.reverse();
    if path.first() == Some(&start) {
        Some(path)
    } else {
        None
    }
}

/// Cost of a single step between two neighbouring cells.
pub fn step_cost(from: &Cell, to: &Cell) -> f64 {
    let delta_x = (from.x - to.x).abs();
    let delta_y = (from.y - to.y).abs();
    debug_assert!(
        delta_x <= 1 && delta_y <= 1 && delta_x + delta_y > 0,
        "{} and {} are not neighbours",
        from,
        to
    );
    if delta_x + delta_y == 2 {
        DIAGONAL_COST
    } else {
        ORTHOGONAL_COST
    }
}

/// Sums the step costs along `path` from its first cell on, in the same order a search
/// accumulates them, so the total matches the reported cost exactly.
pub fn path_cost(path: &[Cell]) -> f64 {
    path.iter()
        .tuple_windows()
        .fold(0.0, |total, (from, to)| total + step_cost(from, to))
}

/// Whether every consecutive pair of cells is a single orthogonal or diagonal step and no cell
/// is visited twice.
pub fn is_connected_walk(path: &[Cell]) -> bool {
    let steps_ok = path.iter().tuple_windows().all(|(from, to)| {
        let delta_x = (from.x - to.x).abs();
        let delta_y = (from.y - to.y).abs();
        delta_x <= 1 && delta_y <= 1 && from != to
    });
    steps_ok && path.iter().all_unique()
}
