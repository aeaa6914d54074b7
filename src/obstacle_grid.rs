use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use log::debug;
use petgraph::unionfind::UnionFind;

use crate::Cell;

/// [ObstacleGrid] stores which cells are blocked in a [BoolGrid] (`true` means blocked) and keeps
/// track of 8-connected components of free cells in a [UnionFind] structure, so that
/// reachability can be answered without searching.
#[derive(Clone, Debug)]
pub struct ObstacleGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    size: usize,
}

impl ObstacleGrid {
    /// Creates a `size` by `size` grid without obstacles. Components are generated right away.
    pub fn new(size: usize) -> ObstacleGrid {
        let mut obstacle_grid = ObstacleGrid {
            grid: BoolGrid::new(size, size, false),
            components: UnionFind::new(size * size),
            components_dirty: false,
            size,
        };
        obstacle_grid.generate_components();
        obstacle_grid
    }

    /// Creates a grid with the given cells blocked. Duplicate cells are fine.
    pub fn with_obstacles<I>(size: usize, obstacles: I) -> ObstacleGrid
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut obstacle_grid = ObstacleGrid::new(size);
        for cell in obstacles {
            obstacle_grid.set(cell, true);
        }
        obstacle_grid.update();
        obstacle_grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.size && (cell.y as usize) < self.size
    }

    pub fn is_blocked(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && self.grid.get(cell.x as usize, cell.y as usize)
    }

    /// A cell can be entered if it lies on the grid and is not blocked.
    pub fn can_move_to(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.grid.get(cell.x as usize, cell.y as usize)
    }

    /// Marks a cell as blocked or free. Components are flagged as dirty on any change and
    /// regenerated by [update](Self::update).
    pub fn set(&mut self, cell: Cell, blocked: bool) {
        assert!(
            self.in_bounds(cell),
            "cell {} lies outside the {}x{} grid",
            cell,
            self.size,
            self.size
        );
        if self.grid.get(cell.x as usize, cell.y as usize) != blocked {
            self.components_dirty = true;
            self.grid.set(cell.x as usize, cell.y as usize, blocked);
        }
    }

    /// All blocked cells, row by row.
    pub fn obstacles(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells().filter(move |&cell| self.grid.get(cell.x as usize, cell.y as usize))
    }

    /// Every cell of the grid, `y` outer and `x` inner.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Cell::new(x, y)))
    }

    fn ix(&self, cell: &Cell) -> usize {
        cell.y as usize * self.size + cell.x as usize
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Blocked cells are never
    /// joined to anything, so a blocked start or goal is unreachable unless the two coincide.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            !self.components.equiv(self.ix(start), self.ix(goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free 8-neighbours to the same
    /// components. Diagonal links are made regardless of the two corner cells.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components");
        self.components = UnionFind::new(self.size * self.size);
        self.components_dirty = false;
        for cell in self.cells().collect::<Vec<_>>() {
            if !self.can_move_to(cell) {
                continue;
            }
            let parent_ix = self.ix(&cell);
            for p in [
                Cell::new(cell.x, cell.y + 1),
                Cell::new(cell.x + 1, cell.y - 1),
                Cell::new(cell.x + 1, cell.y),
                Cell::new(cell.x + 1, cell.y + 1),
            ] {
                if self.can_move_to(p) {
                    let ix = self.ix(&p);
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }
}

impl fmt::Display for ObstacleGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Grid:")?;
        for y in 0..self.size as i32 {
            let values = (0..self.size as i32)
                .map(|x| self.grid.get(x as usize, y as usize) as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}
