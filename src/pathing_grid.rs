use core::fmt;

use log::info;
use petgraph::unionfind::UnionFind;

use crate::cell::Cell;
use crate::error::GridError;

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Free,
    Obstacle,
}

/// [PathingGrid] stores the obstacle map in row-major order and maintains information about
/// 4-connected components using a [UnionFind] structure, so that searches towards a target in a
/// different component can be skipped.
///
/// Freeing a cell joins it with its free neighbours right away. Blocking a cell may split a
/// component, which union-find cannot express, so the components are flagged as dirty instead and
/// regenerated by [update](Self::update).
#[derive(Clone, Debug)]
pub struct PathingGrid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl PathingGrid {
    /// Creates an all-[Free](CellState::Free) grid. Zero dimensions are rejected.
    pub fn new(rows: usize, cols: usize) -> Result<PathingGrid, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        let mut grid = PathingGrid {
            rows,
            cols,
            cells: vec![CellState::Free; rows * cols],
            components: UnionFind::new(rows * cols),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }

    /// Row-major index of an in-bounds cell.
    fn get_ix(&self, cell: Cell) -> usize {
        cell.row as usize * self.cols + cell.col as usize
    }

    /// Current state of the cell. Cells outside the grid read as [Obstacle](CellState::Obstacle).
    pub fn get(&self, cell: Cell) -> CellState {
        if self.in_bounds(cell) {
            self.cells[self.get_ix(cell)]
        } else {
            CellState::Obstacle
        }
    }

    /// Updates a single cell; out-of-bounds writes are ignored. Joins newly connected components
    /// and flags the components as dirty if they are (potentially) broken apart.
    pub fn set(&mut self, cell: Cell, state: CellState) {
        if !self.in_bounds(cell) {
            return;
        }
        let ix = self.get_ix(cell);
        let previous = self.cells[ix];
        self.cells[ix] = state;
        match (previous, state) {
            (CellState::Free, CellState::Obstacle) => self.components_dirty = true,
            (_, CellState::Free) => {
                for n in cell.neumann_neighborhood() {
                    if self.is_walkable(n) {
                        let n_ix = self.get_ix(n);
                        self.components.union(ix, n_ix);
                    }
                }
            }
            (CellState::Obstacle, CellState::Obstacle) => {}
        }
    }

    /// True iff the cell is in bounds and free.
    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.get(cell) == CellState::Free
    }

    /// Free, in-bounds neighbours of a cell in fixed neighbourhood order.
    pub fn walkable_neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.neumann_neighborhood()
            .into_iter()
            .filter(move |n| self.is_walkable(*n))
    }

    /// Resets every cell to free.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Free);
        self.generate_components();
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|s| **s == CellState::Obstacle)
            .count()
    }

    /// All cells with their state, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, CellState)> + '_ {
        let cols = self.cols;
        self.cells.iter().enumerate().map(move |(ix, state)| {
            let cell = Cell::new((ix / cols) as i32, (ix % cols) as i32);
            (cell, *state)
        })
    }

    /// Retrieves the component id a given in-bounds [Cell] belongs to.
    pub fn get_component(&self, cell: Cell) -> usize {
        self.components.find(self.get_ix(cell))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: Cell, goal: Cell) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component. Out-of-bounds cells are never
    /// reachable.
    pub fn unreachable(&self, start: Cell, goal: Cell) -> bool {
        if self.in_bounds(start) && self.in_bounds(goal) {
            !self
                .components
                .equiv(self.get_ix(start), self.get_ix(goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up free grid neighbours to the same
    /// components. Only the right and lower neighbours need to be visited per cell.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.rows * self.cols);
        self.components_dirty = false;
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let cell = Cell::new(row, col);
                if !self.is_walkable(cell) {
                    continue;
                }
                let parent_ix = self.get_ix(cell);
                for n in [Cell::new(row, col + 1), Cell::new(row + 1, col)] {
                    if self.is_walkable(n) {
                        let n_ix = self.get_ix(n);
                        self.components.union(parent_ix, n_ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row
                .iter()
                .map(|s| match s {
                    CellState::Free => '.',
                    CellState::Obstacle => '#',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            PathingGrid::new(0, 5).unwrap_err(),
            GridError::InvalidDimensions { rows: 0, cols: 5 }
        );
        assert!(PathingGrid::new(3, 0).is_err());
        assert!(PathingGrid::new(1, 1).is_ok());
    }

    #[test]
    fn out_of_bounds_access_is_inert() {
        let mut grid = PathingGrid::new(2, 3).unwrap();
        grid.set(Cell::new(-1, 0), CellState::Obstacle);
        grid.set(Cell::new(2, 0), CellState::Obstacle);
        grid.set(Cell::new(0, 3), CellState::Obstacle);
        assert_eq!(grid.obstacle_count(), 0);
        assert_eq!(grid.get(Cell::new(5, 5)), CellState::Obstacle);
        assert!(!grid.is_walkable(Cell::new(0, -1)));
        assert!(grid.is_walkable(Cell::new(1, 2)));
    }

    /// Tests whether cells are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // |.#.|
        // |.#.|
        let mut grid = PathingGrid::new(2, 3).unwrap();
        grid.set(Cell::new(0, 1), CellState::Obstacle);
        grid.set(Cell::new(1, 1), CellState::Obstacle);
        assert!(grid.components_dirty);
        grid.update();
        assert!(!grid.components_dirty);
        assert!(grid.reachable(Cell::new(0, 0), Cell::new(1, 0)));
        assert!(grid.unreachable(Cell::new(0, 0), Cell::new(0, 2)));
        assert!(grid.unreachable(Cell::new(0, 0), Cell::new(0, 1)));
        assert!(grid.unreachable(Cell::new(0, 0), Cell::new(0, 3)));
    }

    /// Freeing a wall cell merges the components on both sides without a regeneration.
    #[test]
    fn freeing_joins_components() {
        let mut grid = PathingGrid::new(2, 3).unwrap();
        grid.set(Cell::new(0, 1), CellState::Obstacle);
        grid.set(Cell::new(1, 1), CellState::Obstacle);
        grid.update();
        grid.set(Cell::new(1, 1), CellState::Free);
        assert!(!grid.components_dirty);
        assert!(grid.reachable(Cell::new(0, 0), Cell::new(0, 2)));
        assert_eq!(
            grid.get_component(Cell::new(0, 0)),
            grid.get_component(Cell::new(1, 2))
        );
    }

    /// Diagonal neighbours are not connected on a 4-grid.
    #[test]
    fn diagonal_cells_are_separate_components() {
        // |.#|
        // |#.|
        let mut grid = PathingGrid::new(2, 2).unwrap();
        grid.set(Cell::new(0, 1), CellState::Obstacle);
        grid.set(Cell::new(1, 0), CellState::Obstacle);
        grid.update();
        assert!(grid.unreachable(Cell::new(0, 0), Cell::new(1, 1)));
    }

    #[test]
    fn clear_frees_everything() {
        let mut grid = PathingGrid::new(4, 4).unwrap();
        for cell in [Cell::new(0, 0), Cell::new(2, 3), Cell::new(3, 1)] {
            grid.set(cell, CellState::Obstacle);
        }
        assert_eq!(grid.obstacle_count(), 3);
        grid.clear();
        assert_eq!(grid.obstacle_count(), 0);
        assert!(!grid.components_dirty);
        assert!(grid.reachable(Cell::new(0, 0), Cell::new(3, 3)));
    }

    #[test]
    fn cells_iterate_row_major() {
        let mut grid = PathingGrid::new(2, 2).unwrap();
        grid.set(Cell::new(1, 0), CellState::Obstacle);
        let cells: Vec<_> = grid.cells().collect();
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[1], (Cell::new(0, 1), CellState::Free));
        assert_eq!(cells[2], (Cell::new(1, 0), CellState::Obstacle));
    }

    #[test]
    fn display_marks_obstacles() {
        let mut grid = PathingGrid::new(2, 3).unwrap();
        grid.set(Cell::new(1, 2), CellState::Obstacle);
        assert_eq!(grid.to_string(), "...\n..#\n");
    }
}
