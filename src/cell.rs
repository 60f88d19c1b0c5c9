use core::fmt;

/// Neighbour offsets in (row, col) form. The order fixes tie-breaking during search:
/// right, down, left, up.
pub const NEUMANN_OFFSETS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// A (row, column) coordinate on the grid, 0-indexed. Signed so that cells produced by
/// rasterization or raw pointer input may lie outside the grid; the grid decides what is
/// in bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// Maps fractional canvas coordinates to the nearest cell, rounding half away from zero.
    pub fn nearest(row: f64, col: f64) -> Cell {
        Cell::new(row.round() as i32, col.round() as i32)
    }

    pub fn manhattan_distance(&self, other: &Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// True if the two cells share an edge.
    pub fn is_adjacent(&self, other: &Cell) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// The 4-neighbourhood (von Neumann neighbourhood) of the cell, in [NEUMANN_OFFSETS] order.
    pub fn neumann_neighborhood(&self) -> [Cell; 4] {
        NEUMANN_OFFSETS.map(|(dr, dc)| Cell::new(self.row + dr, self.col + dc))
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Cell {
        Cell::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_rounds_to_closest_cell() {
        assert_eq!(Cell::nearest(2.4, 3.6), Cell::new(2, 4));
        assert_eq!(Cell::nearest(-0.4, 0.5), Cell::new(0, 1));
        assert_eq!(Cell::nearest(-0.6, 19.49), Cell::new(-1, 19));
    }

    #[test]
    fn neighborhood_is_axis_aligned() {
        let c = Cell::new(3, 3);
        let neighbours = c.neumann_neighborhood();
        assert_eq!(neighbours[0], Cell::new(3, 4));
        assert!(neighbours.iter().all(|n| c.is_adjacent(n)));
        assert!(!c.is_adjacent(&Cell::new(4, 4)));
        assert!(!c.is_adjacent(&c));
    }

    #[test]
    fn ordering_is_row_major() {
        assert!(Cell::new(0, 9) < Cell::new(1, 0));
        assert!(Cell::new(1, 0) < Cell::new(1, 1));
    }
}
