use crate::cell::Cell;

/// Rasterizes the straight segment between two cells with Bresenham's algorithm, inclusive of
/// both endpoints. Consecutive cells touch by edge or corner, which is enough to block
/// 4-directional movement across the stroke.
///
/// The line is always traced from the smaller endpoint (row-major order), so
/// `interpolate(b, a)` is exactly `interpolate(a, b)` reversed. No bounds checking is done.
pub fn interpolate(from: Cell, to: Cell) -> Vec<Cell> {
    if to < from {
        let mut cells = bresenham(to, from);
        cells.reverse();
        cells
    } else {
        bresenham(from, to)
    }
}

fn bresenham(from: Cell, to: Cell) -> Vec<Cell> {
    let d_row = (to.row - from.row).abs();
    let d_col = (to.col - from.col).abs();
    let s_row = if from.row < to.row { 1 } else { -1 };
    let s_col = if from.col < to.col { 1 } else { -1 };
    let mut err = d_row - d_col;
    let mut current = from;
    let mut cells = Vec::with_capacity((d_row.max(d_col) + 1) as usize);
    loop {
        cells.push(current);
        if current == to {
            break;
        }
        let e2 = 2 * err;
        if e2 > -d_col {
            err -= d_col;
            current.row += s_row;
        }
        if e2 < d_row {
            err += d_row;
            current.col += s_col;
        }
    }
    cells
}
