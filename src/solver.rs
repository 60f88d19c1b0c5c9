use itertools::Itertools;
use log::info;

use crate::cell::Cell;
use crate::pathing_grid::PathingGrid;
use crate::search::{dijkstra, dijkstra_expecting_goal};

/// Cost of a single step between adjacent cells.
pub const UNIT_COST: u32 = 1;

/// Computes a shortest 4-connected path from `start` to `target` over free cells, inclusive of
/// both ends. Returns an empty path if the start is blocked, the target cannot be reached or
/// either end lies outside the grid. `start == target` on a free cell gives a one-cell path.
///
/// If the grid's components are up to date and the two cells lie in different components the
/// search is skipped entirely. Callers that mutate the grid should call
/// [PathingGrid::update] first to benefit from this.
pub fn find_path(grid: &PathingGrid, start: Cell, target: Cell) -> Vec<Cell> {
    if !grid.is_walkable(start) {
        info!("Start {} is blocked or outside the grid", start);
        return Vec::new();
    }
    if !grid.in_bounds(target) {
        info!("Target {} lies outside the grid", target);
        return Vec::new();
    }
    if !grid.components_dirty && grid.unreachable(start, target) {
        info!("{} is not reachable from {}", target, start);
        return Vec::new();
    }
    info!("Computing path from {} to {}", start, target);
    let search = |node: &Cell| {
        grid.walkable_neighbours(*node)
            .map(|n| (n, UNIT_COST))
            .collect::<Vec<_>>()
    };
    let result = if grid.components_dirty {
        dijkstra(&start, search, |node| *node == target)
    } else {
        dijkstra_expecting_goal(&start, search, |node| *node == target)
    };
    match result {
        Some((path, cost)) => {
            info!("Found path of cost {} from {} to {}", cost, start, target);
            path
        }
        None => {
            info!("No path from {} to {}", start, target);
            Vec::new()
        }
    }
}

/// Checks that `path` is a walkable route from `start` to `target`: it starts and ends at the
/// right cells, every step moves to an edge-adjacent cell and no cell is blocked.
pub fn path_is_valid(grid: &PathingGrid, path: &[Cell], start: Cell, target: Cell) -> bool {
    match (path.first(), path.last()) {
        (Some(first), Some(last)) => {
            *first == start
                && *last == target
                && path.iter().all(|c| grid.is_walkable(*c))
                && path.iter().tuple_windows().all(|(a, b)| a.is_adjacent(b))
        }
        _ => false,
    }
}
