//! # grid_path_painter
//!
//! The engine behind an interactive shortest-path demonstrator. A user paints walls and drags a
//! target around a grid; the engine keeps the shortest 4-connected path from a fixed start cell
//! to the target up to date using
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) on unit edge
//! weights.
//!
//! Pointer samples during a drag are joined with
//! [Bresenham's line algorithm](https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm) so
//! fast strokes still produce closed walls.
//! [Connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) are tracked
//! to avoid flood-filling the grid when the target is walled off.
//!
//! Rendering and windowing are left to the caller: feed [InputEvent]s into a [Session] and
//! implement [Renderer] to receive read-only [Snapshot]s.
pub mod cell;
pub mod error;
pub mod pathing_grid;
pub mod raster;
pub mod search;
pub mod session;
pub mod solver;

pub use cell::Cell;
pub use error::GridError;
pub use pathing_grid::{CellState, PathingGrid};
pub use raster::interpolate;
pub use session::{
    InputEvent, Mode, PointerButton, Renderer, Session, SessionConfig, Snapshot,
};
pub use solver::{find_path, path_is_valid};
