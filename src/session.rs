//! The interaction state machine: turns pointer events into grid edits, target moves and path
//! recomputations, and publishes a read-only [Snapshot] to a [Renderer] after every change.
use log::debug;

use crate::cell::Cell;
use crate::error::GridError;
use crate::pathing_grid::{CellState, PathingGrid};
use crate::raster::interpolate;
use crate::solver::find_path;

/// Pointer buttons the session reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Paints walls.
    Primary,
    /// Places and drags the target.
    Secondary,
}

/// Events delivered by the windowing layer, already mapped into grid space. A `cell` of [None]
/// means the pointer was outside the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    PointerDown {
        button: PointerButton,
        cell: Option<Cell>,
    },
    PointerMove {
        cell: Option<Cell>,
    },
    PointerUp,
    Reset,
}

/// Current interaction mode. The last painted cell only exists while drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Idle,
    Drawing {
        last: Option<Cell>,
    },
    SettingTarget,
}

/// Startup configuration of a [Session].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    pub start: Cell,
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            rows: 20,
            cols: 20,
            start: Cell::new(0, 0),
        }
    }
}

/// Borrowed view of everything a renderer needs to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub grid: &'a PathingGrid,
    pub path: &'a [Cell],
    pub start: Cell,
    pub target: Option<Cell>,
}

/// Receives a [Snapshot] whenever the session state changed.
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot<'_>);
}

/// Owns the grid, the start and target cells, the last computed path and the interaction mode.
#[derive(Clone, Debug)]
pub struct Session {
    grid: PathingGrid,
    start: Cell,
    target: Option<Cell>,
    path: Vec<Cell>,
    mode: Mode,
}

impl Session {
    /// Creates a session on an empty grid. Fails on zero dimensions or a start outside the grid.
    pub fn new(config: SessionConfig) -> Result<Session, GridError> {
        let grid = PathingGrid::new(config.rows, config.cols)?;
        if !grid.in_bounds(config.start) {
            return Err(GridError::StartOutOfBounds {
                start: config.start,
                rows: config.rows,
                cols: config.cols,
            });
        }
        Ok(Session {
            grid,
            start: config.start,
            target: None,
            path: Vec::new(),
            mode: Mode::Idle,
        })
    }

    pub fn grid(&self) -> &PathingGrid {
        &self.grid
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            path: &self.path,
            start: self.start,
            target: self.target,
        }
    }

    /// Applies `event` and publishes a snapshot to `renderer` if anything visible changed.
    /// Returns whether a snapshot was published.
    pub fn handle<R: Renderer + ?Sized>(&mut self, event: InputEvent, renderer: &mut R) -> bool {
        let changed = self.apply(event);
        if changed {
            renderer.render(&self.snapshot());
        }
        changed
    }

    /// Applies `event` without rendering. Returns whether the grid, target or path changed.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        debug!("{:?} in mode {:?}", event, self.mode);
        match event {
            InputEvent::PointerDown { button, cell } => self.pointer_down(button, cell),
            InputEvent::PointerMove { cell } => self.pointer_move(cell),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Drops every obstacle, the target and the path. The interaction mode is left as it is.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.target = None;
        self.path.clear();
    }

    fn usable(&self, cell: Option<Cell>) -> Option<Cell> {
        cell.filter(|c| self.grid.in_bounds(*c))
    }

    fn pointer_down(&mut self, button: PointerButton, cell: Option<Cell>) -> bool {
        let cell = self.usable(cell);
        match button {
            PointerButton::Primary => {
                self.mode = Mode::Drawing { last: cell };
                match cell {
                    Some(c) => {
                        self.paint(c);
                        true
                    }
                    None => false,
                }
            }
            PointerButton::Secondary => {
                self.mode = Mode::SettingTarget;
                if cell.is_some() {
                    self.target = cell;
                }
                cell.is_some()
            }
        }
    }

    fn pointer_move(&mut self, cell: Option<Cell>) -> bool {
        let Some(cell) = self.usable(cell) else {
            return false;
        };
        match self.mode {
            Mode::Idle => false,
            Mode::Drawing { last } => {
                match last {
                    Some(last) => {
                        for c in interpolate(last, cell) {
                            self.paint(c);
                        }
                    }
                    None => self.paint(cell),
                }
                self.mode = Mode::Drawing { last: Some(cell) };
                true
            }
            Mode::SettingTarget => {
                self.target = Some(cell);
                true
            }
        }
    }

    /// Returns to idle and recomputes the path if the target is set and free. A target on an
    /// obstacle keeps the previous path.
    fn pointer_up(&mut self) -> bool {
        self.mode = Mode::Idle;
        match self.target {
            Some(target) if self.grid.is_walkable(target) => {
                self.grid.update();
                self.path = find_path(&self.grid, self.start, target);
                true
            }
            Some(target) => {
                debug!("Target {} is blocked, keeping the previous path", target);
                false
            }
            None => false,
        }
    }

    /// Marks a cell as an obstacle. Cells outside the grid and the start cell are left alone.
    fn paint(&mut self, cell: Cell) {
        if cell != self.start {
            self.grid.set(cell, CellState::Obstacle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(SessionConfig::default()).unwrap()
    }

    fn down(button: PointerButton, row: i32, col: i32) -> InputEvent {
        InputEvent::PointerDown {
            button,
            cell: Some(Cell::new(row, col)),
        }
    }

    fn move_to(row: i32, col: i32) -> InputEvent {
        InputEvent::PointerMove {
            cell: Some(Cell::new(row, col)),
        }
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let config = SessionConfig {
            rows: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(
            Session::new(config),
            Err(GridError::InvalidDimensions { .. })
        ));
        let config = SessionConfig {
            start: Cell::new(20, 0),
            ..SessionConfig::default()
        };
        assert!(matches!(
            Session::new(config),
            Err(GridError::StartOutOfBounds { .. })
        ));
    }

    #[test]
    fn primary_press_paints_and_draws() {
        let mut s = session();
        assert!(s.apply(down(PointerButton::Primary, 3, 4)));
        assert_eq!(s.grid().get(Cell::new(3, 4)), CellState::Obstacle);
        assert_eq!(
            s.mode(),
            Mode::Drawing {
                last: Some(Cell::new(3, 4))
            }
        );
    }

    #[test]
    fn drag_fills_skipped_cells() {
        let mut s = session();
        s.apply(down(PointerButton::Primary, 2, 2));
        s.apply(move_to(2, 8));
        for col in 2..=8 {
            assert_eq!(s.grid().get(Cell::new(2, col)), CellState::Obstacle);
        }
        assert_eq!(s.grid().obstacle_count(), 7);
        s.apply(InputEvent::PointerUp);
        assert_eq!(s.mode(), Mode::Idle);
    }

    #[test]
    fn idle_moves_do_nothing() {
        let mut s = session();
        assert!(!s.apply(move_to(5, 5)));
        assert_eq!(s.grid().obstacle_count(), 0);
        assert_eq!(s.target(), None);
    }

    #[test]
    fn secondary_drag_moves_target() {
        let mut s = session();
        s.apply(down(PointerButton::Secondary, 1, 1));
        assert_eq!(s.target(), Some(Cell::new(1, 1)));
        assert_eq!(s.mode(), Mode::SettingTarget);
        s.apply(move_to(4, 6));
        assert_eq!(s.target(), Some(Cell::new(4, 6)));
        assert_eq!(s.grid().obstacle_count(), 0);
        assert!(s.path().is_empty());
        assert!(s.apply(InputEvent::PointerUp));
        assert_eq!(s.path().len(), 11);
        assert_eq!(s.path().first(), Some(&s.start()));
        assert_eq!(s.path().last(), Some(&Cell::new(4, 6)));
    }

    #[test]
    fn out_of_canvas_input_is_ignored() {
        let mut s = session();
        assert!(!s.apply(InputEvent::PointerDown {
            button: PointerButton::Primary,
            cell: None,
        }));
        assert_eq!(s.mode(), Mode::Drawing { last: None });
        assert!(!s.apply(move_to(-1, 3)));
        assert!(!s.apply(InputEvent::PointerMove { cell: None }));
        assert_eq!(s.grid().obstacle_count(), 0);
        // The first in-bounds sample starts the stroke
        assert!(s.apply(move_to(6, 6)));
        assert_eq!(s.grid().obstacle_count(), 1);
        assert!(!s.apply(move_to(6, 20)));
        assert_eq!(
            s.mode(),
            Mode::Drawing {
                last: Some(Cell::new(6, 6))
            }
        );
    }

    #[test]
    fn start_is_never_painted() {
        let mut s = session();
        s.apply(down(PointerButton::Primary, 0, 0));
        s.apply(move_to(0, 3));
        assert!(s.grid().is_walkable(s.start()));
        assert_eq!(s.grid().obstacle_count(), 3);
    }

    #[test]
    fn reset_keeps_mode() {
        let mut s = session();
        s.apply(down(PointerButton::Secondary, 9, 9));
        s.apply(InputEvent::PointerUp);
        s.apply(down(PointerButton::Primary, 5, 5));
        assert!(!s.path().is_empty());
        assert!(s.apply(InputEvent::Reset));
        assert_eq!(s.grid().obstacle_count(), 0);
        assert_eq!(s.target(), None);
        assert!(s.path().is_empty());
        assert!(matches!(s.mode(), Mode::Drawing { .. }));
    }
}
