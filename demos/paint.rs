// Interactive terminal front end for the path painter.
// Controls: left drag paints walls, right drag moves the target, C clears, Q or Esc quits.
// Tiles: '██' wall, '()' path, 'SS' start, 'TT' target, ' ·' floor.

use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    MouseButton, MouseEventKind,
};
use grid_path_painter::{
    Cell, CellState, InputEvent, PointerButton, Renderer, Session, SessionConfig, Snapshot,
};
use log::LevelFilter;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Terminal,
};
use std::collections::HashSet;
use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;

/// Terminal columns used to draw one grid cell, so cells come out roughly square.
const CELL_WIDTH: u16 = 2;

#[derive(Parser, Debug)]
#[command(name = "paint")]
#[command(about = "Paint walls and a target, watch the shortest path follow")]
struct Args {
    /// Number of grid rows
    #[arg(long, default_value_t = 20)]
    rows: usize,

    /// Number of grid columns
    #[arg(long, default_value_t = 20)]
    cols: usize,

    /// Row of the fixed start cell
    #[arg(long, default_value_t = 0)]
    start_row: i32,

    /// Column of the fixed start cell
    #[arg(long, default_value_t = 0)]
    start_col: i32,

    /// Write log output to this file (RUST_LOG filters it)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

struct TerminalRenderer {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    grid_area: Rect,
    error: Option<io::Error>,
}

impl TerminalRenderer {
    fn new() -> io::Result<TerminalRenderer> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            io::stdout(),
            crossterm::terminal::EnterAlternateScreen,
            EnableMouseCapture
        )?;
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(TerminalRenderer {
            terminal,
            grid_area: Rect::default(),
            error: None,
        })
    }

    /// Maps a terminal position to a grid cell. Positions outside the drawn canvas give [None].
    fn cell_at(&self, column: u16, row: u16) -> Option<Cell> {
        let area = self.grid_area;
        if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
            return None;
        }
        Some(Cell::new(
            (row - area.y) as i32,
            ((column - area.x) / CELL_WIDTH) as i32,
        ))
    }

    fn draw(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        let mut grid_area = self.grid_area;
        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(LayoutDirection::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(3)])
                .split(f.area());

            let block = Block::default()
                .borders(Borders::ALL)
                .title("Dijkstra path painter");
            grid_area = block.inner(chunks[0]);
            f.render_widget(Paragraph::new(grid_lines(snapshot)).block(block), chunks[0]);

            let status = match (snapshot.target, snapshot.path.is_empty()) {
                (None, _) => "no target".to_string(),
                (Some(t), true) => format!("target {t}: no path"),
                (Some(t), false) => format!("target {t}: {} steps", snapshot.path.len() - 1),
            };
            let help = Paragraph::new(format!(
                "Left drag: walls | Right drag: target | C: clear | Q: quit | {status}"
            ))
            .block(Block::default().borders(Borders::ALL).title("Controls"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
            f.render_widget(help, chunks[1]);
        })?;
        self.grid_area = grid_area;
        Ok(())
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) {
        if let Err(e) = self.draw(snapshot) {
            self.error = Some(e);
        }
    }
}

fn grid_lines(snapshot: &Snapshot<'_>) -> Vec<Line<'static>> {
    let on_path: HashSet<Cell> = snapshot.path.iter().copied().collect();
    let grid = snapshot.grid;
    (0..grid.rows() as i32)
        .map(|row| {
            let spans: Vec<Span> = (0..grid.cols() as i32)
                .map(|col| {
                    let cell = Cell::new(row, col);
                    let (text, color) = if cell == snapshot.start {
                        ("SS", Color::Green)
                    } else if Some(cell) == snapshot.target {
                        ("TT", Color::Blue)
                    } else if grid.get(cell) == CellState::Obstacle {
                        ("██", Color::White)
                    } else if on_path.contains(&cell) {
                        ("()", Color::Red)
                    } else {
                        (" ·", Color::DarkGray)
                    };
                    Span::styled(text, Style::default().fg(color))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn cleanup_terminal() -> io::Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    Ok(())
}

fn run(session: &mut Session, renderer: &mut TerminalRenderer) -> Result<(), Box<dyn Error>> {
    renderer.render(&session.snapshot());
    loop {
        if let Some(e) = renderer.error.take() {
            return Err(e.into());
        }
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    session.handle(InputEvent::Reset, renderer);
                }
                _ => {}
            },
            Event::Mouse(mouse) => {
                let cell = renderer.cell_at(mouse.column, mouse.row);
                let input = match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown {
                        button: PointerButton::Primary,
                        cell,
                    }),
                    MouseEventKind::Down(MouseButton::Right) => Some(InputEvent::PointerDown {
                        button: PointerButton::Secondary,
                        cell,
                    }),
                    MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                        Some(InputEvent::PointerMove { cell })
                    }
                    MouseEventKind::Up(_) => Some(InputEvent::PointerUp),
                    _ => None,
                };
                if let Some(input) = input {
                    session.handle(input, renderer);
                }
            }
            Event::Resize(_, _) => renderer.render(&session.snapshot()),
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Info)
            .parse_default_env()
            .target(env_logger::Target::Pipe(Box::new(File::create(path)?)))
            .init();
    }

    let mut session = Session::new(SessionConfig {
        rows: args.rows,
        cols: args.cols,
        start: Cell::new(args.start_row, args.start_col),
    })?;

    let mut renderer = TerminalRenderer::new()?;
    let result = run(&mut session, &mut renderer);
    cleanup_terminal()?;
    result
}
