use grid_path_painter::{Cell, InputEvent, PointerButton, Session, SessionConfig};

// In this example a path is found on a 5x5 grid with shape
//  _____
// |S    |
// |###  |
// |  #  |
// |  # E|
// |     |
//  _____
// where
// - # marks an obstacle painted with one stroke per wall segment
// - S marks the start
// - E marks the target
//
// Nodes have a 4-neighborhood

fn stroke(session: &mut Session, from: Cell, to: Cell) {
    session.apply(InputEvent::PointerDown {
        button: PointerButton::Primary,
        cell: Some(from),
    });
    session.apply(InputEvent::PointerMove { cell: Some(to) });
    session.apply(InputEvent::PointerUp);
}

fn main() -> Result<(), grid_path_painter::GridError> {
    let mut session = Session::new(SessionConfig {
        rows: 5,
        cols: 5,
        start: Cell::new(0, 0),
    })?;
    stroke(&mut session, Cell::new(1, 0), Cell::new(1, 2));
    stroke(&mut session, Cell::new(2, 2), Cell::new(3, 2));
    session.apply(InputEvent::PointerDown {
        button: PointerButton::Secondary,
        cell: Some(Cell::new(3, 4)),
    });
    session.apply(InputEvent::PointerUp);
    println!("{}", session.grid());
    println!("Path:");
    for c in session.path() {
        println!("{}", c);
    }
    Ok(())
}
