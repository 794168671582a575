//! Pure state transitions: (App, Action) → Transition.
//!
//! Fully testable without a terminal. The random source for the
//! computer's reply is passed in, never reached for.

use rand::Rng;

use crate::types::{CELL_COUNT, GRID_SIZE};

use super::state::{Action, App, Transition};

/// Pure state transition function.
pub fn update<R: Rng + ?Sized>(app: App, action: &Action, rng: &mut R) -> Transition {
    match action {
        Action::MoveUp => Transition::App(move_cursor(app, -1, 0)),
        Action::MoveDown => Transition::App(move_cursor(app, 1, 0)),
        Action::MoveLeft => Transition::App(move_cursor(app, 0, -1)),
        Action::MoveRight => Transition::App(move_cursor(app, 0, 1)),
        Action::Place => {
            let cell = app.cursor;
            Transition::App(place(app, cell, rng))
        }
        Action::PlaceAt(cell) if *cell < CELL_COUNT => {
            let app = App {
                cursor: *cell,
                ..app
            };
            Transition::App(place(app, *cell, rng))
        }
        // Off-board index: ignore
        Action::PlaceAt(_) => Transition::App(app),
        Action::Reset => Transition::App(App {
            session: app.session.reset(),
            ..app
        }),
        Action::ToggleTheme => Transition::App(App {
            theme: app.theme.toggled(),
            ..app
        }),
        Action::Quit => Transition::Quit,
    }
}

/// Hand the click to the session. Occupied cells and finished games
/// come back unchanged.
fn place<R: Rng + ?Sized>(app: App, cell: usize, rng: &mut R) -> App {
    App {
        session: app.session.apply_human_move(cell, rng),
        ..app
    }
}

/// Move the cursor by whole rows/columns, clamped to the grid.
fn move_cursor(app: App, d_row: isize, d_col: isize) -> App {
    let last = GRID_SIZE as isize - 1;
    let row = (app.cursor / GRID_SIZE) as isize;
    let col = (app.cursor % GRID_SIZE) as isize;
    let row = (row + d_row).clamp(0, last) as usize;
    let col = (col + d_col).clamp(0, last) as usize;
    App {
        cursor: row * GRID_SIZE + col,
        ..app
    }
}

// ============================================================================
// TESTS
// ============================================================================
