//! tictactoe: play tic-tac-toe against a random computer opponent.

pub mod logging;
pub mod report;
pub mod rules;
pub mod session;
pub mod simulate;
pub mod tui;
pub mod types;
