//! Pure rendering: map App state to ratatui widget trees.
//!
//! Widget-building functions are pure (state in, widgets out); the only
//! effect is Frame::render_widget() which writes to the terminal buffer.
//! The same layout math backs mouse hit-testing in [`cell_at`].

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::rules::winning_line;
use crate::session::Session;
use crate::types::{Mark, Outcome, Side, CELL_COUNT, GRID_SIZE};

use super::state::App;
use super::theme::{self, Palette};

/// Width of one cell, borders included.
pub const CELL_WIDTH: u16 = 7;
/// Height of one cell, borders included.
pub const CELL_HEIGHT: u16 = 3;

const BOARD_WIDTH: u16 = CELL_WIDTH * GRID_SIZE as u16;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * GRID_SIZE as u16;

// ============================================================================
// LAYOUT
// ============================================================================

/// Title, board region, status, help.
fn screen_layout(area: Rect) -> [Rect; 4] {
    Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // board
        Constraint::Length(1), // status
        Constraint::Length(1), // help
    ])
    .areas(area)
}

/// Where the 3×3 grid sits for a given frame area, centered in the
/// board region and clipped to it.
pub fn board_area(area: Rect) -> Rect {
    let [_, region, _, _] = screen_layout(area);
    let width = BOARD_WIDTH.min(region.width);
    let height = BOARD_HEIGHT.min(region.height);
    Rect::new(
        region.x + (region.width - width) / 2,
        region.y + (region.height - height) / 2,
        width,
        height,
    )
}

/// Screen rectangle of cell `index` within `board`.
pub fn cell_rect(board: Rect, index: usize) -> Rect {
    let row = (index / GRID_SIZE) as u16;
    let col = (index % GRID_SIZE) as u16;
    Rect::new(
        board.x + col * CELL_WIDTH,
        board.y + row * CELL_HEIGHT,
        CELL_WIDTH,
        CELL_HEIGHT,
    )
    .intersection(board)
}

/// Cell index under a screen position, if any.
pub fn cell_at(board: Rect, column: u16, row: u16) -> Option<usize> {
    if column < board.x || row < board.y {
        return None;
    }
    let dx = column - board.x;
    let dy = row - board.y;
    if dx >= board.width || dy >= board.height {
        return None;
    }
    let col = (dx / CELL_WIDTH) as usize;
    let row = (dy / CELL_HEIGHT) as usize;
    (col < GRID_SIZE && row < GRID_SIZE).then_some(row * GRID_SIZE + col)
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole screen.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let palette = theme::palette(app.theme);

    frame.render_widget(Block::new().style(palette.base), area);

    let [title_area, _, status_area, help_area] = screen_layout(area);

    frame.render_widget(render_title(app, &palette), title_area);
    render_board(app, &palette, frame, board_area(area));
    frame.render_widget(render_status(&app.session, &palette), status_area);
    frame.render_widget(render_help(&app.session, &palette), help_area);
}

// ============================================================================
// TITLE & FOOTER
// ============================================================================

/// Title bar: name, running score, theme indicator.
fn render_title(app: &App, palette: &Palette) -> Paragraph<'static> {
    let score = app.session.score();
    Paragraph::new(Line::from(vec![
        Span::styled(" tic-tac-toe", palette.title),
        Span::raw("   "),
        Span::styled(format!("X: {}", score.human), palette.human),
        Span::raw("  "),
        Span::styled(format!("O: {}", score.computer), palette.computer),
        Span::raw("   "),
        Span::styled(theme::indicator(app.theme), palette.toggle),
    ]))
}

/// Status banner under the board.
fn render_status(session: &Session, palette: &Palette) -> Paragraph<'static> {
    let span = match session.outcome() {
        Outcome::InProgress => Span::styled("Your move (X)", palette.base),
        Outcome::HumanWin => Span::styled("You win!", palette.human),
        Outcome::ComputerWin => Span::styled("Computer wins!", palette.computer),
        Outcome::Draw => Span::styled("Draw", palette.dim),
    };
    Paragraph::new(Line::from(span)).alignment(Alignment::Center)
}

/// Help line showing keybindings for the current state.
fn render_help(session: &Session, palette: &Palette) -> Paragraph<'static> {
    let help_text = if session.is_over() {
        " [r] new game  [t] theme  [q] quit"
    } else {
        " [arrows] move  [Enter] place  [1-9] cell  [t] theme  [r] reset  [q] quit"
    };
    Paragraph::new(Span::styled(help_text, palette.help))
}

// ============================================================================
// BOARD
// ============================================================================

fn render_board(app: &App, palette: &Palette, frame: &mut Frame, board: Rect) {
    let line = if app.session.is_over() {
        winning_line(app.session.board())
    } else {
        None
    };

    for index in 0..CELL_COUNT {
        let area = cell_rect(board, index);
        if area.is_empty() {
            continue;
        }
        let mark = app.session.board().cells()[index];
        let highlight = CellHighlight {
            on_line: line.is_some_and(|l| l.contains(&index)),
            focused: index == app.cursor && !app.session.is_over(),
            last_move: app.session.last_computer_move() == Some(index),
        };
        frame.render_widget(render_cell(mark, highlight, palette), area);
    }
}

/// Per-cell emphasis derived from the session and cursor.
#[derive(Debug, Clone, Copy, Default)]
struct CellHighlight {
    on_line: bool,
    focused: bool,
    last_move: bool,
}

fn render_cell(mark: Mark, highlight: CellHighlight, palette: &Palette) -> Paragraph<'static> {
    let border = if highlight.focused {
        palette.cursor
    } else {
        palette.border
    };
    let (symbol, style) = match mark.side() {
        Some(Side::Human) => (Side::Human.symbol(), palette.human),
        Some(Side::Computer) => (Side::Computer.symbol(), palette.computer),
        None => (" ", palette.base),
    };
    let style = if highlight.on_line {
        style.patch(palette.winning)
    } else if highlight.last_move {
        style.patch(palette.last_move)
    } else {
        style
    };

    Paragraph::new(Span::styled(symbol, style))
        .alignment(Alignment::Center)
        .block(Block::bordered().border_style(border))
}

// ============================================================================
// TESTS
// ============================================================================
