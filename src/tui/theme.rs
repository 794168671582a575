//! TUI color semantics for the light and dark themes.
//!
//! Pure data, consumed by the rendering layer.
//!
//! Color semantics (both themes):
//! - Blue: the human's X marks and "You win!"
//! - Green: the computer's O marks and "Computer wins!"
//! - Cursor border: the focused cell
//! - Reversed: cells on the winning line
//! - Underlined: the computer's latest reply

use ratatui::style::{Color, Modifier, Style};

use crate::types::ThemeMode;

/// Every style the view needs, resolved for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Screen background and default text.
    pub base: Style,
    /// Title bar.
    pub title: Style,
    /// Cell borders.
    pub border: Style,
    /// Border of the focused cell.
    pub cursor: Style,
    /// Human's X marks.
    pub human: Style,
    /// Computer's O marks.
    pub computer: Style,
    /// Patched onto cells of the winning line.
    pub winning: Style,
    /// Patched onto the computer's most recent mark.
    pub last_move: Style,
    /// Draw banner and other de-emphasized text.
    pub dim: Style,
    /// Footer / help line.
    pub help: Style,
    /// Theme indicator in the title bar.
    pub toggle: Style,
}

/// Light theme: white page, gray cells.
pub const LIGHT: Palette = Palette {
    base: Style::new().fg(Color::Black).bg(Color::White),
    title: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
    border: Style::new().fg(Color::Gray),
    cursor: Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    human: Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
    computer: Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
    winning: Style::new().add_modifier(Modifier::REVERSED),
    last_move: Style::new().add_modifier(Modifier::UNDERLINED),
    dim: Style::new().fg(Color::DarkGray),
    help: Style::new().fg(Color::DarkGray),
    toggle: Style::new().fg(Color::Magenta),
};

/// Dark theme: near-black page, dark gray cells.
pub const DARK: Palette = Palette {
    base: Style::new().fg(Color::White).bg(Color::Rgb(17, 24, 39)),
    title: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
    border: Style::new().fg(Color::DarkGray),
    cursor: Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    human: Style::new().fg(Color::LightBlue).add_modifier(Modifier::BOLD),
    computer: Style::new().fg(Color::LightGreen).add_modifier(Modifier::BOLD),
    winning: Style::new().add_modifier(Modifier::REVERSED),
    last_move: Style::new().add_modifier(Modifier::UNDERLINED),
    dim: Style::new().fg(Color::Gray),
    help: Style::new().fg(Color::Gray),
    toggle: Style::new().fg(Color::Yellow),
};

/// Resolve the palette for a theme.
pub fn palette(mode: ThemeMode) -> Palette {
    match mode {
        ThemeMode::Light => LIGHT,
        ThemeMode::Dark => DARK,
    }
}

/// Title-bar indicator for the current theme.
pub fn indicator(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "☀ light",
        ThemeMode::Dark => "☾ dark",
    }
}

// ============================================================================
// TESTS
// ============================================================================
