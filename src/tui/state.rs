//! TUI state algebra: pure types, zero effects.
//!
//! The game itself lives in [`Session`]; everything here is presentation
//! state wrapped around it. The theme and the cursor never influence the
//! rules engine.

use crossterm::event::{KeyEvent, MouseEvent};

use crate::session::Session;
use crate::types::{GameConfig, ThemeMode};

/// Cell the cursor starts on.
pub const START_CURSOR: usize = 4;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// A mouse event; only left clicks are acted upon.
    Mouse(MouseEvent),
    /// Terminal was resized; triggers a redraw.
    Resize,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug, Clone, PartialEq)]
pub struct App {
    /// Rules engine state, including the running score.
    pub session: Session,

    /// Light/dark preference. Unrelated to the game.
    pub theme: ThemeMode,

    /// Focused cell index (0–8).
    pub cursor: usize,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

impl App {
    /// Fresh app for a new process run.
    pub fn new(config: &GameConfig) -> Self {
        App {
            session: Session::new(config.draw_policy),
            theme: config.theme,
            cursor: START_CURSOR,
            should_quit: false,
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key and mouse events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Place the human's mark on the focused cell.
    Place,
    /// Place the human's mark on a specific cell (digit key or click).
    PlaceAt(usize),
    /// Start a new game, keeping the score.
    Reset,
    /// Switch between light and dark.
    ToggleTheme,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this model next.
    App(App),
    /// Quit the application.
    Quit,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DrawPolicy, Outcome, Score};

    #[test]
    fn new_app_starts_on_center_with_fresh_session() {
        let app = App::new(&GameConfig::default());
        assert_eq!(app.cursor, 4);
        assert_eq!(app.theme, ThemeMode::Light);
        assert_eq!(app.session.outcome(), Outcome::InProgress);
        assert_eq!(app.session.score(), Score::default());
        assert!(!app.should_quit);
    }

    #[test]
    fn new_app_honors_config() {
        let config = GameConfig {
            theme: ThemeMode::Dark,
            seed: Some(5),
            draw_policy: DrawPolicy::CreditComputer,
        };
        let app = App::new(&config);
        assert_eq!(app.theme, ThemeMode::Dark);
        assert_eq!(app.session.draw_policy(), DrawPolicy::CreditComputer);
    }

    #[test]
    fn transition_variants_are_distinguishable() {
        let app = App::new(&GameConfig::default());
        assert_ne!(Transition::App(app), Transition::Quit);
    }
}
