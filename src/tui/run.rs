//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! A reader thread forwards crossterm events into an mpsc channel; the
//! event loop owns the App and the RNG and consumes from that channel.

use std::io;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::types::GameConfig;

use super::state::{Action, App, AppEvent, Transition};
use super::update::update;
use super::view::{board_area, cell_at, render};

// ============================================================================
// INPUT MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for releases, repeats and keys that don't map to anything.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::MoveRight),

        // Placement
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Place),
        KeyCode::Char(c @ '1'..='9') => Some(Action::PlaceAt((c as u8 - b'1') as usize)),

        // Session & preferences
        KeyCode::Char('r') | KeyCode::Char('n') => Some(Action::Reset),
        KeyCode::Char('t') => Some(Action::ToggleTheme),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),

        _ => None,
    }
}

/// Map a mouse event to a placement, given the current board rectangle.
///
/// Only left-button presses on a cell count.
pub fn map_mouse(mouse: MouseEvent, board: Rect) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            cell_at(board, mouse.column, mouse.row).map(Action::PlaceAt)
        }
        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREAD
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_event_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let app_event = match event::read() {
                Ok(Event::Key(key)) => AppEvent::Key(key),
                Ok(Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
                Ok(Event::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue, // focus, paste
                Err(_) => break,
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the interactive game until the user quits.
pub fn run(config: GameConfig) -> io::Result<()> {
    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, draw_policy = ?config.draw_policy, "starting game");
    let mut rng = StdRng::seed_from_u64(seed);

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::new(&config);

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_event_reader(tx);

    let mut frame_area = Rect::default();

    loop {
        terminal.draw(|frame| {
            frame_area = frame.area();
            render(&app, frame);
        })?;

        if app.should_quit {
            break;
        }

        // Block on next event from the reader thread
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // reader thread exited
        };

        let action = match event {
            AppEvent::Key(key) => map_key(key),
            AppEvent::Mouse(mouse) => map_mouse(mouse, board_area(frame_area)),
            AppEvent::Resize => None,
        };

        if let Some(action) = action {
            debug!(?action, "dispatch");
            match update(app.clone(), &action, &mut rng) {
                Transition::App(next) => app = next,
                Transition::Quit => app.should_quit = true,
            }
        }
    }

    restore_terminal()?;
    let score = app.session.score();
    info!(human = score.human, computer = score.computer, "game closed");
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
