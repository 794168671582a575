//! Domain types for tictactoe.
//!
//! Board, marks, outcomes and scores, plus the configuration structs the
//! CLI builds. No logic beyond small accessors lives here.

use serde::Serialize;

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Width (and height) of the square grid.
pub const GRID_SIZE: usize = 3;

/// One of the two players. Human always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    Human,
    Computer,
}

impl Side {
    /// The side that moves after this one.
    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }

    /// Display symbol: Human plays X, Computer plays O.
    pub fn symbol(self) -> &'static str {
        match self {
            Side::Human => "X",
            Side::Computer => "O",
        }
    }
}

/// Content of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    #[default]
    Empty,
    Human,
    Computer,
}

impl Mark {
    /// The side owning this mark, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Mark::Empty => None,
            Mark::Human => Some(Side::Human),
            Mark::Computer => Some(Side::Computer),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Mark::Empty
    }
}

impl From<Side> for Mark {
    fn from(side: Side) -> Self {
        match side {
            Side::Human => Mark::Human,
            Side::Computer => Mark::Computer,
        }
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Nine cells in row-major order: 0,1,2 top; 3,4,5 middle; 6,7,8 bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Board([Mark; CELL_COUNT]);

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from explicit cell contents.
    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Board(cells)
    }

    /// All cells in index order.
    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.0
    }

    /// Mark at `index`, or None when the index is off the board.
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.0.get(index).copied()
    }

    /// True if `index` is on the board and its cell is empty.
    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    /// Return a copy with `mark` placed at `index`.
    ///
    /// Callers check [`Board::is_empty_at`] first; placing over an
    /// occupied cell is a logic error.
    pub fn with_mark(mut self, index: usize, mark: Mark) -> Self {
        debug_assert!(self.is_empty_at(index), "cell {index} is not empty");
        self.0[index] = mark;
        self
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.0.iter().filter(|&&m| m == mark).count()
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.0.iter().all(|m| !m.is_empty())
    }
}

// ============================================================================
// OUTCOME & SCORE
// ============================================================================

/// State of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    InProgress,
    HumanWin,
    ComputerWin,
    Draw,
}

impl Outcome {
    /// True for HumanWin, ComputerWin and Draw.
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    /// The winning side, if the game ended with a win.
    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::HumanWin => Some(Side::Human),
            Outcome::ComputerWin => Some(Side::Computer),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }

    /// The win outcome for `side`.
    pub fn win_for(side: Side) -> Outcome {
        match side {
            Side::Human => Outcome::HumanWin,
            Side::Computer => Outcome::ComputerWin,
        }
    }
}

/// Running win tally. Draws count for neither side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub human: u32,
    pub computer: u32,
}

impl Score {
    /// Wins recorded for `side`.
    pub fn wins(&self, side: Side) -> u32 {
        match side {
            Side::Human => self.human,
            Side::Computer => self.computer,
        }
    }

    /// Return a copy with one more win for `side`.
    pub fn credit(self, side: Side) -> Score {
        match side {
            Side::Human => Score {
                human: self.human + 1,
                ..self
            },
            Side::Computer => Score {
                computer: self.computer + 1,
                ..self
            },
        }
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// How a full board with no three-in-a-row is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPolicy {
    /// A genuine draw: neither side scores.
    #[default]
    Draw,
    /// Credit the computer with a win, as the browser version of the game did.
    CreditComputer,
}

/// Light or dark presentation. Independent of game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// Configuration for an interactive game.
#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    /// Initial theme.
    pub theme: ThemeMode,
    /// Seed for the computer's choices. None = fresh random seed.
    pub seed: Option<u64>,
    pub draw_policy: DrawPolicy,
}

/// Configuration for headless batch play.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of games to play.
    pub games: usize,
    /// Base seed; game `i` uses `seed + i`.
    pub seed: u64,
    pub draw_policy: DrawPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            games: 1000,
            seed: 0,
            draw_policy: DrawPolicy::Draw,
        }
    }
}

/// Aggregated results of a simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Games played.
    pub games: usize,
    /// Base seed used.
    pub seed: u64,
    pub draw_policy: DrawPolicy,
    /// Wins per side.
    pub score: Score,
    /// Games that ended with a full board and no line (zero under
    /// `DrawPolicy::CreditComputer`).
    pub draws: u32,
    /// Human wins in games where the human opened in the center.
    pub center_opening_wins: u32,
    /// Games where the human opened in the center.
    pub center_openings: u32,
}

// ============================================================================
// TESTS
// ============================================================================
