//! Headless batch play: random human against the random computer.
//!
//! Each game gets its own RNG seeded from the base seed plus the game
//! index, so a run is reproducible no matter how rayon schedules it.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::rules::select_computer_move;
use crate::session::Session;
use crate::types::{DrawPolicy, Outcome, SimulationConfig, SimulationReport};

/// Center cell index.
const CENTER: usize = 4;

/// Result of one simulated game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub outcome: Outcome,
    /// The human's first move was the center cell.
    pub opened_center: bool,
}

/// Play one complete game with a uniformly random human.
pub fn play_game(seed: u64, draw_policy: DrawPolicy) -> GameRecord {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = Session::new(draw_policy);
    let mut opening = None;

    while !session.is_over() {
        let click = select_computer_move(session.board(), &mut rng);
        opening.get_or_insert(click);
        session = session.apply_human_move(click, &mut rng);
    }

    debug!(seed, outcome = ?session.outcome(), "simulated game finished");
    GameRecord {
        outcome: session.outcome(),
        opened_center: opening == Some(CENTER),
    }
}

/// Run a simulation without progress reporting.
pub fn simulate(config: &SimulationConfig) -> SimulationReport {
    simulate_with_progress(config, || {})
}

/// Run a simulation, calling `on_game` after every finished game.
///
/// `on_game` is called from rayon worker threads.
pub fn simulate_with_progress<F>(config: &SimulationConfig, on_game: F) -> SimulationReport
where
    F: Fn() + Sync + Send,
{
    info!(games = config.games, seed = config.seed, "starting simulation");

    let records: Vec<GameRecord> = (0..config.games)
        .into_par_iter()
        .map(|i| {
            let record = play_game(config.seed.wrapping_add(i as u64), config.draw_policy);
            on_game();
            record
        })
        .collect();

    let report = tally(config, &records);
    info!(
        human = report.score.human,
        computer = report.score.computer,
        draws = report.draws,
        "simulation complete"
    );
    report
}

/// Fold game records into a report.
pub fn tally(config: &SimulationConfig, records: &[GameRecord]) -> SimulationReport {
    let mut report = SimulationReport {
        games: records.len(),
        seed: config.seed,
        draw_policy: config.draw_policy,
        ..Default::default()
    };

    for record in records {
        match record.outcome.winner() {
            Some(side) => report.score = report.score.credit(side),
            None if record.outcome == Outcome::Draw => report.draws += 1,
            None => {}
        }
        if record.opened_center {
            report.center_openings += 1;
            if record.outcome == Outcome::HumanWin {
                report.center_opening_wins += 1;
            }
        }
    }

    report
}

// ============================================================================
// TESTS
// ============================================================================
