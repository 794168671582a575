//! Game session state machine.
//!
//! A [`Session`] is an owned value. Every action consumes it and returns
//! the next session; invalid input hands back the session untouched.
//!
//! ```text
//! InProgress ──human/computer line──▶ HumanWin | ComputerWin
//!     │
//!     └────────full board──────────▶ Draw (or ComputerWin, see DrawPolicy)
//!
//! any state ──reset──▶ InProgress (score kept)
//! ```

use rand::Rng;
use tracing::{debug, info, trace};

use crate::rules::{check_outcome, select_computer_move};
use crate::types::{Board, DrawPolicy, Mark, Outcome, Score, Side};

/// Board, turn, outcome and score for one game plus the running tally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    board: Board,
    turn: Side,
    outcome: Outcome,
    score: Score,
    draw_policy: DrawPolicy,
    last_computer_move: Option<usize>,
}

impl Session {
    /// Fresh session: empty board, human to move, zero score.
    pub fn new(draw_policy: DrawPolicy) -> Self {
        Session {
            draw_policy,
            ..Session::default()
        }
    }

    /// Fresh game that carries an existing score forward.
    pub fn with_score(score: Score, draw_policy: DrawPolicy) -> Self {
        Session {
            score,
            ..Session::new(draw_policy)
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn draw_policy(&self) -> DrawPolicy {
        self.draw_policy
    }

    /// True once the game reached a terminal outcome.
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Cell the computer filled on the most recent move, if it replied.
    pub fn last_computer_move(&self) -> Option<usize> {
        self.last_computer_move
    }

    /// Place the human's mark at `index` and let the computer reply at random.
    ///
    /// Clicking an occupied cell, an index off the board, or any cell after
    /// the game is over returns the session unchanged.
    pub fn apply_human_move<R: Rng + ?Sized>(self, index: usize, rng: &mut R) -> Session {
        self.apply_human_move_with(index, |board| select_computer_move(board, rng))
    }

    /// Like [`Session::apply_human_move`], with the computer's reply chosen
    /// by `choose`. The closure only runs if the game is still open after
    /// the human's mark.
    ///
    /// # Panics
    ///
    /// Panics if `choose` returns a cell that is not empty.
    pub fn apply_human_move_with<F>(self, index: usize, choose: F) -> Session
    where
        F: FnOnce(&Board) -> usize,
    {
        if self.is_over() || !self.board.is_empty_at(index) {
            trace!(cell = index, outcome = ?self.outcome, "ignored human move");
            return self;
        }
        debug_assert_eq!(self.turn, Side::Human);

        let board = self.board.with_mark(index, Mark::Human);
        debug!(cell = index, "human placed mark");

        let outcome = check_outcome(&board);
        if outcome.is_terminal() {
            return self.finish(board, outcome, Side::Human, None);
        }

        let reply = choose(&board);
        assert!(
            board.is_empty_at(reply),
            "computer reply {reply} is not an empty cell"
        );
        let board = board.with_mark(reply, Mark::Computer);
        debug!(cell = reply, "computer placed mark");

        let outcome = check_outcome(&board);
        if outcome.is_terminal() {
            return self.finish(board, outcome, Side::Computer, Some(reply));
        }

        Session {
            board,
            turn: Side::Human,
            last_computer_move: Some(reply),
            ..self
        }
    }

    /// Start a new game. Score and draw policy survive.
    pub fn reset(self) -> Session {
        debug!(
            human = self.score.human,
            computer = self.score.computer,
            "session reset"
        );
        Session::with_score(self.score, self.draw_policy)
    }

    /// Enter a terminal state and update the tally.
    fn finish(
        self,
        board: Board,
        outcome: Outcome,
        mover: Side,
        last_computer_move: Option<usize>,
    ) -> Session {
        let outcome = match (outcome, self.draw_policy) {
            (Outcome::Draw, DrawPolicy::CreditComputer) => Outcome::ComputerWin,
            (outcome, _) => outcome,
        };
        let score = match outcome.winner() {
            Some(side) => self.score.credit(side),
            None => self.score,
        };
        info!(
            ?outcome,
            human = score.human,
            computer = score.computer,
            "game over"
        );

        Session {
            board,
            turn: mover.opponent(),
            outcome,
            score,
            last_computer_move,
            ..self
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Replay a fixed script: human cells paired with computer cells.
    fn play(session: Session, moves: &[(usize, usize)]) -> Session {
        moves.iter().fold(session, |s, &(human, computer)| {
            s.apply_human_move_with(human, |_| computer)
        })
    }

    fn never_called(_: &Board) -> usize {
        panic!("computer should not move")
    }

    #[test]
    fn new_session_is_empty_and_open() {
        let s = Session::new(DrawPolicy::Draw);
        assert_eq!(s.board(), &Board::new());
        assert_eq!(s.turn(), Side::Human);
        assert_eq!(s.outcome(), Outcome::InProgress);
        assert_eq!(s.score(), Score::default());
        assert_eq!(s.last_computer_move(), None);
    }

    #[test]
    fn center_opening_places_one_mark_each() {
        let mut rng = StdRng::seed_from_u64(99);
        let s = Session::new(DrawPolicy::Draw).apply_human_move(4, &mut rng);

        assert_eq!(s.outcome(), Outcome::InProgress);
        assert_eq!(s.board().get(4), Some(Mark::Human));
        assert_eq!(s.board().count(Mark::Human), 1);
        assert_eq!(s.board().count(Mark::Computer), 1);
        let reply = s.last_computer_move().unwrap();
        assert_ne!(reply, 4);
        assert_eq!(s.board().get(reply), Some(Mark::Computer));
        assert_eq!(s.turn(), Side::Human);
    }

    #[test]
    fn occupied_cell_is_a_noop() {
        let s = play(Session::new(DrawPolicy::Draw), &[(4, 0)]);
        let before = s.clone();
        assert_eq!(s.clone().apply_human_move_with(4, never_called), before);
        assert_eq!(s.apply_human_move_with(0, never_called), before);
    }

    #[test]
    fn off_board_index_is_a_noop() {
        let s = Session::new(DrawPolicy::Draw);
        assert_eq!(s.clone().apply_human_move_with(9, never_called), s);
    }

    #[test]
    fn human_line_wins_without_computer_reply() {
        // X takes the top row; O answers in the middle row.
        let s = play(Session::new(DrawPolicy::Draw), &[(0, 3), (1, 4)]);
        let s = s.apply_human_move_with(2, never_called);

        assert_eq!(s.outcome(), Outcome::HumanWin);
        assert_eq!(s.score(), Score { human: 1, computer: 0 });
        assert_eq!(s.board().count(Mark::Computer), 2);
    }

    #[test]
    fn computer_line_wins_and_scores() {
        let s = play(
            Session::new(DrawPolicy::Draw),
            &[(0, 2), (3, 4), (8, 6)],
        );
        assert_eq!(s.outcome(), Outcome::ComputerWin);
        assert_eq!(s.score(), Score { human: 0, computer: 1 });
        assert_eq!(s.last_computer_move(), Some(6));
    }

    #[test]
    fn finished_game_ignores_further_moves() {
        let s = play(
            Session::new(DrawPolicy::Draw),
            &[(0, 2), (3, 4), (8, 6)],
        );
        let before = s.clone();
        assert_eq!(s.apply_human_move_with(1, never_called), before);
    }

    /// X O X / X O O / O X X with X filling the last cell.
    const DRAW_SCRIPT: [(usize, usize); 4] = [(0, 1), (2, 4), (3, 5), (7, 6)];

    #[test]
    fn full_board_without_line_is_a_draw() {
        let s = play(Session::new(DrawPolicy::Draw), &DRAW_SCRIPT);
        let s = s.apply_human_move_with(8, never_called);

        assert_eq!(s.outcome(), Outcome::Draw);
        assert_eq!(s.score(), Score::default());
        assert!(s.board().is_full());
    }

    #[test]
    fn credit_computer_policy_scores_full_board_as_computer_win() {
        // Legacy scoring: a full board with
        // no line went to the computer's tally.
        let s = play(Session::new(DrawPolicy::CreditComputer), &DRAW_SCRIPT);
        let s = s.apply_human_move_with(8, never_called);

        assert_eq!(s.outcome(), Outcome::ComputerWin);
        assert_eq!(s.score(), Score { human: 0, computer: 1 });
    }

    #[test]
    fn reset_clears_board_but_keeps_score() {
        let s = play(
            Session::new(DrawPolicy::Draw),
            &[(0, 2), (3, 4), (8, 6)],
        );
        let s = s.reset();

        assert_eq!(s.board(), &Board::new());
        assert_eq!(s.outcome(), Outcome::InProgress);
        assert_eq!(s.turn(), Side::Human);
        assert_eq!(s.score(), Score { human: 0, computer: 1 });
        assert_eq!(s.last_computer_move(), None);
    }

    #[test]
    fn reset_mid_game_is_allowed() {
        let s = play(Session::new(DrawPolicy::Draw), &[(4, 0)]).reset();
        assert_eq!(s, Session::new(DrawPolicy::Draw));
    }

    #[test]
    fn scores_accumulate_across_games() {
        let mut s = Session::new(DrawPolicy::Draw);
        for _ in 0..3 {
            s = play(s, &[(0, 3), (1, 4)]).apply_human_move_with(2, never_called);
            s = s.reset();
        }
        s = play(s, &[(0, 2), (3, 4), (8, 6)]);
        assert_eq!(s.score(), Score { human: 3, computer: 1 });
    }

    #[test]
    #[should_panic(expected = "not an empty cell")]
    fn reply_on_occupied_cell_panics() {
        Session::new(DrawPolicy::Draw).apply_human_move_with(4, |_| 4);
    }

    quickcheck! {
        fn mark_counts_stay_balanced(seed: u64, clicks: Vec<u8>) -> bool {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut s = Session::new(DrawPolicy::Draw);
            for click in clicks {
                s = s.apply_human_move(click as usize % 10, &mut rng);
                let h = s.board().count(Mark::Human);
                let c = s.board().count(Mark::Computer);
                if !(h == c || h == c + 1) {
                    return false;
                }
                if !s.is_over() && h != c {
                    return false;
                }
            }
            true
        }

        fn terminal_board_is_frozen(seed: u64, clicks: Vec<u8>, extra: u8) -> bool {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut s = Session::new(DrawPolicy::Draw);
            for click in clicks {
                s = s.apply_human_move(click as usize % 9, &mut rng);
            }
            if !s.is_over() {
                return true;
            }
            let before = s.clone();
            s.apply_human_move(extra as usize, &mut rng) == before
        }

        fn score_moves_by_at_most_one_per_action(seed: u64, clicks: Vec<u8>) -> bool {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut s = Session::new(DrawPolicy::Draw);
            for click in clicks {
                let before = s.score();
                let was_over = s.is_over();
                s = s.apply_human_move(click as usize % 9, &mut rng);
                let gained = (s.score().human + s.score().computer)
                    - (before.human + before.computer);
                let expected = u32::from(!was_over && s.outcome().winner().is_some());
                if gained != expected {
                    return false;
                }
                if s.is_over() {
                    s = s.reset();
                }
            }
            true
        }
    }
}
