//! Rules engine: pure evaluation of board state.
//!
//! Nothing here mutates a board or touches global state. Randomness is
//! always supplied by the caller.

use rand::Rng;

use crate::types::{Board, Mark, Outcome};

/// The eight winning lines, checked in this order.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// First line whose three cells hold the same non-empty mark.
pub fn winning_line(board: &Board) -> Option<[usize; 3]> {
    let cells = board.cells();
    LINES.into_iter().find(|&[a, b, c]| {
        !cells[a].is_empty() && cells[a] == cells[b] && cells[a] == cells[c]
    })
}

/// Evaluate a board.
///
/// A completed line wins for its owner. A full board without one is a
/// draw. Anything else is still in progress.
pub fn check_outcome(board: &Board) -> Outcome {
    if let Some([a, _, _]) = winning_line(board) {
        return match board.cells()[a].side() {
            Some(side) => Outcome::win_for(side),
            // winning_line never matches empty cells
            None => Outcome::InProgress,
        };
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

/// Indices of empty cells, ascending.
pub fn empty_cells(board: &Board) -> Vec<usize> {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_empty())
        .map(|(i, _)| i)
        .collect()
}

/// Pick the `pick`-th empty cell, wrapping modulo the number of empty cells.
///
/// # Panics
///
/// Panics if the board has no empty cell. Callers must check for a
/// terminal outcome first.
pub fn select_move_from(board: &Board, pick: usize) -> usize {
    let empty = empty_cells(board);
    assert!(!empty.is_empty(), "select_move_from called on a full board");
    empty[pick % empty.len()]
}

/// Choose an empty cell uniformly at random.
///
/// # Panics
///
/// Panics if the board has no empty cell.
pub fn select_computer_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> usize {
    let open = board.count(Mark::Empty);
    assert!(open > 0, "select_computer_move called on a full board");
    select_move_from(board, rng.gen_range(0..open))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const E: Mark = Mark::Empty;
    const H: Mark = Mark::Human;
    const C: Mark = Mark::Computer;

    fn board(cells: [Mark; 9]) -> Board {
        Board::from_cells(cells)
    }

    fn line_board(line: [usize; 3], mark: Mark) -> Board {
        line.into_iter()
            .fold(Board::new(), |b, i| b.with_mark(i, mark))
    }

    #[test]
    fn every_line_wins_for_human() {
        for line in LINES {
            let b = line_board(line, H);
            assert_eq!(check_outcome(&b), Outcome::HumanWin, "line {:?}", line);
            assert_eq!(winning_line(&b), Some(line));
        }
    }

    #[test]
    fn every_line_wins_for_computer() {
        for line in LINES {
            let b = line_board(line, C);
            assert_eq!(check_outcome(&b), Outcome::ComputerWin, "line {:?}", line);
        }
    }

    #[test]
    fn top_row_of_human_marks_is_human_win() {
        let b = board([H, H, H, E, E, E, E, E, E]);
        assert_eq!(check_outcome(&b), Outcome::HumanWin);
    }

    #[test]
    fn full_board_without_line_is_draw() {
        // X O X
        // X O O
        // O X X
        let b = board([H, C, H, H, C, C, C, H, H]);
        assert_eq!(winning_line(&b), None);
        assert_eq!(check_outcome(&b), Outcome::Draw);
    }

    #[test]
    fn full_board_with_line_is_a_win_not_a_draw() {
        // X X X
        // O O X
        // X O O
        let b = board([H, H, H, C, C, H, H, C, C]);
        assert_eq!(check_outcome(&b), Outcome::HumanWin);
    }

    #[test]
    fn empty_and_partial_boards_are_in_progress() {
        assert_eq!(check_outcome(&Board::new()), Outcome::InProgress);
        let b = board([H, C, E, E, H, E, E, E, C]);
        assert_eq!(check_outcome(&b), Outcome::InProgress);
    }

    #[test]
    fn mixed_line_does_not_win() {
        let b = board([H, H, C, E, E, E, E, E, E]);
        assert_eq!(winning_line(&b), None);
    }

    #[test]
    fn empty_cells_lists_open_indices() {
        let b = board([H, E, C, E, H, E, E, C, E]);
        assert_eq!(empty_cells(&b), vec![1, 3, 5, 6, 8]);
    }

    #[test]
    fn select_move_from_wraps_over_empty_cells() {
        let b = board([H, E, C, E, H, E, E, C, E]);
        assert_eq!(select_move_from(&b, 0), 1);
        assert_eq!(select_move_from(&b, 4), 8);
        assert_eq!(select_move_from(&b, 5), 1);
    }

    #[test]
    fn computer_move_is_always_an_empty_cell() {
        let mut rng = StdRng::seed_from_u64(7);
        let b = board([H, E, C, E, H, E, E, C, E]);
        for _ in 0..500 {
            let idx = select_computer_move(&b, &mut rng);
            assert!(b.is_empty_at(idx), "picked occupied cell {}", idx);
        }
    }

    #[test]
    fn computer_move_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(2024);
        let b = board([H, E, E, E, C, E, E, E, E]);
        let mut counts = [0u32; 9];
        let trials = 7000;
        for _ in 0..trials {
            counts[select_computer_move(&b, &mut rng)] += 1;
        }
        assert_eq!(counts[0], 0);
        assert_eq!(counts[4], 0);
        // 7 open cells, expected 1000 each
        for idx in empty_cells(&b) {
            assert!(
                (800..=1200).contains(&counts[idx]),
                "cell {} picked {} times",
                idx,
                counts[idx]
            );
        }
    }

    #[test]
    #[should_panic(expected = "full board")]
    fn computer_move_on_full_board_panics() {
        let mut rng = StdRng::seed_from_u64(1);
        let b = board([H, C, H, H, C, C, C, H, H]);
        select_computer_move(&b, &mut rng);
    }
}
