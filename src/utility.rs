//! Heuristic evaluation of Max Connect 4 positions
//!
//! Every run of four cells on the board that is not blocked for a player is worth
//! something to them, growing quickly with the number of their tiles already in it.
//! Unblocked runs of the opponent count against them by the same amounts.

use crate::{board::Board, board::Player, HEIGHT, RUN_LENGTH, WIDTH};

/// The value of an unblocked run, indexed by the number of the owner's tiles in it
pub const RUN_WEIGHTS: [i32; RUN_LENGTH + 1] = [0, 1, 10, 25, 100];

/// The number of distinct runs of four on the board
pub const NUM_RUNS: usize = HEIGHT * (WIDTH - RUN_LENGTH + 1)
    + (HEIGHT - RUN_LENGTH + 1) * WIDTH
    + 2 * (HEIGHT - RUN_LENGTH + 1) * (WIDTH - RUN_LENGTH + 1);

// (row, column) steps: horizontal, vertical, diagonal down-left, diagonal down-right
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, -1), (1, 1)];

/// The (row, column) cells of every run of four on the board
pub const RUNS: [[(usize, usize); RUN_LENGTH]; NUM_RUNS] = runs();

const fn runs() -> [[(usize, usize); RUN_LENGTH]; NUM_RUNS] {
    let mut runs = [[(0, 0); RUN_LENGTH]; NUM_RUNS];
    let mut n = 0;
    let mut row = 0;
    while row < HEIGHT {
        let mut column = 0;
        while column < WIDTH {
            let mut d = 0;
            while d < DIRECTIONS.len() {
                let (d_row, d_column) = DIRECTIONS[d];
                let end_row = row as isize + d_row * (RUN_LENGTH as isize - 1);
                let end_column = column as isize + d_column * (RUN_LENGTH as isize - 1);
                if end_row < HEIGHT as isize && end_column >= 0 && end_column < WIDTH as isize {
                    let mut i = 0;
                    while i < RUN_LENGTH {
                        runs[n][i] = (
                            (row as isize + d_row * i as isize) as usize,
                            (column as isize + d_column * i as isize) as usize,
                        );
                        i += 1;
                    }
                    n += 1;
                }
                d += 1;
            }
            column += 1;
        }
        row += 1;
    }
    runs
}

/// Scores `board` from the point of view of `player`
///
/// A run holding tiles of both players is worth nothing. A run holding only tiles of
/// one player (and empty cells) is worth [`RUN_WEIGHTS`] of its tile count, positive
/// for `player` and negative for the opponent.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    RUNS.iter()
        .map(|run| {
            let mut own = 0;
            let mut enemy = 0;
            for &(row, column) in run.iter() {
                match board.cell(row, column).owner() {
                    Some(owner) if owner == player => own += 1,
                    Some(_) => enemy += 1,
                    None => {}
                }
            }
            match (own, enemy) {
                (own, 0) => RUN_WEIGHTS[own],
                (0, enemy) => -RUN_WEIGHTS[enemy],
                _ => 0,
            }
        })
        .sum()
}
