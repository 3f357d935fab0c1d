//! Leaf scoring for the search
//!
//! Scores are always from the computer's point of view: positive values are
//! good for the computer and negative values are good for the human.

use crate::board::{Board, Cell, Player};
use crate::game::Sides;
use crate::rules::{has_won, LINES};
use crate::SIZE;

/// The base score of a won game, before the empty-cell adjustment
pub const WIN_SCORE: i32 = 100;

/// Positional weight of each cell: corners 3, edges 2, center 8
pub const WEIGHTS: [[i32; SIZE]; SIZE] = [
    [3, 2, 3],
    [2, 8, 2],
    [3, 2, 3],
];

/// Heuristic value of a position for `player`
///
/// The sum of the weights of the cells `player` occupies, plus one for every
/// line holding exactly two of `player`'s marks and one empty cell.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    let mut score = 0;

    for (row, cells) in board.rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if *cell == Cell::Mark(player) {
                score += WEIGHTS[row][col];
            }
        }
    }

    for line in LINES.iter() {
        let (mut own, mut empty) = (0, 0);
        for &(row, col) in line {
            match board.cell(row, col) {
                Cell::Empty => empty += 1,
                Cell::Mark(p) if p == player => own += 1,
                Cell::Mark(_) => {}
            }
        }
        // an open line one mark short of a win
        if own == 2 && empty == 1 {
            score += 1;
        }
    }

    score
}

/// Score of a search leaf
///
/// A won board scores `-(100 - empty)` when the human won and `100 + empty`
/// when the computer won. Any other board is scored with [`evaluate`] for
/// `scored_for`, negated when that is the human.
pub fn utility(board: &Board, sides: Sides, scored_for: Player) -> i32 {
    let empty = board.count_empty() as i32;

    if has_won(board, sides.human) {
        return -(WIN_SCORE - empty);
    }
    if has_won(board, sides.ai) {
        return WIN_SCORE + empty;
    }

    if scored_for == sides.human {
        -evaluate(board, sides.human)
    } else {
        evaluate(board, sides.ai)
    }
}
