//! Win and game-over detection

use crate::board::{Board, Cell, Player};

/// Every line of three cells that wins the game: rows, columns, then diagonals
pub const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Returns true if every cell of any line holds `player`'s mark
pub fn has_won(board: &Board, player: Player) -> bool {
    LINES.iter().any(|line| {
        line.iter()
            .all(|&(row, col)| board.cell(row, col) == Cell::Mark(player))
    })
}

/// Returns true if either player has won or no empty cell remains
pub fn is_terminal(board: &Board) -> bool {
    has_won(board, Player::First) || has_won(board, Player::Second) || board.count_empty() == 0
}

/// The player holding a complete line, if any
pub fn winner(board: &Board) -> Option<Player> {
    if has_won(board, Player::First) {
        Some(Player::First)
    } else if has_won(board, Player::Second) {
        Some(Player::Second)
    } else {
        None
    }
}
