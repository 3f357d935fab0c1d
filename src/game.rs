//! A game session between a human and the computer

use anyhow::{anyhow, Result};
use derive_more::{Display, Error};
use tracing::trace;

use crate::{
    board::{Board, Move, Player},
    rules,
    solver::{Pruning, Solver},
};

/// Which player each side controls, fixed for the whole session
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Sides {
    pub human: Player,
    pub ai: Player,
}

impl Sides {
    pub fn new(human: Player) -> Self {
        Self {
            human,
            ai: human.opponent(),
        }
    }

    /// The human plays `X` and moves first
    pub fn human_first() -> Self {
        Self::new(Player::First)
    }

    /// The computer plays `X` and moves first
    pub fn ai_first() -> Self {
        Self::new(Player::Second)
    }

    pub fn human_moves_first(&self) -> bool {
        self.human == Player::First
    }
}

/// A rejected human move
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display, Error)]
pub enum InvalidMove {
    #[display("Invalid move, cell ({row}, {col}) is off the board")]
    OutOfRange { row: usize, col: usize },
    #[display("Invalid move, cell ({row}, {col}) is already taken")]
    Occupied { row: usize, col: usize },
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    sides: Sides,
    pruning: Pruning,
}

impl Game {
    pub fn new(sides: Sides) -> Self {
        Self::from_board(Board::new(), sides)
    }

    /// Resumes a session from an existing position
    pub fn from_board(board: Board, sides: Sides) -> Self {
        Self {
            board,
            sides,
            pruning: Pruning::default(),
        }
    }

    /// Sets the pruning mode the computer searches with
    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn sides(&self) -> Sides {
        self.sides
    }

    pub fn pruning(&self) -> Pruning {
        self.pruning
    }

    /// Places the human's mark, rejecting cells that are off the board or taken
    pub fn apply_human_move(&mut self, row: usize, col: usize) -> Result<(), InvalidMove> {
        if !Move::new(row, col).in_range() {
            return Err(InvalidMove::OutOfRange { row, col });
        }
        if !self.board.is_empty(row, col) {
            return Err(InvalidMove::Occupied { row, col });
        }

        self.board.place(row, col, self.sides.human);
        trace!(row, col, mark = %self.sides.human.mark(), "human move");
        Ok(())
    }

    /// Searches for the computer's move and plays it
    ///
    /// Errors only if the game is already over.
    pub fn compute_ai_move(&mut self) -> Result<Move> {
        if self.is_game_over() {
            return Err(anyhow!("Cannot move, the game is over"));
        }

        let (_score, best_move) = Solver::new(&mut self.board, self.sides)
            .with_pruning(self.pruning)
            .solve()
            .ok_or_else(|| anyhow!("search found no move on a live board"))?;

        self.board.place(best_move.row, best_move.col, self.sides.ai);
        trace!(row = best_move.row, col = best_move.col, mark = %self.sides.ai.mark(), "computer move");
        Ok(best_move)
    }

    pub fn is_game_over(&self) -> bool {
        rules::is_terminal(&self.board)
    }

    /// The winning player; `None` is a draw once the game is over
    pub fn winner(&self) -> Option<Player> {
        rules::winner(&self.board)
    }
}
