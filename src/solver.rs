//! An agent to choose the computer's move

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::{board::*, evaluation::utility, game::Sides, rules::is_terminal, SEARCH_DEPTH, SIZE};

use std::str::FromStr;

/// Bound used in place of infinity for the initial search window
pub const INFINITY: i32 = i32::MAX;

/// The score of a searched position and the move that reaches it
///
/// `best_move` is `None` only for leaves, where no move is made.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Option<Move>,
}

/// How far a beta/alpha cutoff reaches
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Pruning {
    /// A cutoff skips the remaining cells of the current row only; later rows
    /// are still visited, and each is cut again after its first empty cell
    RowScoped,
    /// A cutoff skips every remaining candidate
    Full,
}

impl Default for Pruning {
    fn default() -> Self {
        Pruning::RowScoped
    }
}

impl FromStr for Pruning {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "row" | "row-scoped" | "rowscoped" => Ok(Pruning::RowScoped),
            "full" => Ok(Pruning::Full),
            other => Err(anyhow!(
                "unknown pruning mode '{}', expected 'row' or 'full'",
                other
            )),
        }
    }
}

/// A minimax searcher with alpha-beta pruning
///
/// # Notes
/// The searcher borrows the live game board and explores hypothetical
/// positions by placing a mark, recursing and clearing the mark again, so the
/// board is left exactly as it was found once a search returns.
///
/// # Position Scoring
/// The computer maximizes and the human minimizes. Won positions score
/// `100 + empty cells` for the computer and `-(100 - empty cells)` for the
/// human; positions at the search horizon are scored with the positional
/// heuristic in [`evaluation`](crate::evaluation).
pub struct Solver<'a> {
    board: &'a mut Board,
    sides: Sides,
    pruning: Pruning,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl<'a> Solver<'a> {
    /// Creates a new `Solver` over a board
    pub fn new(board: &'a mut Board, sides: Sides) -> Self {
        Self {
            board,
            sides,
            pruning: Pruning::default(),
            node_count: 0,
        }
    }

    /// Sets the pruning mode of an existing `Solver`
    pub fn with_pruning(mut self, pruning: Pruning) -> Self {
        self.pruning = pruning;
        self
    }

    /// Performs game tree search
    ///
    /// Returns the score of the position and, unless the position is a
    /// leaf, the best move for the side to play (see [Position Scoring])
    ///
    /// [Position Scoring]: #position-scoring
    pub fn minimax(&mut self, depth: usize, maximizing: bool, alpha: i32, beta: i32) -> SearchResult {
        self.node_count += 1;

        if depth == 0 || is_terminal(&*self.board) {
            let scored_for = if maximizing { self.sides.ai } else { self.sides.human };
            return SearchResult {
                score: utility(&*self.board, self.sides, scored_for),
                best_move: None,
            };
        }

        #[cfg(debug_assertions)]
        let snapshot = *self.board;

        let result = if maximizing {
            self.max_value(depth, alpha, beta)
        } else {
            self.min_value(depth, alpha, beta)
        };

        #[cfg(debug_assertions)]
        assert_eq!(snapshot, *self.board, "search did not restore the board");

        result
    }

    fn max_value(&mut self, depth: usize, mut alpha: i32, beta: i32) -> SearchResult {
        let mut best = SearchResult {
            score: -INFINITY,
            best_move: None,
        };

        'rows: for row in 0..SIZE {
            for col in 0..SIZE {
                if !self.board.is_empty(row, col) {
                    continue;
                }
                self.board.place(row, col, self.sides.ai);
                let SearchResult { score, .. } = self.minimax(depth - 1, false, alpha, beta);
                self.board.clear(row, col);

                // strictly greater, so ties go to the first move in row-major order
                if score > best.score {
                    best = SearchResult {
                        score,
                        best_move: Some(Move::new(row, col)),
                    };
                }
                alpha = alpha.max(best.score);

                if beta <= alpha {
                    match self.pruning {
                        Pruning::RowScoped => break,
                        Pruning::Full => break 'rows,
                    }
                }
            }
        }

        best
    }

    fn min_value(&mut self, depth: usize, alpha: i32, mut beta: i32) -> SearchResult {
        let mut best = SearchResult {
            score: INFINITY,
            best_move: None,
        };

        'rows: for row in 0..SIZE {
            for col in 0..SIZE {
                if !self.board.is_empty(row, col) {
                    continue;
                }
                self.board.place(row, col, self.sides.human);
                let SearchResult { score, .. } = self.minimax(depth - 1, true, alpha, beta);
                self.board.clear(row, col);

                if score < best.score {
                    best = SearchResult {
                        score,
                        best_move: Some(Move::new(row, col)),
                    };
                }
                beta = beta.min(best.score);

                if beta <= alpha {
                    match self.pruning {
                        Pruning::RowScoped => break,
                        Pruning::Full => break 'rows,
                    }
                }
            }
        }

        best
    }

    /// Searches the current position to the fixed horizon with the computer to move
    ///
    /// Returns `None` when the game is already over.
    pub fn solve(&mut self) -> Option<(i32, Move)> {
        let SearchResult { score, best_move } = self.minimax(SEARCH_DEPTH, true, -INFINITY, INFINITY);
        let best_move = best_move?;

        debug!(
            score,
            best_move = %best_move,
            nodes = self.node_count,
            pruning = ?self.pruning,
            "search finished"
        );
        Some((score, best_move))
    }
}

impl std::ops::Deref for Solver<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        &*self.board
    }
}
