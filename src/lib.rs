//! A tic-tac-toe opponent driven by a depth-limited minimax search
//!
//! The computer picks its moves with a 3-ply minimax search using
//! alpha-beta pruning and a positional heuristic at the search horizon.
//!
//! # Basic Usage
//!
//! ```
//! use tictactoe_ai::{game::{Game, Sides}, board::Move};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut game = Game::new(Sides::human_first());
//! game.apply_human_move(0, 0)?;
//! let reply = game.compute_ai_move()?;
//!
//! assert_eq!(reply, Move::new(1, 1));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod rules;

pub mod evaluation;

pub mod solver;

pub mod game;

pub mod audit;

mod test;

/// The width and height of the game board in cells
pub const SIZE: usize = 3;

/// The number of cells on the game board
pub const CELLS: usize = SIZE * SIZE;

/// The number of plies searched for every computer move
pub const SEARCH_DEPTH: usize = 3;

// a search deeper than the number of cells never reaches its horizon
const_assert!(SEARCH_DEPTH <= CELLS);
// terminal scores must stay clear of the positional heuristic's range
const_assert!(CELLS < 100);
