//! An agent for playing or analysing the board game 'Max Connect 4'
//!
//! Max Connect 4 is played on the usual 7x6 grid, but the game only ends
//! when the grid is full. Each player scores one point for every run of
//! four of their tiles, so a completed four-in-a-row is not the end of play.
//!
//! The agent uses a depth-limited minimax search with alpha-beta pruning,
//! scoring the leaves with a heuristic that gives partial credit to runs
//! that can still be completed.
//!
//! # Basic Usage
//!
//! ```
//! use max_connect4_ai::{board::{Board, Player}, search::AiPlayer};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = Board::from_text("0000000\n0000000\n0000000\n0000000\n0000000\n2220000\n2\n")?;
//! let mut ai = AiPlayer::new(Player::Two, 2);
//!
//! assert_eq!(ai.best_move(&board), Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;

pub mod error;

pub mod board;

pub mod utility;

pub mod node;

pub mod search;


pub use board::{Board, Cell, Player};
pub use error::BoardError;
pub use search::{best_move, AiPlayer};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The length of a scoring run
pub const RUN_LENGTH: usize = 4;

// a run must fit on the board in every direction the heuristic scans
const_assert!(RUN_LENGTH <= WIDTH && RUN_LENGTH <= HEIGHT);
// column indices are displayed as single digits
const_assert!(WIDTH <= 10);
