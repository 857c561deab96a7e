//! A depth-limited minimax agent for playing the board game 'Connect 4'
//!
//! The engine searches the game tree with alpha-beta pruning and scores
//! positions at the search horizon with one of two static evaluators. How
//! deep it looks and how it scores positions is controlled by a
//! [`DifficultyProfile`](profile::DifficultyProfile).
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::Board, profile::Difficulty, search::Searcher, DifficultyConfig};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let config = DifficultyConfig::default();
//! // the human has three in the bottom row
//! let board = Board::from_moves("05162", connect4_minimax::Side::Human)?;
//! let mut searcher = Searcher::new(*config.profile(Difficulty::Medium));
//! let result = searcher.pick_best_move(&board);
//!
//! assert_eq!(result.column, Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod win;

pub mod evaluate;

pub mod profile;

pub mod search;

pub mod api;

pub mod simulate;


pub use board::{Board, Cell, Side};
pub use error::EngineError;
pub use profile::DifficultyConfig;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tiles needed to win
pub const CONNECT: usize = 4;

// the heuristic's centre weights and the move order assume a 7-wide board
const_assert_eq!(WIDTH, 7);
const_assert!(HEIGHT >= CONNECT);
