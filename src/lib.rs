//! Hnefatafl-Rust: a rules engine for 9x9 Tafl.
//!
//! This crate implements the rules of a Tafl-family board game, where the
//! attackers try to capture the king and the defenders try to bring the king
//! to one of the four corners.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimension, corners and starting layout
//! - [`board`] - Pieces, sides and the bounds-checked grid
//! - [`position`] - Core game logic (selection, moves, captures, win detection)
//! - [`playout`] - Random self-play for soak testing
//! - [`protocol`] - Text protocol for driving the engine over stdin/stdout
//!
//! ## Example
//!
//! ```
//! use hnefatafl_rust::position::{GameState, Position, parse_coord};
//!
//! // Create a new game; the attackers move first
//! let mut pos = Position::new();
//!
//! // Slide the attacker on d1 down to d3
//! let origin = parse_coord("d1").unwrap();
//! let dest = parse_coord("d3").unwrap();
//! assert!(pos.valid_moves_from(origin.0, origin.1).contains(&dest));
//!
//! let captured = pos.move_from(origin, dest).unwrap();
//! assert!(captured.is_empty());
//! assert_eq!(pos.current_state(), GameState::Playing);
//! ```

pub mod board;
pub mod constants;
pub mod playout;
pub mod position;
pub mod protocol;
