//! Mill-Rust: a Nine Men's Morris engine.
//!
//! This crate provides the rules of Nine Men's Morris (Mill) as a successor
//! generator, plus a small fixed-depth search that picks moves for the
//! computer-controlled side.
//!
//! ## Modules
//!
//! - [`constants`] - Board topology tables and engine parameters
//! - [`board`] - Colors and topology lookups (mills, adjacency)
//! - [`position`] - Game state, successor generation, captures, human moves
//! - [`search`] - Static evaluation and the fixed-depth move selector
//! - [`game`] - Text command session for human-vs-computer games
//!
//! ## Example
//!
//! ```
//! use mill_rust::position::{Move, Position, parse_point};
//! use mill_rust::search::MoveSelector;
//!
//! // Create a new game
//! let pos = Position::initial();
//! assert_eq!(pos.generate_next_states().len(), 24);
//!
//! // White places a piece on d6
//! let pos = pos.apply_move(&Move::place(parse_point("d6").unwrap())).unwrap();
//!
//! // Let the engine answer for Black
//! let reply = MoveSelector::new(1).select(&pos).unwrap();
//! println!("{reply}");
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod position;
pub mod search;
