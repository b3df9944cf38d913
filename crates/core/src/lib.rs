//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules and the engine state machine. It has
//! no dependencies on terminals, timers or I/O, which makes it:
//!
//! - **Deterministic**: the same seed produces the same sequence of pieces
//! - **Testable**: scripted piece queues and prepared boards for scenarios
//! - **Portable**: any front-end can drive it (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`pieces`]: tetromino catalog (square 0/1 matrices and colors), matrix rotation
//! - [`board`]: 10x20 grid with row clearing and piece merging
//! - [`collision`]: the single collision rule used by every move
//! - [`game_state`]: the engine - move, rotate, tick, reset
//! - [`scoring`]: line-clear points, level progression, drop interval
//! - [`rng`]: seeded uniform piece source
//! - [`snapshot`]: read model for renderers
//! - [`gravity`], [`session`]: caller-side timer and pause handling
//!
//! # Game Rules
//!
//! - **Random pieces**: every draw is a uniform pick among the seven kinds
//! - **Naive rotation**: clockwise matrix rotation, rejected if it does not fit (no kicks)
//! - **Gravity lock**: a piece locks on the tick it fails to fall
//! - **Scoring**: `lines * 100 * level` per clear
//! - **Levels**: one level per 10 cumulative lines, gravity speeds up with level
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, TickOutcome};
//! use blockfall_core::types::{Direction, GameAction};
//!
//! let mut game = GameState::new(12345);
//!
//! game.move_horizontal(Direction::Left);
//! game.rotate();
//! assert_eq!(game.tick(), TickOutcome::Moved);
//!
//! game.apply_action(GameAction::Restart);
//! assert_eq!(game.score(), 0);
//! assert_eq!(game.level(), 1);
//! ```
//!
//! # Timing
//!
//! The engine only knows ticks. Feed wall time to a [`Session`] (or your own
//! [`DropTimer`]) and it ticks the engine every
//! [`GameState::drop_interval_ms`](game_state::GameState::drop_interval_ms).

pub mod board;
pub mod collision;
pub mod game_state;
pub mod gravity;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::collides;
pub use game_state::{GameState, LockEvent, TickOutcome};
pub use gravity::DropTimer;
pub use pieces::{catalog_shape, piece_color, random_piece, Shape, Tetromino};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{drop_interval_ms, level_after_clear, line_clear_score};
pub use session::Session;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
