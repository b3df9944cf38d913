//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. There is no
//! auto-repeat handling here: terminals resend key presses while a key is held
//! and each press is one action, which is the behavior the game expects.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit, CONTROLS};
