//! Terminal front-end for the game.
//!
//! Renders into a plain framebuffer of styled characters that is then
//! flushed to the terminal, instead of going through a widget toolkit.
//!
//! - [`fb`]: framebuffer and styles
//! - [`game_view`]: pure mapping from a `GameSnapshot` to a framebuffer
//! - [`renderer`]: crossterm output with changed-run diffing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Overlay, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
