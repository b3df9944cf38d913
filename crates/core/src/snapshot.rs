//! Snapshot module - read model handed to renderers
//!
//! Plain copyable data: the locked grid, the active piece and the progress
//! counters. Renderers never touch `GameState` directly.

use crate::pieces::{Shape, Tetromino};
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read model handed to renderers once per frame.
///
/// `board` holds locked cells only; the active piece is kept separate so the
/// renderer decides how to draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub game_over: bool,
    pub episode_id: u32,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.game_over = false;
        self.episode_id = 0;
        self.piece_id = 0;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = 0;
    }

    /// Cell as a renderer sees it: locked cells, with the active piece on top
    pub fn visible_cell(&self, x: usize, y: usize) -> Cell {
        if let Some(active) = self.active {
            let (dx, dy) = (x as i32 - active.x as i32, y as i32 - active.y as i32);
            if dx >= 0 && dy >= 0 && active.shape.is_filled(dx as usize, dy as usize) {
                return Some(active.kind);
            }
        }
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            game_over: false,
            episode_id: 0,
            piece_id: 0,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
        }
    }
}
