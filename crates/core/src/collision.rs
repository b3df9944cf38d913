//! Collision rule
//!
//! A placement collides when any filled cell of the shape lands outside the
//! board or on an occupied cell. Empty matrix cells never matter, so a piece
//! may hang its empty columns past a wall.
//!
//! The board passed in must hold locked cells only; the active piece is never
//! written into it while falling.

use crate::board::Board;
use crate::pieces::Shape;

/// Whether `shape` with its top-left corner at (x, y) overlaps a wall, the
/// floor, the ceiling, or a locked cell.
pub fn collides(shape: &Shape, board: &Board, x: i8, y: i8) -> bool {
    shape.filled_cells().iter().any(|&(dx, dy)| {
        match (x.checked_add(dx), y.checked_add(dy)) {
            (Some(px), Some(py)) => !board.is_valid(px, py),
            _ => true,
        }
    })
}
