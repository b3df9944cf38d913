//! Scoring module - line-clear points and level progression
//!
//! - A clear of `k` rows is worth `k * 100 * level`, using the level in
//!   effect before any level-up caused by that same clear.
//! - The level goes up by one when cumulative lines reach `level * 10`,
//!   and never by more than one per lock.
//! - Gravity is 1000ms at level 1 and `1000 / level + 200` ms after that.

use crate::types::{BASE_DROP_MS, DROP_INTERVAL_FLOOR_MS, LINES_PER_LEVEL, POINTS_PER_LINE};

/// Points for clearing `lines` rows at `level`
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    lines
        .saturating_mul(POINTS_PER_LINE)
        .saturating_mul(level)
}

/// Level after a clear brought cumulative lines to `total_lines`
pub fn level_after_clear(level: u32, total_lines: u32) -> u32 {
    if total_lines >= level.saturating_mul(LINES_PER_LEVEL) {
        level.saturating_add(1)
    } else {
        level
    }
}

/// Gravity interval for a level (milliseconds per row)
pub fn drop_interval_ms(level: u32) -> u32 {
    if level <= 1 {
        BASE_DROP_MS
    } else {
        BASE_DROP_MS / level + DROP_INTERVAL_FLOOR_MS
    }
}
