//! Gravity timer owned by the caller.
//!
//! The engine has no clock. Whoever drives it feeds elapsed time into a
//! [`DropTimer`] and calls `GameState::tick` once per due period. Re-arming
//! discards any partial period, so an interval change never leaves a stale
//! schedule running alongside the new one.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTimer {
    interval_ms: u32,
    elapsed_ms: u32,
}

impl DropTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Time accumulated toward the next tick
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Cancel the pending period and start a new one with `interval_ms`.
    pub fn rearm(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
        self.elapsed_ms = 0;
    }

    /// Add elapsed time; returns how many ticks became due.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        let total = self.elapsed_ms as u64 + elapsed_ms as u64;
        let interval = self.interval_ms as u64;
        self.elapsed_ms = (total % interval) as u32;
        (total / interval).min(u32::MAX as u64) as u32
    }
}
