//! Session - the runner-side wrapper around the engine
//!
//! Holds what the engine deliberately does not: the gravity timer and the
//! pause flag. While paused, neither ticks nor movement input reach the
//! engine. The timer is re-armed whenever the level changes the drop
//! interval and whenever the game is restarted.

use log::{debug, info};

use crate::game_state::{GameState, TickOutcome};
use crate::gravity::DropTimer;
use crate::snapshot::GameSnapshot;
use crate::types::GameAction;

#[derive(Debug, Clone)]
pub struct Session {
    game: GameState,
    timer: DropTimer,
    paused: bool,
}

impl Session {
    pub fn new(game: GameState) -> Self {
        let timer = DropTimer::new(game.drop_interval_ms());
        Self {
            game,
            timer,
            paused: false,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn timer(&self) -> &DropTimer {
        &self.timer
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    /// Handle a player action; returns whether anything changed.
    pub fn apply(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => {
                if self.game.game_over() {
                    return false;
                }
                self.paused = !self.paused;
                info!("{}", if self.paused { "paused" } else { "resumed" });
                true
            }
            GameAction::Restart => {
                self.game.reset();
                self.paused = false;
                self.timer.rearm(self.game.drop_interval_ms());
                true
            }
            _ if self.paused => false,
            GameAction::SoftDrop => {
                let outcome = self.game.tick();
                self.after_tick(outcome);
                outcome != TickOutcome::Idle
            }
            other => self.game.apply_action(other),
        }
    }

    /// Advance the gravity timer; returns how many ticks ran.
    pub fn update(&mut self, elapsed_ms: u32) -> u32 {
        if self.paused || self.game.game_over() {
            return 0;
        }

        let due = self.timer.advance(elapsed_ms);
        let mut ran = 0;
        for _ in 0..due {
            let interval = self.timer.interval_ms();
            let outcome = self.game.tick();
            ran += 1;
            self.after_tick(outcome);
            if self.game.game_over() || self.timer.interval_ms() != interval {
                break;
            }
        }
        ran
    }

    fn after_tick(&mut self, outcome: TickOutcome) {
        match outcome {
            TickOutcome::Locked(event) if event.lines_cleared > 0 => {
                debug!(
                    "cleared {} line(s) for {} points",
                    event.lines_cleared, event.score_gained
                );
            }
            TickOutcome::ToppedOut => {
                info!(
                    "final score {}, level {}, lines {}",
                    self.game.score(),
                    self.game.level(),
                    self.game.lines()
                );
            }
            _ => {}
        }

        if self.game.drop_interval_ms() != self.timer.interval_ms() {
            self.timer.rearm(self.game.drop_interval_ms());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PieceQueue;
    use crate::types::PieceKind;

    fn session(kinds: &[PieceKind]) -> Session {
        Session::new(GameState::with_queue(PieceQueue::cycle(kinds)))
    }

    #[test]
    fn gravity_ticks_on_interval() {
        let mut s = session(&[PieceKind::T]);
        assert_eq!(s.update(999), 0);
        assert_eq!(s.game().active().unwrap().y, 0);
        assert_eq!(s.update(1), 1);
        assert_eq!(s.game().active().unwrap().y, 1);
    }

    #[test]
    fn pause_withholds_ticks_and_input() {
        let mut s = session(&[PieceKind::T]);
        assert!(s.apply(GameAction::Pause));
        assert!(s.paused());

        assert_eq!(s.update(5000), 0);
        assert!(!s.apply(GameAction::MoveLeft));
        assert!(!s.apply(GameAction::SoftDrop));
        assert!(!s.apply(GameAction::Rotate));
        let active = s.game().active().unwrap();
        assert_eq!((active.x, active.y), (4, 0));

        assert!(s.apply(GameAction::Pause));
        assert!(!s.paused());
        assert!(s.apply(GameAction::MoveLeft));
    }

    #[test]
    fn restart_unpauses_and_rearms() {
        let mut s = session(&[PieceKind::T]);
        s.update(500);
        s.apply(GameAction::Pause);
        assert!(s.apply(GameAction::Restart));
        assert!(!s.paused());
        assert_eq!(s.timer().elapsed_ms(), 0);
        assert_eq!(s.timer().interval_ms(), 1000);
        assert_eq!(s.game().episode_id(), 1);
    }

    #[test]
    fn soft_drop_moves_immediately() {
        let mut s = session(&[PieceKind::O]);
        assert!(s.apply(GameAction::SoftDrop));
        assert_eq!(s.game().active().unwrap().y, 1);
    }

    #[test]
    fn pause_is_ignored_after_game_over() {
        let mut s = session(&[PieceKind::O]);
        // Drop pieces straight down until the column tops out.
        for _ in 0..1000 {
            if s.game().game_over() {
                break;
            }
            s.apply(GameAction::SoftDrop);
        }
        assert!(s.game().game_over());
        assert!(!s.apply(GameAction::Pause));
        assert_eq!(s.update(10_000), 0);
        assert!(s.apply(GameAction::Restart));
        assert!(!s.game().game_over());
    }

    #[test]
    fn level_up_rearms_timer() {
        let mut board = crate::board::Board::new();
        for y in 10..20 {
            for x in 0..10 {
                if x != 4 {
                    board.set(x, y, Some(PieceKind::Z));
                }
            }
        }
        let game = GameState::from_board(board, PieceQueue::cycle(&[PieceKind::I]));
        let mut s = Session::new(game);

        // Each I fills column 4 of four rows; three of them reach 10 lines.
        let mut guard = 0;
        while s.game().lines() < 10 && guard < 200 {
            s.apply(GameAction::SoftDrop);
            guard += 1;
        }

        assert_eq!(s.game().level(), 2);
        assert_eq!(s.game().drop_interval_ms(), 700);
        assert_eq!(s.timer().interval_ms(), 700);
    }
}
