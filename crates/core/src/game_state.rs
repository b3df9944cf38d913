//! Game state module - the engine state machine
//!
//! Owns the board, the falling piece, the piece source and the progress
//! counters. Everything is driven from outside: the caller invokes
//! [`GameState::tick`] from its gravity timer (and on a soft-drop key), and
//! the movement operations on input. No operation fails; a move that does
//! not fit is silently dropped.
//!
//! A tick that cannot move the piece down locks it, clears full rows,
//! updates score/lines/level and spawns the successor, all in one step.

use log::{debug, info};

use crate::board::Board;
use crate::collision::collides;
use crate::pieces::Tetromino;
use crate::rng::PieceQueue;
use crate::scoring::{drop_interval_ms, level_after_clear, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Direction, GameAction};

/// Highest row at which a piece that cannot fall ends the game instead of locking
const TOP_OUT_MAX_Y: i8 = 1;

/// What a lock did to the progress counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_gained: u32,
    pub leveled_up: bool,
}

/// Result of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing happened (game over, or no active piece)
    Idle,
    /// The piece fell one row
    Moved,
    /// The piece locked and a successor spawned
    Locked(LockEvent),
    /// The game ended during this tick
    ToppedOut,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    queue: PieceQueue,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Monotonic id for spawned pieces (increments only on successful spawn).
    piece_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    lines: u32,
    level: u32,
    drop_interval_ms: u32,
    game_over: bool,
}

impl GameState {
    /// Create a new game with the given RNG seed and spawn the first piece
    pub fn new(seed: u32) -> Self {
        Self::with_queue(PieceQueue::new(seed))
    }

    /// Create a new game drawing pieces from `queue`
    pub fn with_queue(queue: PieceQueue) -> Self {
        Self::from_board(Board::new(), queue)
    }

    /// Start a game on a prepared board.
    ///
    /// If the first piece cannot spawn on that board the game is over from
    /// the start.
    /// [`GameState::reset`] still returns to an empty board.
    pub fn from_board(board: Board, queue: PieceQueue) -> Self {
        let mut state = Self {
            board,
            active: None,
            queue,
            episode_id: 0,
            piece_id: 0,
            last_event: None,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: drop_interval_ms(1),
            game_over: false,
        };
        state.spawn_piece();
        state
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Current gravity interval; the caller re-arms its timer when this changes
    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// The falling piece; `None` once a blocked spawn has ended the game
    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Locked cells only; the active piece is never part of the board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Start over: empty board, zeroed progress, level 1, fresh piece.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.last_event = None;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_interval_ms = drop_interval_ms(1);
        self.game_over = false;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.spawn_piece();
        info!("game reset (episode {})", self.episode_id);
    }

    /// Draw the next piece and place it at the spawn position.
    ///
    /// Ends the game when the spawn position is already blocked.
    fn spawn_piece(&mut self) -> bool {
        let piece = Tetromino::new(self.queue.draw());

        if collides(&piece.shape, &self.board, piece.x, piece.y) {
            self.active = None;
            self.game_over = true;
            info!(
                "game over: {:?} cannot spawn (score {}, lines {}, level {})",
                piece.kind, self.score, self.lines, self.level
            );
            return false;
        }

        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    fn playable_piece(&self) -> Option<Tetromino> {
        if self.game_over {
            return None;
        }
        self.active
    }

    /// Shift the piece one column; returns whether it moved.
    pub fn move_horizontal(&mut self, dir: Direction) -> bool {
        let Some(active) = self.playable_piece() else {
            return false;
        };

        let x = active.x + dir.dx();
        if collides(&active.shape, &self.board, x, active.y) {
            return false;
        }

        self.active = Some(Tetromino { x, ..active });
        true
    }

    /// Rotate the piece clockwise in place; returns whether it rotated.
    ///
    /// There are no wall kicks: if the rotated matrix does not fit at the
    /// current position the piece keeps its old shape.
    pub fn rotate(&mut self) -> bool {
        let Some(active) = self.playable_piece() else {
            return false;
        };

        let shape = active.shape.rotated_cw();
        if collides(&shape, &self.board, active.x, active.y) {
            return false;
        }

        self.active = Some(Tetromino { shape, ..active });
        true
    }

    /// One gravity step (timer tick or soft drop).
    pub fn tick(&mut self) -> TickOutcome {
        let Some(active) = self.playable_piece() else {
            return TickOutcome::Idle;
        };

        let y = active.y + 1;
        if !collides(&active.shape, &self.board, active.x, y) {
            self.active = Some(Tetromino { y, ..active });
            return TickOutcome::Moved;
        }

        // Cannot fall while still at the top: the stack has reached the ceiling.
        if active.y <= TOP_OUT_MAX_Y {
            self.game_over = true;
            info!(
                "game over: {:?} blocked at y={} (score {}, lines {}, level {})",
                active.kind, active.y, self.score, self.lines, self.level
            );
            return TickOutcome::ToppedOut;
        }

        let event = self.lock_piece(active);
        if self.spawn_piece() {
            TickOutcome::Locked(event)
        } else {
            TickOutcome::ToppedOut
        }
    }

    /// Merge the piece, clear rows and update progress.
    fn lock_piece(&mut self, piece: Tetromino) -> LockEvent {
        self.board.merge(&piece.shape, piece.kind, piece.x, piece.y);
        self.active = None;

        let lines_cleared = self.board.clear_full_rows();
        let mut event = LockEvent {
            lines_cleared,
            ..LockEvent::default()
        };

        if lines_cleared > 0 {
            // Score with the level in effect before this clear.
            event.score_gained = line_clear_score(lines_cleared, self.level);
            self.score = self.score.saturating_add(event.score_gained);
            self.lines = self.lines.saturating_add(lines_cleared);

            let level = level_after_clear(self.level, self.lines);
            if level != self.level {
                self.level = level;
                self.drop_interval_ms = drop_interval_ms(level);
                event.leveled_up = true;
                info!(
                    "level {} reached, drop interval {}ms",
                    level, self.drop_interval_ms
                );
            }
        }

        debug!(
            "locked {:?} at ({}, {}), cleared {} (score {})",
            piece.kind, piece.x, piece.y, lines_cleared, self.score
        );

        self.last_event = Some(event);
        event
    }

    /// Apply a player action.
    ///
    /// `Pause` is not engine state and always returns false here.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_horizontal(Direction::Left),
            GameAction::MoveRight => self.move_horizontal(Direction::Right),
            GameAction::SoftDrop => self.tick() != TickOutcome::Idle,
            GameAction::Rotate => self.rotate(),
            GameAction::Restart => {
                self.reset();
                true
            }
            GameAction::Pause => false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::catalog_shape;
    use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

    fn scripted(kinds: &[PieceKind]) -> GameState {
        GameState::with_queue(PieceQueue::cycle(kinds))
    }

    fn fill_row_except(state: &mut GameState, y: i8, holes: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            if !holes.contains(&x) {
                state.board.set(x, y, Some(PieceKind::Z));
            }
        }
    }

    fn tick_until_locked(state: &mut GameState) -> TickOutcome {
        for _ in 0..BOARD_HEIGHT as usize + 2 {
            match state.tick() {
                TickOutcome::Moved => continue,
                other => return other,
            }
        }
        panic!("piece never locked");
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.lines, 0);
        assert_eq!(state.drop_interval_ms, 1000);
        assert_eq!(state.episode_id, 0);
        assert_eq!(state.piece_id, 1);
        assert!(state.active.is_some());
        assert!(state.board.is_empty());
    }

    #[test]
    fn test_spawn_position_is_centered() {
        let state = scripted(&[PieceKind::I]);
        let active = state.active.unwrap();
        assert_eq!((active.x, active.y), (3, 0));

        let state = scripted(&[PieceKind::O]);
        let active = state.active.unwrap();
        assert_eq!((active.x, active.y), (4, 0));
    }

    #[test]
    fn test_move_horizontal() {
        let mut state = scripted(&[PieceKind::T]);
        let x = state.active.unwrap().x;

        assert!(state.move_horizontal(Direction::Right));
        assert_eq!(state.active.unwrap().x, x + 1);
        assert!(state.move_horizontal(Direction::Left));
        assert_eq!(state.active.unwrap().x, x);
    }

    #[test]
    fn test_move_blocked_by_locked_cell() {
        let mut state = scripted(&[PieceKind::O]);
        state.board.set(3, 0, Some(PieceKind::J));
        assert!(!state.move_horizontal(Direction::Left));
        assert_eq!(state.active.unwrap().x, 4);
        assert!(state.move_horizontal(Direction::Right));
    }

    #[test]
    fn test_rotate_changes_shape() {
        let mut state = scripted(&[PieceKind::T]);
        state.tick();
        assert!(state.rotate());
        assert_eq!(
            state.active.unwrap().shape,
            catalog_shape(PieceKind::T).rotated_cw()
        );
    }

    #[test]
    fn test_rotate_rejected_without_kick() {
        // Vertical I against the left wall: matrix column 1 sits on x=0.
        let mut state = scripted(&[PieceKind::I]);
        while state.move_horizontal(Direction::Left) {}
        assert_eq!(state.active.unwrap().x, -1);

        let before = state.active.unwrap();
        // The flat I would need column -1.
        assert!(!state.rotate());
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_rotate_o_is_accepted_and_unchanged() {
        let mut state = scripted(&[PieceKind::O]);
        let before = state.active.unwrap();
        assert!(state.rotate());
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_tick_moves_down() {
        let mut state = scripted(&[PieceKind::T]);
        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.active.unwrap().y, 1);
        assert!(state.board.is_empty());
    }

    #[test]
    fn test_lock_spawns_successor() {
        let mut state = scripted(&[PieceKind::O, PieceKind::T]);
        let outcome = tick_until_locked(&mut state);

        assert_eq!(outcome, TickOutcome::Locked(LockEvent::default()));
        assert_eq!(state.active.unwrap().kind, PieceKind::T);
        assert_eq!(state.piece_id, 2);
        assert_eq!(state.board.occupied_count(), 4);
        assert_eq!(state.take_last_event(), Some(LockEvent::default()));
        assert_eq!(state.take_last_event(), None);
    }

    #[test]
    fn test_single_line_clear_scores_level() {
        let mut state = scripted(&[PieceKind::I]);
        fill_row_except(&mut state, 19, &[4]);

        let outcome = tick_until_locked(&mut state);

        assert_eq!(
            outcome,
            TickOutcome::Locked(LockEvent {
                lines_cleared: 1,
                score_gained: 100,
                leveled_up: false,
            })
        );
        assert_eq!(state.lines, 1);
        assert_eq!(state.score, 100);
        // The three remaining I cells fell one row.
        assert_eq!(state.board.occupied_count(), 3);
        assert!(state.board.is_occupied(4, 19));
        assert!(!state.board.is_occupied(4, 16));
    }

    #[test]
    fn test_multi_clear_uses_pre_clear_level() {
        let mut state = scripted(&[PieceKind::I]);
        state.level = 3;
        state.lines = 28;
        for y in 16..20 {
            fill_row_except(&mut state, y, &[4]);
        }

        let outcome = tick_until_locked(&mut state);

        assert_eq!(
            outcome,
            TickOutcome::Locked(LockEvent {
                lines_cleared: 4,
                score_gained: 1200,
                leveled_up: true,
            })
        );
        assert_eq!(state.score, 1200);
        assert_eq!(state.lines, 32);
        assert_eq!(state.level, 4);
        assert_eq!(state.drop_interval_ms, 450);
        assert!(state.board.is_empty());
    }

    #[test]
    fn test_level_up_at_most_once_per_tick() {
        let mut state = scripted(&[PieceKind::I]);
        // Already far past several thresholds for level 1.
        state.lines = 35;
        fill_row_except(&mut state, 19, &[4]);

        tick_until_locked(&mut state);

        assert_eq!(state.lines, 36);
        assert_eq!(state.level, 2);
        assert_eq!(state.drop_interval_ms, 700);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_no_level_up_below_threshold() {
        let mut state = scripted(&[PieceKind::I]);
        state.lines = 8;
        fill_row_except(&mut state, 19, &[4]);
        tick_until_locked(&mut state);
        assert_eq!(state.lines, 9);
        assert_eq!(state.level, 1);
        assert_eq!(state.drop_interval_ms, 1000);
    }

    #[test]
    fn test_top_out_heuristic_does_not_merge() {
        let mut state = scripted(&[PieceKind::O]);
        // O at (4,0) can reach y=1 and then hits row 3.
        fill_row_except(&mut state, 3, &[0]);

        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.tick(), TickOutcome::ToppedOut);
        assert!(state.game_over);
        assert_eq!(state.board.occupied_count(), 9);
        assert_eq!(state.take_last_event(), None);
    }

    #[test]
    fn test_spawn_blocked_ends_game_after_lock() {
        let mut state = scripted(&[PieceKind::O, PieceKind::T]);
        // The T spawns at x=4 covering (4..=6, 1); the O never touches column 6.
        state.board.set(6, 1, Some(PieceKind::L));

        let outcome = tick_until_locked(&mut state);

        assert_eq!(outcome, TickOutcome::ToppedOut);
        assert!(state.game_over);
        assert!(state.active.is_none());
        // The O was merged before the failed spawn.
        assert_eq!(state.board.occupied_count(), 5);
        assert!(state.take_last_event().is_some());
    }

    #[test]
    fn test_everything_is_noop_after_game_over() {
        let mut state = scripted(&[PieceKind::O]);
        state.game_over = true;
        let before = state.active;

        assert!(!state.move_horizontal(Direction::Left));
        assert!(!state.rotate());
        assert_eq!(state.tick(), TickOutcome::Idle);
        assert!(!state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.active, before);
    }

    #[test]
    fn test_noop_without_active_piece() {
        let mut state = scripted(&[PieceKind::O]);
        state.active = None;
        assert!(!state.move_horizontal(Direction::Right));
        assert!(!state.rotate());
        assert_eq!(state.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_reset_restores_initial_progress() {
        let mut state = scripted(&[PieceKind::O]);
        state.score = 5000;
        state.lines = 40;
        state.level = 5;
        state.drop_interval_ms = 400;
        state.game_over = true;
        state.board.set(0, 19, Some(PieceKind::I));

        state.reset();

        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.drop_interval_ms, 1000);
        assert!(state.board.is_empty());
        assert_eq!(state.episode_id, 1);
        assert_eq!(state.active.unwrap().y, 0);
    }

    #[test]
    fn test_apply_action_dispatch() {
        let mut state = scripted(&[PieceKind::T]);
        assert!(state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active.unwrap().x, 3);
        assert!(state.apply_action(GameAction::MoveRight));
        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.active.unwrap().y, 1);
        assert!(state.apply_action(GameAction::Rotate));
        assert!(!state.apply_action(GameAction::Pause));
        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.episode_id, 1);
    }

    #[test]
    fn test_snapshot_keeps_active_off_the_board() {
        let state = scripted(&[PieceKind::O]);
        let snap = state.snapshot();

        assert!(snap.board.iter().flatten().all(|c| c.is_none()));
        let active = snap.active.unwrap();
        assert_eq!((active.kind, active.x, active.y), (PieceKind::O, 4, 0));
        assert_eq!(snap.visible_cell(4, 0), Some(PieceKind::O));
        assert_eq!(snap.visible_cell(3, 0), None);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.drop_interval_ms, 1000);
    }
}
