//! Game engine - ties field, pieces, supply and scoring together
//!
//! The engine holds the current, next and held piece, applies commands,
//! runs gravity from an externally driven tick, locks pieces, clears rows
//! and keeps score. It never schedules time itself: the caller invokes
//! [`GameEngine::tick`] once per frame with the elapsed milliseconds.
//!
//! Every command is a no-op returning a failure value while the game is
//! paused or over. Once over, only [`GameEngine::reset`] changes state.

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::config::{ConfigError, EngineConfig};
use crate::field::Field;
use crate::piece::Piece;
use crate::rng::PieceSupply;
use crate::rotation::{rotate_with_kicks, RotationOutcome};
use crate::scoring::ScoreState;
use crate::snapshot::GameSnapshot;
use crate::types::{GameCommand, GameEvent, GameStatus, PieceKind};

/// Undrained events kept before the oldest are dropped
pub const EVENT_QUEUE_CAPACITY: usize = 32;

/// Complete state of one game
#[derive(Debug, Clone)]
pub struct GameEngine {
    field: Field,
    supply: PieceSupply,
    current: Piece,
    next: Piece,
    held: Option<PieceKind>,
    can_hold: bool,
    scoring: ScoreState,
    game_over: bool,
    paused: bool,
    fall_accumulator_ms: u32,
    fall_interval_ms: u32,
    /// Notifications not yet drained by the caller
    events: ArrayVec<GameEvent, EVENT_QUEUE_CAPACITY>,
}

impl GameEngine {
    /// Build an engine and deal the first two pieces.
    ///
    /// Fails only for zero board dimensions.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let field = Field::new(config.width, config.height)?;
        Ok(Self::with_field(field, config))
    }

    fn with_field(field: Field, config: EngineConfig) -> Self {
        let width = field.width();
        let mut supply = PieceSupply::new(config.seed);
        let current = Piece::spawn(supply.next(), width);
        let next = Piece::spawn(supply.next(), width);

        let mut engine = Self {
            field,
            supply,
            current,
            next,
            held: None,
            can_hold: true,
            scoring: ScoreState::default(),
            game_over: false,
            paused: false,
            fall_accumulator_ms: 0,
            fall_interval_ms: config.fall_interval_ms,
            events: ArrayVec::new(),
        };
        engine.check_spawn();
        engine
    }

    /// Start over: empty field, zeroed counters, a fresh supply.
    ///
    /// The new supply is seeded from the old one's RNG state, so each game
    /// gets a different sequence while staying reproducible from the first
    /// seed. The fall interval is kept.
    pub fn reset(&mut self) {
        let width = self.field.width();
        self.field.clear();
        self.supply = PieceSupply::new(self.supply.seed());
        self.current = Piece::spawn(self.supply.next(), width);
        self.next = Piece::spawn(self.supply.next(), width);
        self.held = None;
        self.can_hold = true;
        self.scoring = ScoreState::default();
        self.game_over = false;
        self.paused = false;
        self.fall_accumulator_ms = 0;
        self.events.clear();
        self.push_event(GameEvent::Reset);
        debug!(seed = self.supply.seed(), "game reset");
        self.check_spawn();
    }

    fn is_active(&self) -> bool {
        !self.game_over && !self.paused
    }

    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Active
        }
    }

    /// Shift the current piece; commits only if the shifted copy fits
    fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let candidate = self.current.translated(dx, dy);
        if self.field.is_valid_placement(&candidate, candidate.x, candidate.y) {
            self.current = candidate;
            return true;
        }
        false
    }

    /// Move the current piece by (dx, dy) if the target is free
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.try_move(dx, dy)
    }

    /// Rotate clockwise, trying wall kicks when the plain rotation collides
    pub fn rotate(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        let outcome = rotate_with_kicks(&self.field, &mut self.current);
        if let RotationOutcome::Kicked { dx, dy } = outcome {
            trace!(dx, dy, kind = ?self.current.kind, "wall kick");
        }
        outcome.succeeded()
    }

    /// Move down one row. Returns false and locks the piece when it cannot.
    pub fn soft_drop(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        if self.try_move(0, 1) {
            return true;
        }
        self.lock();
        false
    }

    /// Drop to the lowest reachable row and lock; returns rows descended
    pub fn hard_drop(&mut self) -> u32 {
        if !self.is_active() {
            return 0;
        }
        let mut distance = 0;
        while self.try_move(0, 1) {
            distance += 1;
        }
        self.lock();
        distance
    }

    /// Put the current piece in the hold slot, once per lock.
    ///
    /// With an empty slot the next piece becomes current; otherwise the held
    /// kind is swapped in at its spawn position and the current piece's
    /// position and rotation are dropped.
    pub fn hold(&mut self) -> bool {
        if !self.is_active() || !self.can_hold {
            return false;
        }

        let width = self.field.width();
        let kind = self.current.kind;
        match self.held.replace(kind) {
            Some(held_kind) => {
                self.current = Piece::spawn(held_kind, width);
            }
            None => {
                self.current = self.next;
                self.current.reset_spawn(width);
                self.next = Piece::spawn(self.supply.next(), width);
            }
        }

        self.can_hold = false;
        self.push_event(GameEvent::Held { kind });
        debug!(held = ?kind, current = ?self.current.kind, "hold");
        self.check_spawn();
        true
    }

    /// Advance gravity by `elapsed_ms`.
    ///
    /// While `fast_fall` is set the accumulator is frozen and the caller is
    /// expected to drive descent with [`soft_drop`](Self::soft_drop).
    /// Returns true when a gravity step ran.
    pub fn tick(&mut self, elapsed_ms: u32, fast_fall: bool) -> bool {
        if !self.is_active() || fast_fall {
            return false;
        }

        self.fall_accumulator_ms = self.fall_accumulator_ms.saturating_add(elapsed_ms);
        if self.fall_accumulator_ms < self.fall_interval_ms {
            return false;
        }

        self.fall_accumulator_ms = 0;
        trace!(y = self.current.y, "gravity step");
        if !self.try_move(0, 1) {
            self.lock();
        }
        true
    }

    /// Pause or resume; refused once the game is over
    pub fn toggle_pause(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Fix the current piece into the field, score, and bring in the next piece
    fn lock(&mut self) {
        let piece = self.current;
        self.field.place(&piece, piece.x, piece.y);
        let cleared = self.field.clear_full_rows() as u32;

        self.push_event(GameEvent::Locked { kind: piece.kind });
        debug!(kind = ?piece.kind, x = piece.x, y = piece.y, cleared, "piece locked");

        if let Some(result) = self.scoring.record_lock(cleared) {
            debug!(
                points = result.total,
                combo = self.scoring.combo,
                back_to_back = self.scoring.back_to_back,
                b2b_applied = result.b2b_applied,
                "lines cleared"
            );
            self.push_event(GameEvent::LinesCleared {
                lines: cleared,
                points: result.total,
                combo: self.scoring.combo,
                back_to_back: self.scoring.back_to_back,
            });
        }

        self.spawn_next();
    }

    /// Promote the next piece and draw a new one
    fn spawn_next(&mut self) {
        let width = self.field.width();
        self.current = self.next;
        self.current.reset_spawn(width);
        self.next = Piece::spawn(self.supply.next(), width);
        self.can_hold = true;
        self.check_spawn();
    }

    /// End the game if the current piece does not fit where it spawned
    fn check_spawn(&mut self) {
        if self.game_over {
            return;
        }
        if !self
            .field
            .is_valid_placement(&self.current, self.current.x, self.current.y)
        {
            self.game_over = true;
            self.push_event(GameEvent::GameOver {
                score: self.scoring.score,
            });
            info!(score = self.scoring.score, lines = self.scoring.lines_cleared, "game over");
        }
    }

    /// Dispatch a command by value.
    ///
    /// Drops report whether the engine accepted the command; `hard_drop`'s
    /// distance is only available through the method itself.
    pub fn apply_command(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::MoveLeft => self.move_piece(-1, 0),
            GameCommand::MoveRight => self.move_piece(1, 0),
            GameCommand::SoftDrop => self.soft_drop(),
            GameCommand::HardDrop => {
                let accepted = self.is_active();
                self.hard_drop();
                accepted
            }
            GameCommand::Rotate => self.rotate(),
            GameCommand::Hold => self.hold(),
            GameCommand::Pause => self.toggle_pause(),
            GameCommand::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Queue an event, dropping the oldest one when the queue is full
    fn push_event(&mut self, event: GameEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Drain queued notifications, oldest first.
    ///
    /// At most [`EVENT_QUEUE_CAPACITY`] are kept between drains; callers
    /// that care about every event should drain once per frame.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Kinds queued after `next`, without consuming them
    pub fn preview(&mut self, count: usize) -> Vec<PieceKind> {
        self.supply.peek(count)
    }

    /// Row the current piece would land on if dropped now
    pub fn ghost_row(&self) -> i32 {
        self.field.ghost_row(&self.current, self.current.x, self.current.y)
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn current(&self) -> Piece {
        self.current
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.scoring.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.scoring.lines_cleared
    }

    pub fn combo(&self) -> u32 {
        self.scoring.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.scoring.max_combo
    }

    pub fn back_to_back(&self) -> bool {
        self.scoring.back_to_back
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Change gravity speed; takes effect on the next tick
    pub fn set_fall_interval_ms(&mut self, interval_ms: u32) {
        self.fall_interval_ms = interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.field.width(),
            height: self.field.height(),
            board: self.field.cells().to_vec(),
            current: self.current.into(),
            ghost_y: self.ghost_row(),
            next: self.next.kind,
            held: self.held,
            can_hold: self.can_hold,
            score: self.scoring.score,
            lines_cleared: self.scoring.lines_cleared,
            combo: self.scoring.combo,
            max_combo: self.scoring.max_combo,
            back_to_back: self.scoring.back_to_back,
            paused: self.paused,
            game_over: self.game_over,
            fall_interval_ms: self.fall_interval_ms,
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::with_field(Field::default(), EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    const FILL: Option<Color> = Some(Color(0x808080));

    fn new_engine() -> GameEngine {
        GameEngine::new(EngineConfig {
            seed: 12345,
            ..EngineConfig::default()
        })
        .unwrap()
    }

    fn set_current(engine: &mut GameEngine, piece: Piece) {
        assert!(engine.field.is_valid_placement(&piece, piece.x, piece.y));
        engine.current = piece;
    }

    /// Fill rows `rows` completely except for the columns in `gaps`
    fn fill_rows(engine: &mut GameEngine, rows: std::ops::Range<i32>, gaps: &[i32]) {
        for y in rows {
            for x in 0..engine.field.width() as i32 {
                if !gaps.contains(&x) {
                    engine.field.set(x, y, FILL);
                }
            }
        }
    }

    /// Horizontal I sitting over columns 3..=6
    fn flat_i() -> Piece {
        Piece {
            kind: PieceKind::I,
            rotation: 0,
            x: 3,
            y: 0,
        }
    }

    /// Vertical I covering column 0
    fn upright_i() -> Piece {
        Piece {
            kind: PieceKind::I,
            rotation: 1,
            x: -2,
            y: 0,
        }
    }

    #[test]
    fn test_new_engine_state() {
        let engine = new_engine();
        assert_eq!(engine.status(), GameStatus::Active);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.lines_cleared(), 0);
        assert_eq!(engine.combo(), 0);
        assert_eq!(engine.max_combo(), 0);
        assert!(!engine.back_to_back());
        assert!(engine.can_hold());
        assert!(engine.held().is_none());
        assert_eq!(engine.current().rotation, 0);
        assert_eq!((engine.current().x, engine.current().y), (4, 0));
    }

    #[test]
    fn test_first_pieces_come_from_the_supply() {
        let engine = new_engine();
        let mut supply = PieceSupply::new(12345);
        assert_eq!(engine.current().kind, supply.next());
        assert_eq!(engine.next().kind, supply.next());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let result = GameEngine::new(EngineConfig {
            width: 0,
            ..EngineConfig::default()
        });
        assert_eq!(result.err(), Some(ConfigError::ZeroWidth));
    }

    #[test]
    fn test_move_commits_only_valid_targets() {
        let mut engine = new_engine();
        set_current(&mut engine, Piece::spawn(PieceKind::O, 10));

        assert!(engine.move_piece(1, 0));
        assert_eq!(engine.current().x, 5);
        assert!(engine.move_piece(-1, 0));
        assert_eq!(engine.current().x, 4);
        assert!(!engine.move_piece(0, -1));
        assert_eq!(engine.current().y, 0);

        let mut moved = 0;
        while engine.move_piece(-1, 0) {
            moved += 1;
        }
        assert_eq!(moved, 4);
        assert_eq!(engine.current().x, 0);
    }

    #[test]
    fn test_four_rotations_return_to_start() {
        let mut engine = new_engine();
        set_current(&mut engine, Piece::spawn(PieceKind::T, 10).translated(0, 5));
        let start = engine.current();

        for _ in 0..4 {
            assert!(engine.rotate());
        }
        assert_eq!(engine.current(), start);
    }

    #[test]
    fn test_failed_rotation_leaves_piece_alone() {
        let mut engine = new_engine();
        // One-column well at column 0 holding a vertical I.
        fill_rows(&mut engine, 0..20, &[0]);
        let piece = upright_i().translated(0, 8);
        set_current(&mut engine, piece);

        assert!(!engine.rotate());
        assert_eq!(engine.current(), piece);
    }

    #[test]
    fn test_soft_drop_locks_on_landing() {
        let mut engine = new_engine();
        set_current(&mut engine, Piece::spawn(PieceKind::O, 10).translated(-4, 17));

        assert!(engine.soft_drop());
        assert_eq!(engine.current().y, 18);
        assert!(!engine.soft_drop());

        let color = Some(PieceKind::O.color());
        assert_eq!(engine.field().get(0, 18), Some(color));
        assert_eq!(engine.field().get(1, 19), Some(color));
        assert_eq!(engine.current().y, 0);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_hard_drop_reports_distance() {
        let mut engine = new_engine();
        set_current(&mut engine, Piece::spawn(PieceKind::O, 10));
        let next_kind = engine.next().kind;

        assert_eq!(engine.ghost_row(), 18);
        assert_eq!(engine.hard_drop(), 18);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.current().kind, next_kind);
        assert!(engine.can_hold());

        let events = engine.take_events();
        assert_eq!(events, vec![GameEvent::Locked { kind: PieceKind::O }]);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_single_then_combo_single() {
        let mut engine = new_engine();

        fill_rows(&mut engine, 19..20, &[3, 4, 5, 6]);
        set_current(&mut engine, flat_i());
        engine.hard_drop();
        assert_eq!(engine.score(), 40);
        assert_eq!(engine.combo(), 1);
        assert_eq!(engine.lines_cleared(), 1);

        fill_rows(&mut engine, 19..20, &[3, 4, 5, 6]);
        set_current(&mut engine, flat_i());
        engine.hard_drop();
        assert_eq!(engine.score(), 40 + 90);
        assert_eq!(engine.combo(), 2);
        assert_eq!(engine.max_combo(), 2);
        assert_eq!(engine.lines_cleared(), 2);
        assert!(!engine.back_to_back());
    }

    #[test]
    fn test_back_to_back_tetrises() {
        let mut engine = new_engine();

        fill_rows(&mut engine, 16..20, &[0]);
        set_current(&mut engine, upright_i());
        assert_eq!(engine.hard_drop(), 16);
        assert_eq!(engine.score(), 1200);
        assert!(engine.back_to_back());
        assert!(engine.field().cells().iter().all(|c| c.is_none()));

        let events = engine.take_events();
        let cleared: Vec<_> = events.iter().filter(|e| e.is_tetris()).collect();
        assert_eq!(cleared.len(), 1);

        fill_rows(&mut engine, 16..20, &[0]);
        set_current(&mut engine, upright_i());
        engine.hard_drop();
        // (1200 + 50 combo bonus) * 3 / 2
        assert_eq!(engine.score(), 1200 + 1875);
        assert!(engine.back_to_back());
        assert_eq!(engine.lines_cleared(), 8);
    }

    #[test]
    fn test_lock_without_clear_resets_combo() {
        let mut engine = new_engine();
        fill_rows(&mut engine, 19..20, &[3, 4, 5, 6]);
        set_current(&mut engine, flat_i());
        engine.hard_drop();
        assert_eq!(engine.combo(), 1);

        set_current(&mut engine, Piece::spawn(PieceKind::O, 10));
        engine.hard_drop();
        assert_eq!(engine.combo(), 0);
        assert_eq!(engine.max_combo(), 1);
        assert_eq!(engine.score(), 40);
    }

    #[test]
    fn test_hold_into_empty_slot() {
        let mut engine = new_engine();
        let mut supply = PieceSupply::new(12345);
        let first = supply.next();
        let second = supply.next();
        let third = supply.next();

        engine.move_piece(1, 0);
        assert!(engine.hold());
        assert_eq!(engine.held(), Some(first));
        assert_eq!(engine.current(), Piece::spawn(second, 10));
        assert_eq!(engine.next().kind, third);
        assert!(!engine.can_hold());

        assert!(!engine.hold());
        assert_eq!(engine.held(), Some(first));
        assert_eq!(engine.current().kind, second);
    }

    #[test]
    fn test_hold_swaps_after_lock() {
        let mut engine = new_engine();
        let first = engine.current().kind;
        assert!(engine.hold());
        let second = engine.current().kind;

        engine.hard_drop();
        assert!(engine.can_hold());
        let third = engine.current().kind;

        engine.rotate();
        engine.move_piece(-1, 0);
        assert!(engine.hold());
        assert_eq!(engine.current(), Piece::spawn(first, 10));
        assert_eq!(engine.held(), Some(third));
        assert_ne!(second, third);
    }

    #[test]
    fn test_tick_accumulates_to_interval() {
        let mut engine = new_engine();
        let y = engine.current().y;

        assert!(!engine.tick(799, false));
        assert_eq!(engine.current().y, y);
        assert!(engine.tick(1, false));
        assert_eq!(engine.current().y, y + 1);

        // Accumulator restarted from zero.
        assert!(!engine.tick(400, false));
        assert_eq!(engine.current().y, y + 1);
    }

    #[test]
    fn test_fast_fall_suspends_gravity() {
        let mut engine = new_engine();
        let y = engine.current().y;

        assert!(!engine.tick(5000, true));
        assert_eq!(engine.current().y, y);
        assert!(!engine.tick(799, false));
        assert_eq!(engine.current().y, y);
    }

    #[test]
    fn test_tick_locks_grounded_piece() {
        let mut engine = new_engine();
        set_current(&mut engine, Piece::spawn(PieceKind::O, 10).translated(0, 18));

        assert!(engine.tick(800, false));
        assert_eq!(engine.field().get(4, 19), Some(Some(PieceKind::O.color())));
        assert_eq!(engine.current().y, 0);
    }

    #[test]
    fn test_fall_interval_is_adjustable() {
        let mut engine = new_engine();
        engine.set_fall_interval_ms(100);
        assert_eq!(engine.fall_interval_ms(), 100);
        assert!(engine.tick(100, false));
    }

    #[test]
    fn test_pause_blocks_commands() {
        let mut engine = new_engine();
        assert!(engine.toggle_pause());
        assert_eq!(engine.status(), GameStatus::Paused);

        let before = engine.current();
        assert!(!engine.move_piece(1, 0));
        assert!(!engine.rotate());
        assert!(!engine.soft_drop());
        assert_eq!(engine.hard_drop(), 0);
        assert!(!engine.hold());
        assert!(!engine.tick(10_000, false));
        assert_eq!(engine.current(), before);

        assert!(engine.toggle_pause());
        assert_eq!(engine.status(), GameStatus::Active);
        assert!(engine.move_piece(1, 0));
    }

    /// Leaves a game that has just ended: the spawn area is blocked and the
    /// locked piece's replacement could not fit.
    fn ended_engine() -> GameEngine {
        let mut engine = new_engine();
        // Rows 0 and 1 blocked in the middle but never full.
        for y in 0..2 {
            for x in 1..9 {
                engine.field.set(x, y, FILL);
            }
        }
        engine.current = Piece::spawn(PieceKind::O, 10).translated(-4, 18);
        assert!(!engine.soft_drop());
        engine
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut engine = ended_engine();
        assert!(engine.is_game_over());
        assert_eq!(engine.status(), GameStatus::GameOver);
        assert!(engine.take_events().contains(&GameEvent::GameOver { score: 0 }));
    }

    #[test]
    fn test_game_over_ignores_everything_but_reset() {
        let mut engine = ended_engine();
        let snapshot = engine.snapshot();

        assert!(!engine.move_piece(0, 1));
        assert!(!engine.rotate());
        assert!(!engine.soft_drop());
        assert_eq!(engine.hard_drop(), 0);
        assert!(!engine.hold());
        assert!(!engine.tick(10_000, false));
        assert!(!engine.toggle_pause());
        assert!(!engine.apply_command(GameCommand::HardDrop));
        assert_eq!(engine.snapshot(), snapshot);

        assert!(engine.apply_command(GameCommand::Reset));
        assert_eq!(engine.status(), GameStatus::Active);
        assert!(engine.field().cells().iter().all(|c| c.is_none()));
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.take_events(), vec![GameEvent::Reset]);
    }

    #[test]
    fn test_reset_reinitializes_everything() {
        let mut engine = new_engine();
        fill_rows(&mut engine, 19..20, &[3, 4, 5, 6]);
        set_current(&mut engine, flat_i());
        engine.hard_drop();
        engine.hold();
        engine.set_fall_interval_ms(300);
        engine.toggle_pause();

        engine.reset();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.lines_cleared(), 0);
        assert_eq!(engine.combo(), 0);
        assert_eq!(engine.max_combo(), 0);
        assert!(engine.held().is_none());
        assert!(engine.can_hold());
        assert!(!engine.is_paused());
        assert_eq!(engine.fall_accumulator_ms, 0);
        assert_eq!(engine.fall_interval_ms(), 300);
        assert_eq!(engine.current().y, 0);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut engine = new_engine();
        set_current(&mut engine, Piece::spawn(PieceKind::O, 10));
        let snapshot = engine.snapshot();

        assert_eq!(snapshot.width, 10);
        assert_eq!(snapshot.height, 20);
        assert_eq!(snapshot.board.len(), 200);
        assert_eq!(snapshot.current.kind, PieceKind::O);
        assert_eq!(snapshot.ghost_y, 18);
        assert_eq!(snapshot.next, engine.next().kind);
        assert!(snapshot.playable());
        assert_eq!(snapshot.cell(0, 0), Some(None));
        assert_eq!(snapshot.cell(10, 0), None);
    }

    #[test]
    fn test_preview_matches_later_pieces() {
        let mut engine = new_engine();
        let upcoming = engine.preview(3);
        for kind in upcoming {
            engine.hard_drop();
            assert_eq!(engine.next().kind, kind);
        }
    }

    #[test]
    fn test_apply_command_dispatch() {
        let mut engine = new_engine();
        set_current(&mut engine, Piece::spawn(PieceKind::O, 10));
        assert!(engine.apply_command(GameCommand::MoveLeft));
        assert_eq!(engine.current().x, 3);
        assert!(engine.apply_command(GameCommand::MoveRight));
        assert!(engine.apply_command(GameCommand::SoftDrop));
        assert_eq!(engine.current().y, 1);
        assert!(engine.apply_command(GameCommand::Pause));
        assert!(engine.is_paused());
        assert!(engine.apply_command(GameCommand::Pause));
        assert!(engine.apply_command(GameCommand::HardDrop));
        assert_eq!(engine.current().y, 0);
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut engine = new_engine();
        let mut locks = 0;
        while !engine.is_game_over() {
            engine.hard_drop();
            locks += 1;
        }
        let events = engine.take_events();
        assert!(locks < EVENT_QUEUE_CAPACITY);
        assert_eq!(events.len(), locks + 1);

        // Tall enough that the stack never reaches the top.
        let mut engine = GameEngine::new(EngineConfig {
            height: 200,
            seed: 12345,
            ..EngineConfig::default()
        })
        .unwrap();
        for _ in 0..EVENT_QUEUE_CAPACITY {
            assert!(engine.hold());
            engine.hard_drop();
        }
        assert!(!engine.is_game_over());
        let events = engine.take_events();
        assert_eq!(events.len(), EVENT_QUEUE_CAPACITY);
        // Oldest entries were dropped; the queue ends with the latest lock.
        assert!(matches!(events.last(), Some(GameEvent::Locked { .. })));
        assert!(engine.take_events().is_empty());
    }
}
