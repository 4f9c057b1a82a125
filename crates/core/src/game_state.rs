//! Game state module - one play session
//!
//! Ties together the board, piece masks, the bag randomizer and scoring.
//! Runs the spawn → fall → lock → clear cycle, the hold slot and pause, and
//! queues [`GameEvent`]s for whoever drains them.

use crate::board::Board;
use crate::events::EventSink;
use crate::pieces::{try_rotate, Mask};
use crate::rng::PieceBag;
use crate::scoring::ScoreState;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub mask: Mask,
    /// Column of the mask's top-left corner
    pub x: i8,
    /// Row of the mask's top-left corner
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece in its canonical orientation at the spawn anchor
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            mask: Mask::spawn(kind),
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn fits(&self, board: &Board) -> bool {
        board.can_place(&self.mask, self.x, self.y)
    }

    /// Board cells covered by this piece (may include rows above the top)
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.mask.cells().map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            mask: value.mask,
            x: value.x,
            y: value.y,
        }
    }
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    active: Option<ActivePiece>,
    /// One-piece look-ahead shown in the preview
    next: PieceKind,
    hold: Option<PieceKind>,
    can_hold: bool,
    bag: PieceBag,
    score: ScoreState,
    /// Best score known in memory, raised as soon as it is beaten
    high_score: u32,
    /// High score at session start, for the "new record" banner
    record_to_beat: u32,
    phase: Phase,
    /// Time accumulated since the last automatic fall
    fall_timer_ms: u32,
    events: Vec<GameEvent>,
}

impl Session {
    /// Start a session on an empty board
    pub fn new(seed: u32, high_score: u32) -> Self {
        Self::from_board(seed, high_score, Board::new())
    }

    /// Start a session on a prepared board.
    ///
    /// If the first spawn is blocked the session begins in `GameOver`.
    pub fn from_board(seed: u32, high_score: u32, board: Board) -> Self {
        let mut bag = PieceBag::new(seed);
        let next = bag.draw();

        let mut session = Self {
            board,
            active: None,
            next,
            hold: None,
            can_hold: true,
            bag,
            score: ScoreState::new(),
            high_score,
            record_to_beat: high_score,
            phase: Phase::Playing,
            fall_timer_ms: 0,
            events: Vec::with_capacity(16),
        };
        session.spawn_piece();
        session
    }

    /// Reinitialise all core state: fresh board, zero score, level 1,
    /// empty bag, no hold. The in-memory high score and RNG carry over.
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.bag.clear();
        self.score = ScoreState::new();
        self.record_to_beat = self.high_score;
        self.phase = Phase::Playing;
        self.fall_timer_ms = 0;

        self.next = self.bag.draw();
        self.spawn_piece();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score_state(&self) -> &ScoreState {
        &self.score
    }

    pub fn score(&self) -> u32 {
        self.score.score
    }

    pub fn level(&self) -> u32 {
        self.score.level
    }

    pub fn lines(&self) -> u32 {
        self.score.lines
    }

    pub fn combo(&self) -> i32 {
        self.score.combo
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.score.drop_interval_ms
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Whether this session's score beats the record it started against
    pub fn new_record(&self) -> bool {
        self.score.score > 0 && self.score.score > self.record_to_beat
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn bag(&self) -> &PieceBag {
        &self.bag
    }

    /// Hand queued events to `sink` in emission order
    pub fn drain_events(&mut self, sink: &mut dyn EventSink) {
        for event in self.events.drain(..) {
            sink.notify(event);
        }
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.next = Some(self.next);
        out.phase = self.phase;
        out.score = self.score.score;
        out.high_score = self.high_score;
        out.new_record = self.new_record();
        out.level = self.score.level;
        out.lines = self.score.lines;
        out.combo = self.score.combo;
        out.drop_interval_ms = self.score.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Make the look-ahead piece active and draw a new look-ahead.
    ///
    /// Returns false (and ends the session) if the spawn anchor is blocked.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.next;
        self.next = self.bag.draw();
        self.can_hold = true;

        let piece = ActivePiece::spawn(kind);
        if !piece.fits(&self.board) {
            self.active = None;
            self.end_session();
            return false;
        }

        self.active = Some(piece);
        true
    }

    fn end_session(&mut self) {
        self.phase = Phase::GameOver;
        if self.score.score > self.high_score {
            self.high_score = self.score.score;
        }
        self.events.push(GameEvent::GameOver);
    }

    /// Try to shift the active piece; the move is committed only if it fits
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let (nx, ny) = (active.x + dx, active.y + dy);
        if !self.board.can_place(&active.mask, nx, ny) {
            return false;
        }

        self.active = Some(ActivePiece {
            x: nx,
            y: ny,
            ..active
        });
        true
    }

    /// Rotate clockwise with the in-place / left / right kick
    pub(crate) fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        let Some((mask, x)) = try_rotate(active.kind, &active.mask, active.x, active.y, |m, x, y| {
            board.can_place(m, x, y)
        }) else {
            return false;
        };

        self.active = Some(ActivePiece { mask, x, ..active });
        self.events.push(GameEvent::Rotated);
        true
    }

    /// Move down one row, or lock if the piece is resting
    pub(crate) fn soft_drop(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Drop the active piece as far as it goes and lock it.
    ///
    /// Returns the number of rows travelled.
    pub(crate) fn hard_drop(&mut self) -> u32 {
        let Some(mut active) = self.active else {
            return 0;
        };

        // The floor is solid, so this always stops.
        let mut distance = 0;
        while self.board.can_place(&active.mask, active.x, active.y + 1) {
            active.y += 1;
            distance += 1;
        }

        self.active = Some(active);
        self.events.push(GameEvent::HardDropped);
        self.lock_piece();
        distance
    }

    /// Swap the active piece with the hold slot, once per spawned piece.
    ///
    /// With an empty slot the active piece is stored and the next one spawns.
    /// A swapped-in piece restarts at the spawn anchor without a fit check.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        self.events.push(GameEvent::Held);
        match self.hold.replace(active.kind) {
            Some(held) => {
                self.active = Some(ActivePiece::spawn(held));
            }
            None => {
                self.active = None;
                self.spawn_piece();
            }
        }

        self.can_hold = false;
        true
    }

    /// Write the active piece into the board, clear lines, score, spawn next
    pub fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.lock(&active.mask, active.x, active.y, active.kind);
        self.events.push(GameEvent::Locked);

        let clear = self.board.clear_full_rows();
        let lines = clear.count();
        if lines > 0 {
            self.board = clear.board;
            self.events.push(GameEvent::LinesCleared(lines as u32));
        }

        self.score.apply_lock(lines);
        if self.score.score > self.high_score {
            self.high_score = self.score.score;
        }

        self.spawn_piece();
    }

    /// Landing row of the active piece
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        let mut y = active.y;
        while self.board.can_place(&active.mask, active.x, y + 1) {
            y += 1;
        }
        Some(y)
    }

    /// Advance automatic falling by `elapsed_ms` of wall-clock time.
    ///
    /// Once more than the level's fall interval has accumulated the piece
    /// moves down one row, locking instead if it is resting on something.
    /// Returns true if the piece fell or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Playing || self.active.is_none() {
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms <= self.score.drop_interval_ms {
            return false;
        }

        self.fall_timer_ms = 0;
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Pause a running session when the window loses focus
    pub fn focus_lost(&mut self) {
        if self.phase == Phase::Playing {
            self.phase = Phase::Paused;
        }
    }

    /// Apply one player command.
    ///
    /// Returns true if the command changed anything. Piece commands are
    /// ignored unless the session is `Playing`; `Quit` belongs to the front end.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::TogglePause => {
                self.phase = match self.phase {
                    Phase::Playing => Phase::Paused,
                    Phase::Paused => Phase::Playing,
                    Phase::GameOver => return false,
                };
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
            GameAction::Quit => false,
            _ if self.phase != Phase::Playing => false,
            GameAction::MoveLeft => self.shift(-1),
            GameAction::MoveRight => self.shift(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.try_rotate(),
            GameAction::HardDrop => {
                if self.active.is_none() {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::Hold => self.hold(),
        }
    }

    fn shift(&mut self, dx: i8) -> bool {
        let moved = self.try_move(dx, 0);
        if moved {
            self.events.push(GameEvent::Moved);
        }
        moved
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Seed-search until the active piece is (or is not) an O.
    fn session_where(pred: impl Fn(PieceKind) -> bool) -> Session {
        (1..1000)
            .map(|seed| Session::new(seed, 0))
            .find(|s| s.active.map(|p| pred(p.kind)).unwrap_or(false))
            .unwrap()
    }

    #[test]
    fn test_new_session() {
        let state = Session::new(12345, 700);

        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.score.score, 0);
        assert_eq!(state.score.level, 1);
        assert_eq!(state.score.lines, 0);
        assert_eq!(state.score.combo, NO_COMBO);
        assert_eq!(state.score.drop_interval_ms, 500);
        assert_eq!(state.high_score, 700);
        assert!(state.hold.is_none());
        assert!(state.can_hold);

        let active = state.active.unwrap();
        assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(active.mask, Mask::spawn(active.kind));
    }

    #[test]
    fn test_first_two_pieces_come_from_one_bag() {
        let state = Session::new(12345, 0);
        // Two draws so far: the active piece and the look-ahead.
        assert_eq!(state.bag.remaining().len(), 5);
        assert_ne!(state.active.unwrap().kind, state.next);
    }

    #[test]
    fn test_spawn_uses_lookahead() {
        let mut state = Session::new(12345, 0);
        let next_kind = state.next;

        // Lock on the floor so the spawn area stays clear.
        state.hard_drop();

        assert_eq!(state.active.unwrap().kind, next_kind);
    }

    #[test]
    fn test_try_move() {
        let mut state = Session::new(12345, 0);
        let initial_x = state.active.unwrap().x;

        assert!(state.try_move(1, 0));
        assert_eq!(state.active.unwrap().x, initial_x + 1);

        assert!(state.try_move(-1, 0));
        assert_eq!(state.active.unwrap().x, initial_x);
    }

    #[test]
    fn test_try_move_collision() {
        let mut state = Session::new(12345, 0);

        let mut moved = 0;
        for _ in 0..10 {
            if state.try_move(-1, 0) {
                moved += 1;
            }
        }
        // Every mask starts in column 0 of its box, so the wall is 3 moves away.
        assert_eq!(moved, 3);
        assert_eq!(state.active.unwrap().x, 0);
    }

    #[test]
    fn test_rotation_kicks_off_left_wall() {
        let mut state = session_where(|k| k == PieceKind::T);
        // Upright T occupies box columns 2-3; slide it flush with the wall.
        assert!(state.try_rotate());
        while state.try_move(-1, 0) {}
        assert_eq!(state.active.unwrap().x, -2);

        // Pointing down needs box columns 1-3: in place and one left both
        // poke through the wall, one right fits.
        assert!(state.try_rotate());
        assert_eq!(state.active.unwrap().x, -1);
    }

    #[test]
    fn test_four_rotations_restore_mask() {
        let mut state = session_where(|k| k == PieceKind::I);
        let original = state.active.unwrap().mask;
        for _ in 0..4 {
            assert!(state.try_rotate());
        }
        assert_eq!(state.active.unwrap().mask, original);
    }

    #[test]
    fn test_rotation_rejected_keeps_piece() {
        let mut state = session_where(|k| k == PieceKind::T);
        // Wall off everything the rotated T could use around the spawn anchor.
        for x in 0..BOARD_WIDTH as i8 {
            state.board.set(x, 2, Some(PieceKind::J));
        }
        let before = state.active.unwrap();

        // Rotated T needs row 2 of its box at every kick offset.
        assert!(!state.try_rotate());
        assert_eq!(state.active.unwrap(), before);
        assert!(!state.events.contains(&GameEvent::Rotated));
    }

    #[test]
    fn test_o_piece_ignores_rotation() {
        let mut state = session_where(|k| k == PieceKind::O);
        let before = state.active.unwrap();

        assert!(!state.apply_action(GameAction::Rotate));
        assert_eq!(state.active.unwrap(), before);
    }

    #[test]
    fn test_hard_drop_lands_on_floor() {
        let mut state = session_where(|k| k == PieceKind::I);

        let distance = state.hard_drop();

        assert_eq!(distance, 19);
        for x in 3..7 {
            assert_eq!(state.board.get(x, 19), Some(Some(PieceKind::I)));
        }
        assert_eq!(
            state.events,
            vec![GameEvent::HardDropped, GameEvent::Locked]
        );
        assert!(state.active.is_some());
    }

    #[test]
    fn test_soft_drop_locks_when_resting() {
        let mut state = Session::new(12345, 0);
        let kind = state.active.unwrap().kind;
        let rows = 20 - 1 - Mask::spawn(kind).bottom_row().unwrap() as i8;

        for _ in 0..rows {
            assert!(state.apply_action(GameAction::SoftDrop));
        }
        assert_eq!(state.board.filled_cells(), 0);

        // One more press finds the floor and locks.
        assert!(state.apply_action(GameAction::SoftDrop));
        assert_eq!(state.board.filled_cells(), 4);
        assert!(state.events.contains(&GameEvent::Locked));
    }

    #[test]
    fn test_hold_once_per_piece() {
        let mut state = Session::new(12345, 0);
        let first = state.active.unwrap().kind;
        let second = state.next;

        assert!(state.hold());
        assert_eq!(state.hold, Some(first));
        assert_eq!(state.active.unwrap().kind, second);
        assert!(!state.can_hold);

        // Second hold in the same drop cycle does nothing.
        let before = state.active.unwrap();
        assert!(!state.hold());
        assert_eq!(state.hold, Some(first));
        assert_eq!(state.active.unwrap(), before);

        // After a lock the slot can swap again.
        state.hard_drop();
        let third = state.active.unwrap().kind;
        assert!(state.can_hold);
        assert!(state.hold());
        assert_eq!(state.active.unwrap().kind, first);
        assert_eq!(state.hold, Some(third));
    }

    #[test]
    fn test_hold_swap_reanchors_at_spawn() {
        let mut state = Session::new(12345, 0);
        state.hold();
        state.hard_drop();

        state.try_move(1, 0);
        state.try_move(0, 1);
        state.hold();

        let active = state.active.unwrap();
        assert_eq!((active.x, active.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(active.mask, Mask::spawn(active.kind));
    }

    #[test]
    fn test_lock_piece_clears_lines_and_scores() {
        let mut state = session_where(|k| k == PieceKind::I);
        // Bottom row full except the four columns the I will land in.
        for x in (0..3).chain(7..10) {
            state.board.set(x, 19, Some(PieceKind::L));
        }

        state.hard_drop();

        assert_eq!(state.board.filled_cells(), 0);
        assert_eq!(state.score.score, 40);
        assert_eq!(state.score.lines, 1);
        assert_eq!(state.score.combo, 0);
        assert!(state.events.contains(&GameEvent::LinesCleared(1)));
        assert_eq!(state.high_score, 40);
    }

    #[test]
    fn test_blocked_spawn_ends_session_without_scoring() {
        let mut state = Session::new(12345, 1000);
        state.score.score = 250;
        for x in 3..7 {
            state.board.set(x, 0, Some(PieceKind::Z));
        }

        assert!(!state.spawn_piece());

        assert_eq!(state.phase, Phase::GameOver);
        assert_eq!(state.score.score, 250);
        assert_eq!(state.high_score, 1000);
        assert!(state.active.is_none());
        assert_eq!(state.events.last(), Some(&GameEvent::GameOver));
    }

    #[test]
    fn test_game_over_raises_high_score() {
        let mut state = Session::new(12345, 100);
        state.score.score = 300;
        for x in 3..7 {
            state.board.set(x, 0, Some(PieceKind::Z));
        }
        state.spawn_piece();
        assert_eq!(state.high_score, 300);
        assert!(state.new_record());
    }

    #[test]
    fn test_tick_falls_after_interval() {
        let mut state = Session::new(12345, 0);
        let y0 = state.active.unwrap().y;

        // 31 ticks = 496ms, not past the 500ms interval yet.
        for _ in 0..31 {
            assert!(!state.tick(TICK_MS));
        }
        assert_eq!(state.active.unwrap().y, y0);

        // 512ms is past it.
        assert!(state.tick(TICK_MS));
        assert_eq!(state.active.unwrap().y, y0 + 1);
        assert_eq!(state.fall_timer_ms, 0);
    }

    #[test]
    fn test_tick_exactly_interval_does_not_fall() {
        let mut state = Session::new(12345, 0);
        assert!(!state.tick(500));
        assert!(state.tick(1));
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut state = Session::new(12345, 0);
        let before = state.active.unwrap();

        assert!(state.apply_action(GameAction::TogglePause));
        assert!(state.paused());
        assert!(!state.tick(10_000));
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert_eq!(state.active.unwrap(), before);

        assert!(state.apply_action(GameAction::TogglePause));
        assert_eq!(state.phase, Phase::Playing);
    }

    #[test]
    fn test_focus_lost_pauses() {
        let mut state = Session::new(12345, 0);
        state.focus_lost();
        assert!(state.paused());
        // Focus loss never resumes.
        state.focus_lost();
        assert!(state.paused());
    }

    #[test]
    fn test_restart_resets_core_state() {
        let mut state = Session::new(12345, 0);
        state.hold();
        state.score.score = 999;
        state.high_score = 999;
        state.score.lines = 15;
        state.board.set(0, 19, Some(PieceKind::S));

        assert!(state.apply_action(GameAction::Restart));

        assert_eq!(state.phase, Phase::Playing);
        assert_eq!(state.score, ScoreState::new());
        assert_eq!(state.board.filled_cells(), 0);
        assert!(state.hold.is_none());
        assert!(state.can_hold);
        assert_eq!(state.bag.remaining().len(), 5);
        assert_eq!(state.high_score, 999);
        assert!(!state.new_record());
    }

    #[test]
    fn test_game_over_ignores_commands_until_restart() {
        let mut state = Session::new(12345, 0);
        for x in 3..7 {
            state.board.set(x, 0, Some(PieceKind::Z));
        }
        state.spawn_piece();
        assert!(state.game_over());

        assert!(!state.apply_action(GameAction::TogglePause));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert!(!state.tick(10_000));

        assert!(state.apply_action(GameAction::Restart));
        assert!(!state.game_over());
    }

    #[test]
    fn test_drain_events_in_order() {
        let mut state = session_where(|k| !k.is_rotation_invariant());
        state.apply_action(GameAction::MoveRight);
        state.apply_action(GameAction::Rotate);
        state.apply_action(GameAction::HardDrop);

        let mut sink: Vec<GameEvent> = Vec::new();
        state.drain_events(&mut sink);

        assert_eq!(
            sink,
            vec![
                GameEvent::Moved,
                GameEvent::Rotated,
                GameEvent::HardDropped,
                GameEvent::Locked
            ]
        );
        assert!(state.pending_events().is_empty());
    }

    #[test]
    fn test_ghost_y() {
        let state = session_where(|k| k == PieceKind::O);
        assert_eq!(state.ghost_y(), Some(18));
    }

    #[test]
    fn test_quit_is_not_an_engine_command() {
        let mut state = Session::new(12345, 0);
        assert!(!state.apply_action(GameAction::Quit));
        assert_eq!(state.phase, Phase::Playing);
    }
}
