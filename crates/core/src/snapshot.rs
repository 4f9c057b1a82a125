use crate::pieces::Mask;
use crate::types::{PieceKind, Phase, BOARD_HEIGHT, BOARD_WIDTH, NO_COMBO};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub mask: Mask,
    pub x: i8,
    pub y: i8,
}

/// Read-only view of a session for one rendered frame.
///
/// `board` holds piece ids (0 = empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next: Option<PieceKind>,
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub new_record: bool,
    pub level: u32,
    pub lines: u32,
    pub combo: i32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.hold = None;
        self.can_hold = true;
        self.next = None;
        self.phase = Phase::Playing;
        self.score = 0;
        self.high_score = 0;
        self.new_record = false;
        self.level = 1;
        self.lines = 0;
        self.combo = NO_COMBO;
        self.drop_interval_ms = 0;
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            can_hold: true,
            next: None,
            phase: Phase::Playing,
            score: 0,
            high_score: 0,
            new_record: false,
            level: 1,
            lines: 0,
            combo: NO_COMBO,
            drop_interval_ms: 0,
        };
        s.clear();
        s
    }
}
