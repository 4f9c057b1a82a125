//! Shared vocabulary for the Quadra workspace.
//!
//! Everything here is plain data with no dependencies, so the engine, the
//! terminal front end and the key mapping can all agree on the same names.
//!
//! # Board
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn anchor**: (3, 0), the top-left corner of a piece's 4x4 box
//!
//! # Timing and scoring
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed update interval (~60 FPS) |
//! | `BASE_DROP_MS` | 500 | Fall interval at level 1 |
//! | `DROP_STEP_MS` | 50 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Fastest fall interval |
//! | `LINES_PER_LEVEL` | 10 | Cleared lines per level |
//! | `COMBO_BASE` | 50 | Points per combo step (times level) |
//!
//! # Examples
//!
//! ```
//! use quadra_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, SPAWN_X};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(PieceKind::from_id(piece.id()), Some(PieceKind::T));
//! assert!(PieceKind::O.is_rotation_invariant());
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! assert_eq!(SPAWN_X, 3);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of a piece's occupancy mask
pub const MASK_SIZE: usize = 4;

/// Column of the top-left corner of a freshly spawned piece
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Row of the top-left corner of a freshly spawned piece
pub const SPAWN_Y: i8 = 0;

/// Fixed update interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Automatic fall interval at level 1
pub const BASE_DROP_MS: u32 = 500;

/// Fall interval reduction per level above 1
pub const DROP_STEP_MS: u32 = 50;

/// Fall interval floor
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Number of pieces in one randomizer bag
pub const BAG_SIZE: usize = 7;

/// Line clear base points, indexed by lines cleared in one lock.
///
/// Multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Points per combo step, multiplied by the current level
pub const COMBO_BASE: u32 = 50;

/// Combo counter value meaning "no active combo"
pub const NO_COMBO: i32 = -1;

/// The seven tetromino piece kinds
///
/// Ids 1..=7 follow the colour table order:
/// - **I**: cyan bar
/// - **Z**: red
/// - **S**: green
/// - **T**: purple
/// - **O**: yellow square, never rotates
/// - **L**: orange
/// - **J**: blue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I = 1,
    Z = 2,
    S = 3,
    T = 4,
    O = 5,
    L = 6,
    J = 7,
}

impl PieceKind {
    /// All kinds in id order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::T,
        PieceKind::O,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Stable numeric id (1..=7), used for compact board encodings
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Inverse of [`PieceKind::id`]; 0 and anything above 7 are not pieces
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::Z),
            3 => Some(PieceKind::S),
            4 => Some(PieceKind::T),
            5 => Some(PieceKind::O),
            6 => Some(PieceKind::L),
            7 => Some(PieceKind::J),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use quadra_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "z" => Some(PieceKind::Z),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "o" => Some(PieceKind::O),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::O => "o",
            PieceKind::L => "l",
            PieceKind::J => "j",
        }
    }

    /// Display colour as (r, g, b)
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0, 240, 240),
            PieceKind::Z => (240, 0, 0),
            PieceKind::S => (0, 240, 0),
            PieceKind::T => (160, 0, 240),
            PieceKind::O => (240, 240, 0),
            PieceKind::L => (240, 160, 0),
            PieceKind::J => (0, 0, 240),
        }
    }

    /// Whether rotation requests on this kind are ignored outright.
    ///
    /// Only the O square qualifies.
    pub fn is_rotation_invariant(&self) -> bool {
        matches!(self, PieceKind::O)
    }
}

/// Player commands, delivered one at a time in receipt order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one row down, locking it if it cannot move
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Swap with the hold slot (once per piece)
    Hold,
    /// Toggle pause state
    TogglePause,
    /// Reinitialise the session
    Restart,
    /// Leave the game (handled by the front end)
    Quit,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use quadra_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("togglepause"), Some(GameAction::TogglePause));
    /// assert_eq!(GameAction::from_str("rotateCcw"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "hold" => Some(GameAction::Hold),
            "togglepause" => Some(GameAction::TogglePause),
            "restart" => Some(GameAction::Restart),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Hold => "hold",
            GameAction::TogglePause => "togglePause",
            GameAction::Restart => "restart",
            GameAction::Quit => "quit",
        }
    }
}

/// Notifications emitted by the engine for fire-and-forget consumers (sound, logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The active piece moved sideways
    Moved,
    /// The active piece rotated
    Rotated,
    /// A hard drop finished (always followed by `Locked`)
    HardDropped,
    /// The hold slot was used
    Held,
    /// A piece was written into the board
    Locked,
    /// One lock cleared this many rows
    LinesCleared(u32),
    /// A spawn failed; the session is over
    GameOver,
}

impl GameEvent {
    /// Snake-case name for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::Moved => "moved",
            GameEvent::Rotated => "rotated",
            GameEvent::HardDropped => "hard_dropped",
            GameEvent::Held => "held",
            GameEvent::Locked => "locked",
            GameEvent::LinesCleared(_) => "lines_cleared",
            GameEvent::GameOver => "game_over",
        }
    }
}

/// Lifecycle of a running session
///
/// `Playing` is the only phase in which the engine advances on its own.
/// `GameOver` is terminal until a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Playing,
    Paused,
    GameOver,
}

/// A cell on the board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: locked material of that kind
pub type Cell = Option<PieceKind>;
