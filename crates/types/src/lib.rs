//! Core types module - shared data structures and constants
//!
//! This crate defines the plain data exchanged between the rules engine and
//! whatever drives it (a renderer, an input layer, a replay tool). Everything
//! here is value data with no behavior beyond parsing and lookup tables.
//!
//! # Board Dimensions
//!
//! The default playfield is 10 columns by 20 rows. Row 0 is the top (spawn)
//! row; y grows downward. Engines can be built with other dimensions, these
//! constants only provide the defaults.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_FALL_MS` | 800 | Default gravity interval (one row per 800ms) |
//! | `TICK_MS` | 16 | Frame length used by the headless driver (~60 FPS) |
//!
//! # Scoring
//!
//! | Rows | Points |
//! |------|--------|
//! | 1 | 40 |
//! | 2 | 100 |
//! | 3 | 300 |
//! | 4 | 1200 |
//!
//! Consecutive clears add `COMBO_BASE * (combo - 1)`, and a 4-row clear that
//! follows another 4-row clear is multiplied by 3/2.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameCommand, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//!
//! let command = GameCommand::from_str("hardDrop").unwrap();
//! assert_eq!(command, GameCommand::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Default gravity interval in milliseconds
pub const BASE_FALL_MS: u32 = 800;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Line clear scoring table, indexed by rows cleared.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Combo scoring base value (50 points per combo step past the first clear)
pub const COMBO_BASE: u32 = 50;

/// Back-to-back bonus numerator (3/2 = 1.5x multiplier)
pub const B2B_NUMERATOR: u32 = 3;

/// Back-to-back bonus denominator
pub const B2B_DENOMINATOR: u32 = 2;

/// Number of rows a single clear has to remove to count as a tetris
pub const TETRIS_LINES: u32 = 4;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// Every kind, in the order a fresh bag is filled before shuffling.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
        }
    }

    /// Display color written into the field when a piece of this kind locks.
    ///
    /// ```
    /// use blockfall_types::{Color, PieceKind};
    ///
    /// assert_eq!(PieceKind::I.color(), Color(0x00f5ff));
    /// ```
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color(0x00f5ff),
            PieceKind::O => Color(0xffd700),
            PieceKind::T => Color(0xff6b9d),
            PieceKind::L => Color(0xff8c00),
            PieceKind::J => Color(0x4169e1),
            PieceKind::S => Color(0x32cd32),
            PieceKind::Z => Color(0xff1493),
        }
    }
}

/// Opaque 24-bit RGB tag stored in occupied cells.
///
/// The engine never inspects the value; any `Some(Color)` cell is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Color(pub u32);

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Occupied, tagged with the color of the piece that filled it
pub type Cell = Option<Color>;

/// Discrete commands an external driver can issue to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameCommand {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot descend
    SoftDrop,
    /// Drop piece to the lowest valid row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise, with wall kicks
    Rotate,
    /// Swap the active piece into the hold slot
    Hold,
    /// Toggle pause state
    Pause,
    /// Start a fresh game
    Reset,
}

impl GameCommand {
    /// Parse a command name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("left"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("ROTATE"), Some(GameCommand::Rotate));
    /// assert_eq!(GameCommand::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "moveleft" | "left" => Some(GameCommand::MoveLeft),
            "moveright" | "right" => Some(GameCommand::MoveRight),
            "softdrop" | "down" => Some(GameCommand::SoftDrop),
            "harddrop" | "drop" => Some(GameCommand::HardDrop),
            "rotate" => Some(GameCommand::Rotate),
            "hold" => Some(GameCommand::Hold),
            "pause" => Some(GameCommand::Pause),
            "reset" | "restart" => Some(GameCommand::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::HardDrop => "hardDrop",
            GameCommand::Rotate => "rotate",
            GameCommand::Hold => "hold",
            GameCommand::Pause => "pause",
            GameCommand::Reset => "reset",
        }
    }
}

/// Lifecycle state of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    Active,
    Paused,
    GameOver,
}

/// Notifications queued by the engine for feedback layers (sound, effects).
///
/// The engine only records these; draining and reacting is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameEvent {
    /// A piece became part of the field.
    Locked { kind: PieceKind },
    /// One lock removed `lines` full rows and awarded `points`.
    LinesCleared {
        lines: u32,
        points: u32,
        combo: u32,
        back_to_back: bool,
    },
    /// The active piece went into the hold slot.
    Held { kind: PieceKind },
    /// A spawn was blocked; the round is over.
    GameOver { score: u32 },
    /// A fresh game started.
    Reset,
}

impl GameEvent {
    /// True for a 4-row clear.
    pub fn is_tetris(&self) -> bool {
        matches!(self, GameEvent::LinesCleared { lines, .. } if *lines == TETRIS_LINES)
    }
}
