//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the game and nothing else. It never draws,
//! reads input devices, plays sounds or touches files; callers issue
//! discrete commands and read plain state back.
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Command driven**: no internal timers; [`GameEngine::tick`] is fed the
//!   elapsed milliseconds by whoever runs the frame loop
//! - **Portable**: runs anywhere (terminal, GUI, headless simulation)
//!
//! # Module Structure
//!
//! - [`field`]: fixed-size grid with collision checks and line clearing
//! - [`piece`]: shape tables for the seven kinds and the piece value type
//! - [`rotation`]: clockwise rotation with per-kind wall kick tables
//! - [`rng`]: 7-bag random piece supply
//! - [`scoring`]: line clear, combo and back-to-back scoring
//! - [`engine`]: the game state machine tying it all together
//! - [`snapshot`]: read model for presentation layers
//! - [`config`]: construction parameters
//!
//! # Example
//!
//! ```
//! use blockfall_core::{EngineConfig, GameEngine};
//! use blockfall_types::GameCommand;
//!
//! let mut game = GameEngine::new(EngineConfig::default()).unwrap();
//!
//! game.apply_command(GameCommand::MoveRight);
//! game.apply_command(GameCommand::Rotate);
//! let rows = game.hard_drop();
//! assert!(rows > 0);
//!
//! // Drops are worth nothing; only line clears score.
//! assert_eq!(game.score(), 0);
//! ```

pub mod config;
pub mod engine;
pub mod field;
pub mod piece;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EngineConfig};
pub use engine::GameEngine;
pub use field::Field;
pub use piece::{get_shape, Piece, Shape};
pub use rng::{PieceSupply, SimpleRng};
pub use rotation::{rotate_with_kicks, RotationOutcome};
pub use scoring::{calculate_score, ScoreResult, ScoreState};
pub use snapshot::{GameSnapshot, PieceSnapshot};
