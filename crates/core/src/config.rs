//! Engine configuration
//!
//! Board dimensions are fixed for the lifetime of an engine; the fall
//! interval can be changed at runtime with
//! [`GameEngine::set_fall_interval_ms`](crate::engine::GameEngine::set_fall_interval_ms).
//! Storing the chosen interval between sessions is left to the caller.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{BASE_FALL_MS, BOARD_HEIGHT, BOARD_WIDTH};

/// Construction parameters for a [`GameEngine`](crate::engine::GameEngine)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    /// Gravity threshold: one automatic descent per this many milliseconds
    pub fall_interval_ms: u32,
    /// Seed for the piece supply of the first game
    pub seed: u32,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            fall_interval_ms: BASE_FALL_MS,
            seed: 1,
        }
    }
}

/// Rejected construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroWidth,
    ZeroHeight,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConfigError::ZeroWidth => "board width must be at least one column",
            ConfigError::ZeroHeight => "board height must be at least one row",
        };
        write!(f, "{s}")
    }
}

impl std::error::Error for ConfigError {}
