//! Blockfall (workspace facade crate).
//!
//! Re-exports the game rules from `crates/core` and the shared value types
//! from `crates/types` under one `blockfall::{core,types}` path.

pub use blockfall_core as core;
pub use blockfall_types as types;
