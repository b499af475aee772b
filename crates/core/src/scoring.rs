//! Scoring module - line clears, combos and back-to-back tetrises
//!
//! Points come only from line clears; drops award nothing. For one lock that
//! clears `n` rows:
//! - base points come from [`LINE_SCORES`];
//! - from the second consecutive clearing lock on, `COMBO_BASE * (combo - 1)`
//!   is added;
//! - a 4-row clear directly after another 4-row clear multiplies the running
//!   total (base plus combo bonus) by 3/2, rounding down.

use crate::types::{B2B_DENOMINATOR, B2B_NUMERATOR, COMBO_BASE, LINE_SCORES, TETRIS_LINES};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Base points for the row count.
    pub line_clear_score: u32,
    /// Combo bonus added on top of `line_clear_score`.
    pub combo_bonus: u32,
    /// Whether the back-to-back multiplier was applied.
    pub b2b_applied: bool,
    pub total: u32,
}

/// Base points for clearing `lines` rows (0 outside 1..=4)
pub fn calculate_line_score(lines: u32) -> u32 {
    LINE_SCORES.get(lines as usize).copied().unwrap_or(0)
}

/// Combo bonus for the `combo`-th consecutive clearing lock.
///
/// The first clear in a chain (`combo == 1`) earns nothing extra.
pub fn calculate_combo_bonus(combo: u32) -> u32 {
    COMBO_BASE.saturating_mul(combo.saturating_sub(1))
}

/// Whether a clear of this size keeps a back-to-back chain alive
pub fn qualifies_for_b2b(lines: u32) -> bool {
    lines == TETRIS_LINES
}

/// Apply the B2B multiplier (3/2) to a point value.
pub fn apply_b2b_multiplier(points: u32) -> u32 {
    points.saturating_mul(B2B_NUMERATOR) / B2B_DENOMINATOR
}

/// Points for one clearing lock.
///
/// `combo` is the chain length including this clear; `previous_b2b` is
/// whether the last clear was a tetris.
pub fn calculate_score(lines: u32, combo: u32, previous_b2b: bool) -> ScoreResult {
    let line_clear_score = calculate_line_score(lines);
    let combo_bonus = calculate_combo_bonus(combo);
    let running = line_clear_score.saturating_add(combo_bonus);

    let b2b_applied = qualifies_for_b2b(lines) && previous_b2b;
    let total = if b2b_applied {
        apply_b2b_multiplier(running)
    } else {
        running
    };

    ScoreResult {
        line_clear_score,
        combo_bonus,
        b2b_applied,
        total,
    }
}

/// Running score/combo bookkeeping for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreState {
    pub score: u32,
    pub lines_cleared: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub back_to_back: bool,
}

impl ScoreState {
    /// Account for a lock that cleared `lines` rows.
    ///
    /// A lock without a clear resets the combo and leaves back-to-back and
    /// the max combo alone.
    pub fn record_lock(&mut self, lines: u32) -> Option<ScoreResult> {
        if lines == 0 {
            self.combo = 0;
            return None;
        }

        self.lines_cleared = self.lines_cleared.saturating_add(lines);
        self.combo = self.combo.saturating_add(1);
        self.max_combo = self.max_combo.max(self.combo);

        let result = calculate_score(lines, self.combo, self.back_to_back);
        self.back_to_back = qualifies_for_b2b(lines);
        self.score = self.score.saturating_add(result.total);
        Some(result)
    }
}
