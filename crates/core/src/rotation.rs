//! Rotation module - clockwise rotation with wall kicks
//!
//! A rotation first tries the rotated shape in place. If that collides, a
//! fixed list of five (dx, dy) offsets is tried in order, chosen by kind
//! (I vs. everything else) and by the rotation index the piece had before
//! turning. The first offset that fits wins; if none fits the rotation is
//! undone. Offsets use board coordinates, so positive dy moves down.

use crate::field::Field;
use crate::piece::Piece;
use crate::types::PieceKind;

/// Ordered kick offsets per pre-rotation index
pub type KickTable = [[(i32, i32); 5]; 4];

/// Kicks for the I piece
pub const I_KICKS: KickTable = [
    [(0, 0), (-1, 0), (1, 0), (0, 0), (-1, 0)],
    [(-1, 0), (0, 0), (0, 0), (0, 1), (0, -2)],
    [(-1, 1), (1, 1), (-2, 1), (1, 0), (-2, 0)],
    [(0, 1), (0, 1), (0, 1), (0, -1), (0, 2)],
];

/// Kicks shared by O, T, L, J, S and Z. O never needs them since all of its
/// states are identical.
pub const DEFAULT_KICKS: KickTable = [
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (0, 0), (0, 0), (0, 0), (0, 0)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// Kick table for a piece kind
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::I => &I_KICKS,
        _ => &DEFAULT_KICKS,
    }
}

/// Offsets to try after a rotation away from `from` failed in place
pub fn kick_offsets(kind: PieceKind, from: u8) -> &'static [(i32, i32); 5] {
    &get_kick_table(kind)[(from % 4) as usize]
}

/// How a rotation attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationOutcome {
    /// The rotated shape fit without moving
    InPlace,
    /// The rotated shape fit after shifting by this offset
    Kicked { dx: i32, dy: i32 },
    /// Nothing fit; the piece is unchanged
    Blocked,
}

impl RotationOutcome {
    pub fn succeeded(&self) -> bool {
        !matches!(self, RotationOutcome::Blocked)
    }
}

/// Rotate `piece` clockwise on `field`, kicking if needed.
///
/// Kick candidates are tested on copies; `piece` only moves once a
/// candidate validates. On failure its rotation is stepped back to the
/// original index and its position is untouched.
pub fn rotate_with_kicks(field: &Field, piece: &mut Piece) -> RotationOutcome {
    let from = piece.rotate_cw();

    if field.is_valid_placement(piece, piece.x, piece.y) {
        return RotationOutcome::InPlace;
    }

    for &(dx, dy) in kick_offsets(piece.kind, from) {
        let candidate = piece.translated(dx, dy);
        if field.is_valid_placement(&candidate, candidate.x, candidate.y) {
            *piece = candidate;
            return RotationOutcome::Kicked { dx, dy };
        }
    }

    piece.rotate_ccw();
    RotationOutcome::Blocked
}
