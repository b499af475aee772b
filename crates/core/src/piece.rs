//! Pieces module - tetromino shape tables and the active piece
//!
//! Each kind owns exactly four rotation states. A state is a square matrix
//! (2x2 for O, 3x3 for T/L/J/S/Z, 4x4 for I) stored in a 4x4 array; only the
//! top-left `size x size` block is meaningful. Rotation indices are always
//! taken modulo 4, so cycling needs no wraparound special cases.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Number of rotation states per kind
pub const ROTATIONS: u8 = 4;

/// Offset of a single occupied cell relative to the piece origin, as (col, row)
pub type CellOffset = (i32, i32);

/// One rotation state of a piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: usize,
    rows: [[u8; 4]; 4],
}

impl Shape {
    const fn new(size: usize, rows: [[u8; 4]; 4]) -> Self {
        Self { size, rows }
    }

    /// Side length of the bounding box
    pub fn size(&self) -> usize {
        self.size
    }

    /// True if the matrix cell at (row, col) is occupied
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.rows[row][col] != 0
    }

    /// Occupied cells in row-major order. Every tetromino has four.
    pub fn cells(&self) -> ArrayVec<CellOffset, 4> {
        let mut out = ArrayVec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.rows[row][col] != 0 && !out.is_full() {
                    out.push((col as i32, row as i32));
                }
            }
        }
        out
    }
}

const I_SHAPES: [Shape; 4] = [
    Shape::new(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
    Shape::new(4, [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]]),
    Shape::new(4, [[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]]),
    Shape::new(4, [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]]),
];

const O_SHAPE: Shape = Shape::new(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);

const O_SHAPES: [Shape; 4] = [O_SHAPE; 4];

const T_SHAPES: [Shape; 4] = [
    Shape::new(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0; 4]]),
    Shape::new(3, [[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0; 4]]),
    Shape::new(3, [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0; 4]]),
    Shape::new(3, [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0; 4]]),
];

const L_SHAPES: [Shape; 4] = [
    Shape::new(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0; 4]]),
    Shape::new(3, [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0; 4]]),
    Shape::new(3, [[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0; 4]]),
    Shape::new(3, [[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0; 4]]),
];

const J_SHAPES: [Shape; 4] = [
    Shape::new(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0; 4]]),
    Shape::new(3, [[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0; 4]]),
    Shape::new(3, [[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0; 4]]),
    Shape::new(3, [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0; 4]]),
];

const S_SHAPES: [Shape; 4] = [
    Shape::new(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0; 4]]),
    Shape::new(3, [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0; 4]]),
    Shape::new(3, [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0; 4]]),
    Shape::new(3, [[1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0; 4]]),
];

const Z_SHAPES: [Shape; 4] = [
    Shape::new(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0; 4]]),
    Shape::new(3, [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0; 4]]),
    Shape::new(3, [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0; 4]]),
    Shape::new(3, [[0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0; 4]]),
];

/// All four rotation states of a kind
pub fn shape_table(kind: PieceKind) -> &'static [Shape; 4] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::L => &L_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
    }
}

/// Shape of a kind at a rotation index (taken modulo 4)
pub fn get_shape(kind: PieceKind, rotation: u8) -> &'static Shape {
    &shape_table(kind)[(rotation % ROTATIONS) as usize]
}

/// Spawn column for a board of the given width
pub fn spawn_x(field_width: usize) -> i32 {
    (field_width / 2) as i32 - 1
}

/// A piece on the field: kind, rotation index and bounding-box origin.
///
/// Plain value type; copies are used to test moves before committing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Create a piece at the spawn position of a board `field_width` wide
    pub fn spawn(kind: PieceKind, field_width: usize) -> Self {
        Self {
            kind,
            rotation: 0,
            x: spawn_x(field_width),
            y: 0,
        }
    }

    /// Shape at the current rotation
    pub fn shape(&self) -> &'static Shape {
        get_shape(self.kind, self.rotation)
    }

    /// Occupied board cells at the current position
    pub fn cells(&self) -> ArrayVec<(i32, i32), 4> {
        self.shape()
            .cells()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Advance the rotation clockwise, returning the previous index
    pub fn rotate_cw(&mut self) -> u8 {
        let previous = self.rotation;
        self.rotation = (self.rotation + 1) % ROTATIONS;
        previous
    }

    /// Step the rotation back; only used to undo a failed `rotate_cw`
    pub fn rotate_ccw(&mut self) {
        self.rotation = (self.rotation + ROTATIONS - 1) % ROTATIONS;
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Copy of this piece shifted by (dx, dy)
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        let mut moved = *self;
        moved.translate(dx, dy);
        moved
    }

    /// Back to rotation 0 at the spawn position
    pub fn reset_spawn(&mut self, field_width: usize) {
        self.rotation = 0;
        self.x = spawn_x(field_width);
        self.y = 0;
    }
}
