//! Field module - manages the game grid
//!
//! The field is a `width x height` grid where each cell is empty or holds the
//! color of the piece that filled it. Storage is a flat row-major vector;
//! its dimensions are fixed at construction and only cell contents change.
//! Coordinates: (x, y) where x is the column (left to right) and y the row,
//! with row 0 at the top.

use crate::config::ConfigError;
use crate::piece::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// The playing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Field {
    /// Create an empty field. Zero dimensions are rejected.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width * height],
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height
    }

    /// Row `y` as a slice, or None past the edges
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Whether `piece`'s current shape fits with its origin at (x, y).
    ///
    /// Every occupied cell must be inside the grid and on an empty cell.
    /// Movement, rotation, ghost and drop all go through this check.
    pub fn is_valid_placement(&self, piece: &Piece, x: i32, y: i32) -> bool {
        piece
            .shape()
            .cells()
            .iter()
            .all(|&(dx, dy)| self.is_free(x + dx, y + dy))
    }

    /// Write the piece's color into every cell it covers at (x, y).
    ///
    /// No collision check: callers validate first. Cells outside the grid
    /// are skipped.
    pub fn place(&mut self, piece: &Piece, x: i32, y: i32) {
        let color = Some(piece.kind.color());
        for &(dx, dy) in piece.shape().cells().iter() {
            self.set(x + dx, y + dy, color);
        }
    }

    /// Remove every full row at once and return how many were removed.
    ///
    /// Rows are compacted bottom to top with a two-pointer pass, so the
    /// surviving rows keep their order; the vacated rows at the top are
    /// left empty.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = self.width;
        let mut cleared = 0;
        let mut write_y = self.height;

        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// Lowest row the piece reaches falling straight down from (x, y).
    ///
    /// Returns `y` itself when the piece cannot descend at all.
    pub fn ghost_row(&self, piece: &Piece, x: i32, y: i32) -> i32 {
        let mut ghost = y;
        while self.is_valid_placement(piece, x, ghost + 1) {
            ghost += 1;
        }
        ghost
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Field {
    /// Standard 10x20 field
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: vec![None; BOARD_WIDTH * BOARD_HEIGHT],
        }
    }
}
