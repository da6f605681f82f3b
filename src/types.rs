//! Core data types for the match-three grid engine.
//!
//! The ball field uses flat `Vec` storage with row-major layout:
//! `cells[row * size + col]`. Cell values are `0` for a deleted/empty ball
//! and `1..=K` for one of `K` colors.

use serde::Serialize;
use std::fmt;

/// Sentinel value for a cleared cell awaiting refill.
pub const DELETED_BALL: u8 = 0;

/// Points awarded per cleared ball.
pub const SCORE_PER_BALL: u32 = 10;

/// Minimum length of a clearable run.
pub const MIN_RUN: usize = 3;

/// Smallest allowed field edge.
pub const MIN_FIELD_SIZE: usize = 5;

/// Largest allowed field edge.
pub const MAX_FIELD_SIZE: usize = 20;

/// Number of ball colors when the caller does not pick one.
pub const DEFAULT_COLOR_COUNT: u8 = 4;

/// Fields larger than this skip the "no pre-existing run" generation check.
pub const RUN_FREE_CHECK_LIMIT: usize = 6;

/// A cell position on the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{row: {}, col: {}}}", self.row, self.col)
    }
}

/// Relationship between the two cells of an attempted swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Vertical,
    Horizontal,
    Illegal,
}

impl Direction {
    /// Classify the swap `a` <-> `b`.
    ///
    /// `Vertical` for same-column cells one row apart, `Horizontal` for
    /// same-row cells one column apart, `Illegal` for everything else
    /// (identical cell, diagonal, distance >= 2, unrelated cells).
    pub fn between(a: Coord, b: Coord) -> Direction {
        fn neighbours(p1: usize, p2: usize) -> bool {
            p1.abs_diff(p2) == 1
        }

        if a.col == b.col && neighbours(a.row, b.row) {
            Direction::Vertical
        } else if a.row == b.row && neighbours(a.col, b.col) {
            Direction::Horizontal
        } else {
            Direction::Illegal
        }
    }
}

/// Result of a move attempt. Serialized tags match the string constants of
/// the game's JS protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveOutcome {
    /// Non-adjacent, diagonal or out-of-bounds cells.
    Illegal,
    /// Both cells already hold the same color.
    IllegalSameColor,
    /// Swap was legal but produced no run; the field was rolled back.
    Unchanged,
    /// Swap produced at least one run; the swap stays applied.
    Changed,
}

/// Whether a line is a row or a column of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Row,
    Column,
}

/// Errors raised by engine operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Requested field edge is outside `MIN_FIELD_SIZE..=MAX_FIELD_SIZE`.
    InvalidSize(usize),
    /// Requested color count is zero.
    InvalidColorCount(u8),
    /// Operation needs a field but none was generated or injected yet.
    FieldNotInitialized,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidSize(n) => write!(
                f,
                "field size {n} is out of bounds ({MIN_FIELD_SIZE}..={MAX_FIELD_SIZE})"
            ),
            EngineError::InvalidColorCount(k) => {
                write!(f, "color count {k} is invalid, need at least 1")
            }
            EngineError::FieldNotInitialized => write!(f, "generate a field first"),
        }
    }
}

impl std::error::Error for EngineError {}

/// The square ball field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    size: usize,
    cells: Vec<u8>,
}

impl Field {
    /// Create a field of `size * size` deleted balls.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![DELETED_BALL; size * size],
        }
    }

    /// Build a field from nested rows. Panics on a non-square input; only
    /// meant for test/debug injection.
    pub fn from_rows(rows: &[Vec<u8>]) -> Self {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            assert_eq!(row.len(), size, "field must be square");
            cells.extend_from_slice(row);
        }
        Self { size, cells }
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.row < self.size && c.col < self.size
    }

    #[inline(always)]
    pub fn ball(&self, c: Coord) -> u8 {
        self.cells[c.row * self.size + c.col]
    }

    #[inline(always)]
    pub fn set_ball(&mut self, c: Coord, ball: u8) {
        self.cells[c.row * self.size + c.col] = ball;
    }

    /// Swap the balls at `a` and `b` in place.
    pub fn swap(&mut self, a: Coord, b: Coord) {
        let ia = a.row * self.size + a.col;
        let ib = b.row * self.size + b.col;
        self.cells.swap(ia, ib);
    }

    #[inline(always)]
    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.size..(row + 1) * self.size]
    }

    pub fn copy_row(&self, row: usize) -> Vec<u8> {
        self.row(row).to_vec()
    }

    pub fn copy_column(&self, col: usize) -> Vec<u8> {
        (0..self.size)
            .map(|row| self.cells[row * self.size + col])
            .collect()
    }

    pub fn set_row(&mut self, row: usize, balls: &[u8]) {
        debug_assert_eq!(balls.len(), self.size);
        self.cells[row * self.size..(row + 1) * self.size].copy_from_slice(balls);
    }

    pub fn set_column(&mut self, col: usize, balls: &[u8]) {
        debug_assert_eq!(balls.len(), self.size);
        for (row, &ball) in balls.iter().enumerate() {
            self.cells[row * self.size + col] = ball;
        }
    }

    /// Copy of the 3x3 sub-grid whose top-left corner is `(row, col)`.
    pub fn window3(&self, row: usize, col: usize) -> [[u8; 3]; 3] {
        let mut window = [[0u8; 3]; 3];
        for (dr, out_row) in window.iter_mut().enumerate() {
            for (dc, cell) in out_row.iter_mut().enumerate() {
                *cell = self.cells[(row + dr) * self.size + col + dc];
            }
        }
        window
    }

    /// Flat row-major view of the cells.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Defensive nested-rows copy for external callers.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.size).map(|row| self.copy_row(row)).collect()
    }
}
