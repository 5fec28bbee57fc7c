//! Pixel-space coordinates and the console notation for cells.
//!
//! Every cell is identified by the pixel position of its top-left corner on
//! the original drawing surface. `Coordinate` converts between that space and
//! zero-based `(row, col)` grid indices.

use std::fmt;

use crate::constants::{CELL_PITCH, FIRST_CELL, N};

/// A position in pixel space: `top` runs down the rows, `left` across columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub top: i32,
    pub left: i32,
}

impl Coordinate {
    pub const fn new(top: i32, left: i32) -> Self {
        Self { top, left }
    }

    /// Pixel position of the cell at `(row, col)`.
    pub const fn cell(row: usize, col: usize) -> Self {
        Self {
            top: pixel(row),
            left: pixel(col),
        }
    }

    /// Grid indices of this coordinate, if it is exactly a cell position.
    pub fn grid(self) -> Option<(usize, usize)> {
        Some((index(self.top)?, index(self.left)?))
    }

    /// Shift by a pixel delta.
    pub const fn offset(self, dtop: i32, dleft: i32) -> Self {
        Self {
            top: self.top + dtop,
            left: self.left + dleft,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.grid() {
            Some(_) => f.write_str(&str_coord(*self)),
            None => write!(f, "({}, {})", self.top, self.left),
        }
    }
}

/// Pixel offset of grid index `i`.
#[inline]
pub const fn pixel(i: usize) -> i32 {
    FIRST_CELL + i as i32 * CELL_PITCH
}

/// Grid index of a pixel offset, if it lies exactly on a cell.
#[inline]
pub fn index(px: i32) -> Option<usize> {
    let rel = px - FIRST_CELL;
    if rel < 0 || rel % CELL_PITCH != 0 {
        return None;
    }
    let i = (rel / CELL_PITCH) as usize;
    (i < N).then_some(i)
}

/// Parse a cell in console notation (`A1` is the top-left cell).
///
/// The letter names the column (A-I, case-insensitive), the digit the row (1-9).
pub fn parse_coord(s: &str) -> Option<Coordinate> {
    let bytes = s.trim().as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let col = bytes[0].to_ascii_uppercase().checked_sub(b'A')? as usize;
    let row = (bytes[1] as char).to_digit(10)?.checked_sub(1)? as usize;
    if row >= N || col >= N {
        return None;
    }
    Some(Coordinate::cell(row, col))
}

/// Format a cell coordinate in console notation.
///
/// Returns `"??"` for coordinates that are not on a cell.
pub fn str_coord(coord: Coordinate) -> String {
    match coord.grid() {
        Some((row, col)) => format!("{}{}", (b'A' + col as u8) as char, row + 1),
        None => "??".to_string(),
    }
}
