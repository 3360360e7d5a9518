//! Knight geometry and the basic board coordinates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Offsets of the eight knight moves as (row, column) deltas
const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Token color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// The opposing color
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// A (row, column) position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index on an `size`x`size` board
    #[inline]
    pub fn index(&self, size: usize) -> usize {
        self.row * size + self.col
    }

    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Whether both cells share a row or a column
    pub fn shares_line(&self, other: &Cell) -> bool {
        self.row == other.row || self.col == other.col
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// True when the row and column offsets between `a` and `b` are a permutation of {1, 2}
pub fn is_knight_move(a: Cell, b: Cell) -> bool {
    let dr = a.row.abs_diff(b.row);
    let dc = a.col.abs_diff(b.col);
    matches!((dr, dc), (1, 2) | (2, 1))
}

/// All cells a knight on `cell` attacks on a `size`x`size` board, in offset order
pub fn knight_neighbors(cell: Cell, size: usize) -> Vec<Cell> {
    KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| {
            let row = cell.row as isize + dr;
            let col = cell.col as isize + dc;
            if row >= 0 && col >= 0 && (row as usize) < size && (col as usize) < size {
                Some(Cell::new(row as usize, col as usize))
            } else {
                None
            }
        })
        .collect()
}

/// Every cell of the board in row-major order
pub fn all_cells(size: usize) -> impl Iterator<Item = Cell> + Clone {
    itertools::iproduct!(0..size, 0..size).map(|(row, col)| Cell::new(row, col))
}
