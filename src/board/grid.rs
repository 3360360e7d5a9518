//! Board representation for knight placements

use super::rules::{Cell, Color};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Piece {
    #[default]
    Empty,
    White,
    Black,
}

impl Piece {
    /// Canonical character: white '1', black '2', empty '0'
    pub fn symbol(self) -> char {
        match self {
            Piece::Empty => '0',
            Piece::White => '1',
            Piece::Black => '2',
        }
    }

    pub fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '0' => Some(Piece::Empty),
            '1' => Some(Piece::White),
            '2' => Some(Piece::Black),
            _ => None,
        }
    }

    pub fn color(self) -> Option<Color> {
        match self {
            Piece::Empty => None,
            Piece::White => Some(Color::White),
            Piece::Black => Some(Color::Black),
        }
    }
}

impl From<Color> for Piece {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Piece::White,
            Color::Black => Piece::Black,
        }
    }
}

/// A square board of pieces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub size: usize,
    pub cells: Vec<Piece>,
}

impl Board {
    /// Create an empty board
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Piece::Empty; size * size],
        }
    }

    /// Create a board from rows of pieces
    pub fn from_rows(rows: Vec<Vec<Piece>>) -> Result<Self> {
        if rows.is_empty() {
            anyhow::bail!("Board cannot be empty");
        }

        let size = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                anyhow::bail!("Row {} has length {}, expected {} (boards are square)", i, row.len(), size);
            }
        }

        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Get the piece at a cell; out of range cells read as empty
    pub fn get(&self, cell: Cell) -> Piece {
        if cell.in_bounds(self.size) {
            self.cells[cell.index(self.size)]
        } else {
            Piece::Empty
        }
    }

    pub fn set(&mut self, cell: Cell, piece: Piece) -> Result<()> {
        if !cell.in_bounds(self.size) {
            anyhow::bail!("Cell {} out of bounds for {}x{} board", cell, self.size, self.size);
        }
        let idx = cell.index(self.size);
        self.cells[idx] = piece;
        Ok(())
    }

    /// Cells holding a token of the given color, row-major
    pub fn pieces_of(&self, color: Color) -> Vec<Cell> {
        let piece = Piece::from(color);
        super::rules::all_cells(self.size)
            .filter(|&cell| self.get(cell) == piece)
            .collect()
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|&&p| p != Piece::Empty).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            for piece in row {
                write!(f, "{}", piece.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_creation() {
        let board = Board::new(3);
        assert_eq!(board.size, 3);
        assert_eq!(board.cells.len(), 9);
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new(3);
        board.set(Cell::new(1, 2), Piece::Black).unwrap();
        assert_eq!(board.get(Cell::new(1, 2)), Piece::Black);
        assert_eq!(board.get(Cell::new(5, 5)), Piece::Empty);
        assert!(board.set(Cell::new(3, 0), Piece::White).is_err());
        assert_eq!(board.pieces_of(Color::Black), vec![Cell::new(1, 2)]);
    }

    #[test]
    fn test_rejects_non_square_rows() {
        let rows = vec![vec![Piece::Empty, Piece::White], vec![Piece::Black]];
        assert!(Board::from_rows(rows).is_err());
        assert!(Board::from_rows(vec![]).is_err());
    }

    #[test]
    fn test_canonical_rendering() {
        let rows = vec![
            vec![Piece::White, Piece::Black],
            vec![Piece::Empty, Piece::White],
        ];
        let board = Board::from_rows(rows).unwrap();
        assert_eq!(board.to_string(), "12\n01\n");
    }
}
