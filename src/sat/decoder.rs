//! Decoding solver outcomes into boards

use super::solver::{Assignment, SolverOutcome};
use super::variables::VariableSpace;
use crate::board::{all_cells, Board, Piece};
use crate::error::{KnightError, Result};

/// Result of decoding a solver outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Solved(Board),
    NoSolution,
}

/// Turns solver outcomes into boards using the variable space they were encoded with
pub struct SolutionDecoder<'a> {
    space: &'a VariableSpace,
}

impl<'a> SolutionDecoder<'a> {
    pub fn new(space: &'a VariableSpace) -> Self {
        Self { space }
    }

    pub fn decode(&self, outcome: SolverOutcome) -> Result<Decoded> {
        match outcome {
            SolverOutcome::Satisfiable(assignment) => self.decode_assignment(&assignment).map(Decoded::Solved),
            SolverOutcome::Unsatisfiable => Ok(Decoded::NoSolution),
            SolverOutcome::Error(message) => Err(KnightError::EncodingOrSolverFailure(message)),
        }
    }

    /// White wins when an assignment puts both colors on one cell
    pub fn decode_assignment(&self, assignment: &Assignment) -> Result<Board> {
        let mut board = Board::new(self.space.size());

        for cell in all_cells(self.space.size()) {
            let white = assignment.value(self.space.white(cell)?)?;
            let black = assignment.value(self.space.black(cell)?)?;

            let piece = match (white, black) {
                (true, true) => {
                    tracing::warn!(%cell, "assignment places both colors on one cell, keeping white");
                    Piece::White
                }
                (true, false) => Piece::White,
                (false, true) => Piece::Black,
                (false, false) => Piece::Empty,
            };
            board.cells[cell.index(board.size)] = piece;
        }

        Ok(board)
    }
}
