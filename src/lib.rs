//! Knight placement SAT solver
//!
//! Places one white and one black knight in every row and column of an N×N board so that
//! no knight attacks its own color and every knight attacks at least one opposing knight,
//! by encoding the rules as CNF and handing the formula to a SAT solver.

pub mod board;
pub mod config;
pub mod error;
pub mod puzzle;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use error::KnightError;
pub use puzzle::{KnightPuzzle, Solution};

/// Solve one board size with the given settings
pub fn solve_board(size: usize, settings: Settings) -> error::Result<Solution> {
    let mut puzzle = KnightPuzzle::new(size, settings)?;
    puzzle.solve()
}
