//! Error types for encoding and decoding knight placements

use crate::sat::Variable;
use thiserror::Error;

/// Errors raised by the encoder, the decoder and the solver collaborators.
///
/// A puzzle without a placement is not an error; see [`crate::sat::Decoded`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KnightError {
    /// Board size below 1.
    #[error("invalid board size {0}: the board needs at least one cell")]
    InvalidSize(usize),

    /// Lookup of a variable that was never allocated, or missing from an assignment.
    #[error("unknown variable: {0}")]
    UnknownVariable(Variable),

    /// The solver reported an error condition.
    #[error("encoding or solver failure: {0}")]
    EncodingOrSolverFailure(String),
}

pub type Result<T> = std::result::Result<T, KnightError>;
