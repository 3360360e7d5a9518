//! Knight placement problem definition and solution handling

pub mod problem;
pub mod solution;
pub mod validator;

pub use problem::{solve_range, KnightPuzzle};
pub use solution::Solution;
pub use validator::{BoardValidator, RuleViolation, ValidationResult};
