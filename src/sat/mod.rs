//! SAT encoding, solving and decoding for knight placements

pub mod constraints;
pub mod decoder;
pub mod dimacs;
pub mod encoder;
pub mod minisat_solver;
pub mod solver;
pub mod solver_factory;
pub mod variables;

pub use constraints::{encode, Clause, ClauseFamily, ConstraintEncoder, Formula, FormulaBuilder, Literal};
pub use decoder::{Decoded, SolutionDecoder};
pub use encoder::{EncodingStatistics, SatEncoder};
pub use solver::{Assignment, CadicalSolver, SolverOutcome, SolverResultType, SolverStatistics};
pub use solver_factory::UnifiedSatSolver;
pub use variables::{Variable, VariableSpace};
