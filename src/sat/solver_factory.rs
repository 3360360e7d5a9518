//! Factory for creating SAT solver instances based on configuration

use super::constraints::Formula;
use super::minisat_solver::MinisatSolver;
use super::solver::{CadicalSolver, SolverOutcome, SolverStatistics};
use super::variables::VariableSpace;
use crate::config::{SolverBackend, SolverConfig};
use crate::error::Result;
use std::time::Duration;

/// Solver interface over the available backends
pub enum UnifiedSatSolver {
    Cadical(CadicalSolver),
    Minisat(MinisatSolver),
}

impl UnifiedSatSolver {
    /// Create a new solver instance based on the configured backend
    pub fn new(config: &SolverConfig) -> Self {
        match config.backend {
            SolverBackend::Cadical => UnifiedSatSolver::Cadical(CadicalSolver::new()),
            SolverBackend::Minisat => {
                let mut solver = MinisatSolver::new(&config.minisat_path);
                solver.set_timeout(Duration::from_secs(config.timeout_seconds));
                UnifiedSatSolver::Minisat(solver)
            }
        }
    }

    /// Submit the whole formula and solve it once
    pub fn solve(&mut self, space: &VariableSpace, formula: &Formula) -> Result<SolverOutcome> {
        match self {
            UnifiedSatSolver::Cadical(solver) => {
                solver.add_formula(space, formula)?;
                Ok(solver.solve(space))
            }
            UnifiedSatSolver::Minisat(solver) => solver.solve(space, formula),
        }
    }

    pub fn statistics(&self) -> SolverStatistics {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.statistics(),
            UnifiedSatSolver::Minisat(solver) => solver.statistics(),
        }
    }

    /// Get the backend type being used
    pub fn backend(&self) -> SolverBackend {
        match self {
            UnifiedSatSolver::Cadical(_) => SolverBackend::Cadical,
            UnifiedSatSolver::Minisat(_) => SolverBackend::Minisat,
        }
    }
}

impl Default for UnifiedSatSolver {
    fn default() -> Self {
        UnifiedSatSolver::Cadical(CadicalSolver::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::sat::constraints::encode;
    use std::path::PathBuf;

    #[test]
    fn test_backend_selection() {
        let mut config = Settings::default().solver;
        assert_eq!(UnifiedSatSolver::new(&config).backend(), SolverBackend::Cadical);

        config.backend = SolverBackend::Minisat;
        assert_eq!(UnifiedSatSolver::new(&config).backend(), SolverBackend::Minisat);
    }

    #[test]
    fn test_cadical_unsatisfiable() {
        let mut solver = UnifiedSatSolver::default();
        let space = VariableSpace::create(2).unwrap();
        let formula = encode(2).unwrap();
        assert_eq!(solver.solve(&space, &formula).unwrap(), SolverOutcome::Unsatisfiable);
    }

    #[test]
    fn test_minisat_without_binary() {
        let mut config = Settings::default().solver;
        config.backend = SolverBackend::Minisat;
        config.minisat_path = PathBuf::from("/nonexistent/minisat");

        let mut solver = UnifiedSatSolver::new(&config);
        let space = VariableSpace::create(3).unwrap();
        let formula = encode(3).unwrap();
        assert!(matches!(
            solver.solve(&space, &formula).unwrap(),
            SolverOutcome::Error(_)
        ));
    }
}
