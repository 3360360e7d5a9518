//! External MiniSat process integration

use super::constraints::Formula;
use super::dimacs::{parse_model, write_cnf, ModelResult};
use super::solver::{Assignment, SolverOutcome, SolverResultType, SolverStatistics};
use super::variables::VariableSpace;
use crate::error::{KnightError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

/// MiniSat exit codes for a decided instance
const EXIT_SATISFIABLE: i32 = 10;
const EXIT_UNSATISFIABLE: i32 = 20;

/// Runs a `minisat` binary on a DIMACS file in a temporary directory
pub struct MinisatSolver {
    binary: PathBuf,
    timeout: Option<Duration>,
    variable_count: usize,
    clause_count: usize,
    solve_time: Duration,
    result: Option<SolverResultType>,
}

impl MinisatSolver {
    pub fn new<P: AsRef<Path>>(binary: P) -> Self {
        Self {
            binary: binary.as_ref().to_path_buf(),
            timeout: None,
            variable_count: 0,
            clause_count: 0,
            solve_time: Duration::ZERO,
            result: None,
        }
    }

    /// CPU limit handed to MiniSat through `-cpu-lim`
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Solve the formula in one MiniSat run.
    ///
    /// Encoding problems come back as `Err`; anything going wrong on the solver side is
    /// reported as [`SolverOutcome::Error`].
    pub fn solve(&mut self, space: &VariableSpace, formula: &Formula) -> Result<SolverOutcome> {
        let cnf = write_cnf(space, formula)?;
        self.variable_count = space.variable_count();
        self.clause_count = formula.len();

        let start_time = Instant::now();
        let outcome = outcome_from(space, self.run(&cnf));
        self.solve_time = start_time.elapsed();
        self.result = Some(outcome.result_type());

        Ok(outcome)
    }

    fn run(&self, cnf: &str) -> std::result::Result<ModelResult, String> {
        let dir = tempfile::tempdir().map_err(|e| format!("failed to create temporary directory: {}", e))?;
        let input = dir.path().join("formula.cnf");
        let output = dir.path().join("result.txt");

        std::fs::write(&input, cnf).map_err(|e| format!("failed to write {}: {}", input.display(), e))?;

        let mut command = Command::new(&self.binary);
        command.arg(&input).arg(&output);
        if let Some(timeout) = self.timeout {
            command.arg(format!("-cpu-lim={}", timeout.as_secs().max(1)));
        }

        tracing::debug!(binary = %self.binary.display(), "running MiniSat");
        let run = command
            .output()
            .map_err(|e| format!("failed to run {}: {}", self.binary.display(), e))?;

        match run.status.code() {
            Some(EXIT_SATISFIABLE) | Some(EXIT_UNSATISFIABLE) | Some(0) => {}
            code => {
                return Err(format!(
                    "{} exited with {:?}: {}",
                    self.binary.display(),
                    code,
                    String::from_utf8_lossy(&run.stderr).trim()
                ))
            }
        }

        let content = std::fs::read_to_string(&output)
            .map_err(|e| format!("failed to read {}: {}", output.display(), e))?;
        parse_model(&content).map_err(|e| match e {
            KnightError::EncodingOrSolverFailure(message) => message,
            other => other.to_string(),
        })
    }

    pub fn statistics(&self) -> SolverStatistics {
        SolverStatistics {
            variable_count: self.variable_count,
            clause_count: self.clause_count,
            solve_time: self.solve_time,
            result: self.result,
        }
    }
}

fn outcome_from(space: &VariableSpace, run: std::result::Result<ModelResult, String>) -> SolverOutcome {
    match run {
        Ok(ModelResult::Satisfiable(model)) => {
            let assignment = Assignment::from_model(space, &model);
            if assignment.is_empty() {
                SolverOutcome::Error("MiniSat reported SAT without a model".to_string())
            } else {
                SolverOutcome::Satisfiable(assignment)
            }
        }
        Ok(ModelResult::Unsatisfiable) => SolverOutcome::Unsatisfiable,
        Ok(ModelResult::Indeterminate) => SolverOutcome::Error("MiniSat stopped before reaching a result".to_string()),
        Err(message) => SolverOutcome::Error(message),
    }
}
