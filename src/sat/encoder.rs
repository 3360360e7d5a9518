//! SAT encoder for the knight placement problem

use super::{ClauseFamily, ConstraintEncoder, Decoded, Formula, SolutionDecoder, SolverStatistics, UnifiedSatSolver, VariableSpace};
use crate::config::Settings;
use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Encodes one board size, hands the formula to the configured solver and decodes the answer
pub struct SatEncoder {
    settings: Settings,
    space: VariableSpace,
    formula: Formula,
    encode_time: Duration,
    solver_statistics: Option<SolverStatistics>,
}

impl SatEncoder {
    /// Allocate the variables and build the formula for an N×N board
    pub fn new(size: usize, settings: Settings) -> Result<Self> {
        let start_time = Instant::now();
        let space = VariableSpace::create(size)?;
        let formula = ConstraintEncoder::new(&space)
            .with_exclusive_cells(settings.encoding.exclusive_cells)
            .encode()?;
        let encode_time = start_time.elapsed();

        tracing::info!(
            size,
            variables = space.variable_count(),
            clauses = formula.len(),
            elapsed_ms = encode_time.as_millis() as u64,
            "encoded knight placement"
        );

        Ok(Self {
            settings,
            space,
            formula,
            encode_time,
            solver_statistics: None,
        })
    }

    /// Solve with a fresh solver instance; every call is a single solver run
    pub fn solve(&mut self) -> Result<Decoded> {
        let mut solver = UnifiedSatSolver::new(&self.settings.solver);
        let outcome = solver.solve(&self.space, &self.formula);
        let statistics = solver.statistics();

        tracing::info!(
            size = self.space.size(),
            backend = ?solver.backend(),
            result = ?statistics.result,
            elapsed_ms = statistics.solve_time.as_millis() as u64,
            "solver finished"
        );
        self.solver_statistics = Some(statistics);

        SolutionDecoder::new(&self.space).decode(outcome?)
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn variable_space(&self) -> &VariableSpace {
        &self.space
    }

    pub fn solver_statistics(&self) -> Option<&SolverStatistics> {
        self.solver_statistics.as_ref()
    }

    /// Get encoding statistics
    pub fn statistics(&self) -> EncodingStatistics {
        EncodingStatistics {
            board_size: self.space.size(),
            total_variables: self.space.variable_count(),
            total_clauses: self.formula.len(),
            family_counts: self.formula.family_counts().clone(),
            exclusive_cells: self.settings.encoding.exclusive_cells,
            encode_time: self.encode_time,
        }
    }
}

/// Statistics about the SAT encoding
#[derive(Debug, Clone, Serialize)]
pub struct EncodingStatistics {
    pub board_size: usize,
    pub total_variables: usize,
    pub total_clauses: usize,
    pub family_counts: BTreeMap<ClauseFamily, usize>,
    pub exclusive_cells: bool,
    #[serde(skip)]
    pub encode_time: Duration,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Encoding Statistics:")?;
        writeln!(f, "  Board: {}x{}", self.board_size, self.board_size)?;
        writeln!(f, "  Total variables: {}", self.total_variables)?;
        writeln!(f, "  Total clauses: {}", self.total_clauses)?;
        for (family, count) in &self.family_counts {
            writeln!(f, "    {}: {}", family, count)?;
        }
        writeln!(f, "  Exclusive cells: {}", self.exclusive_cells)?;
        writeln!(f, "  Encode time: {:.3}s", self.encode_time.as_secs_f64())?;
        Ok(())
    }
}
