//! SAT solver integration using CaDiCaL

use super::constraints::{Clause, Formula};
use super::variables::{Variable, VariableSpace};
use crate::error::{KnightError, Result};
use cadical::Solver;
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Truth values returned by a solver, keyed by variable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    values: HashMap<Variable, bool>,
}

impl Assignment {
    pub fn new(values: HashMap<Variable, bool>) -> Self {
        Self { values }
    }

    /// Translate a DIMACS model; ids outside the space are dropped
    pub fn from_model(space: &VariableSpace, model: &HashMap<i32, bool>) -> Self {
        let values = model
            .iter()
            .filter_map(|(&id, &value)| space.variable_for_id(id).map(|var| (var, value)))
            .collect();
        Self { values }
    }

    /// Value of a variable; a missing variable is an error, never a default
    pub fn value(&self, var: Variable) -> Result<bool> {
        self.values
            .get(&var)
            .copied()
            .ok_or(KnightError::UnknownVariable(var))
    }

    pub fn insert(&mut self, var: Variable, value: bool) {
        self.values.insert(var, value);
    }

    pub fn remove(&mut self, var: &Variable) -> Option<bool> {
        self.values.remove(var)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// What a solver hands back for one formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverOutcome {
    Satisfiable(Assignment),
    Unsatisfiable,
    Error(String),
}

impl SolverOutcome {
    pub fn result_type(&self) -> SolverResultType {
        match self {
            SolverOutcome::Satisfiable(_) => SolverResultType::Satisfiable,
            SolverOutcome::Unsatisfiable => SolverResultType::Unsatisfiable,
            SolverOutcome::Error(_) => SolverResultType::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverResultType {
    Satisfiable,
    Unsatisfiable,
    Error,
}

/// Statistics about the solving process
#[derive(Debug, Clone)]
pub struct SolverStatistics {
    pub variable_count: usize,
    pub clause_count: usize,
    pub solve_time: Duration,
    pub result: Option<SolverResultType>,
}

/// SAT solver wrapper for CaDiCaL
pub struct CadicalSolver {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
    solve_time: Duration,
    result: Option<SolverResultType>,
}

impl CadicalSolver {
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            variable_count: 0,
            clause_count: 0,
            solve_time: Duration::ZERO,
            result: None,
        }
    }

    /// Add every clause of a formula to the solver
    pub fn add_formula(&mut self, space: &VariableSpace, formula: &Formula) -> Result<()> {
        for clause in formula.clauses() {
            self.add_clause(space, clause)?;
        }
        Ok(())
    }

    /// Add a single clause to the solver
    pub fn add_clause(&mut self, space: &VariableSpace, clause: &Clause) -> Result<()> {
        if clause.is_empty() {
            return Err(KnightError::EncodingOrSolverFailure(
                "cannot add empty clause (unsatisfiable)".to_string(),
            ));
        }

        let literals = clause.to_dimacs(space)?;
        for &literal in &literals {
            let var = literal.unsigned_abs() as usize;
            if var > self.variable_count {
                self.variable_count = var;
            }
        }

        self.solver.add_clause(literals);
        self.clause_count += 1;
        Ok(())
    }

    /// Run the solver once and read back the value of every variable in the space
    pub fn solve(&mut self, space: &VariableSpace) -> SolverOutcome {
        let start_time = Instant::now();
        let result = self.solver.solve();
        self.solve_time = start_time.elapsed();

        let outcome = match result {
            Some(true) => SolverOutcome::Satisfiable(self.extract_assignment(space)),
            Some(false) => SolverOutcome::Unsatisfiable,
            None => SolverOutcome::Error("CaDiCaL stopped before reaching a result".to_string()),
        };
        self.result = Some(outcome.result_type());
        outcome
    }

    /// Variables CaDiCaL has no value for are left out
    fn extract_assignment(&self, space: &VariableSpace) -> Assignment {
        let mut assignment = Assignment::default();
        for &var in space.variables() {
            if let Ok(id) = space.id_of(var) {
                if let Some(value) = self.solver.value(id) {
                    assignment.insert(var, value);
                }
            }
        }
        assignment
    }

    pub fn statistics(&self) -> SolverStatistics {
        SolverStatistics {
            variable_count: self.variable_count,
            clause_count: self.clause_count,
            solve_time: self.solve_time,
            result: self.result,
        }
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn clause_count(&self) -> usize {
        self.clause_count
    }
}

impl Default for CadicalSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solver Statistics:")?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        writeln!(f, "  Clauses: {}", self.clause_count)?;
        writeln!(f, "  Solve time: {:.3}s", self.solve_time.as_secs_f64())?;
        match self.result {
            Some(result) => writeln!(f, "  Result: {:?}", result)?,
            None => writeln!(f, "  Result: not solved")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Color};
    use crate::sat::constraints::{encode, ConstraintEncoder, Literal};

    #[test]
    fn test_solver_creation() {
        let solver = CadicalSolver::new();
        assert_eq!(solver.variable_count(), 0);
        assert_eq!(solver.clause_count(), 0);
        assert_eq!(solver.statistics().result, None);
    }

    #[test]
    fn test_empty_clause_error() {
        let space = VariableSpace::create(2).unwrap();
        let mut solver = CadicalSolver::new();
        let result = solver.add_clause(&space, &Clause::new(vec![]));
        assert!(matches!(result, Err(KnightError::EncodingOrSolverFailure(_))));
    }

    #[test]
    fn test_unknown_variable_is_rejected() {
        let space = VariableSpace::create(2).unwrap();
        let stray = Variable::new(Color::White, Cell::new(5, 5));
        let mut solver = CadicalSolver::new();
        let result = solver.add_clause(&space, &Clause::unit(Literal::pos(stray)));
        assert_eq!(result, Err(KnightError::UnknownVariable(stray)));
    }

    #[test]
    fn test_single_cell_is_unsatisfiable() {
        let space = VariableSpace::create(1).unwrap();
        let formula = encode(1).unwrap();
        let mut solver = CadicalSolver::new();
        solver.add_formula(&space, &formula).unwrap();

        assert_eq!(solver.solve(&space), SolverOutcome::Unsatisfiable);
        assert_eq!(solver.clause_count(), 6);
        assert_eq!(solver.variable_count(), 2);
    }

    #[test]
    fn test_eight_is_satisfiable_with_total_assignment() {
        let space = VariableSpace::create(8).unwrap();
        let formula = ConstraintEncoder::new(&space)
            .with_exclusive_cells(true)
            .encode()
            .unwrap();
        let mut solver = CadicalSolver::new();
        solver.add_formula(&space, &formula).unwrap();

        match solver.solve(&space) {
            SolverOutcome::Satisfiable(assignment) => {
                assert_eq!(assignment.len(), 128);
                assert!(formula.is_satisfied_by(&assignment).unwrap());
            }
            other => panic!("expected a satisfying assignment, got {:?}", other),
        }
        assert_eq!(solver.statistics().result, Some(SolverResultType::Satisfiable));
    }

    #[test]
    fn test_missing_value_is_unknown_variable() {
        let var = Variable::new(Color::Black, Cell::new(0, 0));
        let assignment = Assignment::default();
        assert_eq!(assignment.value(var), Err(KnightError::UnknownVariable(var)));
    }

    #[test]
    fn test_from_model_drops_foreign_ids() {
        let space = VariableSpace::create(1).unwrap();
        let model: HashMap<i32, bool> = [(1, true), (2, false), (7, true)].into_iter().collect();
        let assignment = Assignment::from_model(&space, &model);
        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment.value(space.white(Cell::new(0, 0)).unwrap()), Ok(true));
    }
}
