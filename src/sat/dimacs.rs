//! DIMACS CNF rendering and MiniSat result parsing

use super::constraints::Formula;
use super::variables::VariableSpace;
use crate::error::{KnightError, Result};
use std::collections::HashMap;
use std::fmt::Write;

/// Verdict of a MiniSat result file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelResult {
    Satisfiable(HashMap<i32, bool>),
    Unsatisfiable,
    Indeterminate,
}

/// Render a formula as DIMACS CNF using the ids of `space`
pub fn write_cnf(space: &VariableSpace, formula: &Formula) -> Result<String> {
    let mut out = String::new();
    let size = formula.size();
    // Writing to a String cannot fail
    let _ = writeln!(out, "c knight placement {}x{}", size, size);
    let _ = writeln!(out, "p cnf {} {}", space.variable_count(), formula.len());

    for clause in formula.clauses() {
        for literal in clause.to_dimacs(space)? {
            let _ = write!(out, "{} ", literal);
        }
        out.push_str("0\n");
    }

    Ok(out)
}

/// Parse the result file MiniSat writes: `SAT` followed by a 0-terminated model, `UNSAT`, or `INDET`
pub fn parse_model(content: &str) -> Result<ModelResult> {
    let mut lines = content.lines().map(str::trim).filter(|l| !l.is_empty());

    match lines.next() {
        Some("SAT") => {}
        Some("UNSAT") => return Ok(ModelResult::Unsatisfiable),
        Some("INDET") => return Ok(ModelResult::Indeterminate),
        Some(other) => return Err(malformed(format!("unexpected verdict '{}'", other))),
        None => return Err(malformed("empty result file".to_string())),
    }

    let mut model = HashMap::new();
    for token in lines.flat_map(str::split_whitespace) {
        let literal: i32 = token
            .parse()
            .map_err(|_| malformed(format!("invalid literal '{}'", token)))?;
        if literal == 0 {
            return Ok(ModelResult::Satisfiable(model));
        }
        let id = literal
            .checked_abs()
            .ok_or_else(|| malformed(format!("literal '{}' is out of range", token)))?;
        model.insert(id, literal > 0);
    }

    Err(malformed("model is not terminated by 0".to_string()))
}

fn malformed(detail: String) -> KnightError {
    KnightError::EncodingOrSolverFailure(format!("malformed MiniSat result: {}", detail))
}
