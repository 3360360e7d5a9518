//! Constraint generation for the knight placement encoding

use super::solver::Assignment;
use super::variables::{Variable, VariableSpace};
use crate::board::{all_cells, is_knight_move, knight_neighbors, Cell, Color};
use crate::error::Result;
use itertools::Itertools;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A variable with a polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal {
    pub var: Variable,
    pub positive: bool,
}

impl Literal {
    /// The asserted literal `var`
    pub fn pos(var: Variable) -> Self {
        Self { var, positive: true }
    }

    /// The negated literal `¬var`
    pub fn neg(var: Variable) -> Self {
        Self { var, positive: false }
    }

    pub fn negate(self) -> Self {
        Self {
            var: self.var,
            positive: !self.positive,
        }
    }

    /// Truth value of the literal when its variable has `value`
    pub fn evaluate(&self, value: bool) -> bool {
        value == self.positive
    }

    /// Signed DIMACS literal
    pub fn to_dimacs(&self, space: &VariableSpace) -> Result<i32> {
        let id = space.id_of(self.var)?;
        Ok(if self.positive { id } else { -id })
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.positive {
            write!(f, "{}", self.var)
        } else {
            write!(f, "¬{}", self.var)
        }
    }
}

/// A SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Self { literals }
    }

    pub fn unit(literal: Literal) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    pub fn binary(lit1: Literal, lit2: Literal) -> Self {
        Self {
            literals: vec![lit1, lit2],
        }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Literals sorted and deduplicated, so that two clauses with the same literal set compare equal
    pub fn normalized(&self) -> Clause {
        let mut literals = self.literals.clone();
        literals.sort();
        literals.dedup();
        Clause { literals }
    }

    pub fn to_dimacs(&self, space: &VariableSpace) -> Result<Vec<i32>> {
        self.literals.iter().map(|lit| lit.to_dimacs(space)).collect()
    }

    /// Whether at least one literal holds under the assignment
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> Result<bool> {
        for lit in &self.literals {
            if lit.evaluate(assignment.value(lit.var)?) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.literals.iter().join(" ∨ "))
    }
}

/// The rule family a clause was generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseFamily {
    Coverage,
    Uniqueness,
    NoSameColorAttack,
    WhiteMustAttack,
    BlackMustAttack,
    CellExclusivity,
}

impl fmt::Display for ClauseFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClauseFamily::Coverage => "row/column coverage",
            ClauseFamily::Uniqueness => "row/column uniqueness",
            ClauseFamily::NoSameColorAttack => "no same-color attack",
            ClauseFamily::WhiteMustAttack => "white must attack",
            ClauseFamily::BlackMustAttack => "black must attack",
            ClauseFamily::CellExclusivity => "cell exclusivity",
        };
        write!(f, "{}", name)
    }
}

/// A finished CNF formula; read-only once built
#[derive(Debug, Clone)]
pub struct Formula {
    size: usize,
    clauses: Vec<Clause>,
    family_counts: BTreeMap<ClauseFamily, usize>,
}

impl Formula {
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Board size the formula was built for
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Number of clauses emitted per rule family
    pub fn family_counts(&self) -> &BTreeMap<ClauseFamily, usize> {
        &self.family_counts
    }

    /// Every variable referenced by at least one clause
    pub fn variables(&self) -> BTreeSet<Variable> {
        self.clauses
            .iter()
            .flat_map(|c| c.literals.iter().map(|lit| lit.var))
            .collect()
    }

    /// Clauses as an order-independent set
    pub fn clause_set(&self) -> BTreeSet<Vec<Literal>> {
        self.clauses.iter().map(|c| c.normalized().literals).collect()
    }

    /// Whether every clause holds under the assignment
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> Result<bool> {
        for clause in &self.clauses {
            if !clause.is_satisfied_by(assignment)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Append-only builder; consumed by [`FormulaBuilder::build`]
#[derive(Debug)]
pub struct FormulaBuilder {
    size: usize,
    clauses: Vec<Clause>,
    family_counts: BTreeMap<ClauseFamily, usize>,
}

impl FormulaBuilder {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            clauses: Vec::new(),
            family_counts: BTreeMap::new(),
        }
    }

    /// Append the clauses of one rule family
    pub fn with_family(mut self, family: ClauseFamily, clauses: Vec<Clause>) -> Self {
        tracing::debug!(%family, clauses = clauses.len(), "emitted clause family");
        *self.family_counts.entry(family).or_insert(0) += clauses.len();
        self.clauses.extend(clauses);
        self
    }

    pub fn build(self) -> Formula {
        Formula {
            size: self.size,
            clauses: self.clauses,
            family_counts: self.family_counts,
        }
    }
}

/// Generates the clauses of the knight placement puzzle over a [`VariableSpace`]
pub struct ConstraintEncoder<'a> {
    space: &'a VariableSpace,
    exclusive_cells: bool,
}

impl<'a> ConstraintEncoder<'a> {
    pub fn new(space: &'a VariableSpace) -> Self {
        Self {
            space,
            exclusive_cells: false,
        }
    }

    /// Also forbid a white and a black token on the same cell
    pub fn with_exclusive_cells(mut self, exclusive_cells: bool) -> Self {
        self.exclusive_cells = exclusive_cells;
        self
    }

    /// Generate all constraints
    pub fn encode(&self) -> Result<Formula> {
        let mut builder = FormulaBuilder::new(self.size())
            .with_family(ClauseFamily::Coverage, self.coverage_constraints()?)
            .with_family(ClauseFamily::Uniqueness, self.uniqueness_constraints()?)
            .with_family(ClauseFamily::NoSameColorAttack, self.no_same_color_attack_constraints()?)
            .with_family(ClauseFamily::WhiteMustAttack, self.must_attack_constraints(Color::White)?)
            .with_family(ClauseFamily::BlackMustAttack, self.must_attack_constraints(Color::Black)?);

        if self.exclusive_cells {
            builder = builder.with_family(ClauseFamily::CellExclusivity, self.exclusivity_constraints()?);
        }

        Ok(builder.build())
    }

    fn size(&self) -> usize {
        self.space.size()
    }

    /// At least one token of each color in every row and every column
    fn coverage_constraints(&self) -> Result<Vec<Clause>> {
        let n = self.size();
        let mut clauses = Vec::with_capacity(4 * n);

        for line in 0..n {
            let row: Vec<Cell> = (0..n).map(|col| Cell::new(line, col)).collect();
            let column: Vec<Cell> = (0..n).map(|row| Cell::new(row, line)).collect();

            for cells in [&row, &column] {
                for color in Color::ALL {
                    let literals = cells
                        .iter()
                        .map(|&cell| self.space.get(color, cell).map(Literal::pos))
                        .collect::<Result<Vec<_>>>()?;
                    clauses.push(Clause::new(literals));
                }
            }
        }

        Ok(clauses)
    }

    /// At most one token of each color per row and per column
    fn uniqueness_constraints(&self) -> Result<Vec<Clause>> {
        self.pairwise_exclusion(|a, b| a.shares_line(&b))
    }

    /// No two tokens of the same color a knight move apart
    fn no_same_color_attack_constraints(&self) -> Result<Vec<Clause>> {
        self.pairwise_exclusion(is_knight_move)
    }

    /// For each unordered cell pair matching `related`, forbid both cells holding the same color.
    ///
    /// Pairs come out of a row-major combination walk, so each unordered pair is visited once.
    fn pairwise_exclusion<F>(&self, related: F) -> Result<Vec<Clause>>
    where
        F: Fn(Cell, Cell) -> bool,
    {
        let mut clauses = Vec::new();

        for (a, b) in all_cells(self.size()).tuple_combinations() {
            if !related(a, b) {
                continue;
            }
            for color in Color::ALL {
                clauses.push(Clause::binary(
                    Literal::neg(self.space.get(color, a)?),
                    Literal::neg(self.space.get(color, b)?),
                ));
            }
        }

        Ok(clauses)
    }

    /// `color(c) → ∨ opponent(n)` over the knight neighbors `n` of every cell `c`.
    ///
    /// A cell without neighbors yields the unit clause `¬color(c)`.
    fn must_attack_constraints(&self, color: Color) -> Result<Vec<Clause>> {
        let n = self.size();
        let mut clauses = Vec::with_capacity(n * n);

        for cell in all_cells(n) {
            let mut literals = vec![Literal::neg(self.space.get(color, cell)?)];
            for neighbor in knight_neighbors(cell, n) {
                literals.push(Literal::pos(self.space.get(color.opponent(), neighbor)?));
            }
            clauses.push(Clause::new(literals));
        }

        Ok(clauses)
    }

    fn exclusivity_constraints(&self) -> Result<Vec<Clause>> {
        all_cells(self.size())
            .map(|cell| {
                Ok(Clause::binary(
                    Literal::neg(self.space.white(cell)?),
                    Literal::neg(self.space.black(cell)?),
                ))
            })
            .collect()
    }
}

/// Build the five-family formula for an N×N board
pub fn encode(size: usize) -> Result<Formula> {
    let space = VariableSpace::create(size)?;
    ConstraintEncoder::new(&space).encode()
}
