//! Variable space for the SAT encoding

use crate::board::{all_cells, Cell, Color};
use crate::error::{KnightError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Boolean variable "a token of `color` stands on `cell`"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub color: Color,
    pub cell: Cell,
}

impl Variable {
    pub fn new(color: Color, cell: Cell) -> Self {
        Self { color, cell }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.color {
            Color::White => 'W',
            Color::Black => 'B',
        };
        write!(f, "{}_{{{},{}}}", prefix, self.cell.row, self.cell.col)
    }
}

/// Owns the canonical (color, cell) -> variable mapping for one board size
///
/// Every variable also gets a positive DIMACS id, white cells first, row-major.
#[derive(Debug, Clone)]
pub struct VariableSpace {
    size: usize,
    variable_map: HashMap<Variable, i32>,
    variables: Vec<Variable>,
}

impl VariableSpace {
    /// Allocate all 2·N² variables of an N×N board
    pub fn create(size: usize) -> Result<Self> {
        if size < 1 {
            return Err(KnightError::InvalidSize(size));
        }
        // Every id has to fit a positive DIMACS literal
        let count = size
            .checked_mul(size)
            .and_then(|cells| cells.checked_mul(2))
            .filter(|&count| i32::try_from(count).is_ok())
            .ok_or(KnightError::InvalidSize(size))?;

        let mut variable_map = HashMap::with_capacity(count);
        let mut variables = Vec::with_capacity(count);
        for color in Color::ALL {
            for cell in all_cells(size) {
                let var = Variable::new(color, cell);
                // SAT variables start from 1
                let id = i32::try_from(variables.len() + 1).map_err(|_| KnightError::InvalidSize(size))?;
                variable_map.insert(var, id);
                variables.push(var);
            }
        }

        Ok(Self {
            size,
            variable_map,
            variables,
        })
    }

    /// The variable for a token of `color` on `cell`
    pub fn get(&self, color: Color, cell: Cell) -> Result<Variable> {
        let var = Variable::new(color, cell);
        if self.variable_map.contains_key(&var) {
            Ok(var)
        } else {
            Err(KnightError::UnknownVariable(var))
        }
    }

    pub fn white(&self, cell: Cell) -> Result<Variable> {
        self.get(Color::White, cell)
    }

    pub fn black(&self, cell: Cell) -> Result<Variable> {
        self.get(Color::Black, cell)
    }

    /// DIMACS id of a variable
    pub fn id_of(&self, var: Variable) -> Result<i32> {
        self.variable_map
            .get(&var)
            .copied()
            .ok_or(KnightError::UnknownVariable(var))
    }

    /// Variable behind a DIMACS id, if it was allocated here
    pub fn variable_for_id(&self, id: i32) -> Option<Variable> {
        if id < 1 {
            return None;
        }
        self.variables.get(id as usize - 1).copied()
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.variable_map.contains_key(var)
    }

    /// All variables in id order
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn size(&self) -> usize {
        self.size
    }
}
