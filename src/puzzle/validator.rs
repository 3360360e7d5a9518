//! Rule checking for decoded boards

use crate::board::{is_knight_move, knight_neighbors, Board, Cell, Color, Piece};
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

/// Which puzzle rule a board breaks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleViolation {
    /// A row without exactly one token of a color
    RowCount { row: usize, color: Color, count: usize },
    /// A column without exactly one token of a color
    ColumnCount { col: usize, color: Color, count: usize },
    /// Two tokens of the same color a knight move apart
    SameColorAttack { color: Color, first: Cell, second: Cell },
    /// A token with no opposing token to attack
    NoTarget { color: Color, cell: Cell },
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleViolation::RowCount { row, color, count } => {
                write!(f, "row {} has {} {} tokens, expected 1", row, count, color)
            }
            RuleViolation::ColumnCount { col, color, count } => {
                write!(f, "column {} has {} {} tokens, expected 1", col, count, color)
            }
            RuleViolation::SameColorAttack { color, first, second } => {
                write!(f, "{} tokens at {} and {} attack each other", color, first, second)
            }
            RuleViolation::NoTarget { color, cell } => {
                write!(f, "{} token at {} attacks no {} token", color, cell, color.opponent())
            }
        }
    }
}

/// Result of board validation
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violations: Vec<RuleViolation>,
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            return writeln!(f, "Board satisfies every placement rule");
        }
        writeln!(f, "Found {} rule violations:", self.violations.len())?;
        for violation in &self.violations {
            writeln!(f, "  - {}", violation)?;
        }
        Ok(())
    }
}

/// Checks boards against the knight placement rules
pub struct BoardValidator;

impl BoardValidator {
    pub fn validate(board: &Board) -> ValidationResult {
        let mut violations = Vec::new();
        for color in Color::ALL {
            violations.extend(Self::line_violations(board, color));
            violations.extend(Self::attack_violations(board, color));
            violations.extend(Self::target_violations(board, color));
        }

        ValidationResult {
            is_valid: violations.is_empty(),
            violations,
        }
    }

    fn line_violations(board: &Board, color: Color) -> Vec<RuleViolation> {
        let cells = board.pieces_of(color);
        let mut violations = Vec::new();

        for line in 0..board.size {
            let in_row = cells.iter().filter(|c| c.row == line).count();
            if in_row != 1 {
                violations.push(RuleViolation::RowCount { row: line, color, count: in_row });
            }
            let in_col = cells.iter().filter(|c| c.col == line).count();
            if in_col != 1 {
                violations.push(RuleViolation::ColumnCount { col: line, color, count: in_col });
            }
        }

        violations
    }

    fn attack_violations(board: &Board, color: Color) -> Vec<RuleViolation> {
        board
            .pieces_of(color)
            .into_iter()
            .tuple_combinations()
            .filter(|&(a, b)| is_knight_move(a, b))
            .map(|(first, second)| RuleViolation::SameColorAttack { color, first, second })
            .collect()
    }

    fn target_violations(board: &Board, color: Color) -> Vec<RuleViolation> {
        let target = Piece::from(color.opponent());
        board
            .pieces_of(color)
            .into_iter()
            .filter(|&cell| {
                !knight_neighbors(cell, board.size)
                    .into_iter()
                    .any(|n| board.get(n) == target)
            })
            .map(|cell| RuleViolation::NoTarget { color, cell })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::parse_board_from_string;

    #[test]
    fn test_valid_boards() {
        for text in [
            "1200\n0120\n0012\n2001",
            "120000\n012000\n001002\n200100\n000210\n000021",
        ] {
            let board = parse_board_from_string(text).unwrap();
            let result = BoardValidator::validate(&board);
            assert!(result.is_valid, "{}\n{}", text, result);
        }
    }

    #[test]
    fn test_empty_board_breaks_every_line() {
        let board = Board::new(3);
        let result = BoardValidator::validate(&board);
        assert!(!result.is_valid);
        // rows and columns, both colors
        assert_eq!(result.violations.len(), 12);
    }

    #[test]
    fn test_same_color_attack() {
        // Whites at (0,0) and (1,2) are a knight move apart
        let board = parse_board_from_string("1020\n2010\n0201\n0102").unwrap();
        let result = BoardValidator::validate(&board);
        assert!(result.violations.contains(&RuleViolation::SameColorAttack {
            color: Color::White,
            first: Cell::new(0, 0),
            second: Cell::new(1, 2),
        }));
    }

    #[test]
    fn test_piece_without_target() {
        let board = parse_board_from_string("12\n21").unwrap();
        let result = BoardValidator::validate(&board);
        assert!(result.violations.contains(&RuleViolation::NoTarget {
            color: Color::White,
            cell: Cell::new(0, 0),
        }));
        assert!(result.to_string().contains("attacks no black token"));
    }
}
