//! Display and output formatting utilities

use crate::board::{Board, Piece};
use crate::config::OutputFormat;
use crate::puzzle::Solution;
use anyhow::{Context, Result};
use std::path::Path;

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Heading, board (or "No valid solution") and trailing blank lines, one size per block
    pub fn format_solution(solution: &Solution) -> String {
        let mut output = format!("{}X{}board:\n", solution.size, solution.size);
        match &solution.board {
            Some(board) => {
                output.push_str(&board.to_string());
                output.push('\n');
            }
            None => output.push_str("No valid solution\n"),
        }
        output.push_str("\n\n");
        output
    }

    /// Block for a size whose encoding or solver run failed
    pub fn format_failure(size: usize, message: &str) -> String {
        format!("{}X{}board:\nError: {}\n\n\n", size, size, message)
    }

    /// Board with row and column numbers, knights drawn as ♘ (white) and ♞ (black)
    pub fn format_board_with_coords(board: &Board) -> String {
        let mut output = String::from("   ");
        for col in 0..board.size {
            output.push_str(&format!("{:2}", col % 10));
        }
        output.push('\n');

        for (row, pieces) in board.cells.chunks(board.size.max(1)).enumerate() {
            output.push_str(&format!("{:2} ", row));
            for piece in pieces {
                output.push_str(match piece {
                    Piece::White => " ♘",
                    Piece::Black => " ♞",
                    Piece::Empty => " ·",
                });
            }
            output.push('\n');
        }

        output
    }

    /// One summary line per size
    pub fn format_summary(solutions: &[Solution]) -> String {
        let mut output = String::new();
        output.push_str("Size | Variables | Clauses | Time(ms) | Result\n");
        output.push_str("-----|-----------|---------|----------|----------\n");

        for solution in solutions {
            let result = if !solution.is_solved() {
                "None"
            } else if solution.violations.is_empty() {
                "Solved"
            } else {
                "Invalid"
            };
            output.push_str(&format!(
                "{:4} | {:9} | {:7} | {:8} | {}\n",
                solution.size,
                solution.statistics.total_variables,
                solution.statistics.total_clauses,
                solution.solve_time.as_millis(),
                result
            ));
        }

        output
    }

    /// Save solutions to files based on output format
    pub fn save_solutions<P: AsRef<Path>>(solutions: &[Solution], output_dir: P, format: OutputFormat) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                for solution in solutions {
                    let filepath = output_dir.join(format!("board_{:02}.txt", solution.size));
                    std::fs::write(&filepath, Self::format_solution(solution))
                        .with_context(|| format!("Failed to write {}", filepath.display()))?;
                }
            }
            OutputFormat::Json => {
                for solution in solutions {
                    solution.save_to_file(output_dir.join(format!("board_{:02}.json", solution.size)))?;
                }
            }
        }

        Ok(())
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::parse_board_from_string;
    use crate::config::Settings;
    use crate::sat::SatEncoder;
    use std::time::Duration;
    use tempfile::tempdir;

    fn solution(size: usize, board: Option<&str>) -> Solution {
        let statistics = SatEncoder::new(size, Settings::default()).unwrap().statistics();
        let board = board.map(|text| parse_board_from_string(text).unwrap());
        Solution::new(size, board, statistics, vec![], Duration::ZERO)
    }

    #[test]
    fn test_solution_formatting() {
        let solved = SolutionFormatter::format_solution(&solution(4, Some("1200\n0120\n0012\n2001")));
        assert_eq!(solved, "4X4board:\n1200\n0120\n0012\n2001\n\n\n\n");

        let unsolved = SolutionFormatter::format_solution(&solution(2, None));
        assert_eq!(unsolved, "2X2board:\nNo valid solution\n\n\n");
    }

    #[test]
    fn test_failure_formatting() {
        let text = SolutionFormatter::format_failure(3, "minisat not found");
        assert!(text.starts_with("3X3board:\nError: minisat not found"));
    }

    #[test]
    fn test_board_with_coords() {
        let board = parse_board_from_string("12\n00").unwrap();
        let text = SolutionFormatter::format_board_with_coords(&board);
        assert!(text.contains('♘'));
        assert!(text.contains('♞'));
        assert!(text.starts_with("    0 1"));
    }

    #[test]
    fn test_summary() {
        let summary = SolutionFormatter::format_summary(&[solution(2, None), solution(4, Some("1200\n0120\n0012\n2001"))]);
        assert!(summary.contains("None"));
        assert!(summary.contains("Solved"));
    }

    #[test]
    fn test_save_solutions() {
        let dir = tempdir().unwrap();
        let solutions = vec![solution(4, Some("1200\n0120\n0012\n2001"))];

        SolutionFormatter::save_solutions(&solutions, dir.path(), OutputFormat::Text).unwrap();
        SolutionFormatter::save_solutions(&solutions, dir.path(), OutputFormat::Json).unwrap();
        assert!(dir.path().join("board_04.txt").exists());
        assert!(dir.path().join("board_04.json").exists());
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
