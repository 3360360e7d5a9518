//! Solution representation for one board size

use super::validator::RuleViolation;
use crate::board::Board;
use crate::sat::EncodingStatistics;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// Outcome of solving one board size
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    /// Board size N
    pub size: usize,
    /// Decoded board, `None` when no placement exists
    pub board: Option<Board>,
    /// Canonical rendering of the board
    pub rendering: Option<String>,
    pub statistics: EncodingStatistics,
    /// Rule violations found when re-checking the decoded board
    pub violations: Vec<RuleViolation>,
    #[serde(skip)]
    pub solve_time: Duration,
}

impl Solution {
    pub fn new(
        size: usize,
        board: Option<Board>,
        statistics: EncodingStatistics,
        violations: Vec<RuleViolation>,
        solve_time: Duration,
    ) -> Self {
        let rendering = board.as_ref().map(|b| b.to_string());
        Self {
            size,
            board,
            rendering,
            statistics,
            violations,
            solve_time,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_some()
    }

    /// Solved and free of rule violations
    pub fn is_valid(&self) -> bool {
        self.is_solved() && self.violations.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize solution")
    }

    /// Save the solution as JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_json()?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write solution to {}", path.as_ref().display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::sat::SatEncoder;

    fn statistics(size: usize) -> EncodingStatistics {
        SatEncoder::new(size, Settings::default()).unwrap().statistics()
    }

    #[test]
    fn test_unsolved_solution() {
        let solution = Solution::new(2, None, statistics(2), vec![], Duration::ZERO);
        assert!(!solution.is_solved());
        assert!(!solution.is_valid());
        assert!(solution.rendering.is_none());
    }

    #[test]
    fn test_json_output() {
        let board = crate::board::parse_board_from_string("1200\n0120\n0012\n2001").unwrap();
        let solution = Solution::new(4, Some(board), statistics(4), vec![], Duration::from_millis(3));
        assert!(solution.is_valid());

        let json = solution.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["size"], 4);
        assert_eq!(value["rendering"], "1200\n0120\n0012\n2001\n");
        assert_eq!(value["statistics"]["total_variables"], 32);
        assert_eq!(value["statistics"]["family_counts"]["coverage"], 16);
    }
}
