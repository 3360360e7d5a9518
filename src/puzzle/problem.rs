//! Knight placement problem for one board size, and sweeps over sizes

use super::{BoardValidator, Solution};
use crate::config::Settings;
use crate::error::Result;
use crate::sat::{Decoded, SatEncoder};
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::time::Instant;

/// One instance of the puzzle: a board size plus the settings to solve it with
pub struct KnightPuzzle {
    size: usize,
    encoder: SatEncoder,
}

impl KnightPuzzle {
    /// Build the encoding; fails with `InvalidSize` before any solver work
    pub fn new(size: usize, settings: Settings) -> Result<Self> {
        let encoder = SatEncoder::new(size, settings)?;
        Ok(Self { size, encoder })
    }

    /// Solve once and re-check any decoded board against the rules
    pub fn solve(&mut self) -> Result<Solution> {
        let start_time = Instant::now();
        let decoded = self.encoder.solve()?;
        let solve_time = start_time.elapsed();

        let (board, violations) = match decoded {
            Decoded::Solved(board) => {
                let validation = BoardValidator::validate(&board);
                if !validation.is_valid {
                    tracing::warn!(
                        size = self.size,
                        violations = validation.violations.len(),
                        "decoded board breaks the placement rules"
                    );
                }
                (Some(board), validation.violations)
            }
            Decoded::NoSolution => {
                tracing::info!(size = self.size, "no valid placement");
                (None, Vec::new())
            }
        };

        Ok(Solution::new(
            self.size,
            board,
            self.encoder.statistics(),
            violations,
            solve_time,
        ))
    }
}

/// Solve every size in the range in parallel; results come back in size order
pub fn solve_range(sizes: RangeInclusive<usize>, settings: &Settings) -> Vec<(usize, Result<Solution>)> {
    sizes
        .into_par_iter()
        .map(|size| {
            let result = KnightPuzzle::new(size, settings.clone()).and_then(|mut puzzle| puzzle.solve());
            (size, result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KnightError;

    #[test]
    fn test_single_cell_has_no_solution() {
        let mut puzzle = KnightPuzzle::new(1, Settings::default()).unwrap();
        let solution = puzzle.solve().unwrap();
        assert!(!solution.is_solved());
        assert_eq!(solution.size, 1);
    }

    #[test]
    fn test_eight_by_eight_is_valid() {
        let mut puzzle = KnightPuzzle::new(8, Settings::default()).unwrap();
        let solution = puzzle.solve().unwrap();
        assert!(solution.is_valid(), "{:?}", solution.violations);
        assert_eq!(solution.board.as_ref().map(|b| b.size), Some(8));
    }

    #[test]
    fn test_six_by_six_without_exclusivity() {
        let mut settings = Settings::default();
        settings.encoding.exclusive_cells = false;
        let mut puzzle = KnightPuzzle::new(6, settings).unwrap();
        let solution = puzzle.solve().unwrap();
        assert!(solution.is_solved());
        assert_eq!(solution.statistics.family_counts.len(), 5);

        // A doubled cell would drop a black piece in decoding and break a row count
        assert!(solution.is_valid(), "{:?}", solution.violations);
        let board = solution.board.as_ref().unwrap();
        assert_eq!(board.piece_count(), 12);
    }

    #[test]
    fn test_invalid_size() {
        assert!(matches!(
            KnightPuzzle::new(0, Settings::default()),
            Err(KnightError::InvalidSize(0))
        ));
    }

    #[test]
    fn test_solve_range_order_and_outcomes() {
        let results = solve_range(1..=8, &Settings::default());
        let sizes: Vec<usize> = results.iter().map(|(size, _)| *size).collect();
        assert_eq!(sizes, (1..=8).collect::<Vec<_>>());

        let solved: Vec<usize> = results
            .iter()
            .filter(|(_, r)| r.as_ref().map(|s| s.is_solved()).unwrap_or(false))
            .map(|(size, _)| *size)
            .collect();
        assert_eq!(solved, vec![4, 6, 7, 8]);

        for (_, result) in &results {
            let solution = result.as_ref().unwrap();
            assert!(solution.violations.is_empty());
        }
    }
}
