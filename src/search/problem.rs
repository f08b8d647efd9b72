//! A configured puzzle: tile set plus solver settings

use super::{equivalence_classes, Solution, SolveReport, Solver};
use crate::config::Settings;
use crate::puzzle::{resolve_tile_set, TileSet};
use anyhow::{Context, Result};
use log::info;
use std::time::Instant;

/// Ties a tile set to the settings that control how it is solved
pub struct PuzzleProblem {
    settings: Settings,
    tile_set: TileSet,
}

impl PuzzleProblem {
    /// Create a problem from settings, loading the tile file if one is named
    pub fn new(settings: Settings) -> Result<Self> {
        let tile_set = resolve_tile_set(settings.puzzle.tile_file.as_deref())
            .context("Failed to load tile set")?;
        Self::with_tile_set(settings, tile_set)
    }

    /// Create a problem with an explicit tile set
    pub fn with_tile_set(settings: Settings, tile_set: TileSet) -> Result<Self> {
        tile_set.validate().context("Invalid tile set")?;
        Ok(Self { settings, tile_set })
    }

    /// Search every placement, then reduce to one board per rotation class
    pub fn solve(&self) -> Result<SolveReport> {
        let start_time = Instant::now();
        info!(
            "Solving with {} tiles ({} search)",
            self.tile_set.len(),
            if self.settings.solver.parallel { "parallel" } else { "sequential" }
        );

        let solver = Solver::new(self.tile_set.build_tiles());
        let outcome = if self.settings.solver.parallel {
            solver.solve_parallel()
        } else {
            solver.solve()
        }
        .context("Search lost track of the board")?;

        let solutions: Vec<Solution> = if self.settings.solver.deduplicate {
            equivalence_classes(&outcome.solutions)
                .iter()
                .enumerate()
                .map(|(index, class)| Solution::from_class(index, class))
                .collect()
        } else {
            outcome
                .solutions
                .iter()
                .enumerate()
                .map(|(index, board)| Solution::from_board(index, board))
                .collect()
        };

        info!(
            "{} valid boards, {} kept",
            outcome.solutions.len(),
            solutions.len()
        );

        Ok(SolveReport {
            statistics: outcome.statistics,
            total_solutions: outcome.solutions.len(),
            solutions,
            solve_time: start_time.elapsed(),
        })
    }

    pub fn tile_set(&self) -> &TileSet {
        &self.tile_set
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Symbol, TileDefinition};

    #[test]
    fn test_canonical_report() {
        let problem = PuzzleProblem::new(Settings::default()).unwrap();
        let report = problem.solve().unwrap();

        assert!(report.is_solved());
        assert_eq!(report.total_solutions, 8);
        assert_eq!(report.solutions.len(), 2);
        assert!(report.solutions.iter().all(|s| s.equivalent_boards == 4));
        assert_eq!(report.solutions[1].index, 1);
    }

    #[test]
    fn test_without_deduplication() {
        let mut settings = Settings::default();
        settings.solver.deduplicate = false;
        settings.solver.parallel = false;
        let report = PuzzleProblem::new(settings).unwrap().solve().unwrap();
        assert_eq!(report.solutions.len(), 8);
        assert_eq!(report.total_solutions, 8);
    }

    #[test]
    fn test_unsolvable_set_is_not_an_error() {
        let tile_set = TileSet {
            tiles: (1..=9)
                .map(|id| TileDefinition {
                    id,
                    symbols: [Symbol::SpottyHead; 4],
                })
                .collect(),
        };
        let report = PuzzleProblem::with_tile_set(Settings::default(), tile_set)
            .unwrap()
            .solve()
            .unwrap();
        assert!(!report.is_solved());
        assert_eq!(report.total_solutions, 0);
    }

    #[test]
    fn test_invalid_tile_set_rejected() {
        let tile_set = TileSet { tiles: Vec::new() };
        assert!(PuzzleProblem::with_tile_set(Settings::default(), tile_set).is_err());
    }
}
