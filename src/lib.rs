//! Frog Tile Puzzle Solver
//!
//! Places nine square frog tiles on a 3x3 board so that every shared edge
//! joins the head and legs of a frog of the same colour, then collapses
//! boards that are rotations of one another.

pub mod config;
pub mod puzzle;
pub mod search;
pub mod utils;

pub use config::Settings;
pub use puzzle::{Board, Symbol, Tile, TileSet};
pub use search::{PuzzleProblem, Solution, SolveReport, Solver};

use anyhow::Result;

/// Main entry point for solving the tile puzzle
pub fn solve_puzzle(settings: Settings) -> Result<SolveReport> {
    let problem = PuzzleProblem::new(settings)?;
    problem.solve()
}
