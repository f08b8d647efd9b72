//! Backtracking search over tile placements
//!
//! Cells are filled one at a time. At each cell every remaining tile is tried
//! in all four rotations; a placement that agrees with its neighbours is
//! extended on a copy of the board, and every complete board that passes the
//! global check is collected. The search enumerates everything, so boards that
//! are rotations of each other all appear in the result.

use crate::puzzle::{Board, PlacementError, Position, Rotation, Tile};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Counters collected while searching
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStatistics {
    /// (tile, rotation) trials made across all cells
    pub iterations: u64,
    /// Branches that reached a board with no cells left to fill
    pub terminal_boards: usize,
    /// Terminal boards that failed the global check
    pub rejected_terminal_boards: usize,
}

impl SearchStatistics {
    fn merge(&mut self, other: &SearchStatistics) {
        self.iterations += other.iterations;
        self.terminal_boards += other.terminal_boards;
        self.rejected_terminal_boards += other.rejected_terminal_boards;
    }
}

/// Result of a full search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Every valid complete board, in discovery order, not deduplicated
    pub solutions: Vec<Board>,
    pub statistics: SearchStatistics,
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        !self.solutions.is_empty()
    }
}

/// Exhaustive edge-matching solver
#[derive(Debug, Clone)]
pub struct Solver {
    tiles: Vec<Tile>,
    cells: Vec<Position>,
}

impl Solver {
    /// Solver for the whole 3×3 board
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self::with_cells(tiles, Position::all())
    }

    /// Solver that only fills `cells`. Cells are taken from the end of the
    /// list, so the last entry is filled first.
    pub fn with_cells(tiles: Vec<Tile>, cells: Vec<Position>) -> Self {
        let tiles = tiles
            .into_iter()
            .map(|mut tile| {
                tile.reset();
                tile
            })
            .collect();
        Self { tiles, cells }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Run the search on the current thread
    pub fn solve(&self) -> Result<SearchOutcome, PlacementError> {
        let mut statistics = SearchStatistics::default();
        let solutions = try_tiles_at(Board::new(), self.tiles.clone(), &self.cells, &mut statistics)?;

        Self::log_outcome(&solutions, &statistics);
        Ok(SearchOutcome {
            solutions,
            statistics,
        })
    }

    /// Run the search with the first cell's tile trials spread over the
    /// rayon pool. Each worker owns its board and tile pool; results come
    /// back in the same order as [`Solver::solve`].
    pub fn solve_parallel(&self) -> Result<SearchOutcome, PlacementError> {
        let Some((&position, rest)) = self.cells.split_last() else {
            return self.solve();
        };

        let branch_results: Vec<Result<(Vec<Board>, SearchStatistics), PlacementError>> =
            branches(self.tiles.clone())
                .into_par_iter()
                .map(|(tile, remaining)| {
                    let mut statistics = SearchStatistics::default();
                    let mut board = Board::new();
                    let solutions =
                        try_tile_at(&mut board, tile, position, &remaining, rest, &mut statistics)?;
                    Ok((solutions, statistics))
                })
                .collect();

        let mut solutions = Vec::new();
        let mut statistics = SearchStatistics::default();
        for result in branch_results {
            let (branch_solutions, branch_statistics) = result?;
            solutions.extend(branch_solutions);
            statistics.merge(&branch_statistics);
        }

        Self::log_outcome(&solutions, &statistics);
        Ok(SearchOutcome {
            solutions,
            statistics,
        })
    }

    fn log_outcome(solutions: &[Board], statistics: &SearchStatistics) {
        info!(
            "Search finished after {} iterations: {} terminal boards, {} valid",
            statistics.iterations,
            statistics.terminal_boards,
            solutions.len()
        );
    }
}

/// Pair each tile of the pool with the pool that remains once it is used.
///
/// Tiles are taken from the back of the pool. A tile that has been tried is
/// moved to a discard list, so it is still available to later cells of the
/// branches opened by the tiles tried after it. Every remaining tile is
/// turned back to 0° so no rotation leaks between branches.
fn branches(mut pending: Vec<Tile>) -> Vec<(Tile, Vec<Tile>)> {
    let mut discarded: Vec<Tile> = Vec::with_capacity(pending.len());
    let mut result = Vec::with_capacity(pending.len());

    while let Some(tile) = pending.pop() {
        let remaining = pending
            .iter()
            .chain(discarded.iter())
            .map(|&tile| {
                let mut tile = tile;
                tile.reset();
                tile
            })
            .collect();
        result.push((tile, remaining));
        discarded.push(tile);
    }

    result
}

/// Fill the last of `cells` with each tile in turn and recurse
fn try_tiles_at(
    mut board: Board,
    tiles: Vec<Tile>,
    cells: &[Position],
    statistics: &mut SearchStatistics,
) -> Result<Vec<Board>, PlacementError> {
    let Some((&position, rest)) = cells.split_last() else {
        return Ok(accept_terminal(board, statistics));
    };

    let mut solutions = Vec::new();
    for (tile, remaining) in branches(tiles) {
        solutions.extend(try_tile_at(
            &mut board, tile, position, &remaining, rest, statistics,
        )?);
    }

    Ok(solutions)
}

/// Try one tile at `position` in all four rotations.
/// The tile is taken off `board` again before returning.
fn try_tile_at(
    board: &mut Board,
    tile: Tile,
    position: Position,
    remaining: &[Tile],
    rest: &[Position],
    statistics: &mut SearchStatistics,
) -> Result<Vec<Board>, PlacementError> {
    board.place(tile, position.x, position.y)?;

    let mut solutions = Vec::new();
    for _ in Rotation::ALL {
        board.rotate_at(position.x, position.y);
        statistics.iterations += 1;

        if board.is_cell_locally_valid(position.x, position.y) {
            // `Board` is `Copy`: the branch works on its own board
            solutions.extend(try_tiles_at(*board, remaining.to_vec(), rest, statistics)?);
        }
    }

    board.remove(position.x, position.y);
    Ok(solutions)
}

fn accept_terminal(board: Board, statistics: &mut SearchStatistics) -> Vec<Board> {
    statistics.terminal_boards += 1;

    if board.is_globally_valid() {
        debug!("Accepted board after {} iterations:\n{}", statistics.iterations, board);
        vec![board]
    } else {
        statistics.rejected_terminal_boards += 1;
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Symbol, TileId, TileSet, BOARD_SIZE};
    use std::collections::HashSet;

    fn canonical_tiles() -> Vec<Tile> {
        TileSet::canonical().build_tiles()
    }

    #[test]
    fn test_canonical_puzzle_is_solved() {
        let outcome = Solver::new(canonical_tiles()).solve().unwrap();

        assert!(outcome.is_solved());
        assert_eq!(outcome.solutions.len(), 8);
        for board in &outcome.solutions {
            assert!(board.is_complete());
            assert!(board.is_globally_valid());

            let ids: HashSet<TileId> = board.placed().map(|(_, tile)| tile.id()).collect();
            assert_eq!(ids.len(), BOARD_SIZE * BOARD_SIZE);
        }
    }

    #[test]
    fn test_statistics_are_counted() {
        let outcome = Solver::new(canonical_tiles()).solve().unwrap();
        let stats = &outcome.statistics;

        // the first cell alone sees 9 tiles × 4 rotations
        assert!(stats.iterations >= 36);
        assert_eq!(stats.terminal_boards, outcome.solutions.len() + stats.rejected_terminal_boards);
    }

    #[test]
    fn test_solutions_are_distinct() {
        let outcome = Solver::new(canonical_tiles()).solve().unwrap();
        let unique: HashSet<Board> = outcome.solutions.iter().copied().collect();
        assert_eq!(unique.len(), outcome.solutions.len());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let solver = Solver::new(canonical_tiles());
        let sequential = solver.solve().unwrap();
        let parallel = solver.solve_parallel().unwrap();

        assert_eq!(sequential.solutions, parallel.solutions);
        assert_eq!(sequential.statistics, parallel.statistics);
    }

    #[test]
    fn test_single_cell_accepts_every_rotation() {
        let tile = TileSet::canonical().tile(5).unwrap();
        let solver = Solver::with_cells(vec![tile], vec![Position::new(1, 1)]);
        let outcome = solver.solve().unwrap();

        assert_eq!(outcome.solutions.len(), 4);
        assert_eq!(outcome.statistics.iterations, 4);
        let rotations: HashSet<Rotation> = outcome
            .solutions
            .iter()
            .filter_map(|board| board.get(1, 1).map(Tile::rotation))
            .collect();
        assert_eq!(rotations.len(), 4);
    }

    #[test]
    fn test_pool_smaller_than_board_yields_nothing() {
        let tiles: Vec<Tile> = canonical_tiles().into_iter().take(8).collect();
        let outcome = Solver::new(tiles).solve().unwrap();
        assert!(!outcome.is_solved());
        assert_eq!(outcome.statistics.terminal_boards, 0);
    }

    #[test]
    fn test_unsolvable_pair() {
        // two tiles carrying only heads can never meet
        let heads = [Symbol::GreenHead; 4];
        let tiles = vec![Tile::new(1, heads), Tile::new(2, heads)];
        let solver = Solver::with_cells(tiles, vec![Position::new(0, 0), Position::new(1, 0)]);
        let outcome = solver.solve().unwrap();

        assert!(outcome.solutions.is_empty());
        // first cell: 2 tiles × 4 rotations, each opening one branch of 4 trials
        assert_eq!(outcome.statistics.iterations, 8 + 8 * 4);
    }

    #[test]
    fn test_rotated_input_is_reset() {
        let mut tiles = canonical_tiles();
        for tile in &mut tiles {
            tile.set_rotation(Rotation::Deg180);
        }
        let solver = Solver::new(tiles);
        assert!(solver.tiles().iter().all(|t| t.rotation() == Rotation::Deg0));
        assert_eq!(solver.solve().unwrap().solutions.len(), 8);
    }

    #[test]
    fn test_branches_cover_pool() {
        let pool = canonical_tiles();
        let branches = branches(pool.clone());
        assert_eq!(branches.len(), pool.len());
        for (tile, remaining) in &branches {
            assert_eq!(remaining.len(), pool.len() - 1);
            assert!(remaining.iter().all(|t| t.id() != tile.id()));
        }
        // tiles come off the back of the pool
        assert_eq!(branches[0].0.id(), 9);
    }
}
