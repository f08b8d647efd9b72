//! Solved boards in the form handed to renderers and saved to disk

use super::{EquivalenceClass, SearchStatistics};
use crate::puzzle::{Board, Position, Rotation, TileId, TileSet, BOARD_SIZE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// What a renderer needs to draw one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub id: TileId,
    /// Clockwise turn in degrees (0, 90, 180 or 270)
    pub rotation: Rotation,
}

/// A solved board. `grid` is in visual row order: `grid[0]` is the top row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Position in the list of unique solutions, from 0
    pub index: usize,
    /// How many search results collapsed into this one
    pub equivalent_boards: usize,
    pub grid: [[Option<PlacedTile>; BOARD_SIZE]; BOARD_SIZE],
}

impl Solution {
    /// Capture the placement and final rotation of every tile on `board`
    pub fn from_board(index: usize, board: &Board) -> Self {
        let mut grid = [[None; BOARD_SIZE]; BOARD_SIZE];
        for (position, tile) in board.placed() {
            grid[BOARD_SIZE - 1 - position.y][position.x] = Some(PlacedTile {
                id: tile.id(),
                rotation: tile.rotation(),
            });
        }

        Self {
            index,
            equivalent_boards: 1,
            grid,
        }
    }

    /// Build the solution for one rotation class
    pub fn from_class(index: usize, class: &EquivalenceClass) -> Self {
        Self {
            equivalent_boards: class.size(),
            ..Self::from_board(index, &class.representative)
        }
    }

    /// Cell at board coordinates (y grows upward)
    pub fn cell(&self, position: Position) -> Option<PlacedTile> {
        if position.is_on_board() {
            self.grid[BOARD_SIZE - 1 - position.y][position.x]
        } else {
            None
        }
    }

    /// Rebuild the board from tile definitions
    pub fn to_board(&self, tile_set: &TileSet) -> Result<Board> {
        let mut board = Board::new();
        for position in Position::all() {
            let Some(placed) = self.cell(position) else {
                continue;
            };
            let tile = tile_set
                .tile(placed.id)
                .with_context(|| format!("Tile {} is not in the tile set", placed.id))?
                .with_rotation(placed.rotation);
            board
                .place(tile, position.x, position.y)
                .with_context(|| format!("Cannot place tile {} at {}", placed.id, position))?;
        }
        Ok(board)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write solution: {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read solution: {}", path.as_ref().display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse solution: {}", path.as_ref().display()))
    }
}

/// Everything one run of the solver produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub statistics: SearchStatistics,
    /// Valid complete boards before deduplication
    pub total_solutions: usize,
    pub solutions: Vec<Solution>,
    #[serde(skip)]
    pub solve_time: Duration,
}

impl SolveReport {
    pub fn is_solved(&self) -> bool {
        !self.solutions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::board::fixtures::solved_board;

    #[test]
    fn test_grid_is_top_row_first() {
        let solution = Solution::from_board(0, &solved_board());
        assert_eq!(
            solution.grid[0][0],
            Some(PlacedTile { id: 2, rotation: Rotation::Deg0 })
        );
        assert_eq!(
            solution.grid[2][2],
            Some(PlacedTile { id: 3, rotation: Rotation::Deg180 })
        );
        assert_eq!(solution.cell(Position::new(2, 0)), solution.grid[2][2]);
        assert_eq!(solution.cell(Position::new(5, 0)), None);
    }

    #[test]
    fn test_json_uses_degrees() {
        let solution = Solution::from_board(3, &solved_board());
        let json = solution.to_json().unwrap();
        assert!(json.contains("\"rotation\": 270"));

        let parsed = Solution::from_json(&json).unwrap();
        assert_eq!(parsed, solution);
    }

    #[test]
    fn test_rebuild_board() {
        let board = solved_board();
        let solution = Solution::from_board(0, &board);
        let rebuilt = solution.to_board(&TileSet::canonical()).unwrap();
        assert_eq!(rebuilt, board);
    }

    #[test]
    fn test_rebuild_rejects_unknown_tile() {
        let mut solution = Solution::from_board(0, &solved_board());
        solution.grid[1][1] = Some(PlacedTile { id: 42, rotation: Rotation::Deg0 });
        assert!(solution.to_board(&TileSet::canonical()).is_err());
    }

    #[test]
    fn test_rebuild_rejects_repeated_tile() {
        let mut solution = Solution::from_board(0, &solved_board());
        solution.grid[1][1] = solution.grid[0][0];
        assert!(solution.to_board(&TileSet::canonical()).is_err());
    }
}
