//! Independent re-check of a saved solution

use super::Solution;
use crate::puzzle::{Board, Direction, Position, Symbol, TileId, TileSet};
use anyhow::Result;
use std::fmt;

/// Checks solutions against a tile set
pub struct SolutionValidator {
    tile_set: TileSet,
}

/// Result of validating one solution
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub is_complete: bool,
    pub violations: Vec<EdgeViolation>,
    pub error_message: Option<String>,
}

/// Two touching edges that do not form a frog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeViolation {
    pub position: Position,
    pub direction: Direction,
    pub tile: TileId,
    pub symbol: Symbol,
    pub neighbor: TileId,
    pub neighbor_symbol: Symbol,
}

impl fmt::Display for EdgeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tile {} at {} shows {} on its {} edge, tile {} answers with {}",
            self.tile, self.position, self.symbol, self.direction, self.neighbor, self.neighbor_symbol
        )
    }
}

impl SolutionValidator {
    pub fn new(tile_set: TileSet) -> Self {
        Self { tile_set }
    }

    /// Rebuild the solution's board and check every edge.
    ///
    /// A solution that cannot be rebuilt (unknown or repeated tile) is
    /// reported as invalid with an error message rather than as an `Err`.
    pub fn validate(&self, solution: &Solution) -> Result<ValidationResult> {
        let board = match solution.to_board(&self.tile_set) {
            Ok(board) => board,
            Err(e) => {
                return Ok(ValidationResult {
                    is_valid: false,
                    is_complete: false,
                    violations: Vec::new(),
                    error_message: Some(format!("{:#}", e)),
                })
            }
        };

        Ok(Self::validate_board(&board))
    }

    /// Check every edge of `board`
    pub fn validate_board(board: &Board) -> ValidationResult {
        let violations = Self::find_violations(board);
        let is_complete = board.is_complete();
        let is_valid = is_complete && violations.is_empty() && board.is_globally_valid();

        let error_message = if !is_complete {
            Some(format!("Board has {} of 9 cells filled", board.placed_count()))
        } else if !violations.is_empty() {
            Some(format!("{} mismatched edge(s)", violations.len()))
        } else {
            None
        };

        ValidationResult {
            is_valid,
            is_complete,
            violations,
            error_message,
        }
    }

    /// Each shared edge is reported once, from the cell below or to the left
    fn find_violations(board: &Board) -> Vec<EdgeViolation> {
        let mut violations = Vec::new();

        for (position, tile) in board.placed() {
            for direction in board.mismatched_edges(position.x, position.y) {
                if !matches!(direction, Direction::Top | Direction::Right) {
                    continue;
                }
                let Some(neighbor) = board.get_at(position.neighbor(direction)) else {
                    continue;
                };
                violations.push(EdgeViolation {
                    position,
                    direction,
                    tile: tile.id(),
                    symbol: tile.edge_symbol(direction),
                    neighbor: neighbor.id(),
                    neighbor_symbol: neighbor.edge_symbol(direction.opposite()),
                });
            }
        }

        violations
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation Result:")?;
        writeln!(f, "  Valid: {}", self.is_valid)?;
        writeln!(f, "  Complete: {}", self.is_complete)?;
        if let Some(message) = &self.error_message {
            writeln!(f, "  Error: {}", message)?;
        }
        for violation in &self.violations {
            writeln!(f, "    - {}", violation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::board::fixtures::{solved_board, tile};
    use crate::search::solution::PlacedTile;
    use crate::puzzle::Rotation;

    #[test]
    fn test_known_solution_passes() {
        let solution = Solution::from_board(0, &solved_board());
        let result = SolutionValidator::new(TileSet::canonical())
            .validate(&solution)
            .unwrap();
        assert!(result.is_valid);
        assert!(result.violations.is_empty());
        assert!(result.error_message.is_none());
    }

    #[test]
    fn test_turned_tile_is_reported() {
        let mut solution = Solution::from_board(0, &solved_board());
        // centre tile, half a turn off
        solution.grid[1][1] = Some(PlacedTile { id: 8, rotation: Rotation::Deg90 });

        let result = SolutionValidator::new(TileSet::canonical())
            .validate(&solution)
            .unwrap();
        assert!(!result.is_valid);
        assert!(result.is_complete);
        assert!(!result.violations.is_empty());
        assert!(result
            .violations
            .iter()
            .all(|v| v.tile == 8 || v.neighbor == 8));
    }

    #[test]
    fn test_incomplete_board() {
        let mut board = Board::new();
        board.place(tile(1), 0, 0).unwrap();
        let result = SolutionValidator::validate_board(&board);
        assert!(!result.is_valid);
        assert!(!result.is_complete);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_unknown_tile_is_invalid() {
        let mut solution = Solution::from_board(0, &solved_board());
        solution.grid[0][0] = Some(PlacedTile { id: 10, rotation: Rotation::Deg0 });
        let result = SolutionValidator::new(TileSet::canonical())
            .validate(&solution)
            .unwrap();
        assert!(!result.is_valid);
        assert!(result.error_message.is_some());
    }

    #[test]
    fn test_each_edge_reported_once() {
        let mut board = Board::new();
        board.place(tile(1), 0, 0).unwrap();
        board.place(tile(2), 1, 0).unwrap();
        let violations = SolutionValidator::find_violations(&board);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].direction, Direction::Right);
        assert_eq!(violations[0].symbol, Symbol::GreenLegs);
        assert_eq!(violations[0].neighbor_symbol, Symbol::YellowHead);
    }
}
