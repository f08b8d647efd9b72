//! The 3×3 board and its edge-matching checks

use super::{Direction, Tile, TileId};
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Side length of the board
pub const BOARD_SIZE: usize = 3;

/// Tile ids in visual row order (top row first), rotation discarded
pub type IdentityMatrix = [[Option<TileId>; BOARD_SIZE]; BOARD_SIZE];

/// Placement failures. These mean the caller lost track of what is on the
/// board; the search never expects to see them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("tile {id} is already on the board")]
    DuplicateTile { id: TileId },

    #[error("cell ({x}, {y}) is already occupied by tile {occupant}")]
    OccupiedCell { x: usize, y: usize, occupant: TileId },

    #[error("cell ({x}, {y}) is outside the {size}x{size} board", size = BOARD_SIZE)]
    OutOfBounds { x: usize, y: usize },
}

/// A cell coordinate. `x` grows to the right and `y` grows upward, so
/// `y == 2` is the top visual row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Every cell of the board, row by row from the bottom
    pub fn all() -> Vec<Position> {
        iproduct!(0..BOARD_SIZE, 0..BOARD_SIZE)
            .map(|(y, x)| Position::new(x, y))
            .collect()
    }

    /// The cell next to this one on `direction`'s side, if it has
    /// non-negative coordinates. The result may still lie past the top or
    /// right edge of the board; `Board::get` treats those as empty.
    pub fn neighbor(self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        Some(Position::new(
            self.x.checked_add_signed(dx)?,
            self.y.checked_add_signed(dy)?,
        ))
    }

    pub fn is_on_board(self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A 3×3 grid of optional tile placements.
///
/// Each cell keeps its own copy of the tile, so turning a tile after it has
/// been placed (or reusing it on another branch) never changes a board that
/// already holds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    // cells[row][x], row 0 is the top visual row
    cells: [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn row(y: usize) -> usize {
        BOARD_SIZE - 1 - y
    }

    /// Place `tile` (with its current rotation) at `(x, y)`
    pub fn place(&mut self, tile: Tile, x: usize, y: usize) -> Result<(), PlacementError> {
        if !Position::new(x, y).is_on_board() {
            return Err(PlacementError::OutOfBounds { x, y });
        }
        if self.contains_tile(tile.id()) {
            return Err(PlacementError::DuplicateTile { id: tile.id() });
        }
        if let Some(occupant) = self.get(x, y) {
            return Err(PlacementError::OccupiedCell {
                x,
                y,
                occupant: occupant.id(),
            });
        }
        self.cells[Self::row(y)][x] = Some(tile);
        Ok(())
    }

    /// Clear a cell. Does nothing if the cell is empty or off the board.
    pub fn remove(&mut self, x: usize, y: usize) -> Option<Tile> {
        self.get_mut(x, y).and_then(Option::take)
    }

    /// Tile at `(x, y)`; off-board coordinates read as empty
    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        if x < BOARD_SIZE && y < BOARD_SIZE {
            self.cells[Self::row(y)][x].as_ref()
        } else {
            None
        }
    }

    fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Option<Tile>> {
        if x < BOARD_SIZE && y < BOARD_SIZE {
            Some(&mut self.cells[Self::row(y)][x])
        } else {
            None
        }
    }

    /// Tile at `position`; `None` positions (past the bottom or left edge) read as empty
    pub fn get_at(&self, position: Option<Position>) -> Option<&Tile> {
        position.and_then(|p| self.get(p.x, p.y))
    }

    /// Turn the tile at `(x, y)` a further 90° clockwise.
    /// Returns false if the cell is empty.
    pub fn rotate_at(&mut self, x: usize, y: usize) -> bool {
        match self.get_mut(x, y) {
            Some(Some(tile)) => {
                tile.rotate();
                true
            }
            _ => false,
        }
    }

    /// Whether a tile with this id is anywhere on the board
    pub fn contains_tile(&self, id: TileId) -> bool {
        self.placed().any(|(_, tile)| tile.id() == id)
    }

    /// All placed tiles with their positions, top row first
    pub fn placed(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        iproduct!(0..BOARD_SIZE, 0..BOARD_SIZE).filter_map(move |(row, x)| {
            self.cells[row][x]
                .as_ref()
                .map(|tile| (Position::new(x, BOARD_SIZE - 1 - row), tile))
        })
    }

    pub fn placed_count(&self) -> usize {
        self.placed().count()
    }

    /// Every cell holds a tile
    pub fn is_complete(&self) -> bool {
        self.placed_count() == BOARD_SIZE * BOARD_SIZE
    }

    /// Whether the edge of the tile at `position` facing `direction` agrees
    /// with its neighbour. Empty cells, empty neighbours and the board
    /// boundary impose no constraint.
    fn edge_agrees(&self, position: Position, direction: Direction) -> bool {
        let Some(tile) = self.get(position.x, position.y) else {
            return true;
        };
        match self.get_at(position.neighbor(direction)) {
            Some(neighbor) => tile
                .edge_symbol(direction)
                .is_compatible_with(neighbor.edge_symbol(direction.opposite())),
            None => true,
        }
    }

    /// Check the tile at `(x, y)` against all four neighbours
    pub fn is_cell_locally_valid(&self, x: usize, y: usize) -> bool {
        let position = Position::new(x, y);
        Direction::ALL
            .iter()
            .all(|&direction| self.edge_agrees(position, direction))
    }

    /// Sides of the tile at `(x, y)` that clash with a neighbour
    pub fn mismatched_edges(&self, x: usize, y: usize) -> Vec<Direction> {
        let position = Position::new(x, y);
        Direction::ALL
            .into_iter()
            .filter(|&direction| !self.edge_agrees(position, direction))
            .collect()
    }

    /// Every cell is locally valid
    pub fn is_globally_valid(&self) -> bool {
        Position::all()
            .into_iter()
            .all(|p| self.is_cell_locally_valid(p.x, p.y))
    }

    /// Tile ids in visual row order, for comparing boards by layout alone
    pub fn to_identity_matrix(&self) -> IdentityMatrix {
        self.cells
            .map(|row| row.map(|cell| cell.map(|tile| tile.id())))
    }

    /// The whole board turned 90° clockwise: every tile moves to its new
    /// cell and is itself turned a quarter.
    pub fn rotated_clockwise(&self) -> Board {
        let mut rotated = Board::new();
        for (position, tile) in self.placed() {
            let mut tile = *tile;
            tile.rotate();
            // (x, y) -> (y, 2 - x) with y pointing up
            let x = position.y;
            let y = BOARD_SIZE - 1 - position.x;
            rotated.cells[Self::row(y)][x] = Some(tile);
        }
        rotated
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for (x, cell) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                match cell {
                    Some(tile) => write!(f, "{}@{:<3}", tile.id(), tile.rotation().degrees())?,
                    None => write!(f, "{:5}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
