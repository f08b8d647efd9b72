//! Puzzle pieces: symbols, tiles and the board

pub mod board;
pub mod io;
pub mod symbol;
pub mod tile;

pub use board::{Board, IdentityMatrix, PlacementError, Position, BOARD_SIZE};
pub use io::{load_tile_set, resolve_tile_set, save_tile_set, TileDefinition, TileSet};
pub use symbol::{Symbol, PAIRS};
pub use tile::{Direction, Rotation, Tile, TileId};
