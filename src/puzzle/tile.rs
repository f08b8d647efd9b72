//! Tiles, their rotation state and edge lookup

use super::Symbol;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Permanent identity of a tile (1..=9 for the real puzzle)
pub type TileId = usize;

/// A side of a cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    /// Clockwise from the top, matching the order of a tile's symbols
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    /// Position in the clockwise symbol sequence
    pub fn index(self) -> usize {
        match self {
            Direction::Top => 0,
            Direction::Right => 1,
            Direction::Bottom => 2,
            Direction::Left => 3,
        }
    }

    /// The side of the neighbouring cell that touches this side
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// Coordinate offset of the neighbour on this side (y grows upward)
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Top => (0, 1),
            Direction::Right => (1, 0),
            Direction::Bottom => (0, -1),
            Direction::Left => (-1, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Top => "top",
            Direction::Right => "right",
            Direction::Bottom => "bottom",
            Direction::Left => "left",
        };
        write!(f, "{}", name)
    }
}

/// Clockwise turn of a tile away from its reference orientation.
/// Serialized as whole degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Number of quarter turns clockwise
    pub fn quarter_turns(self) -> usize {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    pub fn degrees(self) -> u16 {
        self.quarter_turns() as u16 * 90
    }

    /// Rotation after one more quarter turn clockwise
    pub fn next(self) -> Rotation {
        Self::from_quarter_turns(self.quarter_turns() + 1)
    }

    /// Build a rotation from any number of quarter turns, wrapping at four
    pub fn from_quarter_turns(turns: usize) -> Rotation {
        Self::ALL[turns % 4]
    }

    /// Parse an exact multiple of 90 in `0..360`
    pub fn from_degrees(degrees: u16) -> Option<Rotation> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
            .ok_or_else(|| format!("rotation must be 0, 90, 180 or 270 degrees, got {}", degrees))
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// A square tile with four fixed edge symbols and a rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    id: TileId,
    symbols: [Symbol; 4],
    rotation: Rotation,
}

impl Tile {
    /// Create a tile in its reference orientation.
    /// `symbols` are listed clockwise as (top, right, bottom, left).
    pub fn new(id: TileId, symbols: [Symbol; 4]) -> Self {
        Self {
            id,
            symbols,
            rotation: Rotation::Deg0,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    /// Symbols in reference orientation
    pub fn symbols(&self) -> &[Symbol; 4] {
        &self.symbols
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Turn the tile a further 90° clockwise
    pub fn rotate(&mut self) {
        self.rotation = self.rotation.next();
    }

    /// Return the tile to its reference orientation
    pub fn reset(&mut self) {
        self.rotation = Rotation::Deg0;
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Copy of this tile turned to `rotation`
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Symbol currently facing `direction`.
    ///
    /// A clockwise quarter turn moves the symbol that faced left to the top,
    /// so the index into the fixed sequence shifts back by one per turn.
    pub fn edge_symbol(&self, direction: Direction) -> Symbol {
        let index = (direction.index() + 4 - self.rotation.quarter_turns()) % 4;
        self.symbols[index]
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile {} ({}) [", self.id, self.rotation)?;
        for (i, direction) in Direction::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", direction, self.edge_symbol(*direction))?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tile() -> Tile {
        Tile::new(
            1,
            [
                Symbol::GreenHead,
                Symbol::GreenLegs,
                Symbol::YellowLegs,
                Symbol::StripeyHead,
            ],
        )
    }

    #[test]
    fn test_reference_orientation() {
        let tile = sample_tile();
        assert_eq!(tile.rotation(), Rotation::Deg0);
        assert_eq!(tile.edge_symbol(Direction::Top), Symbol::GreenHead);
        assert_eq!(tile.edge_symbol(Direction::Right), Symbol::GreenLegs);
        assert_eq!(tile.edge_symbol(Direction::Bottom), Symbol::YellowLegs);
        assert_eq!(tile.edge_symbol(Direction::Left), Symbol::StripeyHead);
    }

    #[test]
    fn test_quarter_turn_moves_left_to_top() {
        let mut tile = sample_tile();
        tile.rotate();
        assert_eq!(tile.rotation(), Rotation::Deg90);
        assert_eq!(tile.edge_symbol(Direction::Top), Symbol::StripeyHead);
        assert_eq!(tile.edge_symbol(Direction::Right), Symbol::GreenHead);
        assert_eq!(tile.edge_symbol(Direction::Bottom), Symbol::GreenLegs);
        assert_eq!(tile.edge_symbol(Direction::Left), Symbol::YellowLegs);
    }

    #[test]
    fn test_four_turns_return_to_start() {
        let original = sample_tile();
        let mut tile = original;
        for _ in 0..4 {
            tile.rotate();
        }
        assert_eq!(tile.rotation(), Rotation::Deg0);
        for direction in Direction::ALL {
            assert_eq!(tile.edge_symbol(direction), original.edge_symbol(direction));
        }
    }

    #[test]
    fn test_reset() {
        let mut tile = sample_tile().with_rotation(Rotation::Deg270);
        tile.reset();
        assert_eq!(tile.rotation(), Rotation::Deg0);
    }

    #[test]
    fn test_rotation_degrees() {
        assert_eq!(Rotation::Deg270.degrees(), 270);
        assert_eq!(Rotation::Deg270.next(), Rotation::Deg0);
        assert_eq!(Rotation::from_degrees(180), Some(Rotation::Deg180));
        assert_eq!(Rotation::from_degrees(45), None);
        assert_eq!(Rotation::from_quarter_turns(6), Rotation::Deg180);
    }

    #[test]
    fn test_rotation_serializes_as_degrees() {
        let json = serde_json::to_string(&Rotation::Deg90).unwrap();
        assert_eq!(json, "90");
        let parsed: Rotation = serde_json::from_str("270").unwrap();
        assert_eq!(parsed, Rotation::Deg270);
        assert!(serde_json::from_str::<Rotation>("100").is_err());
    }

    #[test]
    fn test_opposite_directions() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            let (dx, dy) = direction.offset();
            let (ox, oy) = direction.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }
}
