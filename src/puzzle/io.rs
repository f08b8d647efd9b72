//! Tile-set definitions: the canonical puzzle and YAML files

use super::{Symbol, Tile, TileId};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Most tiles a 3×3 board can hold
pub const MAX_TILES: usize = 9;

/// One tile as written in a tile file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDefinition {
    pub id: TileId,
    /// Clockwise from the top at 0°: top, right, bottom, left
    pub symbols: [Symbol; 4],
}

/// The tiles a puzzle is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSet {
    pub tiles: Vec<TileDefinition>,
}

impl TileSet {
    /// The nine tiles of the frog puzzle
    pub fn canonical() -> Self {
        use Symbol::{
            GreenHead as GH, GreenLegs as GL, SpottyHead as PH, SpottyLegs as PL,
            StripeyHead as SH, StripeyLegs as SL, YellowHead as YH, YellowLegs as YL,
        };

        let definitions = [
            (1, [GH, GL, YL, SH]),
            (2, [SH, GH, YH, YH]),
            (3, [PL, SL, YH, PH]),
            (4, [PH, GL, PL, SL]),
            (5, [YL, GL, PL, YL]),
            (6, [PH, GH, PH, SL]),
            (7, [YH, SL, YL, GL]),
            (8, [YH, PL, GH, SH]),
            (9, [PL, SL, SH, GH]),
        ];

        Self {
            tiles: definitions
                .into_iter()
                .map(|(id, symbols)| TileDefinition { id, symbols })
                .collect(),
        }
    }

    /// Check the set can be laid out on one board
    pub fn validate(&self) -> Result<()> {
        if self.tiles.is_empty() {
            anyhow::bail!("Tile set is empty");
        }
        if self.tiles.len() > MAX_TILES {
            anyhow::bail!(
                "Tile set has {} tiles, a board holds at most {}",
                self.tiles.len(),
                MAX_TILES
            );
        }

        let mut seen = HashSet::new();
        for definition in &self.tiles {
            if !(1..=MAX_TILES).contains(&definition.id) {
                anyhow::bail!(
                    "Tile id {} is out of range (expected 1..={})",
                    definition.id,
                    MAX_TILES
                );
            }
            if !seen.insert(definition.id) {
                anyhow::bail!("Tile id {} is defined more than once", definition.id);
            }
        }

        Ok(())
    }

    /// Tiles at their reference orientation, in id order
    pub fn build_tiles(&self) -> Vec<Tile> {
        let mut tiles: Vec<Tile> = self
            .tiles
            .iter()
            .map(|definition| Tile::new(definition.id, definition.symbols))
            .collect();
        tiles.sort_by_key(Tile::id);
        tiles
    }

    /// Look up one tile by id, at 0°
    pub fn tile(&self, id: TileId) -> Option<Tile> {
        self.tiles
            .iter()
            .find(|definition| definition.id == id)
            .map(|definition| Tile::new(definition.id, definition.symbols))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl Default for TileSet {
    fn default() -> Self {
        Self::canonical()
    }
}

/// Load and validate a tile set from a YAML file
pub fn load_tile_set<P: AsRef<Path>>(path: P) -> Result<TileSet> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read tile file: {}", path.as_ref().display()))?;

    parse_tile_set(&content)
        .with_context(|| format!("Failed to parse tile file: {}", path.as_ref().display()))
}

/// Parse and validate a tile set from YAML text
pub fn parse_tile_set(content: &str) -> Result<TileSet> {
    let tile_set: TileSet = serde_yaml::from_str(content).context("Invalid tile set YAML")?;
    tile_set.validate()?;
    Ok(tile_set)
}

/// Write a tile set as YAML, creating parent directories as needed
pub fn save_tile_set<P: AsRef<Path>>(tile_set: &TileSet, path: P) -> Result<()> {
    let content = serde_yaml::to_string(tile_set).context("Failed to serialize tile set")?;

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write tile file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Load the tile file if one is named, otherwise use the canonical set
pub fn resolve_tile_set(path: Option<&Path>) -> Result<TileSet> {
    match path {
        Some(path) => load_tile_set(path),
        None => Ok(TileSet::canonical()),
    }
}
