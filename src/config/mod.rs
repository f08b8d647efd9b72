//! Configuration management for the tile puzzle solver

pub mod settings;

pub use settings::{CliOverrides, OutputConfig, OutputFormat, PuzzleConfig, Settings, SolverConfig};
