//! Text rendering of boards and writing results to disk

use crate::config::OutputFormat;
use crate::puzzle::{Board, Direction, TileSet, BOARD_SIZE};
use crate::search::{Solution, SolveReport};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Width of one rendered cell, not counting borders
const CELL_WIDTH: usize = 12;

/// Format boards and solutions for the console and for text files
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Draw a board with each tile's facing symbols, id and rotation
    pub fn format_board(board: &Board) -> String {
        let separator = format!(
            "+{}\n",
            format!("{}+", "-".repeat(CELL_WIDTH)).repeat(BOARD_SIZE)
        );
        let mut output = separator.clone();

        for y in (0..BOARD_SIZE).rev() {
            let cells: Vec<[String; 4]> = (0..BOARD_SIZE)
                .map(|x| Self::cell_lines(board, x, y))
                .collect();
            for line in 0..4 {
                output.push('|');
                for cell in &cells {
                    output.push_str(&cell[line]);
                    output.push('|');
                }
                output.push('\n');
            }
            output.push_str(&separator);
        }

        output
    }

    fn cell_lines(board: &Board, x: usize, y: usize) -> [String; 4] {
        let Some(tile) = board.get(x, y) else {
            let blank = " ".repeat(CELL_WIDTH);
            return [blank.clone(), format!("{:^w$}", ".", w = CELL_WIDTH), blank.clone(), blank];
        };

        let code = |direction| tile.edge_symbol(direction).code();
        [
            format!("{:^w$}", code(Direction::Top), w = CELL_WIDTH),
            format!(
                " {} {:^4} {} ",
                code(Direction::Left),
                tile.id(),
                code(Direction::Right)
            ),
            format!("{:^w$}", code(Direction::Bottom), w = CELL_WIDTH),
            format!("{:^w$}", tile.rotation().to_string(), w = CELL_WIDTH),
        ]
    }

    /// Tile ids and rotations only, one board row per line
    pub fn format_grid_compact(solution: &Solution) -> String {
        let mut output = String::new();
        for row in &solution.grid {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| match cell {
                    Some(placed) => format!("{}@{:<3}", placed.id, placed.rotation.degrees()),
                    None => format!("{:5}", "."),
                })
                .collect();
            output.push_str(cells.join(" ").trim_end());
            output.push('\n');
        }
        output
    }

    /// Header plus a drawing of the solution
    pub fn format_solution(solution: &Solution, tile_set: &TileSet) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== Solution {} ===\n", solution.index));
        output.push_str(&format!(
            "Equivalent boards (rotations): {}\n",
            solution.equivalent_boards
        ));

        match solution.to_board(tile_set) {
            Ok(board) => output.push_str(&Self::format_board(&board)),
            Err(_) => output.push_str(&Self::format_grid_compact(solution)),
        }

        output
    }

    /// One line per solution with its layout
    pub fn format_summary(report: &SolveReport) -> String {
        let mut output = String::new();

        output.push_str("Solutions Summary:\n");
        output.push_str("Index | Boards | Layout (top row first)\n");
        output.push_str("------|--------|-----------------------\n");

        for solution in &report.solutions {
            let layout: Vec<String> = solution
                .grid
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| cell.map_or_else(|| ".".to_string(), |p| p.id.to_string()))
                        .collect::<Vec<_>>()
                        .join("")
                })
                .collect();
            output.push_str(&format!(
                "{:5} | {:6} | {}\n",
                solution.index,
                solution.equivalent_boards,
                layout.join(" / ")
            ));
        }

        output
    }

    /// List every tile with its edges at 0°
    pub fn format_tile_table(tile_set: &TileSet) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{:>4} | {:<13} {:<13} {:<13} {:<13}\n",
            "Tile", "Top", "Right", "Bottom", "Left"
        ));
        output.push_str(&format!("{}\n", "-".repeat(62)));

        for tile in tile_set.build_tiles() {
            let names: Vec<String> = Direction::ALL
                .iter()
                .map(|&direction| tile.edge_symbol(direction).to_string())
                .collect();
            output.push_str(&format!(
                "{:>4} | {:<13} {:<13} {:<13} {:<13}\n",
                tile.id(),
                names[0],
                names[1],
                names[2],
                names[3]
            ));
        }

        output
    }

    /// Write one file per solution and return the paths written
    pub fn save_solutions<P: AsRef<Path>>(
        report: &SolveReport,
        tile_set: &TileSet,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<Vec<PathBuf>> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let mut written = Vec::with_capacity(report.solutions.len());

        match format {
            OutputFormat::Text => {
                for solution in &report.solutions {
                    let filepath = output_dir.join(format!("board{:02}.txt", solution.index));
                    let content = Self::format_solution(solution, tile_set);
                    std::fs::write(&filepath, content)
                        .with_context(|| format!("Failed to write {}", filepath.display()))?;
                    written.push(filepath);
                }
            }
            OutputFormat::Json => {
                for solution in &report.solutions {
                    let filepath = output_dir.join(format!("board{:02}.json", solution.index));
                    solution.save_to_file(&filepath)?;
                    written.push(filepath);
                }

                let report_path = output_dir.join("report.json");
                let report_json = serde_json::to_string_pretty(report)?;
                std::fs::write(&report_path, report_json)
                    .with_context(|| format!("Failed to write {}", report_path.display()))?;
            }
        }

        Ok(written)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Wrap text in an ANSI colour when the terminal allows it
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map_or(true, |term| term != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
