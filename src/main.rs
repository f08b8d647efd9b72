//! Main CLI application for the frog tile puzzle solver

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::TimestampPrecision;
use frog_tiles::{
    config::{CliOverrides, OutputFormat, Settings},
    puzzle::{resolve_tile_set, save_tile_set, TileSet},
    search::{PuzzleProblem, Solution, SolutionValidator},
    utils::{ColorOutput, SolutionFormatter},
};
use log::{debug, LevelFilter};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "frog_tiles")]
#[command(about = "Frog Tile Puzzle Solver")]
#[command(version = "0.1.0")]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    log_level: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for every valid board and print the unique solutions
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Tile definition file (overrides config)
        #[arg(short, long)]
        tiles: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Run the search on a single thread
        #[arg(long, conflicts_with = "parallel")]
        sequential: bool,

        /// Spread the search over the rayon thread pool
        #[arg(long)]
        parallel: bool,

        /// Print results without writing solution files
        #[arg(long)]
        no_save: bool,
    },

    /// Create a default configuration and tile file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Print the tile set
    Tiles {
        /// Tile definition file; the built-in tiles when omitted
        #[arg(short, long)]
        tiles: Option<PathBuf>,
    },

    /// Re-check a saved JSON solution
    Validate {
        /// Solution file written by `solve --format json`
        #[arg(short, long)]
        solution: PathBuf,

        /// Tile definition file; the built-in tiles when omitted
        #[arg(short, long)]
        tiles: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.log_level {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    match cli.command {
        Commands::Solve {
            config,
            tiles,
            output,
            format,
            sequential,
            parallel,
            no_save,
        } => {
            let parallel = if sequential {
                Some(false)
            } else if parallel {
                Some(true)
            } else {
                None
            };
            let overrides = CliOverrides {
                tile_file: tiles,
                output_dir: output,
                format,
                parallel,
                no_save,
            };
            solve_command(config, &overrides)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Tiles { tiles } => tiles_command(tiles),
        Commands::Validate { solution, tiles } => validate_command(solution, tiles),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Ok(Settings::default())
    }
}

fn solve_command(config_path: PathBuf, overrides: &CliOverrides) -> Result<()> {
    println!("{}", ColorOutput::info("Starting frog tile solver"));

    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(overrides);
    settings
        .validate()
        .context("Configuration validation failed")?;
    debug!("Settings: {:?}", settings);

    let start_time = Instant::now();
    let problem =
        PuzzleProblem::new(settings.clone()).context("Failed to set up the tile puzzle")?;
    let report = problem.solve().context("Search failed")?;
    let total_time = start_time.elapsed();

    println!("Search iterations: {}", report.statistics.iterations);
    println!(
        "Valid boards: {} ({} terminal boards rejected)",
        report.total_solutions, report.statistics.rejected_terminal_boards
    );

    if !report.is_solved() {
        println!("{}", ColorOutput::warning("No solutions found"));
        return Ok(());
    }

    println!(
        "{}",
        ColorOutput::success(&format!(
            "Found {} unique solution(s) in {:.3}s",
            report.solutions.len(),
            total_time.as_secs_f64()
        ))
    );

    println!("\n{}", SolutionFormatter::format_summary(&report));
    for solution in &report.solutions {
        println!(
            "{}",
            SolutionFormatter::format_solution(solution, problem.tile_set())
        );
    }

    if !settings.output.save {
        return Ok(());
    }

    let written = SolutionFormatter::save_solutions(
        &report,
        problem.tile_set(),
        &settings.output.output_directory,
        settings.output.format,
    )
    .context("Failed to save solutions")?;

    for (solution, path) in report.solutions.iter().zip(&written) {
        println!(
            "{}",
            ColorOutput::success(&format!(
                "Solution {} saved to {}",
                solution.index,
                path.display()
            ))
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let examples_dir = config_dir.join("examples");
    for dir in [&config_dir, &examples_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let tiles_path = config_dir.join("tiles.yaml");
    if !tiles_path.exists() || force {
        save_tile_set(&TileSet::canonical(), &tiles_path)
            .context("Failed to write tile definitions")?;
        println!("Created: {}", tiles_path.display());
    } else {
        println!("Skipped: {} (already exists)", tiles_path.display());
    }

    // Reads tiles from file and writes JSON for the renderer
    let mut from_file = Settings::default();
    from_file.puzzle.tile_file = Some(PathBuf::from("config/tiles.yaml"));
    from_file.output.format = OutputFormat::Json;
    from_file.to_file(&examples_dir.join("json_from_file.yaml"))?;

    println!(
        "Created example configuration in: {}",
        examples_dir.display()
    );

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit tile definitions in {}", tiles_path.display());
    println!("2. Run: frog_tiles solve --config config/default.yaml");

    Ok(())
}

fn tiles_command(tiles: Option<PathBuf>) -> Result<()> {
    let tile_set = resolve_tile_set(tiles.as_deref())?;
    println!("{}", SolutionFormatter::format_tile_table(&tile_set));
    Ok(())
}

fn validate_command(solution_path: PathBuf, tiles: Option<PathBuf>) -> Result<()> {
    println!("{}", ColorOutput::info("Validating solution..."));

    let tile_set = resolve_tile_set(tiles.as_deref())?;
    let solution = Solution::load_from_file(&solution_path)
        .with_context(|| format!("Failed to load solution from {}", solution_path.display()))?;

    let validator = SolutionValidator::new(tile_set);
    let result = validator.validate(&solution).context("Validation failed")?;

    println!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("Solution is valid!"));
    } else {
        println!("{}", ColorOutput::error("Solution is invalid"));
        if let Some(error) = result.error_message {
            println!("Error: {}", error);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use frog_tiles::puzzle::load_tile_set;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "frog_tiles",
            "-vv",
            "solve",
            "--config",
            "test.yaml",
            "--format",
            "json",
            "--sequential",
        ])
        .unwrap();

        assert_eq!(cli.log_level, 2);
        match cli.command {
            Commands::Solve {
                format, sequential, ..
            } => {
                assert_eq!(format, Some(OutputFormat::Json));
                assert!(sequential);
            }
            _ => panic!("expected solve"),
        }
    }

    #[test]
    fn test_sequential_conflicts_with_parallel() {
        let cli = Cli::try_parse_from(["frog_tiles", "solve", "--sequential", "--parallel"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_validate_requires_solution() {
        assert!(Cli::try_parse_from(["frog_tiles", "validate"]).is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir
            .path()
            .join("config/examples/json_from_file.yaml")
            .exists());

        let tiles = load_tile_set(temp_dir.path().join("config/tiles.yaml")).unwrap();
        assert_eq!(tiles, TileSet::canonical());
    }

    #[test]
    fn test_solve_and_validate_round_trip() {
        let temp_dir = tempdir().unwrap();
        let output = temp_dir.path().join("out");
        let overrides = CliOverrides {
            output_dir: Some(output.clone()),
            format: Some(OutputFormat::Json),
            parallel: Some(false),
            ..CliOverrides::default()
        };

        solve_command(temp_dir.path().join("missing.yaml"), &overrides).unwrap();
        assert!(output.join("board00.json").exists());
        assert!(output.join("board01.json").exists());

        assert!(validate_command(output.join("board00.json"), None).is_ok());
    }
}
