//! Command line driver for the knight placement solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use knight_sat::{
    board::load_board_from_file,
    config::{CliOverrides, OutputFormat, Settings, SolverBackend},
    puzzle::{solve_range, BoardValidator},
    sat::{dimacs::write_cnf, SatEncoder},
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "knight_sat")]
#[command(about = "Knight placement SAT solver")]
#[command(version = "0.1.0")]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one board size or sweep a range of sizes
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Solve a single N×N board (overrides config)
        #[arg(short, long, conflicts_with_all = ["min", "max"])]
        size: Option<usize>,

        /// Smallest board size of the sweep (overrides config)
        #[arg(long)]
        min: Option<usize>,

        /// Largest board size of the sweep (overrides config)
        #[arg(long)]
        max: Option<usize>,

        /// Solver backend (overrides config)
        #[arg(short, long, value_enum)]
        backend: Option<SolverBackend>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Save boards to this directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Check a board file against the placement rules
    Validate {
        /// Board file, one row per line using 0/1/2
        #[arg(short, long)]
        board: PathBuf,
    },

    /// Show encoding statistics for a board size without solving
    Analyze {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Board size
        #[arg(short, long)]
        size: usize,

        /// Also write the formula in DIMACS CNF to this file
        #[arg(long)]
        dimacs: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Solve {
            config,
            size,
            min,
            max,
            backend,
            format,
            output,
        } => {
            let overrides = CliOverrides {
                size,
                min_size: min,
                max_size: max,
                backend,
                format,
                output_dir: output,
            };
            solve_command(config, overrides, cli.verbose)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Validate { board } => validate_command(board),
        Commands::Analyze { config, size, dimacs } => analyze_command(config, size, dimacs),
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        tracing::info!(path = %config_path.display(), "config file not found, using defaults");
        Ok(Settings::default())
    }
}

fn solve_command(config_path: PathBuf, overrides: CliOverrides, verbose: bool) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    let sizes = settings.board.min_size..=settings.board.max_size;
    tracing::info!(
        min = settings.board.min_size,
        max = settings.board.max_size,
        backend = ?settings.solver.backend,
        "solving board sizes"
    );

    let start_time = Instant::now();
    let results = solve_range(sizes, &settings);
    let total_time = start_time.elapsed();

    let mut solutions = Vec::new();
    let mut failures = 0;
    for (size, result) in results {
        match result {
            Ok(solution) => {
                match settings.output.format {
                    OutputFormat::Text => print!("{}", SolutionFormatter::format_solution(&solution)),
                    OutputFormat::Json => println!("{}", solution.to_json()?),
                }
                solutions.push(solution);
            }
            Err(e) => {
                failures += 1;
                print!("{}", ColorOutput::error(&SolutionFormatter::format_failure(size, &e.to_string())));
            }
        }
    }

    if verbose {
        println!("{}", SolutionFormatter::format_summary(&solutions));
        println!(
            "{}",
            ColorOutput::info(&format!("Finished in {:.3}s", total_time.as_secs_f64()))
        );
    }

    if settings.output.save {
        SolutionFormatter::save_solutions(&solutions, &settings.output.output_directory, settings.output.format)
            .context("Failed to save boards")?;
        println!(
            "{}",
            ColorOutput::success(&format!("Boards saved to {}", settings.output.output_directory.display()))
        );
    }

    if failures > 0 {
        anyhow::bail!("{} board size(s) failed to encode or solve", failures);
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    let config_dir = directory.join("config");
    std::fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory {}", config_dir.display()))?;

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let mut minisat = Settings::default();
    minisat.solver.backend = SolverBackend::Minisat;
    let minisat_path = config_dir.join("minisat.yaml");
    if !minisat_path.exists() || force {
        minisat.to_file(&minisat_path)?;
        println!("Created: {}", minisat_path.display());
    }

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("Run: knight_sat solve --config {}", config_path.display());
    Ok(())
}

fn validate_command(board_path: PathBuf) -> Result<()> {
    let board = load_board_from_file(&board_path)
        .with_context(|| format!("Failed to load board from {}", board_path.display()))?;

    println!("{}", SolutionFormatter::format_board_with_coords(&board));
    let result = BoardValidator::validate(&board);
    print!("{}", result);

    if result.is_valid {
        println!("{}", ColorOutput::success("Board is valid"));
    } else {
        println!("{}", ColorOutput::error("Board is invalid"));
    }
    Ok(())
}

fn analyze_command(config_path: PathBuf, size: usize, dimacs: Option<PathBuf>) -> Result<()> {
    let settings = load_settings(&config_path)?;
    let encoder = SatEncoder::new(size, settings).context("Failed to encode board")?;
    println!("{}", encoder.statistics());

    if let Some(path) = dimacs {
        let cnf = write_cnf(encoder.variable_space(), encoder.formula())?;
        std::fs::write(&path, cnf).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("DIMACS written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["knight_sat", "solve", "--size", "8", "--backend", "minisat"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["knight_sat", "solve", "--size", "8", "--min", "2"]);
        assert!(cli.is_err());

        let cli = Cli::try_parse_from(["knight_sat", "analyze", "--size", "5", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        let config = temp_dir.path().join("config/default.yaml");
        assert!(config.exists());
        assert!(Settings::from_file(&config).is_ok());
        assert!(temp_dir.path().join("config/minisat.yaml").exists());
    }

    #[test]
    fn test_analyze_writes_dimacs() {
        let temp_dir = tempdir().unwrap();
        let cnf = temp_dir.path().join("eight.cnf");
        analyze_command(temp_dir.path().join("missing.yaml"), 8, Some(cnf.clone())).unwrap();

        let content = std::fs::read_to_string(cnf).unwrap();
        assert!(content.contains("p cnf 128 1456"));
    }
}
