//! Configuration settings for the knight placement solver

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardConfig,
    pub solver: SolverConfig,
    pub encoding: EncodingConfig,
    pub output: OutputConfig,
}

/// Range of board sizes to sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub min_size: usize,
    pub max_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub backend: SolverBackend,
    pub minisat_path: PathBuf,
    /// Only honoured by the external MiniSat process
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    Cadical,
    Minisat,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodingConfig {
    pub exclusive_cells: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardConfig {
                min_size: 1,
                max_size: 10,
            },
            solver: SolverConfig {
                backend: SolverBackend::Cadical,
                minisat_path: PathBuf::from("minisat"),
                timeout_seconds: 300,
            },
            encoding: EncodingConfig {
                exclusive_cells: true,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save: false,
                output_directory: PathBuf::from("output/boards"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.board.min_size == 0 {
            anyhow::bail!("Minimum board size must be positive");
        }

        if self.board.min_size > self.board.max_size {
            anyhow::bail!(
                "Minimum board size {} exceeds maximum board size {}",
                self.board.min_size,
                self.board.max_size
            );
        }

        if self.solver.timeout_seconds == 0 {
            anyhow::bail!("Solver timeout must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(size) = cli_overrides.size {
            self.board.min_size = size;
            self.board.max_size = size;
        }
        if let Some(min_size) = cli_overrides.min_size {
            self.board.min_size = min_size;
        }
        if let Some(max_size) = cli_overrides.max_size {
            self.board.max_size = max_size;
        }
        if let Some(backend) = cli_overrides.backend {
            self.solver.backend = backend;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
            self.output.save = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub size: Option<usize>,
    pub min_size: Option<usize>,
    pub max_size: Option<usize>,
    pub backend: Option<SolverBackend>,
    pub format: Option<OutputFormat>,
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.board.min_size, 1);
        assert_eq!(settings.board.max_size, 10);
        assert!(settings.encoding.exclusive_cells);
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.board.min_size = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.board.min_size = 6;
        settings.board.max_size = 5;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.solver.timeout_seconds = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.solver.backend = SolverBackend::Minisat;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.solver.backend, SolverBackend::Minisat);
        assert_eq!(loaded.board.max_size, 10);
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            size: Some(8),
            format: Some(OutputFormat::Json),
            output_dir: Some(PathBuf::from("out")),
            ..Default::default()
        });

        assert_eq!(settings.board.min_size, 8);
        assert_eq!(settings.board.max_size, 8);
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert!(settings.output.save);
    }
}
