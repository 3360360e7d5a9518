//! Configuration management for the knight placement solver

pub mod settings;

pub use settings::{
    BoardConfig, CliOverrides, EncodingConfig, OutputConfig, OutputFormat, Settings, SolverBackend,
    SolverConfig,
};
