//! Command-line interface parsing for the ISS tracker
//!
//! This module handles parsing of CLI arguments using clap: which object to
//! track, and whether to run the dashboard or print a single snapshot.

use clap::Parser;
use thiserror::Error;

use crate::data::ISS_CATALOG_NUMBER;

/// Largest catalog number that fits the five-digit TLE field
const MAX_CATALOG_NUMBER: u32 = 99_999;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The catalog number is outside the five-digit TLE range
    #[error("Invalid catalog number: {0}. Expected a NORAD number between 1 and 99999")]
    InvalidCatalogNumber(u32),
}

/// Real-time satellite tracker - ground position of the ISS in your terminal
#[derive(Parser, Debug)]
#[command(name = "isstrack")]
#[command(about = "Real-time ISS ground position dashboard")]
#[command(version)]
pub struct Cli {
    /// NORAD catalog number of the object to track
    #[arg(long, value_name = "NUMBER", default_value_t = ISS_CATALOG_NUMBER)]
    pub catnr: u32,

    /// Print a single position snapshot and exit instead of starting the dashboard
    #[arg(long)]
    pub once: bool,

    /// Print the snapshot as JSON (implies --once)
    #[arg(long)]
    pub json: bool,

    /// Log debug events
    #[arg(short, long)]
    pub verbose: bool,
}

/// How the process should run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Full-screen dashboard refreshed every interval
    #[default]
    Dashboard,
    /// One cycle printed to stdout
    Snapshot { json: bool },
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Catalog number of the tracked object
    pub catalog_number: u32,
    /// Dashboard or one-shot output
    pub mode: Mode,
    /// Whether debug logging is enabled
    pub verbose: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            catalog_number: ISS_CATALOG_NUMBER,
            mode: Mode::Dashboard,
            verbose: false,
        }
    }
}

/// Checks that a catalog number fits the TLE format
pub fn validate_catalog_number(catalog_number: u32) -> Result<u32, CliError> {
    if (1..=MAX_CATALOG_NUMBER).contains(&catalog_number) {
        Ok(catalog_number)
    } else {
        Err(CliError::InvalidCatalogNumber(catalog_number))
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the catalog number is out of range
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let catalog_number = validate_catalog_number(cli.catnr)?;
        let mode = if cli.once || cli.json {
            Mode::Snapshot { json: cli.json }
        } else {
            Mode::Dashboard
        };

        Ok(StartupConfig {
            catalog_number,
            mode,
            verbose: cli.verbose,
        })
    }
}
