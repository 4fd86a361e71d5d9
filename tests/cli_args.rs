//! Integration tests for CLI argument handling
//!
//! Tests the --catnr, --once and --json flags. Nothing here reaches the
//! network: every invocation either exits during argument handling or asks
//! for help.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_isstrack"))
        .args(args)
        .output()
        .expect("Failed to execute isstrack")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("isstrack"), "Help should mention isstrack");
    assert!(stdout.contains("--catnr"), "Help should mention --catnr flag");
    assert!(stdout.contains("--once"), "Help should mention --once flag");
    assert!(stdout.contains("--json"), "Help should mention --json flag");
}

#[test]
fn test_version_flag_exits_successfully() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_out_of_range_catnr_prints_error_and_exits() {
    let output = run_cli(&["--catnr", "0", "--once"]);
    assert!(!output.status.success(), "Expected catalog number 0 to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid catalog number"),
        "Should print error message about the catalog number: {}",
        stderr
    );
}

#[test]
fn test_non_numeric_catnr_is_rejected_by_parser() {
    let output = run_cli(&["--catnr", "zarya"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid") || stderr.contains("Invalid"),
        "Should explain the bad value: {}",
        stderr
    );
}

#[test]
fn test_unknown_flag_is_rejected() {
    let output = run_cli(&["--refresh", "5"]);
    assert!(!output.status.success(), "Refresh interval is fixed; no such flag");
}

#[test]
fn test_json_with_help_is_valid() {
    // With --help, it should succeed regardless of other flags
    let output = run_cli(&["--json", "--catnr", "20580", "--help"]);
    assert!(output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use isstrack::cli::{validate_catalog_number, Cli, CliError, Mode, StartupConfig};
    use isstrack::data::ISS_CATALOG_NUMBER;

    #[test]
    fn test_cli_defaults_to_iss() {
        let cli = Cli::parse_from(["isstrack"]);
        assert_eq!(cli.catnr, ISS_CATALOG_NUMBER);
    }

    #[test]
    fn test_startup_config_dashboard_by_default() {
        let cli = Cli::parse_from(["isstrack", "--catnr", "43013"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.catalog_number, 43013);
        assert_eq!(config.mode, Mode::Dashboard);
    }

    #[test]
    fn test_startup_config_once_and_json() {
        let cli = Cli::parse_from(["isstrack", "--once", "--json"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.mode, Mode::Snapshot { json: true });
    }

    #[test]
    fn test_validate_catalog_number_rejects_six_digits() {
        let result = validate_catalog_number(123_456);
        assert!(matches!(result, Err(CliError::InvalidCatalogNumber(123_456))));
    }
}
