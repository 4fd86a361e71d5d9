//! Logging setup
//!
//! The dashboard owns the terminal, so in that mode events go to a log file in
//! the user's cache directory. One-shot mode logs to stderr.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the dashboard log
const LOG_FILE_NAME: &str = "isstrack.log";

/// Where log events are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Standard error
    Stderr,
    /// Append to a file
    File(PathBuf),
    /// Logging disabled
    Disabled,
}

/// Default dashboard log location (`~/.cache/isstrack/isstrack.log` on Linux)
///
/// Returns `None` if no home directory can be determined.
pub fn log_file_path() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "isstrack")?;
    Some(project_dirs.cache_dir().join(LOG_FILE_NAME))
}

/// Opens `path` for appending, creating missing parent directories
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Filter directive for this crate's events
fn directive(verbose: bool) -> &'static str {
    if verbose {
        "isstrack=debug"
    } else {
        "isstrack=info"
    }
}

/// Initialize logging. `RUST_LOG` directives are honoured on top of the default.
///
/// A log file that cannot be opened disables logging instead of failing
/// startup. Returns the sink actually in use.
pub fn init_logging(sink: LogSink, verbose: bool) -> io::Result<LogSink> {
    let filter = EnvFilter::from_default_env().add_directive(
        directive(verbose)
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
    );

    match sink {
        LogSink::Stderr => {
            tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .with(filter)
                .init();
        }
        LogSink::File(ref path) => {
            let file = match open_log_file(path) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!(
                        "warning: cannot open log file {}: {}; logging disabled",
                        path.display(),
                        e
                    );
                    return Ok(LogSink::Disabled);
                }
            };
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .init();
        }
        LogSink::Disabled => {}
    }

    Ok(sink)
}
