//! ISS tracker - real-time ground position in the terminal
//!
//! Fetches the ISS two-line element set every ten seconds, propagates it to
//! the current subpoint and shows latitude, longitude, altitude and a map.

use std::io;
use std::panic;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use isstrack::app::{App, AppState};
use isstrack::cache::PositionCache;
use isstrack::cli::{Cli, Mode, StartupConfig};
use isstrack::data::CelestrakClient;
use isstrack::logging::{self, LogSink};
use isstrack::refresh::{run_cycle, CycleTimer, RefreshConfig};
use isstrack::ui::{self, Snapshot};

/// Longest time the wait between cycles blocks on terminal input
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Runs the dashboard until the user quits
async fn run_dashboard(
    cache: &mut PositionCache<CelestrakClient>,
    app: &mut App,
    config: RefreshConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Initial render to show loading state
    terminal.draw(|f| ui::render(f, app))?;

    'cycles: loop {
        run_cycle(cache, app).await;
        terminal.draw(|f| ui::render(f, app))?;

        // Wait out the refresh interval, still answering quit keys and resizes
        let timer = CycleTimer::start(Instant::now(), config.refresh_interval);
        while !timer.is_elapsed(Instant::now()) {
            let wait = timer.remaining(Instant::now()).min(EVENT_POLL_INTERVAL);
            if event::poll(wait)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                    Event::Resize(_, _) => {
                        terminal.draw(|f| ui::render(f, app))?;
                    }
                    _ => {}
                }
            }

            if app.should_quit {
                break 'cycles;
            }
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

/// Runs a single cycle and prints it; fails if no position is available
async fn run_snapshot(
    cache: &mut PositionCache<CelestrakClient>,
    app: &mut App,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    run_cycle(cache, app).await;

    match Snapshot::from_app(app) {
        Some(snapshot) => {
            if json {
                println!("{}", snapshot.to_json()?);
            } else {
                print!("{}", snapshot.to_text());
            }
            Ok(true)
        }
        None => {
            eprintln!("Could not display {} position.", app.object_label());
            if let AppState::Unavailable(message) = &app.state {
                eprintln!("{}", message);
            }
            Ok(false)
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(ExitCode::from(2));
        }
    };

    let sink = match startup.mode {
        Mode::Dashboard => log_file_path_sink(),
        Mode::Snapshot { .. } => LogSink::Stderr,
    };
    let sink = logging::init_logging(sink, startup.verbose)?;

    let config = RefreshConfig::STANDARD;
    info!(catalog_number = startup.catalog_number, mode = ?startup.mode, sink = ?sink, "starting tracker");

    let client = CelestrakClient::new(startup.catalog_number, config.fetch_timeout)?;
    let mut cache = PositionCache::new(client, config.cache_ttl);
    let mut app = App::new(startup.catalog_number);

    match startup.mode {
        Mode::Dashboard => {
            if let Err(e) = run_dashboard(&mut cache, &mut app, config).await {
                // Leave the terminal usable before reporting
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                error!(error = %e, "dashboard terminated");
                return Err(e);
            }
            Ok(ExitCode::SUCCESS)
        }
        Mode::Snapshot { json } => {
            if run_snapshot(&mut cache, &mut app, json).await? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

/// Log to the cache-directory file, or not at all without a home directory
fn log_file_path_sink() -> LogSink {
    logging::log_file_path()
        .map(LogSink::File)
        .unwrap_or(LogSink::Disabled)
}
