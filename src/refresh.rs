//! Fixed-interval refresh cycle
//!
//! One cycle asks the position cache for the current position and records the
//! outcome in the app. The main loop runs a cycle, draws, then waits out the
//! refresh interval with a [`CycleTimer`] before starting the next one.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local, Utc};
use tracing::debug;

use crate::app::App;
use crate::cache::PositionCache;
use crate::data::ElementSource;

/// Timing parameters of the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshConfig {
    /// How long a computed position is served from the cache
    pub cache_ttl: Duration,
    /// Delay between the end of one cycle and the start of the next
    pub refresh_interval: Duration,
    /// HTTP client timeout for the element set fetch
    pub fetch_timeout: Duration,
}

impl RefreshConfig {
    /// The fixed process-wide timings
    pub const STANDARD: RefreshConfig = RefreshConfig {
        cache_ttl: Duration::from_secs(10),
        refresh_interval: Duration::from_secs(10),
        fetch_timeout: Duration::from_secs(10),
    };
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Runs one fetch -> compute -> record cycle
///
/// Never fails: an unavailable position is recorded in the app like any other
/// outcome.
pub async fn run_cycle<S: ElementSource>(cache: &mut PositionCache<S>, app: &mut App) {
    run_cycle_at(cache, app, Utc::now()).await;
}

/// Same as [`run_cycle`] with an explicit clock
///
/// The position is computed for `now` and the last-updated time is `now` in
/// local time.
pub async fn run_cycle_at<S: ElementSource>(
    cache: &mut PositionCache<S>,
    app: &mut App,
    now: DateTime<Utc>,
) {
    debug!(catalog_number = app.catalog_number, at = %now, "starting refresh cycle");
    let result = cache.get_position_at(now).await;
    app.record(result, now.with_timezone(&Local));
}

/// Deadline for the next cycle
#[derive(Debug, Clone, Copy)]
pub struct CycleTimer {
    deadline: Instant,
}

impl CycleTimer {
    /// Starts a timer that elapses `interval` after `now`
    pub fn start(now: Instant, interval: Duration) -> Self {
        Self {
            deadline: now + interval,
        }
    }

    /// Time left until the next cycle, zero once elapsed
    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    /// Whether the next cycle is due
    pub fn is_elapsed(&self, now: Instant) -> bool {
        now >= self.deadline
    }
}
