//! Position cache with a fixed time-to-live
//!
//! Provides a `PositionCache` that fetches and propagates the element set at
//! most once per TTL window and turns every failure into a [`DataError`].

use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::{compute_position, ElementSource, NetworkError, Position, PropagationError};

/// Why no position is available for this cycle
///
/// Every variant reads the same to the user; the wrapped error only adds
/// detail to the message.
#[derive(Debug, Error)]
pub enum DataError {
    /// Fetching the element set failed
    #[error("Could not fetch live tracking data: {0}")]
    Network(#[from] NetworkError),

    /// The element set could not be propagated
    #[error("Could not fetch live tracking data: {0}")]
    Propagation(#[from] PropagationError),
}

/// A memoized position and when it was computed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheEntry {
    /// The computed position
    pub value: Position,
    /// When the position was computed
    pub computed_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Whether the entry is still younger than `ttl` at `now`
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match (now - self.computed_at).to_std() {
            Ok(age) => age < ttl,
            // `now` before `computed_at`: clock went backwards, keep the entry
            Err(_) => true,
        }
    }
}

/// Single-slot memo around fetch + propagate
///
/// Only one object is tracked per process, so there is exactly one entry.
/// Not thread-safe; the refresh loop owns it.
#[derive(Debug)]
pub struct PositionCache<S> {
    source: S,
    ttl: Duration,
    entry: Option<CacheEntry>,
}

impl<S: ElementSource> PositionCache<S> {
    /// Creates an empty cache in front of `source`
    pub fn new(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entry: None,
        }
    }

    /// Returns the current position, fetching only if the cached one is stale
    pub async fn get_position(&mut self) -> Result<Position, DataError> {
        self.get_position_at(Utc::now()).await
    }

    /// Same as [`get_position`](Self::get_position) with an explicit clock
    ///
    /// On a miss the position is computed for `now` and stored with
    /// `computed_at = now`. On failure the slot is left empty.
    pub async fn get_position_at(&mut self, now: DateTime<Utc>) -> Result<Position, DataError> {
        if let Some(entry) = self.entry {
            if entry.is_fresh(now, self.ttl) {
                debug!(computed_at = %entry.computed_at, "serving cached position");
                return Ok(entry.value);
            }
        }
        self.entry = None;

        match self.refresh(now).await {
            Ok(position) => {
                self.entry = Some(CacheEntry {
                    value: position,
                    computed_at: now,
                });
                Ok(position)
            }
            Err(e) => {
                warn!(error = %e, "position unavailable");
                Err(e)
            }
        }
    }

    async fn refresh(&self, now: DateTime<Utc>) -> Result<Position, DataError> {
        let elements = self.source.fetch().await?;
        let position = compute_position(&elements, now)?;
        debug!(
            latitude = position.latitude,
            longitude = position.longitude,
            altitude_km = position.altitude_km,
            "computed position"
        );
        Ok(position)
    }

    /// The cached entry, if any (fresh or not)
    pub fn entry(&self) -> Option<&CacheEntry> {
        self.entry.as_ref()
    }

    /// The element source behind the cache
    pub fn source(&self) -> &S {
        &self.source
    }
}
