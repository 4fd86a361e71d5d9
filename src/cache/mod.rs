//! Cache module for memoizing the tracked object's position
//!
//! This module provides a single-slot, in-memory cache that wraps fetching the
//! element set and propagating it. A fresh entry is served without touching the
//! network; a stale one is replaced on the next access. Failures are returned
//! as a [`DataError`] value so the caller always gets either a full position or
//! nothing.

mod manager;

pub use manager::{CacheEntry, DataError, PositionCache};
