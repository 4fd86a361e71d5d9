//! Core data models for the ISS tracker
//!
//! This module contains the orbital element set fetched from CelesTrak and the
//! geodetic position computed from it, along with the client and propagation
//! code that produce them.

pub mod celestrak;
pub mod propagation;

#[cfg(test)]
pub(crate) mod fixtures;

pub use celestrak::{CelestrakClient, ElementSource, NetworkError, ISS_CATALOG_NUMBER};
pub use propagation::{compute_position, PropagationError};

use serde::{Deserialize, Serialize};

/// A three-line orbital element set (name line plus the two TLE lines)
///
/// Replaced wholesale on every fetch. Only the line count is checked when it is
/// received; the lines themselves are validated when they are propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSet {
    /// Object name, e.g. "ISS (ZARYA)"
    pub name: String,
    /// First TLE line (starts with `1 `)
    pub line1: String,
    /// Second TLE line (starts with `2 `)
    pub line2: String,
}

/// Geodetic subpoint of the tracked object at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Geodetic latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east, in (-180, 180]
    pub longitude: f64,
    /// Height above the WGS84 ellipsoid in kilometres
    pub altitude_km: f64,
}
