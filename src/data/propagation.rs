//! Ground position of an orbiting object
//!
//! SGP4 propagation is delegated to the `sgp4` crate. This module only turns
//! the propagated TEME position into a geodetic subpoint: rotate by Greenwich
//! mean sidereal time into the Earth-fixed frame, then solve for WGS84
//! latitude, longitude and height.

use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{ElementSet, Position};

/// WGS84 equatorial radius in kilometres
const WGS84_A_KM: f64 = 6378.137;
/// WGS84 flattening
const WGS84_F: f64 = 1.0 / 298.257_223_563;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
/// Unix timestamp of J2000.0 (2000-01-01T12:00:00Z)
const J2000_UNIX_SECONDS: f64 = 946_728_000.0;

const GMST_BASE_DEG: f64 = 280.460_618_37;
const GMST_ROTATION_PER_DAY: f64 = 360.985_647_366_29;
const GMST_CORRECTION: f64 = 0.000_387_933;

/// Latitude iterations; converges to well under a millimetre for LEO heights
const GEODETIC_ITERATIONS: usize = 6;

/// Errors that can occur while propagating an element set
#[derive(Debug, Error)]
pub enum PropagationError {
    /// The TLE lines could not be parsed or describe an unusable orbit
    #[error("Invalid element set: {0}")]
    InvalidElements(String),

    /// SGP4 failed at the requested time (e.g. the orbit has decayed)
    #[error("Propagation failed: {0}")]
    Propagation(String),

    /// Propagation produced NaN or infinite coordinates
    #[error("Propagation produced a non-finite position")]
    NonFinite,
}

/// Compute the geodetic subpoint of `elements` at `at`
///
/// Deterministic: the same element set and instant always give the same
/// position.
pub fn compute_position(
    elements: &ElementSet,
    at: DateTime<Utc>,
) -> Result<Position, PropagationError> {
    let parsed = sgp4::Elements::from_tle(
        Some(elements.name.clone()),
        elements.line1.as_bytes(),
        elements.line2.as_bytes(),
    )
    .map_err(|e| PropagationError::InvalidElements(e.to_string()))?;

    let constants = sgp4::Constants::from_elements(&parsed)
        .map_err(|e| PropagationError::InvalidElements(e.to_string()))?;

    let minutes = (at.naive_utc() - parsed.datetime).num_milliseconds() as f64 / 60_000.0;
    let prediction = constants
        .propagate(sgp4::MinutesSinceEpoch(minutes))
        .map_err(|e| PropagationError::Propagation(e.to_string()))?;

    let position = teme_to_geodetic(prediction.position, greenwich_mean_sidereal_time(at));
    if position.latitude.is_finite()
        && position.longitude.is_finite()
        && position.altitude_km.is_finite()
    {
        Ok(position)
    } else {
        Err(PropagationError::NonFinite)
    }
}

/// Greenwich mean sidereal time in radians, normalized to [0, 2π)
pub fn greenwich_mean_sidereal_time(at: DateTime<Utc>) -> f64 {
    let seconds = at.timestamp_millis() as f64 / 1000.0 - J2000_UNIX_SECONDS;
    let days = seconds / SECONDS_PER_DAY;
    let centuries = days / DAYS_PER_JULIAN_CENTURY;
    let degrees = GMST_BASE_DEG
        + GMST_ROTATION_PER_DAY * days
        + GMST_CORRECTION * centuries * centuries
        - centuries * centuries * centuries / 38_710_000.0;
    degrees.rem_euclid(360.0).to_radians()
}

/// Convert a TEME position (km) to a geodetic subpoint, given GMST in radians
pub fn teme_to_geodetic(teme: [f64; 3], gmst: f64) -> Position {
    // TEME -> pseudo Earth-fixed: rotate about Z by -GMST
    let (sin_g, cos_g) = gmst.sin_cos();
    let x = cos_g * teme[0] + sin_g * teme[1];
    let y = -sin_g * teme[0] + cos_g * teme[1];
    let z = teme[2];

    let e2 = WGS84_F * (2.0 - WGS84_F);
    let p = x.hypot(y);
    let longitude = y.atan2(x);

    let mut latitude = z.atan2(p * (1.0 - e2));
    for _ in 0..GEODETIC_ITERATIONS {
        let sin_lat = latitude.sin();
        let n = WGS84_A_KM / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        latitude = (z + e2 * n * sin_lat).atan2(p);
    }

    let (sin_lat, cos_lat) = latitude.sin_cos();
    // Valid at the poles, unlike p / cos(lat) - N
    let altitude_km =
        p * cos_lat + z * sin_lat - WGS84_A_KM * (1.0 - e2 * sin_lat * sin_lat).sqrt();

    Position {
        latitude: latitude * 180.0 / PI,
        longitude: longitude * 180.0 / PI,
        altitude_km,
    }
}
