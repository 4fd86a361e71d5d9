//! One-shot snapshot output
//!
//! Used by `--once` / `--json`: the result of a single cycle printed to stdout
//! either as aligned text with the dashboard's number formats or as JSON.

use chrono::{DateTime, Local};
use serde::Serialize;

use super::dashboard::{format_altitude, format_clock, format_degrees};
use crate::app::{App, AppState};

/// A single successful cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub catalog_number: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
    pub updated_at: DateTime<Local>,
}

impl Snapshot {
    /// Builds a snapshot from the app if its last cycle produced a position
    pub fn from_app(app: &App) -> Option<Self> {
        match (&app.state, app.last_updated) {
            (AppState::Tracking(position), Some(updated_at)) => Some(Self {
                catalog_number: app.catalog_number,
                latitude: position.latitude,
                longitude: position.longitude,
                altitude_km: position.altitude_km,
                updated_at,
            }),
            _ => None,
        }
    }

    /// Plain-text rendering, one metric per line
    pub fn to_text(&self) -> String {
        format!(
            "Latitude:     {}\nLongitude:    {}\nAltitude:     {}\nLast updated: {}\n",
            format_degrees(self.latitude),
            format_degrees(self.longitude),
            format_altitude(self.altitude_km),
            format_clock(&self.updated_at),
        )
    }

    /// Pretty-printed JSON rendering
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DataError;
    use crate::data::{NetworkError, Position};
    use chrono::TimeZone;

    fn tracking_app() -> App {
        let mut app = App::new(25544);
        let updated = Local.with_ymd_and_hms(2026, 10, 18, 14, 3, 22).unwrap();
        app.record(
            Ok(Position {
                latitude: 51.64163,
                longitude: -12.34561,
                altitude_km: 418.2549,
            }),
            updated,
        );
        app
    }

    #[test]
    fn test_from_app_requires_position() {
        let loading = App::new(25544);
        assert!(Snapshot::from_app(&loading).is_none());

        let mut failed = App::new(25544);
        failed.record(Err(DataError::from(NetworkError::Timeout)), Local::now());
        assert!(Snapshot::from_app(&failed).is_none());

        assert!(Snapshot::from_app(&tracking_app()).is_some());
    }

    #[test]
    fn test_to_text_uses_dashboard_formats() {
        let snapshot = Snapshot::from_app(&tracking_app()).expect("Should build snapshot");

        let text = snapshot.to_text();

        assert!(text.contains("Latitude:     51.6416°"));
        assert!(text.contains("Longitude:    -12.3456°"));
        assert!(text.contains("Altitude:     418.25 km"));
        assert!(text.contains("Last updated: 14:03:22"));
    }

    #[test]
    fn test_to_json_has_all_fields() {
        let snapshot = Snapshot::from_app(&tracking_app()).expect("Should build snapshot");

        let json = snapshot.to_json().expect("Should serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("Should be valid JSON");

        assert_eq!(value["catalog_number"], 25544);
        assert!((value["latitude"].as_f64().unwrap() - 51.64163).abs() < 1e-9);
        assert!((value["longitude"].as_f64().unwrap() - (-12.34561)).abs() < 1e-9);
        assert!((value["altitude_km"].as_f64().unwrap() - 418.2549).abs() < 1e-9);
        assert!(value["updated_at"].as_str().unwrap().contains("14:03:22"));
    }
}
