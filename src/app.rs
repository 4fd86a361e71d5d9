//! Application state management for the ISS tracker
//!
//! This module holds the outcome of the most recent refresh cycle and handles
//! the keys that end the dashboard.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cache::DataError;
use crate::data::{Position, ISS_CATALOG_NUMBER};

/// What the dashboard currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// No cycle has completed yet
    Loading,
    /// The last cycle produced a position
    Tracking(Position),
    /// The last cycle failed; holds the message to display
    Unavailable(String),
}

/// Main application struct
#[derive(Debug)]
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Catalog number of the tracked object
    pub catalog_number: u32,
    /// Wall-clock time the last cycle was rendered
    pub last_updated: Option<DateTime<Local>>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
}

impl App {
    /// Creates a new App in the loading state
    pub fn new(catalog_number: u32) -> Self {
        Self {
            state: AppState::Loading,
            catalog_number,
            last_updated: None,
            should_quit: false,
        }
    }

    /// Records the outcome of one refresh cycle
    pub fn record(&mut self, result: Result<Position, DataError>, at: DateTime<Local>) {
        self.state = match result {
            Ok(position) => AppState::Tracking(position),
            Err(e) => AppState::Unavailable(e.to_string()),
        };
        self.last_updated = Some(at);
    }

    /// The position from the last cycle, if it succeeded
    pub fn position(&self) -> Option<&Position> {
        match &self.state {
            AppState::Tracking(position) => Some(position),
            _ => None,
        }
    }

    /// Short display name of the tracked object
    pub fn object_label(&self) -> String {
        if self.catalog_number == ISS_CATALOG_NUMBER {
            "ISS".to_string()
        } else {
            format!("NORAD {}", self.catalog_number)
        }
    }

    /// Handles keyboard input
    ///
    /// The dashboard has no interaction beyond quitting: `q`, `Esc` and
    /// `Ctrl+C` end the loop, everything else is ignored.
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::NetworkError;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_position() -> Position {
        Position {
            latitude: 51.6416,
            longitude: -12.3456,
            altitude_km: 418.25,
        }
    }

    #[test]
    fn test_new_app_is_loading() {
        let app = App::new(25544);

        assert_eq!(app.state, AppState::Loading);
        assert_eq!(app.catalog_number, 25544);
        assert!(app.last_updated.is_none());
        assert!(!app.should_quit);
        assert!(app.position().is_none());
    }

    #[test]
    fn test_record_success_sets_tracking() {
        let mut app = App::new(25544);
        let now = Local::now();

        app.record(Ok(test_position()), now);

        assert_eq!(app.state, AppState::Tracking(test_position()));
        assert_eq!(app.position(), Some(&test_position()));
        assert_eq!(app.last_updated, Some(now));
    }

    #[test]
    fn test_record_failure_sets_unavailable_with_message() {
        let mut app = App::new(25544);

        app.record(Err(DataError::from(NetworkError::Status(500))), Local::now());

        match &app.state {
            AppState::Unavailable(message) => {
                assert!(message.contains("Could not fetch live tracking data"));
                assert!(message.contains("500"));
            }
            other => panic!("Expected Unavailable, got {:?}", other),
        }
        assert!(app.position().is_none());
        assert!(app.last_updated.is_some());
    }

    #[test]
    fn test_failure_replaces_previous_position() {
        let mut app = App::new(25544);
        app.record(Ok(test_position()), Local::now());

        app.record(Err(DataError::from(NetworkError::Timeout)), Local::now());

        assert!(app.position().is_none(), "No partial success: old position must not linger");
    }

    #[test]
    fn test_object_label() {
        assert_eq!(App::new(25544).object_label(), "ISS");
        assert_eq!(App::new(20580).object_label(), "NORAD 20580");
    }

    #[test]
    fn test_key_q_quits() {
        let mut app = App::new(25544);

        app.handle_key(key_event(KeyCode::Char('q')));

        assert!(app.should_quit);
    }

    #[test]
    fn test_key_esc_quits() {
        let mut app = App::new(25544);

        app.handle_key(key_event(KeyCode::Esc));

        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::new(25544);

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert!(app.should_quit);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut app = App::new(25544);

        for code in [KeyCode::Char('c'), KeyCode::Char('r'), KeyCode::Enter, KeyCode::Up] {
            app.handle_key(key_event(code));
        }

        assert!(!app.should_quit);
        assert_eq!(app.state, AppState::Loading);
    }
}
