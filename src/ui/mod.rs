//! UI rendering module for the ISS tracker
//!
//! This module contains the terminal dashboard, drawn with ratatui, and the
//! plain-text / JSON snapshot used by one-shot mode.

pub mod dashboard;
pub mod snapshot;

pub use dashboard::render;
pub use snapshot::Snapshot;
