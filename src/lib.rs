//! ISS tracker library
//!
//! Fetches the ISS element set from CelesTrak, propagates it to the current
//! ground position and renders it in a terminal dashboard. The modules are
//! exposed for the binary and for integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod logging;
pub mod refresh;
pub mod ui;
