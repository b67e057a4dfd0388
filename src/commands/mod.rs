//! Logbook Command Handlers
//!
//! Entry points used by the front end, grouped by domain.
//!
//! ## Module Organization
//! - `state` - Application state shared by every command
//! - `time_utils` - ADIF date/time parsing and formatting
//! - `adif` - ADIF import/export and duplicate reports
//! - `qso` - Contact CRUD and dupe status
//! - `settings` - Operator profile and logbook statistics

mod state;
pub mod time_utils;
pub mod adif;
pub mod qso;
pub mod settings;

// Re-export AppState for use in main.rs
pub use state::AppState;
