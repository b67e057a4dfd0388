//! Duplicate detection
//!
//! Two contacts are the same QSO when callsign, band and mode match exactly
//! and their timestamps are within the window of each other.

use crate::contact::Contact;

/// Default tolerance between timestamps, in seconds
pub const DEFAULT_WINDOW_SECS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateDetector {
    window_secs: u64,
}

impl Default for DuplicateDetector {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SECS)
    }
}

impl DuplicateDetector {
    pub fn new(window_secs: u64) -> Self {
        Self { window_secs }
    }

    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }

    /// Pairwise check
    pub fn matches(&self, a: &Contact, b: &Contact) -> bool {
        a.callsign == b.callsign
            && a.band == b.band
            && a.mode == b.mode
            && (a.date_time - b.date_time).num_seconds().unsigned_abs() <= self.window_secs
    }

    /// Linear scan, true on the first existing contact that matches
    pub fn is_duplicate(&self, candidate: &Contact, existing: &[Contact]) -> bool {
        existing.iter().any(|e| self.matches(candidate, e))
    }
}
