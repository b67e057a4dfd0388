//! Time Utilities
//!
//! Date/time parsing for command input. The ADIF field helpers live in
//! `crate::adif::datetime` and are re-exported here.

use chrono::{DateTime, NaiveDateTime, Utc};

pub use crate::adif::datetime::{
    format_adif_datetime, format_header_timestamp, normalize_time_to_hhmmss, parse_adif_datetime,
    split_adif_datetime, ADIF_DATETIME_FORMAT, HEADER_TIMESTAMP_FORMAT,
};

/// Parse a YYYYMMDDHHMMSS string as entered on the command line
pub fn parse_compact_datetime(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), ADIF_DATETIME_FORMAT)
        .ok()
        .map(|dt| dt.and_utc())
}
