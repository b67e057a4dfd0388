// ADIF date/time fields
// QSO_DATE is YYYYMMDD, TIME_ON is HHMM or HHMMSS, both UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Combined ADIF timestamp layout: QSO_DATE followed by TIME_ON
pub const ADIF_DATETIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Layout of the header CREATED_TIMESTAMP field
pub const HEADER_TIMESTAMP_FORMAT: &str = "%Y%m%d %H%M%S";

/// Normalize time string to 6-character HHMMSS format (ADIF standard)
///
/// # Arguments
/// * `time_str` - Time string in various formats:
///   - HHMM (4 chars) → append "00" for seconds
///   - HHMMSS (6 chars) → use as-is
///   - "HH:MM:SS" (with colons) → remove colons
///
/// # Returns
/// * 6-character string in HHMMSS format, short input zero-extended on the right
pub fn normalize_time_to_hhmmss(time_str: &str) -> String {
    let clean = time_str.trim().replace(':', "");

    if clean.chars().count() >= 6 {
        clean.chars().take(6).collect()
    } else {
        format!("{:0<6}", clean)
    }
}

/// Combine QSO_DATE (YYYYMMDD) and TIME_ON (HHMM or HHMMSS) into a UTC timestamp
pub fn parse_adif_datetime(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let combined = format!("{}{}", date.trim(), normalize_time_to_hhmmss(time));
    NaiveDateTime::parse_from_str(&combined, ADIF_DATETIME_FORMAT)
        .ok()
        .map(|dt| dt.and_utc())
}

/// Format a timestamp as YYYYMMDDHHMMSS
pub fn format_adif_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(ADIF_DATETIME_FORMAT).to_string()
}

/// Split a timestamp into (QSO_DATE, TIME_ON)
pub fn split_adif_datetime(dt: &DateTime<Utc>) -> (String, String) {
    let stamp = format_adif_datetime(dt);
    let (date, time) = stamp.split_at(8);
    (date.to_string(), time.to_string())
}

/// Format the header CREATED_TIMESTAMP value
pub fn format_header_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(HEADER_TIMESTAMP_FORMAT).to_string()
}
