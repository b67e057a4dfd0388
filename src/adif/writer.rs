// ADIF Writer
// Serializes contacts as <NAME:LENGTH>VALUE records and builds the file header.

use chrono::{DateTime, Utc};

use super::bands::BandPlan;
use super::datetime::{format_header_timestamp, split_adif_datetime};
use crate::contact::Contact;

pub const ADIF_VERSION: &str = "3.1.4";
pub const PROGRAM_ID: &str = "HamLog";
pub const PROGRAM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Format one field. Empty values produce nothing at all.
pub fn format_field(name: &str, value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    format!("<{}:{}>{}", name, value.chars().count(), value)
}

/// Serialize one contact as a single `<EOR>`-terminated line
pub fn contact_to_record(contact: &Contact, bands: &BandPlan) -> String {
    let (qso_date, time_on) = split_adif_datetime(&contact.date_time);

    let fields = [
        ("CALL", contact.callsign.as_str()),
        ("BAND", contact.band.as_str()),
        ("MODE", contact.mode.as_str()),
        ("QSO_DATE", qso_date.as_str()),
        ("TIME_ON", time_on.as_str()),
        ("RST_SENT", contact.rst_sent.as_str()),
        ("RST_RCVD", contact.rst_received.as_str()),
        ("COUNTRY", contact.dxcc.as_str()),
        ("GRIDSQUARE", contact.locator.as_str()),
        ("OPERATOR", contact.operator_call.as_str()),
        ("FREQ", bands.band_to_freq(&contact.band).unwrap_or("")),
    ];

    let mut record: String = fields
        .iter()
        .map(|(name, value)| format_field(name, value))
        .collect();
    record.push_str("<EOR>\n");
    record
}

/// File preamble ending in `<EOH>`. The clock is passed in so output can be
/// reproduced.
pub fn generate_header(operator_call: Option<&str>, now: &DateTime<Utc>) -> String {
    let mut header = format!("ADIF Export from {}\n", PROGRAM_ID);
    for (name, value) in [
        ("ADIF_VER", ADIF_VERSION),
        ("PROGRAMID", PROGRAM_ID),
        ("PROGRAMVERSION", PROGRAM_VERSION),
    ] {
        header.push_str(&format_field(name, value));
        header.push('\n');
    }
    header.push_str(&format_field("CREATED_TIMESTAMP", &format_header_timestamp(now)));
    header.push('\n');

    if let Some(op) = operator_call.filter(|op| !op.is_empty()) {
        header.push_str(&format_field("OPERATOR", op));
        header.push('\n');
    }

    header.push_str("<EOH>\n");
    header
}
