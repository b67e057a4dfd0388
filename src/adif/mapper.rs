// ADIF record → Contact mapping
//
// Field synonyms: DXCC before COUNTRY, OPERATOR before STATION_CALLSIGN.
// BAND falls back to a band derived from FREQ. Unrecognized fields are ignored.

use super::bands::BandPlan;
use super::modes::ModeTable;
use super::parser::AdifRecord;
use super::datetime::parse_adif_datetime;
use crate::contact::Contact;

/// Fields read from an imported record
pub const IMPORT_FIELDS: &[&str] = &[
    "CALL", "BAND", "FREQ", "MODE", "QSO_DATE", "TIME_ON", "RST_SENT", "RST_RCVD",
    "DXCC", "COUNTRY", "GRIDSQUARE", "OPERATOR", "STATION_CALLSIGN",
];

/// Build a Contact from one parsed record. Missing fields leave the contact
/// incomplete; whether it is usable is decided by `Contact::validate`.
pub fn record_to_contact(record: &AdifRecord, bands: &BandPlan, modes: &ModeTable) -> Contact {
    let mut contact = Contact::default();

    if let Some(call) = record.call() {
        contact.callsign = call.to_string();
    }

    if let Some(band) = record.band() {
        contact.band = band.to_string();
    } else if let Some(freq) = record.freq() {
        contact.band = bands.freq_str_to_band(freq).to_string();
    }

    if let Some(mode) = record.mode() {
        contact.mode = modes.normalize(mode);
    }

    match (record.qso_date(), record.time_on()) {
        (Some(date), Some(time)) if !date.is_empty() && !time.is_empty() => {
            match parse_adif_datetime(date, time) {
                Some(dt) => contact.date_time = dt,
                None => log::warn!(
                    "Unparseable QSO_DATE/TIME_ON {}/{} for {}",
                    date,
                    time,
                    contact.callsign
                ),
            }
        }
        _ => {}
    }

    if let Some(rst) = record.get("RST_SENT") {
        contact.rst_sent = rst.to_string();
    }
    if let Some(rst) = record.get("RST_RCVD") {
        contact.rst_received = rst.to_string();
    }

    if let Some(entity) = record.first_of(&["DXCC", "COUNTRY"]) {
        contact.dxcc = entity.to_string();
    }

    if let Some(grid) = record.gridsquare() {
        contact.locator = grid.to_string();
    }

    if let Some(op) = record.first_of(&["OPERATOR", "STATION_CALLSIGN"]) {
        contact.operator_call = op.to_string();
    }

    let ignored = record
        .fields
        .keys()
        .filter(|k| !IMPORT_FIELDS.contains(&k.as_str()))
        .count();
    if ignored > 0 {
        log::debug!("{}: ignored {} unsupported ADIF fields", contact.callsign, ignored);
    }

    contact
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adif::parser::parse_records;
    use chrono::{TimeZone, Utc};

    fn map(adif: &str) -> Contact {
        let records = parse_records(adif);
        assert_eq!(records.len(), 1);
        record_to_contact(&records[0], &BandPlan::standard(), &ModeTable::standard())
    }

    #[test]
    fn test_full_record() {
        let c = map(
            "<EOH><CALL:6>IZ0ABC<BAND:3>20m<MODE:2>CW<QSO_DATE:8>20240115<TIME_ON:6>143000\
             <RST_SENT:3>599<RST_RCVD:3>579<COUNTRY:5>Italy<GRIDSQUARE:6>JN61fv\
             <OPERATOR:6>IK0XYZ<EOR>",
        );
        assert_eq!(c.id, None);
        assert_eq!(c.callsign, "IZ0ABC");
        assert_eq!(c.band, "20m");
        assert_eq!(c.mode, "CW");
        assert_eq!(c.date_time, Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap());
        assert_eq!(c.rst_sent, "599");
        assert_eq!(c.rst_received, "579");
        assert_eq!(c.dxcc, "Italy");
        assert_eq!(c.locator, "JN61fv");
        assert_eq!(c.operator_call, "IK0XYZ");
        assert!(c.is_valid());
    }

    #[test]
    fn test_band_from_freq() {
        let c = map("<EOH><CALL:4>W1AW<FREQ:6>14.074<EOR>");
        assert_eq!(c.band, "20m");

        let c = map("<EOH><CALL:4>W1AW<FREQ:4>27.1<EOR>");
        assert_eq!(c.band, "Unknown");
    }

    #[test]
    fn test_band_field_beats_freq() {
        let c = map("<EOH><CALL:4>W1AW<BAND:3>40m<FREQ:6>14.074<EOR>");
        assert_eq!(c.band, "40m");
    }

    #[test]
    fn test_synonym_precedence() {
        let c = map(
            "<EOH><CALL:4>W1AW<COUNTRY:13>United States<DXCC:3>291\
             <STATION_CALLSIGN:6>IK0XYZ<OPERATOR:6>IZ0QQQ<EOR>",
        );
        assert_eq!(c.dxcc, "291");
        assert_eq!(c.operator_call, "IZ0QQQ");

        let c = map("<EOH><CALL:4>W1AW<STATION_CALLSIGN:6>IK0XYZ<EOR>");
        assert_eq!(c.operator_call, "IK0XYZ");
    }

    #[test]
    fn test_short_time_is_zero_extended() {
        let c = map("<EOH><CALL:4>W1AW<QSO_DATE:8>20240115<TIME_ON:4>0930<EOR>");
        assert_eq!(c.date_time, Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_missing_call_gives_invalid_contact() {
        let c = map("<EOH><BAND:3>20m<MODE:2>CW<RST_SENT:3>599<RST_RCVD:3>599<OPERATOR:6>IK0XYZ<EOR>");
        assert!(c.callsign.is_empty());
        assert!(!c.is_valid());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let c = map("<EOH><CALL:4>W1AW<NAME:5>Hiram<QTH:9>Newington<EOR>");
        assert_eq!(c.callsign, "W1AW");
        assert!(c.dxcc.is_empty());
        assert!(!IMPORT_FIELDS.contains(&"NAME"));
    }
}
