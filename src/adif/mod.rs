// ADIF (Amateur Data Interchange Format) Parser and Writer
// Reference: https://adif.org/

pub mod bands;
pub mod datetime;
pub mod mapper;
pub mod modes;
pub mod parser;
pub mod writer;

pub use bands::{BandPlan, UNKNOWN_BAND};
pub use modes::{ModeTable, ReportFormat};
pub use parser::{has_header_terminator, parse_records, AdifRecord};
pub use writer::{format_field, generate_header};

use chrono::{DateTime, Utc};

use crate::contact::Contact;

/// Record codec with its lookup tables. Build once, share by reference.
#[derive(Debug, Clone, Default)]
pub struct AdifCodec {
    pub bands: BandPlan,
    pub modes: ModeTable,
}

impl AdifCodec {
    pub fn new() -> Self {
        Self {
            bands: BandPlan::standard(),
            modes: ModeTable::standard(),
        }
    }

    pub fn parse_records(&self, content: &str) -> Vec<AdifRecord> {
        parser::parse_records(content)
    }

    pub fn record_to_contact(&self, record: &AdifRecord) -> Contact {
        mapper::record_to_contact(record, &self.bands, &self.modes)
    }

    /// Parse and map in one pass, without validation
    pub fn parse_contacts(&self, content: &str) -> Vec<Contact> {
        self.parse_records(content)
            .iter()
            .map(|r| self.record_to_contact(r))
            .collect()
    }

    pub fn contact_to_record(&self, contact: &Contact) -> String {
        writer::contact_to_record(contact, &self.bands)
    }

    pub fn generate_header(&self, operator_call: Option<&str>, now: &DateTime<Utc>) -> String {
        writer::generate_header(operator_call, now)
    }

    pub fn frequency_to_band(&self, freq: &str) -> &'static str {
        self.bands.freq_str_to_band(freq)
    }

    pub fn band_to_frequency(&self, band: &str) -> Option<&'static str> {
        self.bands.band_to_freq(band)
    }
}
