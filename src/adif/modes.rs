// ADIF Mode Table
// Reference: https://adif.org/314/ADIF_314.htm#Mode_Enumeration
//
// Wire-to-internal mode synonyms and the signal report format each mode uses.

use std::collections::HashMap;

/// Modes the logbook knows about. Every entry currently maps to itself.
const KNOWN_MODES: &[&str] = &[
    "CW", "SSB", "USB", "LSB", "AM", "FM", "RTTY", "PSK31", "PSK63", "FT8", "FT4",
    "JT65", "JT9", "MSK144", "MFSK", "OLIVIA", "CONTESTIA", "HELL", "SSTV", "FAX",
    "PACKET",
];

/// Signal report convention for a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Readability + strength, two digits ("59"). Voice modes.
    ReadabilityStrength,
    /// Signal-to-noise in dB, signed, -30..=+30 ("-12"). WSJT weak-signal modes.
    Decibel,
    /// Readability + strength + tone, three digits ("599"). CW and other data modes.
    ReadabilityStrengthTone,
}

impl ReportFormat {
    /// Classify a mode label. Matching ignores case.
    pub fn for_mode(mode: &str) -> Self {
        match mode.trim().to_uppercase().as_str() {
            "SSB" | "AM" | "FM" | "USB" | "LSB" => ReportFormat::ReadabilityStrength,
            "FT8" | "FT4" | "JT65" | "JT9" | "MSK144" => ReportFormat::Decibel,
            _ => ReportFormat::ReadabilityStrengthTone,
        }
    }

    /// Check one report string against this convention
    pub fn accepts(&self, report: &str) -> bool {
        let digits = report.as_bytes();
        match self {
            ReportFormat::ReadabilityStrength => {
                digits.len() == 2
                    && (b'1'..=b'5').contains(&digits[0])
                    && (b'1'..=b'9').contains(&digits[1])
            }
            ReportFormat::ReadabilityStrengthTone => {
                digits.len() == 3
                    && (b'1'..=b'5').contains(&digits[0])
                    && (b'1'..=b'9').contains(&digits[1])
                    && (b'1'..=b'9').contains(&digits[2])
            }
            ReportFormat::Decibel => {
                let unsigned = report
                    .strip_prefix('+')
                    .or_else(|| report.strip_prefix('-'))
                    .unwrap_or(report);
                if unsigned.is_empty()
                    || unsigned.len() > 2
                    || !unsigned.bytes().all(|b| b.is_ascii_digit())
                {
                    return false;
                }
                report
                    .parse::<i32>()
                    .map(|db| (-30..=30).contains(&db))
                    .unwrap_or(false)
            }
        }
    }

    /// Short description used in validation messages
    pub fn describe(&self) -> &'static str {
        match self {
            ReportFormat::ReadabilityStrength => "2 digits (e.g. 59)",
            ReportFormat::Decibel => "a dB value between -30 and +30 (e.g. -12)",
            ReportFormat::ReadabilityStrengthTone => "3 digits (e.g. 599)",
        }
    }
}

/// Mode synonym table applied on import
#[derive(Debug, Clone)]
pub struct ModeTable {
    synonyms: HashMap<&'static str, &'static str>,
}

impl Default for ModeTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ModeTable {
    pub fn standard() -> Self {
        Self {
            synonyms: KNOWN_MODES.iter().map(|m| (*m, *m)).collect(),
        }
    }

    /// Map a wire mode to the internal vocabulary. Unknown modes pass through.
    pub fn normalize(&self, mode: &str) -> String {
        self.synonyms
            .get(mode)
            .map(|m| m.to_string())
            .unwrap_or_else(|| mode.to_string())
    }

    pub fn is_known(&self, mode: &str) -> bool {
        self.synonyms.contains_key(mode)
    }
}
