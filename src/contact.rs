//! Contact entity
//!
//! One logged QSO, plus the rules that decide whether it may be stored or
//! exported.

use chrono::{DateTime, SubsecRound, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::adif::modes::ReportFormat;

static CALLSIGN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z0-9]{1,3}[0-9][A-Z0-9]{0,3}[A-Z]$").expect("valid callsign regex")
});

/// First rule a contact breaks. Rules are checked in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid callsign: must be 3-10 uppercase letters and digits (e.g. IZ0ABC)")]
    Callsign,

    #[error("Invalid RST sent: expected {0}")]
    RstSent(&'static str),

    #[error("Invalid RST received: expected {0}")]
    RstReceived(&'static str),

    #[error("Band is required")]
    MissingBand,

    #[error("Mode is required")]
    MissingMode,

    #[error("Operator callsign is required")]
    MissingOperator,
}

/// A logged radio contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Store identifier, `None` until persisted
    pub id: Option<i64>,
    pub date_time: DateTime<Utc>,
    pub callsign: String,
    pub band: String,
    pub mode: String,
    pub rst_sent: String,
    pub rst_received: String,
    /// Resolved country/entity name
    pub dxcc: String,
    /// Maidenhead locator
    pub locator: String,
    pub operator_call: String,
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            id: None,
            date_time: Utc::now().trunc_subsecs(0),
            callsign: String::new(),
            band: String::new(),
            mode: String::new(),
            rst_sent: String::new(),
            rst_received: String::new(),
            dxcc: String::new(),
            locator: String::new(),
            operator_call: String::new(),
        }
    }
}

impl Contact {
    /// New contact stamped with the current UTC time. Callsigns are uppercased.
    pub fn new(
        callsign: &str,
        band: &str,
        mode: &str,
        rst_sent: &str,
        rst_received: &str,
        operator_call: &str,
    ) -> Self {
        Self {
            callsign: callsign.trim().to_uppercase(),
            band: band.to_string(),
            mode: mode.to_string(),
            rst_sent: rst_sent.to_string(),
            rst_received: rst_received.to_string(),
            operator_call: operator_call.trim().to_uppercase(),
            ..Self::default()
        }
    }

    pub fn with_date_time(mut self, date_time: DateTime<Utc>) -> Self {
        self.date_time = date_time;
        self
    }

    pub fn with_dxcc(mut self, dxcc: &str) -> Self {
        self.dxcc = dxcc.to_string();
        self
    }

    pub fn with_locator(mut self, locator: &str) -> Self {
        self.locator = locator.to_string();
        self
    }

    pub fn is_callsign_valid(callsign: &str) -> bool {
        (3..=10).contains(&callsign.len()) && CALLSIGN_RE.is_match(callsign)
    }

    /// Check every rule, stopping at the first failure
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !Self::is_callsign_valid(&self.callsign) {
            return Err(ValidationError::Callsign);
        }

        let format = ReportFormat::for_mode(&self.mode);
        if !format.accepts(&self.rst_sent) {
            return Err(ValidationError::RstSent(format.describe()));
        }
        if !format.accepts(&self.rst_received) {
            return Err(ValidationError::RstReceived(format.describe()));
        }

        if self.band.is_empty() {
            return Err(ValidationError::MissingBand);
        }
        if self.mode.is_empty() {
            return Err(ValidationError::MissingMode);
        }
        if self.operator_call.is_empty() {
            return Err(ValidationError::MissingOperator);
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Message for the first failing rule, `None` when the contact is valid
    pub fn validation_error(&self) -> Option<String> {
        self.validate().err().map(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cw_contact() -> Contact {
        Contact::new("IZ0ABC", "20m", "CW", "599", "579", "IK0XYZ")
    }

    #[test]
    fn test_valid_contact() {
        let c = cw_contact();
        assert!(c.is_valid());
        assert_eq!(c.validation_error(), None);
        assert_eq!(c.id, None);
    }

    #[test]
    fn test_new_uppercases_calls() {
        let c = Contact::new(" iz0abc ", "20m", "CW", "599", "599", "ik0xyz");
        assert_eq!(c.callsign, "IZ0ABC");
        assert_eq!(c.operator_call, "IK0XYZ");
    }

    #[test]
    fn test_callsign_pattern() {
        assert!(Contact::is_callsign_valid("IZ0ABC"));
        assert!(Contact::is_callsign_valid("W1AW"));
        assert!(Contact::is_callsign_valid("K1A"));
        assert!(Contact::is_callsign_valid("3DA0AB"));
        assert!(!Contact::is_callsign_valid("iz0abc"));
        assert!(!Contact::is_callsign_valid("IZABC"));
        assert!(!Contact::is_callsign_valid("IZ01"));
        assert!(!Contact::is_callsign_valid("AB"));
        assert!(!Contact::is_callsign_valid("IZ0ABC/P"));
        assert!(!Contact::is_callsign_valid(""));
    }

    #[test]
    fn test_rst_policy_per_mode() {
        let mut c = Contact::new("IZ0ABC", "20m", "SSB", "59", "59", "IK0XYZ");
        assert!(c.is_valid());

        c.mode = "CW".to_string();
        assert_eq!(c.validate(), Err(ValidationError::RstSent("3 digits (e.g. 599)")));

        c.rst_sent = "599".to_string();
        c.rst_received = "599".to_string();
        assert!(c.is_valid());

        c.mode = "SSB".to_string();
        assert!(!c.is_valid());

        c.mode = "FT8".to_string();
        c.rst_sent = "+15".to_string();
        c.rst_received = "-30".to_string();
        assert!(c.is_valid());

        c.rst_sent = "+31".to_string();
        assert!(!c.is_valid());
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let c = Contact::new("BAD", "", "CW", "1", "1", "");
        assert_eq!(c.validate(), Err(ValidationError::Callsign));

        let c = Contact::new("IZ0ABC", "", "CW", "1", "1", "");
        assert_eq!(c.validate(), Err(ValidationError::RstSent("3 digits (e.g. 599)")));

        let c = Contact::new("IZ0ABC", "", "CW", "599", "1", "");
        assert_eq!(c.validate(), Err(ValidationError::RstReceived("3 digits (e.g. 599)")));

        let c = Contact::new("IZ0ABC", "", "CW", "599", "599", "");
        assert_eq!(c.validate(), Err(ValidationError::MissingBand));

        let c = Contact::new("IZ0ABC", "20m", "CW", "599", "599", "");
        assert_eq!(c.validate(), Err(ValidationError::MissingOperator));
        assert_eq!(
            c.validation_error().as_deref(),
            Some("Operator callsign is required")
        );
    }

    #[test]
    fn test_empty_mode_uses_three_digit_reports() {
        let c = Contact::new("IZ0ABC", "20m", "", "599", "599", "IK0XYZ");
        assert_eq!(c.validate(), Err(ValidationError::MissingMode));
    }

    #[test]
    fn test_serde_round_trip() {
        let c = cw_contact().with_dxcc("Italy").with_locator("JN61");
        let json = serde_json::to_string(&c).unwrap();
        let back: Contact = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
