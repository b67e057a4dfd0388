//! Contact CRUD commands
//!
//! This module handles:
//! - add_contact: Validate and store a manually entered contact
//! - get_contacts / search_contacts: Read the log, newest first
//! - delete_contact: Remove a single contact
//! - check_contact_status: Dupe check and previous QSO count for a callsign

use serde::{Deserialize, Serialize};

use super::state::AppState;
use super::time_utils::parse_compact_datetime;
use crate::contact::Contact;
use crate::db::settings;

// ============================================================================
// Data Types
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewContact {
    pub callsign: String,
    pub band: String,
    pub mode: String,
    pub rst_sent: String,
    pub rst_received: String,
    pub dxcc: Option<String>,
    pub locator: Option<String>,
    /// Falls back to the operator saved at setup
    pub operator_call: Option<String>,
    /// YYYYMMDDHHMMSS, defaults to now
    pub date_time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactStatus {
    pub is_dupe: bool,
    pub previous_qsos: usize,
}

// ============================================================================
// Contact Commands
// ============================================================================

pub async fn add_contact(state: &AppState, new: NewContact) -> Result<Contact, String> {
    let operator = match new.operator_call {
        Some(call) => call,
        None => settings::operator_call(state.pool())
            .await
            .map_err(|e| e.to_string())?
            .unwrap_or_default(),
    };

    let mut contact = Contact::new(
        &new.callsign,
        &new.band,
        &new.mode,
        &new.rst_sent,
        &new.rst_received,
        &operator,
    );
    if let Some(dxcc) = new.dxcc {
        contact = contact.with_dxcc(&dxcc);
    }
    if let Some(locator) = new.locator {
        contact = contact.with_locator(&locator);
    }
    if let Some(raw) = new.date_time {
        let at = parse_compact_datetime(&raw).ok_or_else(|| format!("Invalid date/time '{}': expected YYYYMMDDHHMMSS", raw))?;
        contact = contact.with_date_time(at);
    }

    contact.validate().map_err(|e| e.to_string())?;

    log::info!("Adding contact: {} on {} {}", contact.callsign, contact.band, contact.mode);
    state.store.insert(&mut contact).await.map_err(|e| e.to_string())?;

    Ok(contact)
}

pub async fn get_contacts(state: &AppState) -> Result<Vec<Contact>, String> {
    state.store.all().await.map_err(|e| e.to_string())
}

pub async fn search_contacts(state: &AppState, term: &str) -> Result<Vec<Contact>, String> {
    state.store.search(term).await.map_err(|e| e.to_string())
}

pub async fn delete_contact(state: &AppState, id: i64) -> Result<(), String> {
    log::info!("Deleting contact: {}", id);

    if state.store.delete(id).await.map_err(|e| e.to_string())? {
        Ok(())
    } else {
        Err(format!("Contact not found: {}", id))
    }
}

/// Would `contact` be flagged as a duplicate if it were imported now
pub async fn check_contact_status(state: &AppState, contact: &Contact) -> Result<ContactStatus, String> {
    let existing = state.store.all().await.map_err(|e| e.to_string())?;

    Ok(ContactStatus {
        is_dupe: state.detector.is_duplicate(contact, &existing),
        previous_qsos: existing.iter().filter(|c| c.callsign == contact.callsign).count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogbookConfig;
    use crate::db::{init_memory_db, OperatorProfile};
    use chrono::{TimeZone, Utc};

    async fn state() -> AppState {
        let pool = init_memory_db().await.unwrap();
        AppState::with_pool(pool, &LogbookConfig::default())
    }

    fn new_contact(call: &str) -> NewContact {
        NewContact {
            callsign: call.to_string(),
            band: "20m".to_string(),
            mode: "SSB".to_string(),
            rst_sent: "59".to_string(),
            rst_received: "57".to_string(),
            operator_call: Some("IK0XYZ".to_string()),
            date_time: Some("20240115143000".to_string()),
            ..NewContact::default()
        }
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let state = state().await;
        let added = add_contact(&state, new_contact("iz0abc")).await.unwrap();
        assert!(added.id.is_some());
        assert_eq!(added.callsign, "IZ0ABC");
        assert_eq!(added.date_time, Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap());

        let all = get_contacts(&state).await.unwrap();
        assert_eq!(all, vec![added]);
        assert_eq!(search_contacts(&state, "IZ0").await.unwrap().len(), 1);
        assert!(search_contacts(&state, "W1AW").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_invalid() {
        let state = state().await;

        let mut bad_rst = new_contact("IZ0ABC");
        bad_rst.rst_sent = "599".to_string();
        let err = add_contact(&state, bad_rst).await.unwrap_err();
        assert_eq!(err, "Invalid RST sent: expected 2 digits (e.g. 59)");

        let mut bad_time = new_contact("IZ0ABC");
        bad_time.date_time = Some("2024-01-15".to_string());
        assert!(add_contact(&state, bad_time).await.unwrap_err().contains("YYYYMMDDHHMMSS"));

        assert_eq!(state.store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_add_uses_stored_operator() {
        let state = state().await;
        let mut nc = new_contact("IZ0ABC");
        nc.operator_call = None;
        assert_eq!(add_contact(&state, nc.clone()).await.unwrap_err(), "Operator callsign is required");

        let profile = OperatorProfile {
            callsign: "IK0XYZ".to_string(),
            ..OperatorProfile::default()
        };
        settings::set_operator_profile(state.pool(), &profile).await.unwrap();
        assert_eq!(add_contact(&state, nc).await.unwrap().operator_call, "IK0XYZ");
    }

    #[tokio::test]
    async fn test_delete() {
        let state = state().await;
        let added = add_contact(&state, new_contact("IZ0ABC")).await.unwrap();
        let id = added.id.unwrap();

        delete_contact(&state, id).await.unwrap();
        assert_eq!(delete_contact(&state, id).await.unwrap_err(), format!("Contact not found: {}", id));
    }

    #[tokio::test]
    async fn test_check_contact_status() {
        let state = state().await;
        add_contact(&state, new_contact("IZ0ABC")).await.unwrap();

        let candidate = Contact::new("IZ0ABC", "20m", "SSB", "59", "59", "IK0XYZ")
            .with_date_time(Utc.with_ymd_and_hms(2024, 1, 15, 14, 32, 0).unwrap());
        let status = check_contact_status(&state, &candidate).await.unwrap();
        assert!(status.is_dupe);
        assert_eq!(status.previous_qsos, 1);

        let other_band = Contact { band: "40m".to_string(), ..candidate };
        let status = check_contact_status(&state, &other_band).await.unwrap();
        assert!(!status.is_dupe);
        assert_eq!(status.previous_qsos, 1);
    }
}
