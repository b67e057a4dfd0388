//! Settings and utility commands
//!
//! This module handles:
//! - setup_operator / get_operator_profile: Station operator details
//! - get_db_stats: Logbook statistics

use once_cell::sync::Lazy;
use regex::Regex;

use super::state::AppState;
use crate::contact::Contact;
use crate::db::{self, settings, DbStats, OperatorProfile};

/// Maidenhead square, optionally with subsquare
static LOCATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-R]{2}[0-9]{2}([A-X]{2})?$").expect("locator regex"));

// ============================================================================
// Operator Commands
// ============================================================================

/// Validate and save the operator profile. Callsign and locator are stored
/// uppercased; the locator may be left empty.
pub async fn setup_operator(state: &AppState, profile: OperatorProfile) -> Result<OperatorProfile, String> {
    let callsign = profile.callsign.trim().to_uppercase();
    if callsign.is_empty() {
        return Err("Operator callsign is required".to_string());
    }
    if !Contact::is_callsign_valid(&callsign) {
        return Err(format!("Invalid operator callsign '{}' (e.g. IZ0ABC)", callsign));
    }

    let locator = profile.locator.trim().to_uppercase();
    if !locator.is_empty() && !LOCATOR_RE.is_match(&locator) {
        return Err(format!("Invalid locator '{}': expected Maidenhead format (e.g. JN45AB)", locator));
    }

    let profile = OperatorProfile {
        callsign,
        first_name: profile.first_name.trim().to_string(),
        last_name: profile.last_name.trim().to_string(),
        locator,
    };
    settings::set_operator_profile(state.pool(), &profile)
        .await
        .map_err(|e| e.to_string())?;

    Ok(profile)
}

pub async fn get_operator_profile(state: &AppState) -> Result<OperatorProfile, String> {
    settings::operator_profile(state.pool()).await.map_err(|e| e.to_string())
}

// ============================================================================
// Database Commands
// ============================================================================

pub async fn get_db_stats(state: &AppState) -> Result<DbStats, String> {
    db::get_db_stats(state.pool()).await.map_err(|e| e.to_string())
}
