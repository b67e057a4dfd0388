//! ADIF import/export commands
//!
//! This module handles:
//! - import_adif / import_from_file: Parse, validate and dupe-check contacts
//! - export_adif / export_to_file: Write valid contacts as an ADIF file
//! - generate_duplicate_report: Export the duplicates an import found
//! - import_into_store / export_from_store: The same, wired to the contact store

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::state::AppState;
use crate::adif::{has_header_terminator, AdifCodec};
use crate::contact::Contact;
use crate::db::settings;
use crate::dupes::DuplicateDetector;
use crate::error::{LogbookError, StoreError};

// ============================================================================
// Data Types
// ============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportResult {
    pub imported_contacts: Vec<Contact>,
    pub duplicate_contacts: Vec<Contact>,
    pub total_records: usize,
    pub successful_imports: usize,
    pub duplicates_found: usize,
    /// Records dropped because the mapped contact failed validation
    pub invalid_records: usize,
    pub error_message: Option<String>,
    pub success: bool,
}

impl ImportResult {
    fn failed(err: LogbookError) -> Self {
        Self {
            error_message: Some(err.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportResult {
    pub total_records: usize,
    pub successful_exports: usize,
    pub error_message: Option<String>,
    pub success: bool,
}

impl ExportResult {
    fn failed(err: LogbookError) -> Self {
        Self {
            error_message: Some(err.to_string()),
            ..Self::default()
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn read_file(path: &Path) -> Result<String, LogbookError> {
    let bytes = std::fs::read(path).map_err(|source| LogbookError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    // Non-UTF-8 logs (often Latin-1) are read lossily rather than rejected
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_file(path: &Path, content: &str) -> Result<(), LogbookError> {
    std::fs::write(path, content).map_err(|source| LogbookError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// True when the file can be read and carries an `<EOH>` marker
pub fn is_valid_adif_file(path: &Path) -> bool {
    read_file(path)
        .map(|content| has_header_terminator(&content))
        .unwrap_or(false)
}

// ============================================================================
// Import
// ============================================================================

/// Classify every record in `content` as new or duplicate. A record is a
/// duplicate when it matches `existing` or a contact accepted earlier in the
/// same file. Records whose contact fails validation land in neither list.
pub fn import_adif(
    content: &str,
    existing: &[Contact],
    codec: &AdifCodec,
    detector: &DuplicateDetector,
) -> ImportResult {
    if !has_header_terminator(content) {
        return ImportResult::failed(LogbookError::MissingHeader);
    }

    let records = codec.parse_records(content);
    let mut result = ImportResult {
        total_records: records.len(),
        ..ImportResult::default()
    };

    for record in &records {
        let contact = codec.record_to_contact(record);

        if let Err(reason) = contact.validate() {
            log::debug!("Dropping record for '{}': {}", contact.callsign, reason);
            result.invalid_records += 1;
            continue;
        }

        if detector.is_duplicate(&contact, existing)
            || detector.is_duplicate(&contact, &result.imported_contacts)
        {
            log::debug!("Duplicate: {} {} {} {}", contact.callsign, contact.band, contact.mode, contact.date_time);
            result.duplicate_contacts.push(contact);
            result.duplicates_found += 1;
        } else {
            result.imported_contacts.push(contact);
            result.successful_imports += 1;
        }
    }

    if result.invalid_records > 0 {
        log::warn!(
            "ADIF import dropped {} of {} records that failed validation",
            result.invalid_records,
            result.total_records
        );
    }
    log::info!(
        "ADIF import: {} records, {} new, {} duplicates",
        result.total_records,
        result.successful_imports,
        result.duplicates_found
    );

    result.success = true;
    result
}

pub fn import_from_file(
    path: &Path,
    existing: &[Contact],
    codec: &AdifCodec,
    detector: &DuplicateDetector,
) -> ImportResult {
    match read_file(path) {
        Ok(content) => import_adif(&content, existing, codec, detector),
        Err(e) => {
            log::error!("ADIF import failed: {}", e);
            ImportResult::failed(e)
        }
    }
}

/// Import a file against the current store contents and persist the new
/// contacts, unless `dry_run` is set. Returned contacts carry their new ids.
pub async fn import_into_store(state: &AppState, path: &Path, dry_run: bool) -> Result<ImportResult, StoreError> {
    let existing = state.store.all().await?;
    let mut result = import_from_file(path, &existing, &state.codec, &state.detector);

    if result.success && !dry_run && !result.imported_contacts.is_empty() {
        let stored = state.store.insert_all(&mut result.imported_contacts).await?;
        log::info!("Stored {} imported contacts", stored);
    }

    Ok(result)
}

// ============================================================================
// Export
// ============================================================================

/// Render the header and every valid contact. `total_records` counts the
/// input list, `successful_exports` only what was written.
pub fn export_adif(
    contacts: &[Contact],
    operator_call: Option<&str>,
    now: &DateTime<Utc>,
    codec: &AdifCodec,
) -> (String, ExportResult) {
    let mut out = codec.generate_header(operator_call, now);
    let mut result = ExportResult {
        total_records: contacts.len(),
        ..ExportResult::default()
    };

    for contact in contacts {
        if contact.is_valid() {
            out.push_str(&codec.contact_to_record(contact));
            result.successful_exports += 1;
        } else {
            log::debug!(
                "Skipping invalid contact {} on export: {}",
                contact.callsign,
                contact.validation_error().unwrap_or_default()
            );
        }
    }

    result.success = true;
    (out, result)
}

pub fn export_to_file(
    path: &Path,
    contacts: &[Contact],
    operator_call: Option<&str>,
    codec: &AdifCodec,
) -> ExportResult {
    let (content, result) = export_adif(contacts, operator_call, &Utc::now(), codec);

    match write_file(path, &content) {
        Ok(()) => {
            log::info!(
                "ADIF export: {} of {} contacts written to {}",
                result.successful_exports,
                result.total_records,
                path.display()
            );
            result
        }
        Err(e) => {
            log::error!("ADIF export failed: {}", e);
            ExportResult::failed(e)
        }
    }
}

/// Write the duplicates from an import to their own ADIF file. Nothing to
/// report counts as success and creates no file.
pub fn generate_duplicate_report(
    path: &Path,
    duplicates: &[Contact],
    operator_call: Option<&str>,
    codec: &AdifCodec,
) -> bool {
    if duplicates.is_empty() {
        return true;
    }
    export_to_file(path, duplicates, operator_call, codec).success
}

/// Export stored contacts, optionally filtered by a search term. Without an
/// explicit operator the header uses the one saved at setup.
pub async fn export_from_store(
    state: &AppState,
    path: &Path,
    operator_call: Option<&str>,
    search: Option<&str>,
) -> Result<ExportResult, StoreError> {
    let contacts = match search {
        Some(term) => state.store.search(term).await?,
        None => state.store.all().await?,
    };
    let operator = match operator_call {
        Some(call) => Some(call.to_string()),
        None => settings::operator_call(state.pool()).await?,
    };
    Ok(export_to_file(path, &contacts, operator.as_deref(), &state.codec))
}
