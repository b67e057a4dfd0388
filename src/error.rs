//! Error types

use std::path::PathBuf;

/// Failures from the SQLite contact store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Migration failed on statement: {statement}\nError: {source}")]
    Migration {
        statement: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Invalid value in column {column}: {value}")]
    Decode { column: &'static str, value: String },

    #[error("Contact has not been stored yet")]
    NotPersisted,

    #[error("Contact not found: {0}")]
    NotFound(i64),
}

/// Failures reading or writing ADIF files. Rendered into the
/// `error_message` of import/export results.
#[derive(Debug, thiserror::Error)]
pub enum LogbookError {
    #[error("Cannot open file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid ADIF file: missing <EOH> header terminator")]
    MissingHeader,
}
