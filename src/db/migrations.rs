/// SQL migration for initial database schema
///
/// Design principles:
/// - One row per contact, timestamps as RFC 3339 UTC text so they sort
/// - Indexes on the fields searched and dupe-checked
/// - Key/value settings table for the operator profile
pub const MIGRATION_001: &str = r#"
-- =============================================================================
-- Contact log
-- =============================================================================
CREATE TABLE IF NOT EXISTS contacts (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    uuid            TEXT NOT NULL UNIQUE,
    datetime        TEXT NOT NULL,          -- e.g., "2024-01-15T14:30:00Z"
    callsign        TEXT NOT NULL,
    band            TEXT NOT NULL,          -- e.g., "20m"
    mode            TEXT NOT NULL,          -- e.g., "FT8"
    rst_sent        TEXT NOT NULL,
    rst_received    TEXT NOT NULL,
    dxcc            TEXT,                   -- Entity name
    locator         TEXT,                   -- Maidenhead grid
    operator_call   TEXT NOT NULL,
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_contacts_callsign ON contacts(callsign);
CREATE INDEX IF NOT EXISTS idx_contacts_datetime ON contacts(datetime);
CREATE INDEX IF NOT EXISTS idx_contacts_band ON contacts(band);
CREATE INDEX IF NOT EXISTS idx_contacts_mode ON contacts(mode);

-- =============================================================================
-- Settings (operator profile and preferences)
-- =============================================================================
CREATE TABLE IF NOT EXISTS settings (
    key             TEXT PRIMARY KEY,
    value           TEXT,
    updated_at      TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

/// All migrations in application order
pub const MIGRATIONS: &[(&str, &str)] = &[("migration_001", MIGRATION_001)];

/// Split a migration script into executable statements, dropping comments
pub fn split_statements(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(|statement| {
            statement
                .lines()
                .filter(|line| !line.trim_start().starts_with("--"))
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string()
        })
        .filter(|statement| !statement.is_empty())
        .collect()
}
