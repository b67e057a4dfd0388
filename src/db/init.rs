// Database initialization and migration handling
use serde::Serialize;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Row, Sqlite};
use std::path::Path;

use crate::db::migrations::{split_statements, MIGRATIONS};
use crate::error::StoreError;

/// Open (creating if needed) the logbook database at `db_path`
pub async fn init_db(db_path: &Path) -> Result<Pool<Sqlite>, StoreError> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    log::info!("Initializing database at: {}", db_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Enable WAL mode for better performance
    sqlx::query("PRAGMA journal_mode=WAL;").execute(&pool).await?;

    run_migrations(&pool).await?;

    log::info!("Database initialization complete");

    Ok(pool)
}

/// Single-connection in-memory database, used by tests and dry runs
pub async fn init_memory_db() -> Result<Pool<Sqlite>, StoreError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Run all pending migrations
async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), StoreError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    for (name, script) in MIGRATIONS {
        let applied: bool = sqlx::query("SELECT COUNT(*) as count FROM _migrations WHERE name = ?")
            .bind(*name)
            .fetch_one(pool)
            .await
            .map(|row| row.get::<i64, _>("count") > 0)?;

        if applied {
            continue;
        }

        log::info!("Applying {}...", name);

        let mut tx = pool.begin().await?;
        for statement in split_statements(script) {
            sqlx::query(&statement)
                .execute(&mut *tx)
                .await
                .map_err(|source| StoreError::Migration {
                    statement: statement.clone(),
                    source,
                })?;
        }
        sqlx::query("INSERT INTO _migrations (name, applied_at) VALUES (?, datetime('now'))")
            .bind(*name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        log::info!("{} applied successfully", name);
    }

    Ok(())
}

/// Logbook statistics
#[derive(Debug, Clone, Serialize)]
pub struct DbStats {
    pub contact_count: i64,
    pub band_count: i64,
    pub mode_count: i64,
    pub dxcc_count: i64,
}

pub async fn get_db_stats(pool: &Pool<Sqlite>) -> Result<DbStats, StoreError> {
    let row = sqlx::query(
        r#"SELECT COUNT(*) AS contact_count,
                  COUNT(DISTINCT band) AS band_count,
                  COUNT(DISTINCT mode) AS mode_count,
                  COUNT(DISTINCT NULLIF(dxcc, '')) AS dxcc_count
           FROM contacts"#,
    )
    .fetch_one(pool)
    .await?;

    Ok(DbStats {
        contact_count: row.try_get("contact_count")?,
        band_count: row.try_get("band_count")?,
        mode_count: row.try_get("mode_count")?,
        dxcc_count: row.try_get("dxcc_count")?,
    })
}
