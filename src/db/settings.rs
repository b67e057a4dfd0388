// Key/value settings and the operator profile

use serde::{Deserialize, Serialize};
use sqlx::{Pool, Sqlite};

use crate::error::StoreError;

pub const KEY_OPERATOR_CALL: &str = "operator_call";
pub const KEY_OPERATOR_FIRSTNAME: &str = "operator_firstname";
pub const KEY_OPERATOR_LASTNAME: &str = "operator_lastname";
pub const KEY_OPERATOR_LOCATOR: &str = "operator_locator";

const UPSERT_SETTING_SQL: &str = r#"INSERT INTO settings (key, value, updated_at)
    VALUES (?, ?, datetime('now'))
    ON CONFLICT(key) DO UPDATE SET
      value = excluded.value,
      updated_at = datetime('now')"#;

/// Station operator details captured at first setup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorProfile {
    pub callsign: String,
    pub first_name: String,
    pub last_name: String,
    pub locator: String,
}

pub async fn get_setting(pool: &Pool<Sqlite>, key: &str) -> Result<Option<String>, StoreError> {
    let value = sqlx::query_scalar::<_, Option<String>>("SELECT value FROM settings WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(value.flatten())
}

pub async fn set_setting(pool: &Pool<Sqlite>, key: &str, value: &str) -> Result<(), StoreError> {
    log::info!("Setting {} = {}", key, value);

    sqlx::query(UPSERT_SETTING_SQL)
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;

    Ok(())
}

/// Stored operator callsign, if setup has been completed
pub async fn operator_call(pool: &Pool<Sqlite>) -> Result<Option<String>, StoreError> {
    Ok(get_setting(pool, KEY_OPERATOR_CALL)
        .await?
        .filter(|call| !call.is_empty()))
}

/// Save the whole profile atomically
pub async fn set_operator_profile(pool: &Pool<Sqlite>, profile: &OperatorProfile) -> Result<(), StoreError> {
    let callsign = profile.callsign.trim().to_uppercase();
    let locator = profile.locator.trim().to_string();
    let entries = [
        (KEY_OPERATOR_CALL, callsign.as_str()),
        (KEY_OPERATOR_FIRSTNAME, profile.first_name.as_str()),
        (KEY_OPERATOR_LASTNAME, profile.last_name.as_str()),
        (KEY_OPERATOR_LOCATOR, locator.as_str()),
    ];

    let mut tx = pool.begin().await?;
    for (key, value) in entries {
        sqlx::query(UPSERT_SETTING_SQL)
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    log::info!("Operator profile saved for {}", callsign);
    Ok(())
}

pub async fn operator_profile(pool: &Pool<Sqlite>) -> Result<OperatorProfile, StoreError> {
    Ok(OperatorProfile {
        callsign: get_setting(pool, KEY_OPERATOR_CALL).await?.unwrap_or_default(),
        first_name: get_setting(pool, KEY_OPERATOR_FIRSTNAME).await?.unwrap_or_default(),
        last_name: get_setting(pool, KEY_OPERATOR_LASTNAME).await?.unwrap_or_default(),
        locator: get_setting(pool, KEY_OPERATOR_LOCATOR).await?.unwrap_or_default(),
    })
}

pub async fn clear_settings(pool: &Pool<Sqlite>) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM settings").execute(pool).await?;
    Ok(())
}
