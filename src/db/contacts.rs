// Contact store operations

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

use crate::contact::Contact;
use crate::error::StoreError;

const INSERT_SQL: &str = r#"INSERT INTO contacts (
        uuid, datetime, callsign, band, mode, rst_sent, rst_received, dxcc, locator, operator_call
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#;

fn encode_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn decode_datetime(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StoreError::Decode {
            column: "datetime",
            value: raw.to_string(),
        })
}

fn row_to_contact(row: &SqliteRow) -> Result<Contact, StoreError> {
    let raw_datetime: String = row.try_get("datetime")?;
    Ok(Contact {
        id: Some(row.try_get("id")?),
        date_time: decode_datetime(&raw_datetime)?,
        callsign: row.try_get("callsign")?,
        band: row.try_get("band")?,
        mode: row.try_get("mode")?,
        rst_sent: row.try_get("rst_sent")?,
        rst_received: row.try_get("rst_received")?,
        dxcc: row.try_get::<Option<String>, _>("dxcc")?.unwrap_or_default(),
        locator: row.try_get::<Option<String>, _>("locator")?.unwrap_or_default(),
        operator_call: row.try_get("operator_call")?,
    })
}

fn insert_query(contact: &Contact) -> Query<'static, Sqlite, SqliteArguments<'static>> {
    sqlx::query(INSERT_SQL)
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(encode_datetime(&contact.date_time))
        .bind(contact.callsign.clone())
        .bind(contact.band.clone())
        .bind(contact.mode.clone())
        .bind(contact.rst_sent.clone())
        .bind(contact.rst_received.clone())
        .bind(contact.dxcc.clone())
        .bind(contact.locator.clone())
        .bind(contact.operator_call.clone())
}

/// Handle on the persisted contact table. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ContactStore {
    pool: Pool<Sqlite>,
}

impl ContactStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Insert a contact and record its new id on it
    pub async fn insert(&self, contact: &mut Contact) -> Result<i64, StoreError> {
        let id = insert_query(contact)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();
        contact.id = Some(id);
        Ok(id)
    }

    /// Insert a batch in one transaction; all or nothing
    pub async fn insert_all(&self, contacts: &mut [Contact]) -> Result<usize, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(contacts.len());
        for contact in contacts.iter() {
            let id = insert_query(contact)
                .execute(&mut *tx)
                .await?
                .last_insert_rowid();
            ids.push(id);
        }
        tx.commit().await?;

        for (contact, id) in contacts.iter_mut().zip(ids) {
            contact.id = Some(id);
        }
        Ok(contacts.len())
    }

    pub async fn update(&self, contact: &Contact) -> Result<(), StoreError> {
        let id = contact.id.ok_or(StoreError::NotPersisted)?;
        let result = sqlx::query(
            r#"UPDATE contacts SET
                datetime = ?, callsign = ?, band = ?, mode = ?,
                rst_sent = ?, rst_received = ?, dxcc = ?, locator = ?, operator_call = ?
               WHERE id = ?"#,
        )
        .bind(encode_datetime(&contact.date_time))
        .bind(&contact.callsign)
        .bind(&contact.band)
        .bind(&contact.mode)
        .bind(&contact.rst_sent)
        .bind(&contact.rst_received)
        .bind(&contact.dxcc)
        .bind(&contact.locator)
        .bind(&contact.operator_call)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    /// Returns false when no row had that id
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Contact>, StoreError> {
        sqlx::query("SELECT * FROM contacts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .as_ref()
            .map(row_to_contact)
            .transpose()
    }

    /// Every contact, newest first
    pub async fn all(&self) -> Result<Vec<Contact>, StoreError> {
        let rows = sqlx::query("SELECT * FROM contacts ORDER BY datetime DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_contact).collect()
    }

    /// Substring match on callsign, band, mode or DXCC entity
    pub async fn search(&self, term: &str) -> Result<Vec<Contact>, StoreError> {
        let pattern = format!("%{}%", term);
        let rows = sqlx::query(
            r#"SELECT * FROM contacts
               WHERE callsign LIKE ? OR band LIKE ? OR mode LIKE ? OR dxcc LIKE ?
               ORDER BY datetime DESC, id DESC"#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_contact).collect()
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        Ok(sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contacts")
            .fetch_one(&self.pool)
            .await?)
    }

    pub async fn unique_bands(&self) -> Result<Vec<String>, StoreError> {
        Ok(sqlx::query_scalar::<_, String>("SELECT DISTINCT band FROM contacts ORDER BY band")
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn unique_modes(&self) -> Result<Vec<String>, StoreError> {
        Ok(sqlx::query_scalar::<_, String>("SELECT DISTINCT mode FROM contacts ORDER BY mode")
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn unique_dxcc(&self) -> Result<Vec<String>, StoreError> {
        Ok(sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT dxcc FROM contacts WHERE dxcc IS NOT NULL AND dxcc != '' ORDER BY dxcc",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    /// Delete every contact, returning how many were removed
    pub async fn clear_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM contacts").execute(&self.pool).await?;
        log::info!("Cleared {} contacts", result.rows_affected());
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_db;
    use chrono::TimeZone;

    async fn store() -> ContactStore {
        ContactStore::new(init_memory_db().await.expect("memory db"))
    }

    fn contact(call: &str, band: &str, mode: &str, hour: u32) -> Contact {
        let rst = if mode == "SSB" { "59" } else { "599" };
        Contact::new(call, band, mode, rst, rst, "IK0XYZ")
            .with_date_time(Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = store().await;
        let mut c = contact("IZ0ABC", "20m", "CW", 10).with_dxcc("Italy").with_locator("JN61");

        let id = store.insert(&mut c).await.unwrap();
        assert_eq!(c.id, Some(id));

        let loaded = store.get(id).await.unwrap().expect("stored");
        assert_eq!(loaded, c);
        assert!(store.get(id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_all_is_newest_first() {
        let store = store().await;
        for (call, hour) in [("W1AW", 8), ("K3AB", 12), ("N2XYZ", 10)] {
            store.insert(&mut contact(call, "20m", "CW", hour)).await.unwrap();
        }
        let calls: Vec<String> = store.all().await.unwrap().into_iter().map(|c| c.callsign).collect();
        assert_eq!(calls, vec!["K3AB", "N2XYZ", "W1AW"]);
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = store().await;
        let mut c = contact("IZ0ABC", "20m", "CW", 10);
        let id = store.insert(&mut c).await.unwrap();

        c.band = "40m".to_string();
        c.locator = "JN62".to_string();
        store.update(&c).await.unwrap();
        let loaded = store.get(id).await.unwrap().unwrap();
        assert_eq!(loaded.band, "40m");
        assert_eq!(loaded.locator, "JN62");

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(matches!(store.update(&c).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_requires_id() {
        let store = store().await;
        let c = contact("IZ0ABC", "20m", "CW", 10);
        assert!(matches!(store.update(&c).await, Err(StoreError::NotPersisted)));
    }

    #[tokio::test]
    async fn test_search() {
        let store = store().await;
        store.insert(&mut contact("IZ0ABC", "20m", "CW", 10).with_dxcc("Italy")).await.unwrap();
        store.insert(&mut contact("W1AW", "40m", "SSB", 11).with_dxcc("United States")).await.unwrap();
        store.insert(&mut contact("IK2XX", "15m", "FT8", 12)).await.unwrap();

        assert_eq!(store.search("IZ0").await.unwrap().len(), 1);
        assert_eq!(store.search("40").await.unwrap()[0].callsign, "W1AW");
        assert_eq!(store.search("ital").await.unwrap().len(), 1);
        assert_eq!(store.search("I").await.unwrap().len(), 3);
        assert!(store.search("zzz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_all_and_stats() {
        let store = store().await;
        let mut batch = vec![
            contact("IZ0ABC", "20m", "CW", 10).with_dxcc("Italy"),
            contact("W1AW", "40m", "SSB", 11),
            contact("K3AB", "20m", "CW", 12).with_dxcc("United States"),
        ];
        assert_eq!(store.insert_all(&mut batch).await.unwrap(), 3);
        assert!(batch.iter().all(|c| c.id.is_some()));

        assert_eq!(store.unique_bands().await.unwrap(), vec!["20m", "40m"]);
        assert_eq!(store.unique_modes().await.unwrap(), vec!["CW", "SSB"]);
        assert_eq!(store.unique_dxcc().await.unwrap(), vec!["Italy", "United States"]);

        let stats = crate::db::get_db_stats(store.pool()).await.unwrap();
        assert_eq!(stats.contact_count, 3);
        assert_eq!(stats.band_count, 2);
        assert_eq!(stats.dxcc_count, 2);

        assert_eq!(store.clear_all().await.unwrap(), 3);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[test]
    fn test_datetime_encoding() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 5).unwrap();
        assert_eq!(encode_datetime(&dt), "2024-01-15T14:30:05Z");
        assert_eq!(decode_datetime("2024-01-15T14:30:05Z").unwrap(), dt);
        assert!(decode_datetime("15/01/2024").is_err());
    }
}
