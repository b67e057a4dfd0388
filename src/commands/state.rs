//! Application State
//!
//! Everything a front-end command needs: the contact store, the codec tables
//! and the duplicate policy. Built once at startup and passed by reference.

use sqlx::{Pool, Sqlite};

use crate::adif::AdifCodec;
use crate::config::LogbookConfig;
use crate::db::{self, ContactStore};
use crate::dupes::DuplicateDetector;
use crate::error::StoreError;

pub struct AppState {
    pub store: ContactStore,
    pub codec: AdifCodec,
    pub detector: DuplicateDetector,
}

impl AppState {
    /// Open the database named in `config`, running migrations
    pub async fn open(config: &LogbookConfig) -> Result<Self, StoreError> {
        let pool = db::init_db(&config.db_path).await?;
        Ok(Self::with_pool(pool, config))
    }

    pub fn with_pool(pool: Pool<Sqlite>, config: &LogbookConfig) -> Self {
        Self {
            store: ContactStore::new(pool),
            codec: AdifCodec::new(),
            detector: config.duplicate_detector(),
        }
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        self.store.pool()
    }
}
