pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

use crate::application::dashboard::Dashboard;
use crate::config::Config;
use crate::domain::entities::trade_record::{TradeFields, TradeRecord};
use crate::domain::error::DomainError;
use crate::domain::ports::trade_store::TradeStore;
use crate::domain::values::emotion::Emotion;
use crate::domain::values::visibility::Visibility;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::trade_store::SqliteTradeStore;
use rusqlite::Connection;
use std::sync::Arc;

/// A user's journal: the store plus the dashboard built over it.
pub struct TradeJournal {
    store: Arc<dyn TradeStore>,
    dashboard: Dashboard,
}

impl TradeJournal {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        Self::open(&config.db_path, &config.user_id)
    }

    /// Open (and migrate) a SQLite-backed journal. `:memory:` works for tests.
    pub fn open(db_path: &str, user_id: &str) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
        run_migrations(&conn).map_err(DomainError::Database)?;

        tracing::debug!(db = db_path, user = user_id, "Opened trade store");
        Self::with_store(Arc::new(SqliteTradeStore::new(conn)), user_id)
    }

    pub fn with_store(store: Arc<dyn TradeStore>, user_id: &str) -> Result<Self, DomainError> {
        let dashboard = Dashboard::new(store.clone(), user_id)?;
        Ok(Self { store, dashboard })
    }

    pub async fn load(&mut self) {
        self.dashboard.load().await
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub fn store(&self) -> Arc<dyn TradeStore> {
        self.store.clone()
    }

    /// Write a record straight into the shared public collection. The
    /// dashboard picks it up on the next `load`.
    pub async fn publish(&self, fields: TradeFields, emotion: Emotion) -> Result<TradeRecord, DomainError> {
        let id = self.store.reserve_id(self.dashboard.user_id()).await?;
        let record = TradeRecord::new(id, emotion, fields, Visibility::Public);
        self.store.put_public(&record).await?;
        tracing::info!(id = %record.id, "Published trade");
        Ok(record)
    }
}
