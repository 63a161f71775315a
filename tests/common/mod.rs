//! Shared test helpers.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tradejournal::domain::entities::trade_record::{TradeFields, TradeRecord, TradeUpdate};
use tradejournal::domain::error::DomainError;
use tradejournal::domain::ports::trade_store::TradeStore;
use tradejournal::domain::values::emotion::Emotion;
use tradejournal::domain::values::record_id::RecordId;
use tradejournal::domain::values::visibility::Visibility;
use tradejournal::infrastructure::sqlite::migrations::run_migrations;
use tradejournal::infrastructure::sqlite::trade_store::SqliteTradeStore;
use tradejournal::TradeJournal;

pub const USER: &str = "alice";

pub fn setup() -> TradeJournal {
    TradeJournal::open(":memory:", USER).unwrap()
}

pub fn fields(symbol: &str, session: &str, strategy: &str, date: &str, pnl: f64) -> TradeFields {
    TradeFields {
        symbol: symbol.to_string(),
        instrument: "forex".to_string(),
        session: session.to_string(),
        strategy: strategy.to_string(),
        entry_point: 1.085,
        exit_point: 1.09,
        position_size: 1.0,
        profit_loss: pnl,
        reason: format!("{symbol} setup"),
        description: String::new(),
        tags: vec!["journal".to_string()],
        date: date.to_string(),
        time: "09:30".to_string(),
    }
}

pub fn record(id: &str, emotion: Emotion, f: TradeFields, visibility: Visibility) -> TradeRecord {
    TradeRecord::new(RecordId::new(id).unwrap(), emotion, f, visibility)
}

pub fn ids(records: &[&TradeRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.to_string()).collect()
}

/// Store whose reads or writes can be made to fail.
pub struct FlakyStore {
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub private: BTreeMap<RecordId, TradeRecord>,
    pub public: BTreeMap<RecordId, TradeRecord>,
}

impl FlakyStore {
    pub fn failing_reads() -> Arc<Self> {
        Arc::new(Self {
            fail_reads: true,
            fail_writes: false,
            private: BTreeMap::new(),
            public: BTreeMap::new(),
        })
    }

    pub fn failing_writes(private: Vec<TradeRecord>) -> Arc<Self> {
        Arc::new(Self {
            fail_reads: false,
            fail_writes: true,
            private: private.into_iter().map(|r| (r.id.clone(), r)).collect(),
            public: BTreeMap::new(),
        })
    }

    fn write(&self) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::Store("connection reset".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TradeStore for FlakyStore {
    async fn fetch_private(&self, _user_id: &str) -> Result<BTreeMap<RecordId, TradeRecord>, DomainError> {
        if self.fail_reads {
            return Err(DomainError::Store("offline".into()));
        }
        Ok(self.private.clone())
    }

    async fn fetch_public(&self) -> Result<BTreeMap<RecordId, TradeRecord>, DomainError> {
        if self.fail_reads {
            return Err(DomainError::Store("offline".into()));
        }
        Ok(self.public.clone())
    }

    async fn reserve_id(&self, _user_id: &str) -> Result<RecordId, DomainError> {
        Ok(RecordId::generate())
    }

    async fn put(&self, _user_id: &str, _record: &TradeRecord) -> Result<(), DomainError> {
        self.write()
    }

    async fn update(&self, _user_id: &str, _id: &RecordId, _update: &TradeUpdate) -> Result<(), DomainError> {
        self.write()
    }

    async fn delete(&self, _user_id: &str, _id: &RecordId) -> Result<(), DomainError> {
        self.write()
    }

    async fn put_public(&self, _record: &TradeRecord) -> Result<(), DomainError> {
        self.write()
    }
}

/// SQLite store whose `put` takes a while, so later writes are queued behind it.
pub struct SlowPutStore {
    inner: SqliteTradeStore,
    delay: Duration,
}

impl SlowPutStore {
    pub fn in_memory() -> Arc<Self> {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        Arc::new(Self {
            inner: SqliteTradeStore::new(conn),
            delay: Duration::from_millis(50),
        })
    }
}

#[async_trait::async_trait]
impl TradeStore for SlowPutStore {
    async fn fetch_private(&self, user_id: &str) -> Result<BTreeMap<RecordId, TradeRecord>, DomainError> {
        self.inner.fetch_private(user_id).await
    }

    async fn fetch_public(&self) -> Result<BTreeMap<RecordId, TradeRecord>, DomainError> {
        self.inner.fetch_public().await
    }

    async fn reserve_id(&self, user_id: &str) -> Result<RecordId, DomainError> {
        self.inner.reserve_id(user_id).await
    }

    async fn put(&self, user_id: &str, record: &TradeRecord) -> Result<(), DomainError> {
        tokio::time::sleep(self.delay).await;
        self.inner.put(user_id, record).await
    }

    async fn update(&self, user_id: &str, id: &RecordId, update: &TradeUpdate) -> Result<(), DomainError> {
        self.inner.update(user_id, id, update).await
    }

    async fn delete(&self, user_id: &str, id: &RecordId) -> Result<(), DomainError> {
        self.inner.delete(user_id, id).await
    }

    async fn put_public(&self, record: &TradeRecord) -> Result<(), DomainError> {
        self.inner.put_public(record).await
    }
}
