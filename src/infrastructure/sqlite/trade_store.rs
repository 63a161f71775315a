use crate::domain::entities::trade_record::{TradeRecord, TradeUpdate};
use crate::domain::error::DomainError;
use crate::domain::ports::trade_store::TradeStore;
use crate::domain::values::emotion::Emotion;
use crate::domain::values::record_id::RecordId;
use crate::domain::values::visibility::Visibility;
use rusqlite::types::{ToSql, Type};
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::sync::Mutex;

const SELECT_COLS: &str = "id, visibility, emotion, color, emoji, symbol, instrument, session, strategy, entry_point, exit_point, position_size, profit_loss, reason, description, tags, date, time";

/// Owner column value for the shared collection.
const PUBLIC_OWNER: &str = "";

/// Local SQLite stand-in for the remote document tree: one row per record,
/// keyed by (visibility, owner, id).
pub struct SqliteTradeStore {
    conn: Mutex<Connection>,
}

impl SqliteTradeStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_record(row: &rusqlite::Row) -> Result<TradeRecord, rusqlite::Error> {
        let id_str: String = row.get(0)?;
        let vis_str: String = row.get(1)?;
        let emotion_str: String = row.get(2)?;
        let tags_str: String = row.get(15)?;

        Ok(TradeRecord {
            id: RecordId::new(id_str)
                .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, e.into()))?,
            visibility: vis_str.parse().unwrap_or_else(|_| {
                tracing::warn!(visibility = %vis_str, "Invalid visibility in record, defaulting to private");
                Visibility::Private
            }),
            emotion: emotion_str.parse().unwrap_or_else(|_| {
                tracing::warn!(emotion = %emotion_str, "Invalid emotion in record, defaulting to neutral");
                Emotion::Neutral
            }),
            color: row.get(3)?,
            emoji: row.get(4)?,
            symbol: row.get(5)?,
            instrument: row.get(6)?,
            session: row.get(7)?,
            strategy: row.get(8)?,
            entry_point: row.get(9)?,
            exit_point: row.get(10)?,
            position_size: row.get(11)?,
            profit_loss: row.get(12)?,
            reason: row.get(13)?,
            description: row.get(14)?,
            tags: serde_json::from_str(&tags_str).unwrap_or_else(|e| {
                tracing::warn!(tags = %tags_str, error = %e, "Malformed tags in record, defaulting to none");
                Vec::new()
            }),
            date: row.get(16)?,
            time: row.get(17)?,
        })
    }

    fn insert(&self, owner: &str, visibility: Visibility, record: &TradeRecord) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let tags = serde_json::to_string(&record.tags)?;
        conn.execute(
            &format!(
                "INSERT OR REPLACE INTO trade_records (owner, {SELECT_COLS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)"
            ),
            params![
                owner,
                record.id.as_str(),
                visibility.to_string(),
                record.emotion.to_string(),
                record.color,
                record.emoji,
                record.symbol,
                record.instrument,
                record.session,
                record.strategy,
                record.entry_point,
                record.exit_point,
                record.position_size,
                record.profit_loss,
                record.reason,
                record.description,
                tags,
                record.date,
                record.time,
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to write trade: {e}")))?;
        Ok(())
    }

    fn select(&self, owner: &str, visibility: Visibility) -> Result<BTreeMap<RecordId, TradeRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLS} FROM trade_records WHERE owner = ?1 AND visibility = ?2 ORDER BY id"
        ))?;
        let records = stmt
            .query_map(params![owner, visibility.to_string()], Self::row_to_record)?
            .filter_map(|r| match r {
                Ok(record) => Some((record.id.clone(), record)),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable trade row");
                    None
                }
            })
            .collect();
        Ok(records)
    }
}

fn require_user(user_id: &str) -> Result<(), DomainError> {
    if user_id.trim().is_empty() {
        return Err(DomainError::InvalidInput("user id must not be empty".into()));
    }
    Ok(())
}

#[async_trait::async_trait]
impl TradeStore for SqliteTradeStore {
    async fn fetch_private(&self, user_id: &str) -> Result<BTreeMap<RecordId, TradeRecord>, DomainError> {
        require_user(user_id)?;
        self.select(user_id, Visibility::Private)
    }

    async fn fetch_public(&self) -> Result<BTreeMap<RecordId, TradeRecord>, DomainError> {
        self.select(PUBLIC_OWNER, Visibility::Public)
    }

    async fn reserve_id(&self, user_id: &str) -> Result<RecordId, DomainError> {
        require_user(user_id)?;
        let id = RecordId::generate();
        tracing::debug!(user = user_id, id = %id, "Reserved trade id");
        Ok(id)
    }

    async fn put(&self, user_id: &str, record: &TradeRecord) -> Result<(), DomainError> {
        require_user(user_id)?;
        self.insert(user_id, Visibility::Private, record)
    }

    async fn update(&self, user_id: &str, id: &RecordId, update: &TradeUpdate) -> Result<(), DomainError> {
        require_user(user_id)?;
        let mut sets: Vec<String> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        let mut push = |col: &str, value: Box<dyn ToSql>| {
            values.push(value);
            sets.push(format!("{col} = ?{}", values.len()));
        };
        if let Some(e) = update.emotion {
            push("emotion", Box::new(e.to_string()));
            push("color", Box::new(e.color().to_string()));
            push("emoji", Box::new(e.emoji().to_string()));
        }
        if let Some(v) = &update.symbol {
            push("symbol", Box::new(v.clone()));
        }
        if let Some(v) = &update.instrument {
            push("instrument", Box::new(v.clone()));
        }
        if let Some(v) = &update.session {
            push("session", Box::new(v.clone()));
        }
        if let Some(v) = &update.strategy {
            push("strategy", Box::new(v.clone()));
        }
        if let Some(v) = update.entry_point {
            push("entry_point", Box::new(v));
        }
        if let Some(v) = update.exit_point {
            push("exit_point", Box::new(v));
        }
        if let Some(v) = update.position_size {
            push("position_size", Box::new(v));
        }
        if let Some(v) = update.profit_loss {
            push("profit_loss", Box::new(v));
        }
        if let Some(v) = &update.reason {
            push("reason", Box::new(v.clone()));
        }
        if let Some(v) = &update.description {
            push("description", Box::new(v.clone()));
        }
        if let Some(v) = &update.tags {
            push("tags", Box::new(serde_json::to_string(v)?));
        }
        if let Some(v) = &update.date {
            push("date", Box::new(v.clone()));
        }
        if let Some(v) = &update.time {
            push("time", Box::new(v.clone()));
        }

        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let n = values.len();
        let sql = if sets.is_empty() {
            // Nothing to change; still report a missing record.
            "UPDATE trade_records SET id = id WHERE owner = ?1 AND visibility = ?2 AND id = ?3".to_string()
        } else {
            format!(
                "UPDATE trade_records SET {} WHERE owner = ?{} AND visibility = ?{} AND id = ?{}",
                sets.join(", "),
                n + 1,
                n + 2,
                n + 3
            )
        };
        values.push(Box::new(user_id.to_string()));
        values.push(Box::new(Visibility::Private.to_string()));
        values.push(Box::new(id.as_str().to_string()));

        let params_refs: Vec<&dyn ToSql> = values.iter().map(|p| p.as_ref()).collect();
        let rows = conn
            .execute(&sql, params_refs.as_slice())
            .map_err(|e| DomainError::Database(format!("Failed to update trade: {e}")))?;
        if rows == 0 {
            return Err(DomainError::NotFound(format!("Trade not found: {id}")));
        }
        Ok(())
    }

    async fn delete(&self, user_id: &str, id: &RecordId) -> Result<(), DomainError> {
        require_user(user_id)?;
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "DELETE FROM trade_records WHERE owner = ?1 AND visibility = ?2 AND id = ?3",
            params![user_id, Visibility::Private.to_string(), id.as_str()],
        )
        .map_err(|e| DomainError::Database(format!("Failed to delete trade: {e}")))?;
        Ok(())
    }

    async fn put_public(&self, record: &TradeRecord) -> Result<(), DomainError> {
        self.insert(PUBLIC_OWNER, Visibility::Public, record)
    }
}
