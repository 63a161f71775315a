use crate::domain::entities::trade_record::{TradeRecord, TradeUpdate};
use crate::domain::error::DomainError;
use crate::domain::values::record_id::RecordId;
use std::collections::BTreeMap;

/// Remote document store holding each user's private records plus one shared
/// public collection.
///
/// Creating a record is two steps: `reserve_id` hands out a fresh key, then
/// `put` writes the record under it. Callers can reflect the id locally
/// before the write lands.
#[async_trait::async_trait]
pub trait TradeStore: Send + Sync {
    async fn fetch_private(&self, user_id: &str) -> Result<BTreeMap<RecordId, TradeRecord>, DomainError>;
    async fn fetch_public(&self) -> Result<BTreeMap<RecordId, TradeRecord>, DomainError>;
    async fn reserve_id(&self, user_id: &str) -> Result<RecordId, DomainError>;
    async fn put(&self, user_id: &str, record: &TradeRecord) -> Result<(), DomainError>;
    async fn update(&self, user_id: &str, id: &RecordId, update: &TradeUpdate) -> Result<(), DomainError>;
    /// Deleting a missing record is not an error.
    async fn delete(&self, user_id: &str, id: &RecordId) -> Result<(), DomainError>;
    /// Seed the shared collection.
    async fn put_public(&self, record: &TradeRecord) -> Result<(), DomainError>;
}
