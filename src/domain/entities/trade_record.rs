use crate::domain::values::emotion::Emotion;
use crate::domain::values::record_id::RecordId;
use crate::domain::values::visibility::Visibility;
use serde::{Deserialize, Serialize};

/// One journal card. `color` and `emoji` are persisted alongside `emotion`
/// but are always derived from it when written by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub id: RecordId,
    pub emotion: Emotion,
    pub color: String,
    pub emoji: String,
    pub symbol: String,
    pub instrument: String,
    pub session: String,
    pub strategy: String,
    pub entry_point: f64,
    pub exit_point: f64,
    pub position_size: f64,
    pub profit_loss: f64,
    pub reason: String,
    pub description: String,
    pub tags: Vec<String>,
    /// `dd-MM-yyyy`; kept as text so malformed stored dates survive a load.
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub visibility: Visibility,
}

/// Everything the entry form collects. Emotion is chosen separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeFields {
    pub symbol: String,
    pub instrument: String,
    pub session: String,
    pub strategy: String,
    pub entry_point: f64,
    pub exit_point: f64,
    pub position_size: f64,
    pub profit_loss: f64,
    pub reason: String,
    pub description: String,
    pub tags: Vec<String>,
    pub date: String,
    pub time: String,
}

/// Partial edit payload. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_point: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl TradeRecord {
    pub fn new(id: RecordId, emotion: Emotion, fields: TradeFields, visibility: Visibility) -> Self {
        Self {
            id,
            emotion,
            color: emotion.color().to_string(),
            emoji: emotion.emoji().to_string(),
            symbol: fields.symbol,
            instrument: fields.instrument,
            session: fields.session,
            strategy: fields.strategy,
            entry_point: fields.entry_point,
            exit_point: fields.exit_point,
            position_size: fields.position_size,
            profit_loss: fields.profit_loss,
            reason: fields.reason,
            description: fields.description,
            tags: fields.tags,
            date: fields.date,
            time: fields.time,
            visibility,
        }
    }

    /// Merge a partial update in place. The id and visibility never change.
    pub fn apply(&mut self, update: &TradeUpdate) {
        if let Some(emotion) = update.emotion {
            self.emotion = emotion;
            self.color = emotion.color().to_string();
            self.emoji = emotion.emoji().to_string();
        }
        if let Some(v) = &update.symbol {
            self.symbol = v.clone();
        }
        if let Some(v) = &update.instrument {
            self.instrument = v.clone();
        }
        if let Some(v) = &update.session {
            self.session = v.clone();
        }
        if let Some(v) = &update.strategy {
            self.strategy = v.clone();
        }
        if let Some(v) = update.entry_point {
            self.entry_point = v;
        }
        if let Some(v) = update.exit_point {
            self.exit_point = v;
        }
        if let Some(v) = update.position_size {
            self.position_size = v;
        }
        if let Some(v) = update.profit_loss {
            self.profit_loss = v;
        }
        if let Some(v) = &update.reason {
            self.reason = v.clone();
        }
        if let Some(v) = &update.description {
            self.description = v.clone();
        }
        if let Some(v) = &update.tags {
            self.tags = v.clone();
        }
        if let Some(v) = &update.date {
            self.date = v.clone();
        }
        if let Some(v) = &update.time {
            self.time = v.clone();
        }
    }

    pub fn fields(&self) -> TradeFields {
        TradeFields {
            symbol: self.symbol.clone(),
            instrument: self.instrument.clone(),
            session: self.session.clone(),
            strategy: self.strategy.clone(),
            entry_point: self.entry_point,
            exit_point: self.exit_point,
            position_size: self.position_size,
            profit_loss: self.profit_loss,
            reason: self.reason.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
        }
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

impl From<TradeFields> for TradeUpdate {
    /// A full form submission, as sent when saving an edit.
    fn from(f: TradeFields) -> Self {
        Self {
            emotion: None,
            symbol: Some(f.symbol),
            instrument: Some(f.instrument),
            session: Some(f.session),
            strategy: Some(f.strategy),
            entry_point: Some(f.entry_point),
            exit_point: Some(f.exit_point),
            position_size: Some(f.position_size),
            profit_loss: Some(f.profit_loss),
            reason: Some(f.reason),
            description: Some(f.description),
            tags: Some(f.tags),
            date: Some(f.date),
            time: Some(f.time),
        }
    }
}
