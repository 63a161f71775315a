use crate::domain::entities::trade_record::TradeRecord;
use crate::domain::values::emotion::Emotion;
use crate::domain::values::trade_date::parse_trade_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Closed date interval, both bounds in `dd-MM-yyyy`. A range with a blank
/// bound is treated as no range at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.start.trim().is_empty() || self.end.trim().is_empty()
    }

    fn bounds(&self) -> Result<(NaiveDate, NaiveDate), String> {
        Ok((parse_trade_date(&self.start)?, parse_trade_date(&self.end)?))
    }
}

/// Conjunctive filter. An empty set or a missing range imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    pub emotions: BTreeSet<Emotion>,
    pub symbols: BTreeSet<String>,
    pub sessions: BTreeSet<String>,
    pub strategies: BTreeSet<String>,
    pub date_range: Option<DateRange>,
}

impl FilterSpec {
    pub fn is_empty(&self) -> bool {
        self.emotions.is_empty()
            && self.symbols.is_empty()
            && self.sessions.is_empty()
            && self.strategies.is_empty()
            && self.date_range.as_ref().map_or(true, DateRange::is_blank)
    }
}

/// Parsed form of a spec, built once per filter pass.
struct Matcher<'s> {
    spec: &'s FilterSpec,
    emojis: BTreeSet<&'static str>,
    // None: no date constraint. Some(None): bounds unparseable, nothing matches.
    range: Option<Option<(NaiveDate, NaiveDate)>>,
}

impl<'s> Matcher<'s> {
    fn new(spec: &'s FilterSpec) -> Self {
        let range = spec
            .date_range
            .as_ref()
            .filter(|r| !r.is_blank())
            .map(|r| match r.bounds() {
                Ok(bounds) => Some(bounds),
                Err(e) => {
                    tracing::warn!(error = %e, "Unparseable date range, no record can match");
                    None
                }
            });
        Self {
            spec,
            emojis: spec.emotions.iter().map(|e| e.emoji()).collect(),
            range,
        }
    }

    fn matches(&self, record: &TradeRecord) -> bool {
        let spec = self.spec;
        if !spec.emotions.is_empty()
            && !spec.emotions.contains(&record.emotion)
            && !self.emojis.contains(record.emoji.as_str())
        {
            return false;
        }
        if !spec.symbols.is_empty() && !spec.symbols.contains(&record.symbol) {
            return false;
        }
        if !spec.sessions.is_empty() && !spec.sessions.contains(&record.session) {
            return false;
        }
        if !spec.strategies.is_empty() && !spec.strategies.contains(&record.strategy) {
            return false;
        }
        match &self.range {
            None => true,
            Some(None) => false,
            Some(Some((start, end))) => match parse_trade_date(&record.date) {
                Ok(date) => *start <= date && date <= *end,
                Err(e) => {
                    tracing::debug!(id = %record.id, error = %e, "Dropping record with bad date");
                    false
                }
            },
        }
    }
}

/// Subset of `records` satisfying every non-empty field of `spec`, in input order.
pub fn apply_filters<'a>(records: &'a [TradeRecord], spec: &FilterSpec) -> Vec<&'a TradeRecord> {
    if spec.is_empty() {
        return records.iter().collect();
    }
    let matcher = Matcher::new(spec);
    records.iter().filter(|r| matcher.matches(r)).collect()
}

/// Distinct values present in a record list, for populating filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub emotions: BTreeSet<Emotion>,
    pub symbols: BTreeSet<String>,
    pub sessions: BTreeSet<String>,
    pub strategies: BTreeSet<String>,
}

impl FilterOptions {
    pub fn collect<'a>(records: impl IntoIterator<Item = &'a TradeRecord>) -> Self {
        let mut opts = FilterOptions::default();
        for r in records {
            opts.emotions.insert(r.emotion);
            insert_non_blank(&mut opts.symbols, &r.symbol);
            insert_non_blank(&mut opts.sessions, &r.session);
            insert_non_blank(&mut opts.strategies, &r.strategy);
        }
        opts
    }
}

fn insert_non_blank(set: &mut BTreeSet<String>, value: &str) {
    if !value.trim().is_empty() {
        set.insert(value.to_string());
    }
}
