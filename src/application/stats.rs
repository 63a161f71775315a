use crate::domain::entities::trade_record::TradeRecord;
use crate::domain::values::emotion::Emotion;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JournalStats {
    pub total: usize,
    pub private_count: usize,
    pub public_count: usize,
    pub total_pnl: f64,
    pub winners: usize,
    pub losers: usize,
    pub by_emotion: Vec<EmotionCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionCount {
    pub emotion: Emotion,
    pub emoji: &'static str,
    pub count: usize,
    pub pnl: f64,
}

impl JournalStats {
    pub fn compute<'a>(records: impl IntoIterator<Item = &'a TradeRecord>) -> Self {
        let mut stats = JournalStats::default();
        let mut by_emotion: BTreeMap<Emotion, (usize, f64)> = BTreeMap::new();

        for r in records {
            stats.total += 1;
            if r.is_public() {
                stats.public_count += 1;
            } else {
                stats.private_count += 1;
            }
            stats.total_pnl += r.profit_loss;
            if r.profit_loss > 0.0 {
                stats.winners += 1;
            } else if r.profit_loss < 0.0 {
                stats.losers += 1;
            }
            let slot = by_emotion.entry(r.emotion).or_insert((0, 0.0));
            slot.0 += 1;
            slot.1 += r.profit_loss;
        }

        stats.by_emotion = by_emotion
            .into_iter()
            .map(|(emotion, (count, pnl))| EmotionCount {
                emotion,
                emoji: emotion.emoji(),
                count,
                pnl,
            })
            .collect();
        stats.by_emotion.sort_by(|a, b| b.count.cmp(&a.count));
        stats
    }

    /// Share of decided trades (non-zero P&L) that were winners.
    pub fn win_rate(&self) -> Option<f64> {
        let decided = self.winners + self.losers;
        (decided > 0).then(|| self.winners as f64 / decided as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::trade_record::TradeFields;
    use crate::domain::values::record_id::RecordId;
    use crate::domain::values::visibility::Visibility;

    fn rec(id: &str, emotion: Emotion, pnl: f64, visibility: Visibility) -> TradeRecord {
        TradeRecord::new(
            RecordId::new(id).unwrap(),
            emotion,
            TradeFields {
                profit_loss: pnl,
                ..Default::default()
            },
            visibility,
        )
    }

    #[test]
    fn test_empty() {
        let stats = JournalStats::compute(&Vec::<TradeRecord>::new());
        assert_eq!(stats.total, 0);
        assert!(stats.win_rate().is_none());
    }

    #[test]
    fn test_counts_and_pnl() {
        let records = vec![
            rec("a", Emotion::Greedy, -50.0, Visibility::Private),
            rec("b", Emotion::Confident, 120.0, Visibility::Private),
            rec("c", Emotion::Greedy, -25.0, Visibility::Public),
            rec("d", Emotion::Neutral, 0.0, Visibility::Private),
        ];
        let stats = JournalStats::compute(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.public_count, 1);
        assert_eq!(stats.total_pnl, 45.0);
        assert_eq!(stats.winners, 1);
        assert_eq!(stats.losers, 2);
        assert_eq!(stats.by_emotion[0].emotion, Emotion::Greedy);
        assert_eq!(stats.by_emotion[0].pnl, -75.0);
        assert!((stats.win_rate().unwrap() - 1.0 / 3.0).abs() < 1e-9);
    }
}
