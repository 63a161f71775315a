use crate::domain::entities::trade_record::TradeRecord;
use std::fmt::Write;

/// Plain-text detail view of one card: emoji header, reason, the fact chips,
/// description, then time and tags at the bottom.
pub fn render_overlay(record: &TradeRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}  [{}]  {}",
        record.emoji, record.emotion, record.visibility, record.id
    );
    if !record.reason.is_empty() {
        let _ = writeln!(out, "\n{}", record.reason);
    }

    let mut chips: Vec<String> = Vec::new();
    for label in [&record.symbol, &record.instrument, &record.session, &record.strategy] {
        if !label.is_empty() {
            chips.push(label.clone());
        }
    }
    chips.push(format!("P&L {:+.2}", record.profit_loss));
    chips.push(format!("entry {}", record.entry_point));
    chips.push(format!("exit {}", record.exit_point));
    chips.push(format!("size {}", record.position_size));
    let _ = writeln!(out, "\n{}", chips.join(" | "));

    if !record.description.is_empty() {
        let _ = writeln!(out, "\n{}", record.description);
    }

    let when = format!("{} {}", record.date, record.time);
    let _ = writeln!(out, "\n{}", when.trim());
    if !record.tags.is_empty() {
        let tags: Vec<String> = record.tags.iter().map(|t| format!("#{t}")).collect();
        let _ = writeln!(out, "{}", tags.join(" "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::trade_record::TradeFields;
    use crate::domain::values::emotion::Emotion;
    use crate::domain::values::record_id::RecordId;
    use crate::domain::values::visibility::Visibility;

    #[test]
    fn test_render_includes_card_facts() {
        let record = TradeRecord::new(
            RecordId::new("r1").unwrap(),
            Emotion::Confident,
            TradeFields {
                symbol: "EURUSD".into(),
                profit_loss: 120.5,
                reason: "Clean retest".into(),
                tags: vec!["breakout".into(), "a+".into()],
                date: "15-06-2023".into(),
                time: "09:30".into(),
                ..Default::default()
            },
            Visibility::Private,
        );
        let text = render_overlay(&record);
        assert!(text.starts_with("😎 confident  [private]  r1"));
        assert!(text.contains("Clean retest"));
        assert!(text.contains("EURUSD | P&L +120.50"));
        assert!(text.contains("15-06-2023 09:30"));
        assert!(text.contains("#breakout #a+"));
    }
}
