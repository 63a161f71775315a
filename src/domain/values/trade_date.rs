use chrono::NaiveDate;

/// Persisted date format for journal entries (`dd-MM-yyyy`).
pub const TRADE_DATE_FORMAT: &str = "%d-%m-%Y";

pub fn parse_trade_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), TRADE_DATE_FORMAT)
        .map_err(|e| format!("Invalid trade date '{s}' (expected dd-MM-yyyy): {e}"))
}

pub fn format_trade_date(date: NaiveDate) -> String {
    date.format(TRADE_DATE_FORMAT).to_string()
}
