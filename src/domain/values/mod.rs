pub mod emotion;
pub mod record_id;
pub mod trade_date;
pub mod visibility;
