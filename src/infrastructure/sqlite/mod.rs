pub mod migrations;
pub mod trade_store;
