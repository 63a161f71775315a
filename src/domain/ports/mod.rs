pub mod trade_store;
