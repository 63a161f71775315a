pub mod dashboard;
pub mod filter;
pub mod stats;
pub mod view_state;
