pub mod commands;
pub mod overlay;
