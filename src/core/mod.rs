//! Tuning and shared constants.

pub mod config;
pub mod constants;

pub use config::{load_config, GameConfig, Size, Variant};
