//! Utility modules: build info and JSON persistence.

pub mod build_info;
pub mod persistence;

pub use persistence::{load_json, save_json, save_path};
