//! JSON persistence helpers for ~/.cutejump/ files.

use crate::core::constants::SAVE_DIR_NAME;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.cutejump/ directory path, creating it if needed.
pub fn save_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(SAVE_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.cutejump/.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(save_dir()?.join(filename))
}

/// Load a JSON file, surfacing parse failures as `InvalidData`.
/// A missing file yields `Ok(None)`.
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<Option<T>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Save a value as pretty-printed JSON, creating parent directories.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}
