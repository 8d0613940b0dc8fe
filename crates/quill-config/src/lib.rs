pub mod config;

pub use config::{Config, ConfigError, ConfigResult, HistorySettings, LlmSettings, StorageSettings};

use std::path::PathBuf;

/// The Quill configuration directory (~/.quill).
pub fn quill_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".quill"))
}

/// Default configuration file path.
pub fn default_config_path() -> Option<PathBuf> {
    quill_dir().map(|dir| dir.join("config.json"))
}

/// Default root for the persistence substrate.
pub fn default_store_dir() -> Option<PathBuf> {
    quill_dir().map(|dir| dir.join("store"))
}
