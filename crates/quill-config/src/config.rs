use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub version: String,
    pub llm: LlmSettings,
    pub storage: StorageSettings,
    pub history: HistorySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmSettings {
    pub model: String,
    pub base_url: String,
    /// Explicit key; when absent, the environment is consulted at use time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageSettings {
    /// Root directory for the persistence substrate; None means the
    /// default location under ~/.quill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistorySettings {
    pub max_entries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            llm: LlmSettings::default(),
            storage: StorageSettings::default(),
            history: HistorySettings::default(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            api_key: None,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self { root: None }
    }
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_entries: 50 }
    }
}

impl LlmSettings {
    /// Resolve a usable API key: the configured value wins, then the
    /// supported environment variables in precedence order.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Some(key.clone());
        }
        ["GOOGLE_GENAI_API_KEY", "GEMINI_API_KEY", "GOOGLE_API_KEY"]
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|key| !key.is_empty()))
    }
}

impl Config {
    /// Load a config file, creating it with defaults when missing.
    pub async fn load(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            log::info!("[CONFIG] loading {:?}", path);
            let content = tokio::fs::read_to_string(path).await?;
            Ok(serde_json::from_str(&content)?)
        } else {
            log::info!("[CONFIG] not found, writing defaults to {:?}", path);
            let config = Config::default();
            config.save(path).await?;
            Ok(config)
        }
    }

    /// Load from the default location (~/.quill/config.json).
    pub async fn load_default() -> ConfigResult<Self> {
        let path = crate::default_config_path()
            .ok_or_else(|| ConfigError::InvalidPath("could not find home directory".to_string()))?;
        Self::load(&path).await
    }

    pub async fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// The substrate root: configured value or the default location.
    pub fn store_root(&self) -> ConfigResult<PathBuf> {
        match &self.storage.root {
            Some(root) => Ok(PathBuf::from(root)),
            None => crate::default_store_dir()
                .ok_or_else(|| ConfigError::InvalidPath("could not find home directory".to_string())),
        }
    }
}
