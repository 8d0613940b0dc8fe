//! The key-value persistence boundary.
//!
//! The stores above this layer treat the substrate as non-transactional:
//! every mutation is a full read-modify-write of one key, last writer wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use crate::StoreResult;

#[async_trait]
pub trait Substrate: Send + Sync {
    async fn read(&self, key: &str) -> StoreResult<Option<String>>;
    async fn write(&self, key: &str, value: &str) -> StoreResult<()>;
    async fn delete(&self, key: &str) -> StoreResult<()>;
}

/// File-backed substrate: one JSON file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileSubstrate {
    root: PathBuf,
}

impl FileSubstrate {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for_key(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    async fn init(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.root).await?;
        Ok(())
    }
}

#[async_trait]
impl Substrate for FileSubstrate {
    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for_key(key)).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.init().await?;
        fs::write(self.path_for_key(key), value).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path_for_key(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory substrate for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySubstrate {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySubstrate {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Substrate for MemorySubstrate {
    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
