//! Bounded, order-preserving, deduplicating record stores.

use std::sync::Arc;

use quill_core::PromptRecord;

use crate::substrate::Substrate;
use crate::StoreResult;

pub const MAX_HISTORY: usize = 50;
pub const HISTORY_KEY: &str = "promptHistory";
pub const FAVORITES_KEY: &str = "promptFavorites";

/// An ordered list of `PromptRecord`s under one substrate key,
/// deduplicated by prompt text and optionally capped.
///
/// Every mutation is read-modify-write: load the full collection, apply the
/// change, write the full collection back.
#[derive(Clone)]
pub struct RecordStore {
    substrate: Arc<dyn Substrate>,
    key: &'static str,
    cap: Option<usize>,
}

impl RecordStore {
    /// The bounded history store (most-recent-first, capped at 50).
    pub fn history(substrate: Arc<dyn Substrate>) -> Self {
        Self::history_with_cap(substrate, MAX_HISTORY)
    }

    /// A history store with a configured cap.
    pub fn history_with_cap(substrate: Arc<dyn Substrate>, cap: usize) -> Self {
        Self {
            substrate,
            key: HISTORY_KEY,
            cap: Some(cap),
        }
    }

    /// The unbounded favorites store, independent of history.
    pub fn favorites(substrate: Arc<dyn Substrate>) -> Self {
        Self {
            substrate,
            key: FAVORITES_KEY,
            cap: None,
        }
    }

    /// Load the collection, treating missing or corrupted data as empty.
    async fn load(&self) -> Vec<PromptRecord> {
        let raw = match self.substrate.read(self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("[STORE] read of {} failed, treating as empty: {}", self.key, err);
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                log::warn!(
                    "[STORE] corrupted data under {}, treating as empty: {}",
                    self.key,
                    err
                );
                Vec::new()
            }
        }
    }

    async fn persist(&self, records: &[PromptRecord]) -> StoreResult<()> {
        let raw = serde_json::to_string(records)?;
        self.substrate.write(self.key, &raw).await
    }

    /// Insert or merge a record, keyed by prompt text.
    ///
    /// A new distinct prompt goes to the front; an existing prompt is
    /// updated in place, keeping its id, creation time, and position. A
    /// previously set enhancement survives an update that omits one, and an
    /// empty incoming title keeps the existing one. After a fresh insertion
    /// the collection is truncated from the tail down to the cap.
    pub async fn upsert(&self, record: PromptRecord) -> StoreResult<()> {
        let mut records = self.load().await;
        if let Some(existing) = records.iter_mut().find(|r| r.prompt == record.prompt) {
            existing.structured_output = record.structured_output;
            if !record.title.is_empty() {
                existing.title = record.title;
            }
            if record.enhancement.is_some() {
                existing.enhancement = record.enhancement;
            }
        } else {
            records.insert(0, record);
            if let Some(cap) = self.cap {
                records.truncate(cap);
            }
        }
        self.persist(&records).await
    }

    /// Records in store order, most-recent-first for new insertions.
    pub async fn list(&self) -> Vec<PromptRecord> {
        self.load().await
    }

    /// Find a record by its prompt text.
    pub async fn find_by_prompt(&self, prompt: &str) -> Option<PromptRecord> {
        self.load().await.into_iter().find(|r| r.prompt == prompt)
    }

    /// Delete one record by id; a missing id is a no-op.
    pub async fn remove(&self, id: &str) -> StoreResult<()> {
        let mut records = self.load().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Ok(());
        }
        self.persist(&records).await
    }

    /// Empty the collection.
    pub async fn clear(&self) -> StoreResult<()> {
        self.substrate.delete(self.key).await
    }
}
