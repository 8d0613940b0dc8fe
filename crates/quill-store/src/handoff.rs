//! Single-slot handoff of a selected record between views.
//!
//! A list view writes one record into the slot; the workspace view takes it
//! exactly once (read and delete). The slot is session-scoped state, not
//! part of history or favorites.

use std::sync::Arc;

use quill_core::PromptRecord;

use crate::substrate::Substrate;
use crate::StoreResult;

pub const HANDOFF_KEY: &str = "loadFromHistory";

#[derive(Clone)]
pub struct HandoffSlot {
    substrate: Arc<dyn Substrate>,
}

impl HandoffSlot {
    pub fn new(substrate: Arc<dyn Substrate>) -> Self {
        Self { substrate }
    }

    /// Stage a record for the workspace view.
    pub async fn put(&self, record: &PromptRecord) -> StoreResult<()> {
        let raw = serde_json::to_string(record)?;
        self.substrate.write(HANDOFF_KEY, &raw).await
    }

    /// Take the staged record, emptying the slot whether or not the stored
    /// payload was readable.
    pub async fn take(&self) -> Option<PromptRecord> {
        let raw = match self.substrate.read(HANDOFF_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                log::warn!("[STORE] handoff read failed: {}", err);
                return None;
            }
        };
        if let Err(err) = self.substrate.delete(HANDOFF_KEY).await {
            log::warn!("[STORE] handoff cleanup failed: {}", err);
        }
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(err) => {
                log::warn!("[STORE] discarding unreadable handoff payload: {}", err);
                None
            }
        }
    }
}
