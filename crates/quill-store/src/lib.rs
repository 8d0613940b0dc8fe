mod handoff;
mod records;
mod substrate;

pub use handoff::{HandoffSlot, HANDOFF_KEY};
pub use records::{RecordStore, FAVORITES_KEY, HISTORY_KEY, MAX_HISTORY};
pub use substrate::{FileSubstrate, MemorySubstrate, Substrate};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
