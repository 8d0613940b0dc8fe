//! The workspace orchestration the UI collaborator drives.
//!
//! One generate/enhance cycle at a time is meaningful per surface; a new
//! generate call supersedes whatever was in flight. Supersession is tracked
//! with a generation counter: every operation captures the counter at start
//! and discards its result if the counter moved before it finished. The
//! final counter check and the writes it guards run under the session-state
//! lock, so a stale response can never overwrite newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use quill_config::Config;
use quill_core::{normalize, Enhancement, PromptRecord};
use quill_llm::{classify, GeminiProvider, LlmError, PromptOps, ProviderConfig, ServiceFailure};
use quill_store::{FileSubstrate, HandoffSlot, RecordStore, StoreResult, Substrate, MAX_HISTORY};

/// Failure to assemble a workspace from configuration.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("config error: {0}")]
    Config(#[from] quill_config::ConfigError),
    #[error("provider error: {0}")]
    Provider(#[from] LlmError),
}

/// What the UI renders for the active cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionView {
    pub prompt: String,
    pub structured_output: String,
    pub enhancement: Option<Enhancement>,
}

/// Non-fatal information surfaced alongside a successful generation.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    BiasDetected { report: String },
    PersistFailed { detail: String },
}

/// A user-facing failure: a short message and, for quota errors, a wait
/// estimate. Raw service failures never cross this boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayError {
    pub message: String,
    pub retry_after_seconds: Option<u64>,
}

impl DisplayError {
    fn plain(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retry_after_seconds: None,
        }
    }

    fn from_llm_error(err: &LlmError) -> Self {
        match err {
            LlmError::EmptyInput => Self::plain("Prompt cannot be empty."),
            LlmError::Service(failure) => {
                let classified = classify(failure);
                Self {
                    message: classified.message,
                    retry_after_seconds: classified.retry_after_seconds,
                }
            }
            LlmError::Network(detail) => {
                let failure = ServiceFailure::default().message(detail.clone());
                Self::plain(classify(&failure).message)
            }
            LlmError::Config(detail) => Self::plain(detail.clone()),
            LlmError::MalformedOutput(_) | LlmError::UnexpectedResponse(_) => {
                Self::plain("An unexpected error occurred. Please try again later.")
            }
        }
    }
}

/// Result of an asynchronous workspace operation. A superseded operation
/// produced no visible effect: no state change, no store write.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Completed(T),
    Superseded,
}

/// A finished generation, ready for display and already persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub structured_output: String,
    pub bias_detected: bool,
    pub notices: Vec<Notice>,
    pub record: PromptRecord,
}

pub struct Workspace {
    ops: PromptOps,
    history: RecordStore,
    favorites: RecordStore,
    handoff: HandoffSlot,
    state: Mutex<SessionView>,
    generation: AtomicU64,
}

impl Workspace {
    pub fn new(ops: PromptOps, substrate: Arc<dyn Substrate>) -> Self {
        Self::with_history_cap(ops, substrate, MAX_HISTORY)
    }

    /// A workspace whose history keeps at most `cap` records.
    pub fn with_history_cap(ops: PromptOps, substrate: Arc<dyn Substrate>, cap: usize) -> Self {
        Self {
            ops,
            history: RecordStore::history_with_cap(substrate.clone(), cap),
            favorites: RecordStore::favorites(substrate.clone()),
            handoff: HandoffSlot::new(substrate),
            state: Mutex::new(SessionView::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Assemble a workspace from configuration: the hosted provider over
    /// the file-backed substrate. A missing API key still constructs; calls
    /// then fail deterministically with an invalid-credentials message.
    pub fn from_config(config: &Config) -> Result<Self, SetupError> {
        let mut provider_config =
            ProviderConfig::new(config.llm.model.clone(), config.llm.base_url.clone());
        provider_config.api_key = config.llm.resolve_api_key();
        let provider = GeminiProvider::new(provider_config)?;
        let substrate = Arc::new(FileSubstrate::new(config.store_root()?));
        Ok(Self::with_history_cap(
            PromptOps::new(Arc::new(provider)),
            substrate,
            config.history.max_entries,
        ))
    }

    /// Run the full generate flow: Structure, normalize, title (with local
    /// fallback), persist to history.
    pub async fn generate(&self, prompt: &str) -> Result<Outcome<Generated>, DisplayError> {
        if prompt.trim().is_empty() {
            return Err(DisplayError::plain("Prompt cannot be empty."));
        }

        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            // a new call invalidates previous display state up front
            let mut state = self.state.lock().await;
            state.prompt = prompt.to_string();
            state.structured_output.clear();
            state.enhancement = None;
        }

        let outcome = match self.ops.structure(prompt).await {
            Ok(outcome) => outcome,
            Err(err) => {
                if self.superseded(token) {
                    return Ok(Outcome::Superseded);
                }
                log::error!("[WORKSPACE] structure failed: {}", err);
                return Err(DisplayError::from_llm_error(&err));
            }
        };
        let normalized = normalize(&outcome.structured_json);
        if self.superseded(token) {
            return Ok(Outcome::Superseded);
        }

        let title = match self.ops.title(prompt).await {
            Ok(outcome) => outcome.title,
            Err(err) => {
                log::warn!("[WORKSPACE] title generation failed, using fallback: {}", err);
                PromptRecord::fallback_title(prompt)
            }
        };

        let mut notices = Vec::new();
        if outcome.bias_detected {
            notices.push(Notice::BiasDetected {
                report: outcome.bias_report.clone().unwrap_or_else(|| {
                    "The model detected potential bias in your prompt.".to_string()
                }),
            });
        }

        let payload = PromptRecord::new(prompt, normalized.clone(), title);
        // the token check and both writes happen under the state lock, so no
        // other call can interleave between the check and the writes
        let mut state = self.state.lock().await;
        if self.superseded(token) {
            return Ok(Outcome::Superseded);
        }
        if let Err(err) = self.history.upsert(payload.clone()).await {
            log::warn!("[WORKSPACE] history persist failed: {}", err);
            notices.push(Notice::PersistFailed {
                detail: err.to_string(),
            });
        }
        let record = self
            .history
            .find_by_prompt(prompt)
            .await
            .unwrap_or(payload);

        state.prompt = prompt.to_string();
        state.structured_output = normalized.clone();
        state.enhancement = None;
        drop(state);

        Ok(Outcome::Completed(Generated {
            structured_output: normalized,
            bias_detected: outcome.bias_detected,
            notices,
            record,
        }))
    }

    /// Request an enhancement for the current cycle and merge it into the
    /// matching history record. Requires a prior successful generation.
    pub async fn enhance(&self) -> Result<Outcome<Enhancement>, DisplayError> {
        let token = self.generation.load(Ordering::SeqCst);
        let (prompt, structured) = {
            let state = self.state.lock().await;
            (state.prompt.clone(), state.structured_output.clone())
        };
        if prompt.trim().is_empty() || structured.trim().is_empty() {
            return Err(DisplayError::plain(
                "Generate a structured result before requesting an enhancement.",
            ));
        }

        let enhancement = match self.ops.enhance(&prompt, &structured).await {
            Ok(enhancement) => enhancement,
            Err(err) => {
                if self.superseded(token) {
                    return Ok(Outcome::Superseded);
                }
                log::error!("[WORKSPACE] enhance failed: {}", err);
                return Err(DisplayError::from_llm_error(&err));
            }
        };
        // empty title keeps the stored one on merge
        let payload = PromptRecord::new(prompt.as_str(), structured, String::new())
            .with_enhancement(enhancement.clone());
        // same arbitration as generate: check and writes under the state lock
        let mut state = self.state.lock().await;
        if self.superseded(token) {
            return Ok(Outcome::Superseded);
        }
        if let Err(err) = self.history.upsert(payload).await {
            log::warn!("[WORKSPACE] history persist failed: {}", err);
        }
        if state.prompt == prompt {
            state.enhancement = Some(enhancement.clone());
        }
        Ok(Outcome::Completed(enhancement))
    }

    /// Snapshot of the active cycle.
    pub async fn session(&self) -> SessionView {
        self.state.lock().await.clone()
    }

    /// Stage a record for hand-off into the workspace view.
    pub async fn stage(&self, record: &PromptRecord) -> StoreResult<()> {
        self.handoff.put(record).await
    }

    /// Take the staged record, if any, and load it as the active cycle.
    pub async fn load_staged(&self) -> Option<PromptRecord> {
        let record = self.handoff.take().await?;
        let mut state = self.state.lock().await;
        state.prompt = record.prompt.clone();
        state.structured_output = record.structured_output.clone();
        state.enhancement = record.enhancement.clone();
        Some(record)
    }

    /// Copy a record into favorites.
    pub async fn add_favorite(&self, record: PromptRecord) -> StoreResult<()> {
        self.favorites.upsert(record).await
    }

    pub fn history(&self) -> &RecordStore {
        &self.history
    }

    pub fn favorites(&self) -> &RecordStore {
        &self.favorites
    }

    fn superseded(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != token
    }
}
