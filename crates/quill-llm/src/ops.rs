//! The three stateless prompt operations: Structure, Enhance, Title.
//!
//! Each wraps one provider call with a fixed instruction template and a
//! declared output shape. Empty inputs are rejected before any call goes
//! out; service failures propagate unchanged for the classifier.

use std::sync::Arc;

use quill_core::{Enhancement, StructureOutcome, TitleOutcome};

use crate::error::{LlmError, Result};
use crate::prompts;
use crate::provider::{GenerateRequest, ModelProvider};

#[derive(Clone)]
pub struct PromptOps {
    provider: Arc<dyn ModelProvider>,
}

impl PromptOps {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_id(&self) -> &str {
        self.provider.provider_id()
    }

    /// Convert free text into a structured-JSON candidate plus a bias
    /// classification.
    pub async fn structure(&self, prompt_text: &str) -> Result<StructureOutcome> {
        if prompt_text.trim().is_empty() {
            return Err(LlmError::EmptyInput);
        }
        let request = GenerateRequest::new(
            prompts::STRUCTURE_SYSTEM_PROMPT,
            prompts::build_structure_message(prompt_text),
            prompts::structure_schema(),
        )
        .with_safety_settings(prompts::structure_safety_settings());
        let raw = self.provider.generate(request).await?;
        let outcome: StructureOutcome = serde_json::from_str(&raw)?;
        log::info!(
            "[OPS] structure done, bias_detected: {}",
            outcome.bias_detected
        );
        Ok(outcome)
    }

    /// Rewrite a prompt given its original text and its structured result.
    pub async fn enhance(&self, prompt_text: &str, structured_json: &str) -> Result<Enhancement> {
        if prompt_text.trim().is_empty() || structured_json.trim().is_empty() {
            return Err(LlmError::EmptyInput);
        }
        let request = GenerateRequest::new(
            prompts::ENHANCE_SYSTEM_PROMPT,
            prompts::build_enhance_message(prompt_text, structured_json),
            prompts::enhance_schema(),
        );
        let raw = self.provider.generate(request).await?;
        let enhancement: Enhancement = serde_json::from_str(&raw)?;
        Ok(enhancement)
    }

    /// Produce a 3-6 word label for a prompt. Callers treat failures as
    /// non-fatal and fall back to a local title.
    pub async fn title(&self, prompt_text: &str) -> Result<TitleOutcome> {
        if prompt_text.trim().is_empty() {
            return Err(LlmError::EmptyInput);
        }
        let request = GenerateRequest::new(
            prompts::TITLE_SYSTEM_PROMPT,
            prompts::build_title_message(prompt_text),
            prompts::title_schema(),
        );
        let raw = self.provider.generate(request).await?;
        let outcome: TitleOutcome = serde_json::from_str(&raw)?;
        Ok(outcome)
    }
}
