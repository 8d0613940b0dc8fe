use std::fmt;

use thiserror::Error;

/// Unified error type for model operations
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("input must not be empty")]
    EmptyInput,

    #[error("network error: {0}")]
    Network(String),

    #[error("service failure: {0}")]
    Service(ServiceFailure),

    #[error("malformed model output: {0}")]
    MalformedOutput(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    UnexpectedResponse(String),

    #[error("config error: {0}")]
    Config(String),
}

/// The closed failure shape the classifier consumes.
///
/// The provider adapter is responsible for mapping whatever the transport
/// returns (HTTP status, error envelope, headers) into this structure before
/// it reaches the classifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceFailure {
    pub status_code: Option<u16>,
    pub message: Option<String>,
    pub retry_after_seconds: Option<f64>,
    pub reason_code: Option<String>,
}

impl ServiceFailure {
    pub fn with_status(status_code: u16) -> Self {
        Self {
            status_code: Some(status_code),
            ..Default::default()
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn reason(mut self, reason_code: impl Into<String>) -> Self {
        self.reason_code = Some(reason_code.into());
        self
    }

    pub fn retry_after(mut self, seconds: f64) -> Self {
        self.retry_after_seconds = Some(seconds);
        self
    }
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(status) => write!(f, "status {}", status)?,
            None => write!(f, "no status")?,
        }
        if let Some(reason) = &self.reason_code {
            write!(f, " ({})", reason)?;
        }
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, LlmError>;
