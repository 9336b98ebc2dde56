//! Completion-service client.
//!
//! [`CompletionClient`] is the seam between chat orchestration and the
//! third-party model API. The production implementation is
//! [`groq::GroqClient`]; tests substitute scripted clients.

pub mod groq;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use groq::GroqClient;

/// Author of a prompt message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// One non-streaming completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<PromptMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

/// Errors raised while talking to the completion service.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Connection, TLS or body transfer failed.
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    #[error("invalid completion response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Runs one completion. `Ok(None)` means the service produced no text.
    async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, CompletionError>;
}
