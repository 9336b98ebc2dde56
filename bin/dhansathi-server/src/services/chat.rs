//! Chat turn orchestration.
//!
//! A turn is a straight line: validate, complete, sanitize, persist, reply.
//! Any failure ends the turn; no partial reply is ever returned.

use std::sync::Arc;

use chrono::Utc;
use dhansathi_format::Sanitizer;
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::completion::{CompletionClient, CompletionError, CompletionRequest, PromptMessage};
use crate::config::{Config, HistoryPolicy};
use crate::entities::dao::chat::GUEST_USER;
use crate::entities::{ChatRecord, ChatStore, SqliteStore};
use crate::prompt::{CONNECTIVITY_PROBE, FALLBACK_REPLY, PROBE_MAX_TOKENS, SYSTEM_PROMPT};

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error(transparent)]
    Upstream(#[from] CompletionError),

    #[error("failed to persist chat: {0}")]
    Persistence(#[from] sqlx::Error),
}

/// Sampling parameters and reply policy for chat turns.
#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub sanitizer: Sanitizer,
    pub history: HistoryPolicy,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            sanitizer: Sanitizer::new(),
            history: HistoryPolicy::Required,
            max_tokens: 2048,
            temperature: 0.7,
            top_p: 1.0,
        }
    }
}

impl ChatOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            sanitizer: config.sanitizer(),
            history: config.history_policy,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }
}

/// Incoming chat message as received from the transport layer.
#[derive(Debug, Clone, Default)]
pub struct TurnRequest {
    pub message: Option<String>,
    pub user: Option<String>,
}

/// Outcome of the credential check.
#[derive(Debug)]
pub enum ProbeOutcome {
    Ok { response: Option<String> },
    NotConfigured,
    Failed(CompletionError),
}

pub struct ChatService {
    completion: Option<Arc<dyn CompletionClient>>,
    store: SqliteStore,
    options: ChatOptions,
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("configured", &self.completion.is_some())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ChatService {
    /// `completion` is `None` when no credential is configured; turns then
    /// fail with [`ChatError::ServiceUnavailable`].
    pub fn new(
        completion: Option<Arc<dyn CompletionClient>>,
        store: SqliteStore,
        options: ChatOptions,
    ) -> Self {
        Self { completion, store, options }
    }

    pub fn is_configured(&self) -> bool {
        self.completion.is_some()
    }

    /// Runs one chat turn and returns the sanitized reply.
    pub async fn turn(&self, request: TurnRequest) -> Result<String, ChatError> {
        let message = request
            .message
            .filter(|m| !m.is_empty())
            .ok_or_else(|| ChatError::InvalidRequest("Message is required".into()))?;

        info!(message_len = message.len(), configured = self.is_configured(), "chat request received");

        let completion = self.completion.as_ref().ok_or_else(|| {
            error!("GROQ_API_KEY not configured; rejecting chat turn");
            ChatError::ServiceUnavailable("Groq API key not configured".into())
        })?;

        let raw = completion
            .complete(CompletionRequest {
                messages: vec![PromptMessage::system(SYSTEM_PROMPT), PromptMessage::user(message.as_str())],
                max_tokens: self.options.max_tokens,
                temperature: self.options.temperature,
                top_p: self.options.top_p,
            })
            .await
            .inspect_err(|e| error!(error = %e, "completion request failed"))?;

        let raw = raw.unwrap_or_else(|| {
            warn!("completion returned no text; using fallback reply");
            FALLBACK_REPLY.to_owned()
        });
        let reply = self.options.sanitizer.sanitize(&raw);
        debug!(raw_len = raw.len(), reply_len = reply.len(), "reply sanitized");

        let user = request
            .user
            .map(|u| u.trim().to_owned())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| GUEST_USER.to_owned());
        let record = ChatRecord {
            id: Uuid::new_v4().to_string(),
            user,
            message,
            response: reply.clone(),
            created_at: Utc::now(),
        };

        if let Err(e) = self.store.append_chat(record).await {
            match self.options.history {
                HistoryPolicy::Required => {
                    error!(error = %e, "failed to persist chat; dropping reply");
                    return Err(ChatError::Persistence(e));
                }
                HistoryPolicy::BestEffort => {
                    warn!(error = %e, "failed to persist chat; returning reply anyway");
                }
            }
        }

        info!(reply_len = reply.len(), "chat turn complete");
        Ok(reply)
    }

    /// Sends a short fixed message, without the system instruction, to check
    /// that the credential works.
    pub async fn probe(&self) -> ProbeOutcome {
        let Some(completion) = self.completion.as_ref() else {
            return ProbeOutcome::NotConfigured;
        };
        let request = CompletionRequest {
            messages: vec![PromptMessage::user(CONNECTIVITY_PROBE)],
            max_tokens: PROBE_MAX_TOKENS,
            temperature: self.options.temperature,
            top_p: self.options.top_p,
        };
        match completion.complete(request).await {
            Ok(response) => ProbeOutcome::Ok { response },
            Err(e) => {
                error!(error = %e, "completion probe failed");
                ProbeOutcome::Failed(e)
            }
        }
    }
}
