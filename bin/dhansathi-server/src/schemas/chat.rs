use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::ChatRecord;
use crate::services::TurnRequest;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// The user's question. Required and non-empty.
    pub message: Option<String>,
    /// Display name stored with the history record (default `"guest"`).
    pub user: Option<String>,
}

impl From<ChatRequest> for TurnRequest {
    fn from(req: ChatRequest) -> Self {
        TurnRequest { message: req.message, user: req.user }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
}

/// Result of the credential check. Always served with HTTP 200.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatTestResponse {
    /// `"success"` or `"error"`.
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatRecordResponse {
    pub id: String,
    pub user: String,
    pub message: String,
    pub response: String,
    pub created_at: String,
}

impl ChatRecord {
    pub fn to_response(&self) -> ChatRecordResponse {
        ChatRecordResponse {
            id: self.id.clone(),
            user: self.user.clone(),
            message: self.message.clone(),
            response: self.response.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}
