use chrono::{DateTime, Utc};

/// Name recorded for turns that arrive without a user.
pub const GUEST_USER: &str = "guest";

/// A row in the `chats` table: one completed chat turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRecord {
    pub id: String,
    pub user: String,
    pub message: String,
    /// The sanitized reply that was returned to the caller.
    pub response: String,
    pub created_at: DateTime<Utc>,
}
