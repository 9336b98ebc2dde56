use std::future::Future;

use crate::entities::{decode_timestamp, encode_timestamp, dao::ChatRecord, SqliteStore};

/// Append-only store of completed chat turns.
pub trait ChatStore: Send + Sync + 'static {
    fn append_chat(&self, record: ChatRecord) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Every record, newest first.
    fn list_chats(&self) -> impl Future<Output = Result<Vec<ChatRecord>, sqlx::Error>> + Send;
}

impl ChatStore for SqliteStore {
    async fn append_chat(&self, record: ChatRecord) -> Result<(), sqlx::Error> {
        let created_at = encode_timestamp(&record.created_at);
        sqlx::query(
            "INSERT INTO chats (id, user_name, message, response, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&record.id)
        .bind(&record.user)
        .bind(&record.message)
        .bind(&record.response)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_chats(&self) -> Result<Vec<ChatRecord>, sqlx::Error> {
        let rows: Vec<(String, String, String, String, String)> = sqlx::query_as(
            "SELECT id, user_name, message, response, created_at \
             FROM chats ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, user, message, response, created_at)| ChatRecord {
                id,
                user,
                message,
                response,
                created_at: decode_timestamp(&created_at, "chats.created_at"),
            })
            .collect())
    }
}
