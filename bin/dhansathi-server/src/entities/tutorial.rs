use std::future::Future;

use chrono::Utc;

use crate::entities::{
    decode_timestamp, encode_timestamp,
    dao::{TutorialFields, TutorialRecord},
    SqliteStore,
};

type TutorialRow = (String, String, String, String, String, String);

pub trait TutorialStore: Send + Sync + 'static {
    /// Every tutorial, in insertion order.
    fn list_tutorials(&self) -> impl Future<Output = Result<Vec<TutorialRecord>, sqlx::Error>> + Send;
    fn get_tutorial(&self, id: &str) -> impl Future<Output = Result<Option<TutorialRecord>, sqlx::Error>> + Send;
    fn insert_tutorial(&self, record: TutorialRecord) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
    /// Replaces the editable fields. `None` when `id` is unknown.
    fn update_tutorial(
        &self,
        id: &str,
        fields: TutorialFields,
    ) -> impl Future<Output = Result<Option<TutorialRecord>, sqlx::Error>> + Send;
    /// Returns whether a row was removed.
    fn delete_tutorial(&self, id: &str) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;
}

fn from_row((id, title, description, url, created_at, updated_at): TutorialRow) -> TutorialRecord {
    TutorialRecord {
        id,
        title,
        description,
        url,
        created_at: decode_timestamp(&created_at, "tutorials.created_at"),
        updated_at: decode_timestamp(&updated_at, "tutorials.updated_at"),
    }
}

impl TutorialStore for SqliteStore {
    async fn list_tutorials(&self) -> Result<Vec<TutorialRecord>, sqlx::Error> {
        let rows: Vec<TutorialRow> = sqlx::query_as(
            "SELECT id, title, description, url, created_at, updated_at \
             FROM tutorials ORDER BY created_at ASC, rowid ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(from_row).collect())
    }

    async fn get_tutorial(&self, id: &str) -> Result<Option<TutorialRecord>, sqlx::Error> {
        let row: Option<TutorialRow> = sqlx::query_as(
            "SELECT id, title, description, url, created_at, updated_at \
             FROM tutorials WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(from_row))
    }

    async fn insert_tutorial(&self, record: TutorialRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO tutorials (id, title, description, url, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&record.id)
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.url)
        .bind(encode_timestamp(&record.created_at))
        .bind(encode_timestamp(&record.updated_at))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_tutorial(
        &self,
        id: &str,
        fields: TutorialFields,
    ) -> Result<Option<TutorialRecord>, sqlx::Error> {
        let updated_at = encode_timestamp(&Utc::now());
        let result = sqlx::query(
            "UPDATE tutorials SET title = ?1, description = ?2, url = ?3, updated_at = ?4 \
             WHERE id = ?5",
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.url)
        .bind(&updated_at)
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_tutorial(id).await
    }

    async fn delete_tutorial(&self, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tutorials WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
