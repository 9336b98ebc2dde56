use chrono::{DateTime, Utc};

/// A row in the `tutorials` table.
#[derive(Debug, Clone, PartialEq)]
pub struct TutorialRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The caller-editable part of a tutorial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialFields {
    pub title: String,
    pub description: String,
    pub url: String,
}
