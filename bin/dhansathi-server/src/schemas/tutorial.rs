use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::entities::{TutorialFields, TutorialRecord};

/// Body for creating or replacing a tutorial. Every field is required and
/// must be non-empty.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct TutorialRequest {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub description: Option<String>,
    #[validate(required, length(min = 1))]
    pub url: Option<String>,
}

impl TutorialRequest {
    /// The validated fields, or `None` if any is missing or empty.
    pub fn into_fields(self) -> Option<TutorialFields> {
        self.validate().ok()?;
        Some(TutorialFields {
            title: self.title?,
            description: self.description?,
            url: self.url?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TutorialResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TutorialRecord {
    pub fn to_response(&self) -> TutorialResponse {
        TutorialResponse {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            url: self.url.clone(),
            created_at: self.created_at.to_rfc3339(),
            updated_at: self.updated_at.to_rfc3339(),
        }
    }
}
