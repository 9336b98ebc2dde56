//! Tutorial CRUD routes.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::{SubsecRound, Utc};
use serde_json::{json, Value};
use tracing::debug;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::entities::{TutorialFields, TutorialRecord, TutorialStore};
use crate::error::ServerError;
use crate::schemas::tutorial::{TutorialRequest, TutorialResponse};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_tutorials, create_tutorial, update_tutorial, delete_tutorial),
    components(schemas(TutorialRequest, TutorialResponse))
)]
pub struct TutorialApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tutorials", get(list_tutorials).post(create_tutorial))
        .route("/tutorials/{id}", put(update_tutorial).delete(delete_tutorial))
}

fn required_fields(
    payload: Result<Json<TutorialRequest>, JsonRejection>,
) -> Result<TutorialFields, ServerError> {
    let Json(req) = payload?;
    req.into_fields()
        .ok_or_else(|| ServerError::BadRequest("Please provide all the fields".into()))
}

#[utoipa::path(
    get,
    path = "/api/tutorials",
    tag = "tutorials",
    responses(
        (status = 200, description = "All tutorials", body = Vec<TutorialResponse>),
        (status = 500, description = "Database error"),
    )
)]
pub async fn list_tutorials(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TutorialResponse>>, ServerError> {
    let tutorials = state.store.list_tutorials().await?;
    Ok(Json(tutorials.iter().map(|t| t.to_response()).collect()))
}

#[utoipa::path(
    post,
    path = "/api/tutorials",
    tag = "tutorials",
    request_body = TutorialRequest,
    responses(
        (status = 200, description = "Tutorial created", body = TutorialResponse),
        (status = 400, description = "A field is missing or empty"),
        (status = 500, description = "Database error"),
    )
)]
pub async fn create_tutorial(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TutorialRequest>, JsonRejection>,
) -> Result<Json<TutorialResponse>, ServerError> {
    let fields = required_fields(payload)?;
    // Match the precision the store keeps.
    let now = Utc::now().trunc_subsecs(6);
    let record = TutorialRecord {
        id: Uuid::new_v4().to_string(),
        title: fields.title,
        description: fields.description,
        url: fields.url,
        created_at: now,
        updated_at: now,
    };
    state.store.insert_tutorial(record.clone()).await?;
    Ok(Json(record.to_response()))
}

#[utoipa::path(
    put,
    path = "/api/tutorials/{id}",
    tag = "tutorials",
    request_body = TutorialRequest,
    params(("id" = String, Path, description = "Tutorial id")),
    responses(
        (status = 200, description = "Tutorial updated", body = TutorialResponse),
        (status = 400, description = "A field is missing or empty"),
        (status = 404, description = "Tutorial not found"),
        (status = 500, description = "Database error"),
    )
)]
pub async fn update_tutorial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<TutorialRequest>, JsonRejection>,
) -> Result<Json<TutorialResponse>, ServerError> {
    let fields = required_fields(payload)?;
    let updated = state
        .store
        .update_tutorial(&id, fields)
        .await?
        .ok_or_else(|| ServerError::NotFound("Tutorial not found".into()))?;
    Ok(Json(updated.to_response()))
}

/// Deletes a tutorial. Unknown ids are not an error.
#[utoipa::path(
    delete,
    path = "/api/tutorials/{id}",
    tag = "tutorials",
    params(("id" = String, Path, description = "Tutorial id")),
    responses(
        (status = 200, description = "Tutorial deleted", body = Value),
        (status = 500, description = "Database error"),
    )
)]
pub async fn delete_tutorial(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServerError> {
    let removed = state.store.delete_tutorial(&id).await?;
    debug!(%id, removed, "tutorial delete");
    Ok(Json(json!({ "message": "Deleted successfully" })))
}
