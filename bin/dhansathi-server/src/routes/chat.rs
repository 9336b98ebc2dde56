//! Chat turn, credential check and chat history routes.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::entities::ChatStore;
use crate::error::ServerError;
use crate::schemas::chat::{ChatRecordResponse, ChatRequest, ChatResponse, ChatTestResponse};
use crate::services::ProbeOutcome;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(chat_turn, chat_test, list_chats),
    components(schemas(ChatRequest, ChatResponse, ChatTestResponse, ChatRecordResponse))
)]
pub struct ChatApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(chat_turn))
        .route("/chat/test", get(chat_test))
        .route("/chats", get(list_chats))
}

#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Sanitized reply", body = ChatResponse),
        (status = 400, description = "Message is missing or the body is malformed"),
        (status = 500, description = "Credential missing, completion or persistence failure"),
    )
)]
pub async fn chat_turn(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ServerError> {
    let Json(req) = payload?;
    let reply = state.chat.turn(req.into()).await?;
    Ok(Json(ChatResponse { reply }))
}

/// Checks that the configured completion credential works.
///
/// Always answers 200; failures are reported in the body.
#[utoipa::path(
    get,
    path = "/api/chat/test",
    tag = "chat",
    responses(
        (status = 200, description = "Probe result", body = ChatTestResponse),
    )
)]
pub async fn chat_test(State(state): State<Arc<AppState>>) -> Json<ChatTestResponse> {
    let body = match state.chat.probe().await {
        ProbeOutcome::Ok { response } => ChatTestResponse {
            status: "success".into(),
            message: "API key is working!".into(),
            response,
            error: None,
        },
        ProbeOutcome::NotConfigured => ChatTestResponse {
            status: "error".into(),
            message: "GROQ_API_KEY not found in environment variables".into(),
            response: None,
            error: None,
        },
        ProbeOutcome::Failed(e) => ChatTestResponse {
            status: "error".into(),
            message: "API test failed".into(),
            response: None,
            error: Some(e.to_string()),
        },
    };
    Json(body)
}

#[utoipa::path(
    get,
    path = "/api/chats",
    tag = "chat",
    responses(
        (status = 200, description = "Chat history, newest first", body = Vec<ChatRecordResponse>),
        (status = 500, description = "Database error"),
    )
)]
pub async fn list_chats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChatRecordResponse>>, ServerError> {
    let chats = state.store.list_chats().await?;
    Ok(Json(chats.iter().map(|c| c.to_response()).collect()))
}
