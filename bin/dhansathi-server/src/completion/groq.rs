//! OpenAI-compatible chat-completions client (Groq).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CompletionClient, CompletionError, CompletionRequest, PromptMessage};

/// Longest upstream error body kept in [`CompletionError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Client for `POST {base_url}/chat/completions`.
///
/// The credential is a constructor argument, so a client only exists once a
/// key is configured.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl std::fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl GroqClient {
    pub fn new(
        api_key: String,
        base_url: &str,
        model: impl Into<String>,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .user_agent(concat!("dhansathi-server/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, CompletionError> {
        let body = ChatCompletionBody {
            model: &self.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: request.top_p,
            stream: false,
        };

        debug!(endpoint = %self.endpoint, model = %self.model, "sending completion request");
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            let mut body = text;
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(CompletionError::Status { status: status.as_u16(), body });
        }

        let parsed: ChatCompletion = serde_json::from_str(&text)
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.is_empty()))
    }
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;

    #[derive(Clone, Default)]
    struct Seen {
        body: Arc<Mutex<Option<Value>>>,
        auth: Arc<Mutex<Option<String>>>,
    }

    /// Serves a canned `/chat/completions` response on an ephemeral port.
    async fn stub(status: StatusCode, reply: Value) -> (String, Seen) {
        let seen = Seen::default();
        let app = Router::new()
            .route(
                "/openai/v1/chat/completions",
                post(
                    move |State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| {
                        let reply = reply.clone();
                        async move {
                            *seen.body.lock().unwrap() = Some(body);
                            *seen.auth.lock().unwrap() = headers
                                .get("authorization")
                                .and_then(|v| v.to_str().ok())
                                .map(str::to_owned);
                            (status, Json(reply))
                        }
                    },
                ),
            )
            .with_state(seen.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/openai/v1"), seen)
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            messages: vec![PromptMessage::system("be brief"), PromptMessage::user("What is UPI?")],
            max_tokens: 2048,
            temperature: 0.7,
            top_p: 1.0,
        }
    }

    #[tokio::test]
    async fn sends_openai_shaped_request_and_reads_first_choice() {
        let (base, seen) = stub(
            StatusCode::OK,
            json!({ "choices": [{ "message": { "role": "assistant", "content": "**UPI** is fast" } }] }),
        )
        .await;
        let client = GroqClient::new("gsk_test".into(), &base, "openai/gpt-oss-120b").unwrap();

        let reply = client.complete(request()).await.unwrap();
        assert_eq!(reply.as_deref(), Some("**UPI** is fast"));

        let body = seen.body.lock().unwrap().clone().unwrap();
        assert_eq!(body["model"], "openai/gpt-oss-120b");
        assert_eq!(body["stream"], false);
        assert_eq!(body["max_tokens"], 2048);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "What is UPI?");
        assert_eq!(seen.auth.lock().unwrap().as_deref(), Some("Bearer gsk_test"));
    }

    #[tokio::test]
    async fn missing_or_empty_content_is_none() {
        let (base, _) = stub(StatusCode::OK, json!({ "choices": [] })).await;
        let client = GroqClient::new("k".into(), &base, "m").unwrap();
        assert_eq!(client.complete(request()).await.unwrap(), None);

        let (base, _) = stub(StatusCode::OK, json!({ "choices": [{ "message": { "content": "" } }] })).await;
        let client = GroqClient::new("k".into(), &base, "m").unwrap();
        assert_eq!(client.complete(request()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let (base, _) = stub(StatusCode::UNAUTHORIZED, json!({ "error": { "message": "bad key" } })).await;
        let client = GroqClient::new("k".into(), &base, "m").unwrap();
        match client.complete(request()).await {
            Err(CompletionError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("bad key"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unexpected_shape_is_invalid_response() {
        let (base, _) = stub(StatusCode::OK, json!({ "result": "nope" })).await;
        let client = GroqClient::new("k".into(), &base, "m").unwrap();
        assert!(matches!(
            client.complete(request()).await,
            Err(CompletionError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_service_is_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = GroqClient::new("k".into(), &format!("http://{addr}/v1/"), "m").unwrap();
        assert!(matches!(client.complete(request()).await, Err(CompletionError::Http(_))));
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let client =
            GroqClient::new("gsk_secret".into(), "https://api.groq.com/openai/v1/", "m").unwrap();
        assert_eq!(client.endpoint, "https://api.groq.com/openai/v1/chat/completions");
        assert!(!format!("{client:?}").contains("gsk_secret"));
    }
}
