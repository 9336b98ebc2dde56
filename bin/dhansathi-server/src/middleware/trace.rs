use std::time::Instant;

use axum::body::{Body, Bytes, HttpBody};
use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{ServerError, GENERIC_FAILURE};

pub static X_TRACE_ID: &str = "x-trace-id";

/// Largest request body read into memory. Matches axum's default `Json` limit.
pub const MAX_REQUEST_BODY: usize = 2 * 1024 * 1024;

/// JSON bodies up to this size are logged verbatim at `debug`.
const MAX_LOGGED_BODY: usize = 1024;

/// Opens an `http_request` span per request, propagates the `x-trace-id`
/// header (generating one when absent) and logs latency.
///
/// Request bodies are buffered up to [`MAX_REQUEST_BODY`]; anything larger is
/// answered with 413 before it reaches a handler. Response bodies are only
/// buffered when they are small JSON documents, otherwise they stream through.
pub async fn trace_middleware(req: Request<Body>, next: Next) -> Response {
    let start_time = Instant::now();

    let trace_id = req
        .headers()
        .get(X_TRACE_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    let header_value = HeaderValue::from_str(&trace_id.to_string())
        .unwrap_or_else(|_| HeaderValue::from_static("invalid"));

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    async move {
        info!("request started");
        let (parts, body) = req.into_parts();

        let mut response = match axum::body::to_bytes(body, MAX_REQUEST_BODY).await {
            Ok(bytes) => {
                log_body("request", &parts.headers, &bytes);
                let mut req = Request::from_parts(parts, Body::from(bytes));
                req.headers_mut().insert(X_TRACE_ID, header_value.clone());
                log_response_body(next.run(req).await).await
            }
            Err(e) => {
                warn!(error = %e, limit = MAX_REQUEST_BODY, "rejecting request body");
                ServerError::PayloadTooLarge("Request body too large".into()).into_response()
            }
        };
        response.headers_mut().insert(X_TRACE_ID, header_value);

        info!(
            status = response.status().as_u16(),
            latency_ms = start_time.elapsed().as_millis(),
            "response finished"
        );
        response
    }
    .instrument(span)
    .await
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"))
}

fn log_body(direction: &str, headers: &HeaderMap, bytes: &Bytes) {
    if bytes.is_empty() {
        return;
    }
    match std::str::from_utf8(bytes) {
        Ok(text) if is_json(headers) && bytes.len() <= MAX_LOGGED_BODY => {
            debug!(direction, body = %text, "body");
        }
        _ => debug!(direction, size = bytes.len(), "body skipped"),
    }
}

async fn log_response_body(response: Response) -> Response {
    let small = response
        .body()
        .size_hint()
        .upper()
        .is_some_and(|upper| upper <= MAX_LOGGED_BODY as u64);
    if !small || !is_json(response.headers()) {
        return response;
    }

    let (parts, body) = response.into_parts();
    match axum::body::to_bytes(body, MAX_LOGGED_BODY).await {
        Ok(bytes) => {
            log_body("response", &parts.headers, &bytes);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            warn!(error = %e, "failed to buffer response body");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": GENERIC_FAILURE })),
            )
                .into_response()
        }
    }
}
