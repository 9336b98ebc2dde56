//! Axum router construction.
//!
//! [`build`] assembles the complete application router:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional Swagger UI / OpenAPI document (disable with `DHANSATHI_ENABLE_SWAGGER=false`)
//! - Health route
//! - `/api` chat and tutorial routes

mod chat;
pub mod doc;
mod health;
mod tutorials;

use std::sync::Arc;

use axum::{middleware, Router};
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{cors, trace};
use crate::state::AppState;

pub fn build(state: Arc<AppState>) -> Router {
    let api_router = Router::new().merge(chat::router()).merge(tutorials::router());

    let mut app = Router::new().merge(health::router()).nest("/api", api_router);

    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app.layer(cors::cors_layer(state.clone()))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}
