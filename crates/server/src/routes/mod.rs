//! HTTP surface of the quote-pricing service.
//!
//! - `POST /quotes/build-unified` — build a quote from structured fields
//!   (bearer-token gated)
//! - `POST /webhooks/chat`        — inbound chat message webhook
//! - `GET  /health`               — readiness report

pub mod chat;
pub mod quotes;

use axum::{
    routing::{get, post},
    Router,
};

use crate::bootstrap::AppState;
use crate::health;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/quotes/build-unified", post(quotes::build_unified))
        .route("/webhooks/chat", post(chat::chat_webhook))
        .with_state(state)
}
