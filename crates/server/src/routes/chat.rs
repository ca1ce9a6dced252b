use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use fabquote_chat::ChatMessageEvent;

use crate::bootstrap::AppState;

/// Inbound chat-webhook entry point. The reply is always 200 with either a
/// follow-up question or a quote summary; the only failure mode is a body
/// that does not parse.
pub async fn chat_webhook(
    State(state): State<AppState>,
    body: Result<Json<ChatMessageEvent>, JsonRejection>,
) -> Response {
    let Json(event) = match body {
        Ok(body) => body,
        Err(rejection) => {
            let correlation_id = Uuid::new_v4().to_string();
            let payload = json!({
                "error": rejection.body_text(),
                "correlationId": correlation_id,
            });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    let reply = state.chat.handle(event).await;
    (StatusCode::OK, Json(reply)).into_response()
}
