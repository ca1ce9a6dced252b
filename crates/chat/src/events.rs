use serde::{Deserialize, Serialize};

use fabquote_core::QuoteRequest;

/// One inbound free-text message from the chat collaborator. The partial
/// request collected so far rides along as `state` so the pipeline stays
/// stateless per request; the platform round-trips it between turns.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatMessageEvent {
    pub session_id: String,
    pub website_id: Option<String>,
    pub text: String,
    #[serde(default)]
    pub state: Option<QuoteRequest>,
}

/// The outbound reply: either a follow-up question or a formatted quote
/// summary, plus the updated state blob for the platform to carry forward.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatReply {
    pub text: String,
    pub state: QuoteRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
}
