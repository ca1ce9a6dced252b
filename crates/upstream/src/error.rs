use thiserror::Error;

/// Failures talking to the pricing or quote-persistence services. These are
/// logged and absorbed by fallbacks; they never propagate past the adapter
/// layer.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to upstream service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream service returned status {status}")]
    Status { status: reqwest::StatusCode },
    #[error("upstream response could not be decoded: {0}")]
    Decode(String),
}
