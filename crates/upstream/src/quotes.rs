use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{info, warn};

use fabquote_core::{Quote, QuoteRequest};

use crate::error::UpstreamError;

/// Hands a locally composed quote to the external persistence service and
/// returns the canonical record. Implementations must always return a
/// usable quote; on any failure the local quote stands.
#[async_trait]
pub trait QuoteSink: Send + Sync {
    async fn submit(&self, local: Quote, request: &QuoteRequest) -> Quote;
}

/// Sink that keeps every quote local. Used when no persistence service is
/// configured, and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalQuoteSink;

#[async_trait]
impl QuoteSink for LocalQuoteSink {
    async fn submit(&self, local: Quote, _request: &QuoteRequest) -> Quote {
        local
    }
}

/// Sink posting to `POST {url}/quotes/from-items`. The service assigns the
/// canonical quote id; any failure degrades to the locally composed quote.
pub struct HttpQuoteSink {
    client: reqwest::Client,
    base_url: String,
    token: Option<SecretString>,
}

impl HttpQuoteSink {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<SecretString>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url: base_url.into(), token })
    }

    async fn post_quote(
        &self,
        local: &Quote,
        request: &QuoteRequest,
    ) -> Result<Quote, UpstreamError> {
        let url = format!("{}/quotes/from-items", self.base_url.trim_end_matches('/'));
        let payload = json!({
            "category": local.category,
            "lineItems": local.line_items,
            "subtotal": local.subtotal,
            "tax": local.tax,
            "total": local.total,
            "estimatedCompletion": local.estimated_completion,
            "validUntil": local.valid_until,
            "zipcode": request.zipcode,
            "sessionId": request.session_id,
            "websiteId": request.website_id,
        });

        let mut http_request = self.client.post(url).json(&payload);
        if let Some(token) = &self.token {
            http_request = http_request.bearer_auth(token.expose_secret());
        }

        let response = http_request.send().await?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status { status: response.status() });
        }

        let quote: Quote = response
            .json()
            .await
            .map_err(|error| UpstreamError::Decode(error.to_string()))?;
        Ok(quote)
    }
}

#[async_trait]
impl QuoteSink for HttpQuoteSink {
    async fn submit(&self, local: Quote, request: &QuoteRequest) -> Quote {
        match self.post_quote(&local, request).await {
            Ok(canonical) => {
                info!(
                    event_name = "quotes.submitted",
                    quote_id = %canonical.quote_id,
                    "quote persisted by upstream service"
                );
                canonical
            }
            Err(error) => {
                warn!(
                    event_name = "quotes.submit_failed",
                    quote_id = %local.quote_id,
                    error = %error,
                    "keeping locally composed quote"
                );
                local
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    use fabquote_core::{Quote, QuoteCategory, QuoteId, QuoteRequest};

    use super::{LocalQuoteSink, QuoteSink};

    fn local_quote() -> Quote {
        let created_at = Utc::now();
        Quote {
            quote_id: QuoteId("UQ1700000000000wxyz".to_string()),
            category: QuoteCategory::Countertop,
            line_items: Vec::new(),
            subtotal: Decimal::from(100),
            tax: Decimal::new(850, 2),
            total: Decimal::new(10850, 2),
            estimated_completion: "2-3 weeks".to_string(),
            created_at,
            valid_until: created_at + Duration::days(30),
        }
    }

    #[tokio::test]
    async fn local_sink_returns_the_quote_unchanged() {
        let quote = local_quote();
        let submitted = LocalQuoteSink.submit(quote.clone(), &QuoteRequest::default()).await;
        assert_eq!(submitted, quote);
    }
}
