use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use fabquote_core::followup::{next_step, prompt_for, MissingField, NextStep};
use fabquote_core::{compose_quote, line_items_for, FieldExtractor};
use fabquote_upstream::{resolve_rate_book, QuoteSink, RateProvider};

use crate::events::{ChatMessageEvent, ChatReply};
use crate::summary::quote_summary;

/// Per-message quote pipeline: extract fields from the text, merge them
/// into the state carried by the platform, then either ask the next
/// question or price the project and reply with a summary.
pub struct ChatPipeline {
    extractor: FieldExtractor,
    rates: Arc<dyn RateProvider>,
    sink: Arc<dyn QuoteSink>,
    quote_view_base_url: Option<String>,
}

impl ChatPipeline {
    pub fn new(
        rates: Arc<dyn RateProvider>,
        sink: Arc<dyn QuoteSink>,
        quote_view_base_url: Option<String>,
    ) -> Self {
        Self { extractor: FieldExtractor::new(), rates, sink, quote_view_base_url }
    }

    pub async fn handle(&self, event: ChatMessageEvent) -> ChatReply {
        let extracted = self.extractor.extract(&event.text);

        let mut request = event.state.unwrap_or_default();
        request.merge(extracted);
        if request.session_id.is_none() {
            request.session_id = Some(event.session_id.clone());
        }
        if request.website_id.is_none() {
            request.website_id = event.website_id.clone();
        }

        match next_step(&request) {
            NextStep::Ask { field, prompt } => {
                info!(
                    event_name = "chat.followup",
                    session_id = %event.session_id,
                    missing_field = ?field,
                    "asking follow-up question"
                );
                ChatReply { text: prompt, state: request, quote_id: None }
            }
            NextStep::Complete => {
                let Some(category) = request.category else {
                    // Completion implies a category; guard anyway rather
                    // than panic on a malformed state blob.
                    return ChatReply {
                        text: prompt_for(MissingField::Category),
                        state: request,
                        quote_id: None,
                    };
                };

                let book = resolve_rate_book(self.rates.as_ref(), category).await;
                let items = line_items_for(&request, &book);
                let local = compose_quote(category, items, Utc::now());
                let quote = self.sink.submit(local, &request).await;

                info!(
                    event_name = "chat.quote_generated",
                    session_id = %event.session_id,
                    quote_id = %quote.quote_id,
                    category = %category,
                    "quote generated from chat conversation"
                );

                let text = quote_summary(&quote, self.quote_view_base_url.as_deref());
                let quote_id = Some(quote.quote_id.0.clone());
                ChatReply { text, state: request, quote_id }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use fabquote_upstream::{LocalQuoteSink, StaticRateProvider};

    use super::{ChatMessageEvent, ChatPipeline};

    fn pipeline() -> ChatPipeline {
        ChatPipeline::new(Arc::new(StaticRateProvider), Arc::new(LocalQuoteSink), None)
    }

    fn message(text: &str, state: Option<fabquote_core::QuoteRequest>) -> ChatMessageEvent {
        ChatMessageEvent {
            session_id: "session-1".to_string(),
            website_id: Some("site-1".to_string()),
            text: text.to_string(),
            state,
        }
    }

    #[tokio::test]
    async fn vague_message_gets_the_category_question() {
        let reply = pipeline().handle(message("hi there", None)).await;

        assert!(reply.text.contains("countertops, cabinets, or both"));
        assert!(reply.quote_id.is_none());
    }

    #[tokio::test]
    async fn partial_countertop_request_gets_the_material_question() {
        let reply = pipeline().handle(message("I need new countertops", None)).await;

        assert!(reply.text.contains("material"));
        assert!(reply.quote_id.is_none());
    }

    #[tokio::test]
    async fn state_accumulates_across_turns_until_a_quote_lands() {
        let pipeline = pipeline();

        let first = pipeline.handle(message("I need granite countertops", None)).await;
        assert!(first.quote_id.is_none());
        assert!(first.text.contains("square feet"));

        let second = pipeline
            .handle(message("about 45 sq ft", Some(first.state)))
            .await;

        let quote_id = second.quote_id.expect("complete request should yield a quote");
        assert!(quote_id.starts_with("UQ"));
        assert!(second.text.contains("Granite Countertop"));
        assert!(second.text.contains("Total: $"));
    }

    #[tokio::test]
    async fn one_message_with_everything_quotes_immediately() {
        let reply = pipeline()
            .handle(message(
                "Quote me granite countertops, 45 sq ft, bullnose edge, 1 sink and \
                 12 lf of backsplash",
                None,
            ))
            .await;

        assert!(reply.quote_id.is_some());
        // Worked example totals: 2925 + 360 + 150 + 540 + 800 = 4775.
        assert!(reply.text.contains("Subtotal: $4775.00"));
        assert!(reply.text.contains("Tax: $405.88"));
        assert!(reply.text.contains("Total: $5180.88"));
    }

    #[tokio::test]
    async fn session_identifiers_are_stamped_into_state() {
        let reply = pipeline().handle(message("hello", None)).await;

        assert_eq!(reply.state.session_id.as_deref(), Some("session-1"));
        assert_eq!(reply.state.website_id.as_deref(), Some("site-1"));
    }
}
