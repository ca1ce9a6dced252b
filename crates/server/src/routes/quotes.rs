use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use fabquote_core::{
    compose_quote, line_items_for, DomainError, InterfaceError, QuoteCategory, QuoteRequest,
};
use fabquote_upstream::resolve_rate_book;

use crate::bootstrap::AppState;

#[derive(Debug, Deserialize)]
pub struct BuildUnifiedRequest {
    pub category: String,
    pub sqft: Option<Decimal>,
    #[serde(rename = "edgeProfile")]
    pub edge_profile: Option<String>,
    #[serde(rename = "sinkCutouts")]
    pub sink_cutouts: Option<u32>,
    #[serde(rename = "backsplashLf")]
    pub backsplash_lf: Option<Decimal>,
    #[serde(rename = "baseLf")]
    pub base_lf: Option<Decimal>,
    #[serde(rename = "wallLf")]
    pub wall_lf: Option<Decimal>,
    #[serde(rename = "tallUnits")]
    pub tall_units: Option<u32>,
    #[serde(rename = "drawerStacks")]
    pub drawer_stacks: Option<u32>,
    pub zipcode: Option<String>,
    pub website_id: Option<String>,
    pub session_id: Option<String>,
}

fn to_quote_request(
    payload: BuildUnifiedRequest,
) -> Result<(QuoteCategory, QuoteRequest), DomainError> {
    let category = QuoteCategory::parse(&payload.category)
        .ok_or_else(|| DomainError::InvalidCategory(payload.category.clone()))?;

    let request = QuoteRequest {
        category: Some(category),
        material: None,
        sqft: payload.sqft,
        edge_profile: payload.edge_profile,
        sink_cutouts: payload.sink_cutouts,
        backsplash_lf: payload.backsplash_lf,
        base_lf: payload.base_lf,
        wall_lf: payload.wall_lf,
        tall_units: payload.tall_units,
        drawer_stacks: payload.drawer_stacks,
        zipcode: payload.zipcode,
        session_id: payload.session_id,
        website_id: payload.website_id,
    };
    request.validate()?;

    Ok((category, request))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn authorized(headers: &HeaderMap, state: &AppState) -> bool {
    matches!(
        bearer_token(headers),
        Some(presented) if presented == state.auth_token.expose_secret()
    )
}

fn error_response(status: StatusCode, error: InterfaceError) -> Response {
    let body = json!({
        "error": error.user_message(),
        "correlationId": error.correlation_id(),
    });
    (status, Json(body)).into_response()
}

/// Build a quote from already-structured fields. Auth and schema failures
/// are the only user-visible errors; pricing and persistence degrade to
/// local fallbacks inside the providers.
pub async fn build_unified(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<BuildUnifiedRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4().to_string();

    if !authorized(&headers, &state) {
        return error_response(
            StatusCode::UNAUTHORIZED,
            InterfaceError::unauthorized("missing or mismatched bearer token", correlation_id),
        );
    }

    let Json(payload) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                InterfaceError::bad_request(rejection.body_text(), correlation_id),
            );
        }
    };

    let (category, request) = match to_quote_request(payload) {
        Ok(parsed) => parsed,
        Err(error) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                error.into_interface(correlation_id),
            );
        }
    };

    let book = resolve_rate_book(state.rates.as_ref(), category).await;
    let items = line_items_for(&request, &book);
    let local = compose_quote(category, items, Utc::now());
    let quote = state.sink.submit(local, &request).await;

    info!(
        event_name = "quotes.build_unified",
        correlation_id = %correlation_id,
        quote_id = %quote.quote_id,
        category = %category,
        "unified quote built"
    );

    (StatusCode::OK, Json(quote)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::extract::State;
    use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
    use axum::Json;
    use rust_decimal::Decimal;

    use fabquote_core::Quote;

    use crate::routes::tests::app_state;

    use super::{build_unified, BuildUnifiedRequest};

    fn authed_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer test-token"));
        headers
    }

    fn countertop_body() -> BuildUnifiedRequest {
        BuildUnifiedRequest {
            category: "countertop".to_string(),
            sqft: Some(Decimal::from(45)),
            edge_profile: Some("bullnose".to_string()),
            sink_cutouts: Some(1),
            backsplash_lf: Some(Decimal::from(12)),
            base_lf: None,
            wall_lf: None,
            tall_units: None,
            drawer_stacks: None,
            zipcode: Some("30301".to_string()),
            website_id: None,
            session_id: None,
        }
    }

    async fn response_quote(response: axum::response::Response) -> Quote {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body should be readable");
        serde_json::from_slice(&bytes).expect("response should decode as a quote")
    }

    #[tokio::test]
    async fn missing_bearer_token_is_unauthorized() {
        let response = build_unified(
            State(app_state()),
            HeaderMap::new(),
            Ok(Json(countertop_body())),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn mismatched_bearer_token_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer wrong-token"));

        let response =
            build_unified(State(app_state()), headers, Ok(Json(countertop_body()))).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_category_is_a_bad_request() {
        let body = BuildUnifiedRequest { category: "kitchen".to_string(), ..countertop_body() };

        let response = build_unified(State(app_state()), authed_headers(), Ok(Json(body))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn negative_measurement_is_a_bad_request() {
        let body = BuildUnifiedRequest { sqft: Some(Decimal::from(-1)), ..countertop_body() };

        let response = build_unified(State(app_state()), authed_headers(), Ok(Json(body))).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn countertop_request_builds_the_published_example() {
        let response = build_unified(
            State(app_state()),
            authed_headers(),
            Ok(Json(countertop_body())),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let quote = response_quote(response).await;

        assert_eq!(quote.subtotal, Decimal::from(4775));
        assert_eq!(quote.tax, Decimal::new(40588, 2));
        assert_eq!(quote.total, Decimal::new(518088, 2));
        assert!(quote.quote_id.0.starts_with("UQ"));
        assert_eq!(quote.line_items.len(), 5);
    }

    #[tokio::test]
    async fn combo_request_carries_a_trailing_discount_line() {
        let body = BuildUnifiedRequest {
            category: "combo".to_string(),
            base_lf: Some(Decimal::from(10)),
            ..countertop_body()
        };

        let response = build_unified(State(app_state()), authed_headers(), Ok(Json(body))).await;

        assert_eq!(response.status(), StatusCode::OK);
        let quote = response_quote(response).await;

        let last = quote.line_items.last().expect("combo quote should have items");
        assert_eq!(last.label, "Combo Discount (10%)");
        assert!(last.total < Decimal::ZERO);
        assert_eq!(quote.estimated_completion, "4-6 weeks");
        assert_eq!(quote.total, quote.subtotal + quote.tax);
    }
}
