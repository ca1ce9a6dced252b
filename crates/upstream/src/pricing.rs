use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::warn;

use fabquote_core::pricing::rates::{
    CabinetRates, CabinetRatesPatch, ComboRates, ComboRatesPatch, CountertopRates,
    CountertopRatesPatch, RateBook,
};
use fabquote_core::QuoteCategory;

use crate::error::UpstreamError;

/// Source of per-category pricing profiles. Implementations must always
/// return a usable profile; unavailability degrades to the built-in tables
/// rather than erroring.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn countertop_rates(&self) -> CountertopRates;
    async fn cabinet_rates(&self) -> CabinetRates;
    async fn combo_rates(&self) -> ComboRates;
}

/// Offline provider serving the built-in fallback tables. Used when no
/// pricing service is configured, and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticRateProvider;

#[async_trait]
impl RateProvider for StaticRateProvider {
    async fn countertop_rates(&self) -> CountertopRates {
        CountertopRates::fallback()
    }

    async fn cabinet_rates(&self) -> CabinetRates {
        CabinetRates::fallback()
    }

    async fn combo_rates(&self) -> ComboRates {
        ComboRates::fallback()
    }
}

/// Live provider fetching `GET {base}/pricing/{category}` with a bearer
/// token. Partial responses merge over the fallback table so the resulting
/// profile always has the full key set.
pub struct HttpRateProvider {
    client: reqwest::Client,
    base_url: String,
    token: Option<SecretString>,
}

impl HttpRateProvider {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<SecretString>,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url: base_url.into(), token })
    }

    async fn fetch_patch<P: DeserializeOwned>(
        &self,
        category: QuoteCategory,
    ) -> Result<P, UpstreamError> {
        let url = format!("{}/pricing/{category}", self.base_url.trim_end_matches('/'));
        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(UpstreamError::Status { status: response.status() });
        }

        // The service may wrap the profile in `{"profile": ...}` or return
        // it directly; accept both.
        let body: serde_json::Value = response.json().await?;
        let profile = match body.get("profile") {
            Some(profile) => profile.clone(),
            None => body,
        };
        serde_json::from_value(profile).map_err(|error| UpstreamError::Decode(error.to_string()))
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn countertop_rates(&self) -> CountertopRates {
        match self.fetch_patch::<CountertopRatesPatch>(QuoteCategory::Countertop).await {
            Ok(patch) => CountertopRates::merged(patch),
            Err(error) => {
                warn!(
                    event_name = "pricing.fetch_failed",
                    category = "countertop",
                    error = %error,
                    "falling back to built-in countertop rates"
                );
                CountertopRates::fallback()
            }
        }
    }

    async fn cabinet_rates(&self) -> CabinetRates {
        match self.fetch_patch::<CabinetRatesPatch>(QuoteCategory::Cabinet).await {
            Ok(patch) => CabinetRates::merged(patch),
            Err(error) => {
                warn!(
                    event_name = "pricing.fetch_failed",
                    category = "cabinet",
                    error = %error,
                    "falling back to built-in cabinet rates"
                );
                CabinetRates::fallback()
            }
        }
    }

    async fn combo_rates(&self) -> ComboRates {
        match self.fetch_patch::<ComboRatesPatch>(QuoteCategory::Combo).await {
            Ok(patch) => ComboRates::merged(patch),
            Err(error) => {
                warn!(
                    event_name = "pricing.fetch_failed",
                    category = "combo",
                    error = %error,
                    "falling back to built-in combo rates"
                );
                ComboRates::fallback()
            }
        }
    }
}

/// Resolve the rate book a request needs. Single-category requests fetch
/// only their own profile; combo requests issue all three fetches
/// concurrently, with no ordering dependency between them.
pub async fn resolve_rate_book(provider: &dyn RateProvider, category: QuoteCategory) -> RateBook {
    match category {
        QuoteCategory::Countertop => RateBook {
            countertop: provider.countertop_rates().await,
            ..RateBook::fallback()
        },
        QuoteCategory::Cabinet => {
            RateBook { cabinet: provider.cabinet_rates().await, ..RateBook::fallback() }
        }
        QuoteCategory::Combo => {
            let (countertop, cabinet, combo) = tokio::join!(
                provider.countertop_rates(),
                provider.cabinet_rates(),
                provider.combo_rates()
            );
            RateBook { countertop, cabinet, combo }
        }
    }
}
