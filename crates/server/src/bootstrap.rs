use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use tracing::info;

use fabquote_chat::ChatPipeline;
use fabquote_core::config::{AppConfig, ConfigError, LoadOptions};
use fabquote_upstream::{
    HttpQuoteSink, HttpRateProvider, LocalQuoteSink, QuoteSink, RateProvider, StaticRateProvider,
};

/// Everything the request handlers need, constructed once at startup and
/// cloned into each handler. Providers are explicit injected handles, not
/// lazily initialized globals.
#[derive(Clone)]
pub struct AppState {
    pub auth_token: SecretString,
    pub rates: Arc<dyn RateProvider>,
    pub sink: Arc<dyn QuoteSink>,
    pub chat: Arc<ChatPipeline>,
    pub pricing_source: &'static str,
}

pub struct Application {
    pub config: AppConfig,
    pub state: AppState,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client construction failed: {0}")]
    HttpClient(#[source] reqwest::Error),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    let timeout = Duration::from_secs(config.upstream.timeout_secs);

    let (rates, pricing_source): (Arc<dyn RateProvider>, &'static str) =
        match &config.upstream.pricing_base_url {
            Some(base_url) => {
                let provider = HttpRateProvider::new(
                    base_url.clone(),
                    config.upstream.pricing_token.clone(),
                    timeout,
                )
                .map_err(BootstrapError::HttpClient)?;
                (Arc::new(provider), "remote")
            }
            None => (Arc::new(StaticRateProvider), "builtin"),
        };

    let sink: Arc<dyn QuoteSink> = match &config.upstream.quote_service_url {
        Some(url) => Arc::new(
            HttpQuoteSink::new(url.clone(), config.upstream.quote_service_token.clone(), timeout)
                .map_err(BootstrapError::HttpClient)?,
        ),
        None => Arc::new(LocalQuoteSink),
    };

    let chat = Arc::new(ChatPipeline::new(
        rates.clone(),
        sink.clone(),
        config.upstream.quote_view_base_url.clone(),
    ));

    info!(
        event_name = "system.bootstrap.ready",
        pricing_source, "application bootstrap complete"
    );

    Ok(Application {
        state: AppState {
            auth_token: config.auth.internal_token.clone(),
            rates,
            sink,
            chat,
            pricing_source,
        },
        config,
    })
}

#[cfg(test)]
mod tests {
    use fabquote_core::config::{ConfigOverrides, LoadOptions};

    use super::bootstrap;

    #[test]
    fn bootstrap_fails_fast_without_an_internal_token() {
        let result = bootstrap(LoadOptions::default());

        let message = match result {
            Ok(_) => panic!("bootstrap should fail without an internal token"),
            Err(error) => error.to_string(),
        };
        assert!(message.contains("auth.internal_token"));
    }

    #[test]
    fn bootstrap_selects_builtin_pricing_without_an_upstream_url() {
        let app = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                internal_token: Some("test-token".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .expect("bootstrap should succeed with a token override");

        assert_eq!(app.state.pricing_source, "builtin");
    }

    #[test]
    fn bootstrap_selects_remote_pricing_when_configured() {
        let app = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                internal_token: Some("test-token".to_string()),
                pricing_base_url: Some("https://pricing.internal.test".to_string()),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        })
        .expect("bootstrap should succeed with remote pricing configured");

        assert_eq!(app.state.pricing_source, "remote");
    }
}
