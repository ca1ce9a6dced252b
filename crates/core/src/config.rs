use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub upstream: UpstreamConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Shared bearer token callers of `/quotes/build-unified` must present.
    pub internal_token: SecretString,
}

#[derive(Clone, Debug)]
pub struct UpstreamConfig {
    pub pricing_base_url: Option<String>,
    pub pricing_token: Option<SecretString>,
    pub quote_service_url: Option<String>,
    pub quote_service_token: Option<SecretString>,
    pub quote_view_base_url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub internal_token: Option<String>,
    pub pricing_base_url: Option<String>,
    pub quote_service_url: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig { bind_address: "127.0.0.1".to_string(), port: 8080 },
            auth: AuthConfig { internal_token: String::new().into() },
            upstream: UpstreamConfig {
                pricing_base_url: None,
                pricing_token: None,
                quote_service_url: None,
                quote_service_token: None,
                quote_view_base_url: None,
                timeout_secs: 10,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("fabquote.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
        }

        if let Some(auth) = patch.auth {
            if let Some(internal_token_value) = auth.internal_token {
                self.auth.internal_token = internal_token_value.into();
            }
        }

        if let Some(upstream) = patch.upstream {
            if let Some(pricing_base_url) = upstream.pricing_base_url {
                self.upstream.pricing_base_url = Some(pricing_base_url);
            }
            if let Some(pricing_token_value) = upstream.pricing_token {
                self.upstream.pricing_token = Some(pricing_token_value.into());
            }
            if let Some(quote_service_url) = upstream.quote_service_url {
                self.upstream.quote_service_url = Some(quote_service_url);
            }
            if let Some(quote_service_token_value) = upstream.quote_service_token {
                self.upstream.quote_service_token = Some(quote_service_token_value.into());
            }
            if let Some(quote_view_base_url) = upstream.quote_view_base_url {
                self.upstream.quote_view_base_url = Some(quote_view_base_url);
            }
            if let Some(timeout_secs) = upstream.timeout_secs {
                self.upstream.timeout_secs = timeout_secs;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("FABQUOTE_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("FABQUOTE_SERVER_PORT") {
            self.server.port = parse_u16("FABQUOTE_SERVER_PORT", &value)?;
        }

        if let Some(value) = read_env("FABQUOTE_AUTH_INTERNAL_TOKEN") {
            self.auth.internal_token = value.into();
        }

        if let Some(value) = read_env("FABQUOTE_UPSTREAM_PRICING_BASE_URL") {
            self.upstream.pricing_base_url = Some(value);
        }
        if let Some(value) = read_env("FABQUOTE_UPSTREAM_PRICING_TOKEN") {
            self.upstream.pricing_token = Some(value.into());
        }
        if let Some(value) = read_env("FABQUOTE_UPSTREAM_QUOTE_SERVICE_URL") {
            self.upstream.quote_service_url = Some(value);
        }
        if let Some(value) = read_env("FABQUOTE_UPSTREAM_QUOTE_SERVICE_TOKEN") {
            self.upstream.quote_service_token = Some(value.into());
        }
        if let Some(value) = read_env("FABQUOTE_UPSTREAM_QUOTE_VIEW_BASE_URL") {
            self.upstream.quote_view_base_url = Some(value);
        }
        if let Some(value) = read_env("FABQUOTE_UPSTREAM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = parse_u64("FABQUOTE_UPSTREAM_TIMEOUT_SECS", &value)?;
        }

        let log_level =
            read_env("FABQUOTE_LOGGING_LEVEL").or_else(|| read_env("FABQUOTE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("FABQUOTE_LOGGING_FORMAT").or_else(|| read_env("FABQUOTE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(internal_token) = overrides.internal_token {
            self.auth.internal_token = internal_token.into();
        }
        if let Some(pricing_base_url) = overrides.pricing_base_url {
            self.upstream.pricing_base_url = Some(pricing_base_url);
        }
        if let Some(quote_service_url) = overrides.quote_service_url {
            self.upstream.quote_service_url = Some(quote_service_url);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_server(&self.server)?;
        validate_auth(&self.auth)?;
        validate_upstream(&self.upstream)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("fabquote.toml"), PathBuf::from("config/fabquote.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.bind_address.trim().is_empty() {
        return Err(ConfigError::Validation("server.bind_address must not be empty".to_string()));
    }

    if server.port == 0 {
        return Err(ConfigError::Validation(
            "server.port must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_auth(auth: &AuthConfig) -> Result<(), ConfigError> {
    if auth.internal_token.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "auth.internal_token is required; set it in fabquote.toml or \
             FABQUOTE_AUTH_INTERNAL_TOKEN"
                .to_string(),
        ));
    }

    Ok(())
}

fn validate_upstream(upstream: &UpstreamConfig) -> Result<(), ConfigError> {
    for (key, url) in [
        ("upstream.pricing_base_url", &upstream.pricing_base_url),
        ("upstream.quote_service_url", &upstream.quote_service_url),
        ("upstream.quote_view_base_url", &upstream.quote_view_base_url),
    ] {
        if let Some(url) = url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "{key} must start with http:// or https://"
                )));
            }
        }
    }

    if upstream.timeout_secs == 0 || upstream.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "upstream.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    server: Option<ServerPatch>,
    auth: Option<AuthPatch>,
    upstream: Option<UpstreamPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct AuthPatch {
    internal_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamPatch {
    pricing_base_url: Option<String>,
    pricing_token: Option<String>,
    quote_service_url: Option<String>,
    quote_service_token: Option<String>,
    quote_view_base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
