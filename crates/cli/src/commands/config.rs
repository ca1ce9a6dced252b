use fabquote_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line("server.bind_address", &config.server.bind_address));
    lines.push(render_line("server.port", &config.server.port.to_string()));
    lines.push(render_line("auth.internal_token", "<redacted>"));
    lines.push(render_line(
        "upstream.pricing_base_url",
        &render_optional(config.upstream.pricing_base_url.as_deref()),
    ));
    lines.push(render_line(
        "upstream.pricing_token",
        if config.upstream.pricing_token.is_some() { "<redacted>" } else { "<unset>" },
    ));
    lines.push(render_line(
        "upstream.quote_service_url",
        &render_optional(config.upstream.quote_service_url.as_deref()),
    ));
    lines.push(render_line(
        "upstream.quote_service_token",
        if config.upstream.quote_service_token.is_some() { "<redacted>" } else { "<unset>" },
    ));
    lines.push(render_line(
        "upstream.quote_view_base_url",
        &render_optional(config.upstream.quote_view_base_url.as_deref()),
    ));
    lines.push(render_line(
        "upstream.timeout_secs",
        &config.upstream.timeout_secs.to_string(),
    ));
    lines.push(render_line("logging.level", &config.logging.level));
    lines.push(render_line("logging.format", &format!("{:?}", config.logging.format)));

    lines.join("\n")
}

fn render_line(key: &str, value: &str) -> String {
    format!("  {key:<32} = {value}")
}

fn render_optional(value: Option<&str>) -> String {
    value.unwrap_or("<unset>").to_string()
}
